//! Input events queued by the platform thread for the frame worker.
//!
//! Pointer coordinates arrive normalized to `[0, 1]` across the surface; the
//! registry scales them by the world size before dispatching. Gesture
//! classification (down vs. fling vs. scroll) is the producer's job.

/// Gamepad buttons a level can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    Start,
    Select,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    /// Any other platform key code.
    Other(u32),
}

/// Latest analog stick positions, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickAxes {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Finger down at a point.
    Down { x: f32, y: f32 },
    /// Quick swipe starting at `(x, y)`; `(dx, dy)` is the fling velocity.
    Fling { x: f32, y: f32, dx: f32, dy: f32 },
    /// Deliberate drag from `(x, y)`; `finished` is set on the final event when the finger lifts.
    Scroll {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        finished: bool,
    },
    LongPress { x: f32, y: f32 },
    ButtonDown(Button),
    ButtonUp(Button),
    Joystick(JoystickAxes),
}

impl InputEvent {
    /// Build a pointer event from surface pixel coordinates.
    pub fn down_at_pixel(px: f32, py: f32, surface_width: f32, surface_height: f32) -> Self {
        let (x, y) = normalize(px, py, surface_width, surface_height);
        InputEvent::Down { x, y }
    }
}

/// Map surface pixels to `[0, 1]`. A zero-sized surface maps to the origin.
pub fn normalize(px: f32, py: f32, surface_width: f32, surface_height: f32) -> (f32, f32) {
    let nx = if surface_width > 0.0 { px / surface_width } else { 0.0 };
    let ny = if surface_height > 0.0 { py / surface_height } else { 0.0 };
    (nx, ny)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(50.0, 25.0, 100.0, 100.0), (0.5, 0.25));
        assert_eq!(normalize(50.0, 25.0, 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_down_at_pixel() {
        assert_eq!(
            InputEvent::down_at_pixel(400.0, 300.0, 800.0, 600.0),
            InputEvent::Down { x: 0.5, y: 0.5 }
        );
    }
}
