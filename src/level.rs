//! Swappable game content and background scenes.
//!
//! A [`Level`] is activated by [`Registry::set_level`]; the switch happens at
//! the start of the next frame. Hooks receive the registry mutably. While a
//! level hook runs, the level itself is detached from the registry, so calls
//! such as `set_level` from inside a hook only record the next level.
//!
//! Input hooks follow a claim chain: `on_any_*` sees the event first and
//! returns `true` to swallow it; otherwise the first entity under the pointer
//! gets it; otherwise `on_unclaimed_*` does.
//!
//! [`Registry::set_level`]: crate::registry::Registry::set_level

use crate::error::EngineError;
use crate::events::input::{Button, JoystickAxes};
use crate::registry::Registry;
use crate::resources::imagestore::ImageStore;
use crate::resources::rendertarget::{Canvas, Color};
use crate::components::rect::Rect;

pub trait Level: Send {
    /// Called once when the level becomes active. Entities added here are
    /// updated in the same frame.
    fn setup(&mut self, _registry: &mut Registry) {}

    /// Called every frame after all entities have been updated.
    fn update(&mut self, _registry: &mut Registry, _dt: f32) {}

    /// Called once before the next level's `setup`, while this level's
    /// entities are still registered.
    fn finish(&mut self, _registry: &mut Registry) {}

    /// First look at every tap. Return `true` to swallow it.
    fn on_any_touch(&mut self, _registry: &mut Registry, _x: f32, _y: f32) -> bool {
        false
    }

    /// A tap that no entity claimed.
    fn on_unclaimed_touch(&mut self, _registry: &mut Registry, _x: f32, _y: f32) {}

    fn on_any_fling(
        &mut self,
        _registry: &mut Registry,
        _x: f32,
        _y: f32,
        _dx: f32,
        _dy: f32,
    ) -> bool {
        false
    }

    fn on_unclaimed_fling(&mut self, _registry: &mut Registry, _x: f32, _y: f32, _dx: f32, _dy: f32) {
    }

    /// Every scroll event goes here; the last one of a drag has `finished` set.
    fn on_unclaimed_scroll(
        &mut self,
        _registry: &mut Registry,
        _x: f32,
        _y: f32,
        _dx: f32,
        _dy: f32,
        _finished: bool,
    ) {
    }

    fn on_any_long_press(&mut self, _registry: &mut Registry, _x: f32, _y: f32) -> bool {
        false
    }

    fn on_unclaimed_long_press(&mut self, _registry: &mut Registry, _x: f32, _y: f32) {}

    fn on_button_down(&mut self, _registry: &mut Registry, _button: Button) {}

    fn on_button_up(&mut self, _registry: &mut Registry, _button: Button) {}

    /// New stick positions. The registry has already cached them.
    fn on_joystick(&mut self, _registry: &mut Registry, _axes: JoystickAxes) {}
}

/// Background drawn under every entity.
pub trait Scene: Send {
    fn draw(&mut self, canvas: &mut dyn Canvas, images: &mut ImageStore);
}

/// Fills the canvas with one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColorScene {
    pub color: Color,
}

impl SolidColorScene {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// From a `#rrggbb` string.
    pub fn from_hex(hex: &str) -> Result<Self, EngineError> {
        Ok(Self::new(Color::parse_hex(hex)?))
    }
}

impl Scene for SolidColorScene {
    fn draw(&mut self, canvas: &mut dyn Canvas, _images: &mut ImageStore) {
        canvas.fill(self.color);
    }
}

/// Stretches one image over the whole canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImageScene {
    pub image_key: String,
}

impl BackgroundImageScene {
    pub fn new(image_key: impl Into<String>) -> Self {
        Self {
            image_key: image_key.into(),
        }
    }

    pub fn set_image(&mut self, image_key: impl Into<String>) {
        self.image_key = image_key.into();
    }
}

impl Scene for BackgroundImageScene {
    fn draw(&mut self, canvas: &mut dyn Canvas, images: &mut ImageStore) {
        if let Some(image) = images.get(&self.image_key) {
            let dest = Rect::new(0.0, 0.0, canvas.width(), canvas.height());
            canvas.draw_image(&image, dest);
        }
    }
}
