use bevy_ecs::prelude::Resource;

/// Simulated time advanced once per frame by the registry.
///
/// Lives in the registry's world as a resource.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Seconds simulated since the session started.
    pub elapsed: f32,
    /// Step of the most recent frame, in seconds.
    pub delta: f32,
    /// Frames simulated since the session started.
    pub frame_count: u64,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    /// Record one frame of `dt` seconds and return the scaled step.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let scaled = dt * self.time_scale;
        self.delta = scaled;
        self.elapsed += scaled;
        self.frame_count += 1;
        scaled
    }
}
