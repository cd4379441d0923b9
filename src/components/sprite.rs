use bevy_ecs::prelude::Component;

/// Static image drawn stretched over the entity's bounds.
///
/// An entity that also carries an [`Animation`](crate::components::animation::Animation)
/// draws the animation's current frame instead.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub image_key: String,
}

impl Sprite {
    pub fn new(image_key: impl Into<String>) -> Self {
        Self {
            image_key: image_key.into(),
        }
    }

    /// Swap the image; takes effect on the next draw.
    pub fn set_image(&mut self, image_key: impl Into<String>) {
        self.image_key = image_key.into();
    }
}
