//! Entity handles and the builder used to register new entities.

use std::fmt;

use bevy_ecs::entity::Entity;

use crate::components::animation::{Animation, MotionSet};
use crate::components::behavior::{Behavior, EntityBehavior};
use crate::components::body::Body;
use crate::components::label::Label;
use crate::components::rect::Rect;
use crate::components::sprite::Sprite;

/// Stable handle to a registered entity.
///
/// Ids are never reused for a different entity: a handle to a removed entity
/// simply stops resolving.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) Entity);

impl EntityId {
    pub(crate) fn entity(self) -> Entity {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Everything needed to register one entity.
///
/// Consumed by [`Registry::add`](crate::registry::Registry::add).
pub struct EntityBuilder {
    pub(crate) body: Body,
    pub(crate) sprite: Option<Sprite>,
    pub(crate) animation: Option<Animation>,
    pub(crate) label: Option<Label>,
    pub(crate) behavior: Option<Behavior>,
}

impl EntityBuilder {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            sprite: None,
            animation: None,
            label: None,
            behavior: None,
        }
    }

    /// Image entity with its upper-left corner at `(x, y)`.
    pub fn sprite(
        name: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image_key: impl Into<String>,
    ) -> Self {
        Self::new(Body::new(name, Rect::from_xywh(x, y, width, height))).image(image_key)
    }

    /// Text entity centered on `(cx, cy)`.
    pub fn text(
        name: impl Into<String>,
        content: impl Into<String>,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self::new(Body::new(name, Rect::from_center(cx, cy, width, height)))
            .label(Label::new(content))
    }

    pub fn image(mut self, image_key: impl Into<String>) -> Self {
        self.sprite = Some(Sprite::new(image_key));
        self
    }

    pub fn motions(mut self, motions: MotionSet) -> Self {
        self.animation = Some(Animation::new(motions));
        self
    }

    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn behavior(mut self, behavior: impl EntityBehavior) -> Self {
        self.behavior = Some(Behavior::new(behavior));
        self
    }

    /// Adjust the body in place, for the builder-style `Body` setters.
    pub fn with_body(mut self, f: impl FnOnce(Body) -> Body) -> Self {
        self.body = f(self.body);
        self
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }
}

impl From<Body> for EntityBuilder {
    fn from(body: Body) -> Self {
        Self::new(body)
    }
}
