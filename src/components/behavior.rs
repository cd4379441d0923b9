//! Per-instance behavior attached to an entity.
//!
//! Game-specific logic is not expressed by subclassing: an entity carries an
//! optional boxed [`EntityBehavior`] whose hooks the registry calls with
//! mutable access to itself and the id of the entity being driven. For
//! one-off behaviors (a button that reacts to a tap, a ball that croaks on
//! impact) [`FnBehavior`] wraps plain closures.
//!
//! While a hook runs, the behavior is taken out of its [`Behavior`] component,
//! so a hook may freely add, remove or mutate any entity, including its own.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::body::Body;
use crate::entity::EntityId;
use crate::registry::Registry;
use crate::resources::rendertarget::Canvas;

/// Hooks invoked by the registry. Every method has a do-nothing default.
pub trait EntityBehavior: Send + Sync + 'static {
    /// Called once per tick after physics has moved the entity.
    fn on_update(&mut self, _registry: &mut Registry, _me: EntityId, _dt: f32) {}

    /// Called when this entity lands on a solid or a falling entity lands on it.
    fn on_collision(&mut self, _registry: &mut Registry, _me: EntityId, _other: EntityId) {}

    /// A tap inside the entity's bounds, in world units.
    fn on_touch(&mut self, _registry: &mut Registry, _me: EntityId, _x: f32, _y: f32) {}

    /// A fling that started inside the entity's bounds.
    fn on_fling(
        &mut self,
        _registry: &mut Registry,
        _me: EntityId,
        _x: f32,
        _y: f32,
        _dx: f32,
        _dy: f32,
    ) {
    }

    fn on_long_press(&mut self, _registry: &mut Registry, _me: EntityId, _x: f32, _y: f32) {}

    /// Extra drawing after the entity's sprite and label. `scale` maps world
    /// units to canvas pixels.
    fn draw(&mut self, _body: &Body, _canvas: &mut dyn Canvas, _scale: Vec2) {}
}

/// Holder component. `None` only while a hook is running.
#[derive(Component)]
pub struct Behavior {
    pub(crate) hooks: Option<Box<dyn EntityBehavior>>,
}

impl Behavior {
    pub fn new(behavior: impl EntityBehavior) -> Self {
        Self {
            hooks: Some(Box::new(behavior)),
        }
    }

    pub fn from_boxed(behavior: Box<dyn EntityBehavior>) -> Self {
        Self {
            hooks: Some(behavior),
        }
    }
}

type UpdateFn = Box<dyn FnMut(&mut Registry, EntityId, f32) + Send + Sync>;
type CollisionFn = Box<dyn FnMut(&mut Registry, EntityId, EntityId) + Send + Sync>;
type PointFn = Box<dyn FnMut(&mut Registry, EntityId, f32, f32) + Send + Sync>;
type FlingFn = Box<dyn FnMut(&mut Registry, EntityId, f32, f32, f32, f32) + Send + Sync>;

/// Closure-backed behavior; unset hooks do nothing.
#[derive(Default)]
pub struct FnBehavior {
    update: Option<UpdateFn>,
    collision: Option<CollisionFn>,
    touch: Option<PointFn>,
    fling: Option<FlingFn>,
    long_press: Option<PointFn>,
}

impl FnBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when_updated(
        mut self,
        f: impl FnMut(&mut Registry, EntityId, f32) + Send + Sync + 'static,
    ) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn when_collided(
        mut self,
        f: impl FnMut(&mut Registry, EntityId, EntityId) + Send + Sync + 'static,
    ) -> Self {
        self.collision = Some(Box::new(f));
        self
    }

    pub fn when_touched(
        mut self,
        f: impl FnMut(&mut Registry, EntityId, f32, f32) + Send + Sync + 'static,
    ) -> Self {
        self.touch = Some(Box::new(f));
        self
    }

    pub fn when_flung(
        mut self,
        f: impl FnMut(&mut Registry, EntityId, f32, f32, f32, f32) + Send + Sync + 'static,
    ) -> Self {
        self.fling = Some(Box::new(f));
        self
    }

    pub fn when_long_pressed(
        mut self,
        f: impl FnMut(&mut Registry, EntityId, f32, f32) + Send + Sync + 'static,
    ) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }
}

impl EntityBehavior for FnBehavior {
    fn on_update(&mut self, registry: &mut Registry, me: EntityId, dt: f32) {
        if let Some(f) = self.update.as_mut() {
            f(registry, me, dt);
        }
    }

    fn on_collision(&mut self, registry: &mut Registry, me: EntityId, other: EntityId) {
        if let Some(f) = self.collision.as_mut() {
            f(registry, me, other);
        }
    }

    fn on_touch(&mut self, registry: &mut Registry, me: EntityId, x: f32, y: f32) {
        if let Some(f) = self.touch.as_mut() {
            f(registry, me, x, y);
        }
    }

    fn on_fling(&mut self, registry: &mut Registry, me: EntityId, x: f32, y: f32, dx: f32, dy: f32) {
        if let Some(f) = self.fling.as_mut() {
            f(registry, me, x, y, dx, dy);
        }
    }

    fn on_long_press(&mut self, registry: &mut Registry, me: EntityId, x: f32, y: f32) {
        if let Some(f) = self.long_press.as_mut() {
            f(registry, me, x, y);
        }
    }
}
