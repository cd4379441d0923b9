//! Kinematic body: the physical state every registered entity carries.
//!
//! The [`Body`] component holds an entity's name, bounding rectangle, velocity,
//! gravity acceleration, physics flags and lifetime bookkeeping, plus the
//! movement primitives game content uses directly (`hop`, `hop_toward`,
//! `move_by`, ...). Per-tick integration and collision response live in
//! [`crate::systems::physics`].
//!
//! `name`, `solid` and `z_order` are mirrored by the registry's derived
//! indices, so once the entity is registered the name is fixed and the flags
//! can only be changed through [`Registry::set_solid`] and
//! [`Registry::set_z_order`].
//!
//! [`Registry::set_solid`]: crate::registry::Registry::set_solid
//! [`Registry::set_z_order`]: crate::registry::Registry::set_z_order

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::collisionshape::ConvexShape;
use crate::components::rect::Rect;

/// Gravity applied to bodies that feel gravity, in world units per second squared.
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 600.0);

#[derive(Component, Debug, Clone)]
pub struct Body {
    /// Unique among live entities. Empty names are replaced on registration.
    pub(crate) name: String,
    /// Bounding rectangle in world units.
    pub bounds: Rect,
    /// World units per second.
    pub velocity: Vec2,
    /// Acceleration integrated into `velocity` while `feels_gravity` is set.
    pub gravity: Vec2,
    pub bouncy: bool,
    pub feels_gravity: bool,
    pub auto_die_offscreen: bool,
    pub(crate) solid: bool,
    pub(crate) z_order: i32,
    removal_requested: bool,
    time_on_screen: f32,
    max_lifetime: Option<f32>,
    shape: Option<ConvexShape>,
}

impl Body {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
            velocity: Vec2::ZERO,
            gravity: DEFAULT_GRAVITY,
            bouncy: false,
            feels_gravity: false,
            auto_die_offscreen: false,
            solid: false,
            z_order: 0,
            removal_requested: false,
            time_on_screen: 0.0,
            max_lifetime: None,
            shape: None,
        }
    }

    // ---------- builder-style setters, used before registration ----------

    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.velocity = Vec2::new(dx, dy);
        self
    }

    pub fn with_gravity(mut self, ddx: f32, ddy: f32) -> Self {
        self.gravity = Vec2::new(ddx, ddy);
        self.feels_gravity = true;
        self
    }

    pub fn feeling_gravity(mut self) -> Self {
        self.feels_gravity = true;
        self
    }

    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    pub fn bouncy(mut self) -> Self {
        self.bouncy = true;
        self
    }

    pub fn dying_offscreen(mut self) -> Self {
        self.auto_die_offscreen = true;
        self
    }

    pub fn with_z_order(mut self, z: i32) -> Self {
        self.z_order = z;
        self
    }

    pub fn with_max_lifetime(mut self, seconds: f32) -> Self {
        self.set_max_lifetime(seconds);
        self
    }

    pub fn with_shape(mut self, shape: ConvexShape) -> Self {
        self.shape = Some(shape);
        self
    }

    // ---------- flags and bookkeeping ----------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn request_removal(&mut self) {
        self.removal_requested = true;
    }

    pub fn removal_requested(&self) -> bool {
        self.removal_requested
    }

    /// Seconds this entity has been updated for.
    pub fn time_on_screen(&self) -> f32 {
        self.time_on_screen
    }

    /// Request removal once the entity has been on screen longer than `seconds`.
    /// A non-positive value disables the limit.
    pub fn set_max_lifetime(&mut self, seconds: f32) {
        self.max_lifetime = (seconds > 0.0).then_some(seconds);
    }

    pub fn max_lifetime(&self) -> Option<f32> {
        self.max_lifetime
    }

    /// Advance the on-screen clock and request removal when the lifetime is exceeded.
    pub(crate) fn age(&mut self, dt: f32) {
        self.time_on_screen += dt;
        if let Some(limit) = self.max_lifetime
            && self.time_on_screen > limit
        {
            self.request_removal();
        }
    }

    // ---------- collision shape ----------

    /// Override the default box shape with a custom convex outline, in local
    /// coordinates relative to the bounds center.
    pub fn set_shape(&mut self, shape: ConvexShape) {
        self.shape = Some(shape);
    }

    pub fn clear_shape(&mut self) {
        self.shape = None;
    }

    pub fn has_custom_shape(&self) -> bool {
        self.shape.is_some()
    }

    /// The custom shape, or a box derived from the current bounds.
    pub fn collision_shape(&self) -> ConvexShape {
        match &self.shape {
            Some(shape) => shape.clone(),
            None => ConvexShape::from_rect(&self.bounds),
        }
    }

    /// Exact convex overlap test between the two bodies' shapes, each placed at
    /// its bounds center.
    pub fn collides_with(&self, other: &Body) -> bool {
        self.collision_shape().collide_with(
            &other.collision_shape(),
            self.bounds.center(),
            other.bounds.center(),
        )
    }

    // ---------- movement primitives ----------

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.bounds.offset(dx, dy);
    }

    /// Instantaneous displacement of `distance` toward `direction` degrees
    /// (0 = +x, 90 = +y which is down on screen).
    pub fn hop(&mut self, distance: f32, direction: f32) {
        let radians = direction.to_radians();
        self.bounds
            .offset(distance * radians.cos(), distance * radians.sin());
    }

    /// Move the center `distance` along the straight line to `(x, y)`, landing
    /// exactly on the target instead of overshooting it.
    pub fn hop_toward(&mut self, distance: f32, x: f32, y: f32) {
        let center = self.bounds.center();
        let delta = Vec2::new(x, y) - center;
        let remaining = delta.length();
        if distance < remaining {
            let step = delta * (distance / remaining);
            self.bounds.offset(step.x, step.y);
        } else {
            self.bounds.center_on(x, y);
        }
    }

    pub fn set_center(&mut self, x: f32, y: f32) {
        self.bounds.center_on(x, y);
    }

    pub fn set_upper_left(&mut self, x: f32, y: f32) {
        self.bounds.offset_to(x, y);
    }

    /// Resize around the upper-left corner.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.bounds.right = self.bounds.left + width;
        self.bounds.bottom = self.bounds.top + height;
    }

    pub fn set_velocity(&mut self, dx: f32, dy: f32) {
        self.velocity = Vec2::new(dx, dy);
    }

    // ---------- spatial queries ----------

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains_point(x, y)
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    /// True when this body lies entirely inside `other`.
    pub fn is_inside(&self, other: &Body) -> bool {
        other.bounds.contains_rect(&self.bounds)
    }

    /// First body in `others` whose bounds intersect this one.
    pub fn intersects_any<'a, I>(&self, others: I) -> Option<&'a Body>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        others.into_iter().find(|other| self.intersects(other))
    }
}
