//! Per-entity motion integration and rectangle collision response.
//!
//! Each tick a body ages, feels gravity, and moves by `velocity * dt`. The
//! move is checked against every solid in registration order. A body falling
//! onto a solid it was above comes to rest exactly on the solid's top edge
//! (or bounces off a bouncy one). Only downward landings are resolved; other
//! overlaps pass through.

use bevy_ecs::entity::Entity;
use glam::Vec2;
use log::trace;
use smallvec::SmallVec;

use crate::components::body::Body;
use crate::registry::Registry;

/// Advance one body by `dt` seconds.
///
/// Returns the solids it landed on this tick so the caller can run collision
/// hooks once the body has been written back.
pub(crate) fn step_body(registry: &mut Registry, entity: Entity, dt: f32) -> SmallVec<[Entity; 4]> {
    let mut contacts = SmallVec::new();

    let (previous, velocity) = {
        let Some(mut body) = registry.world.get_mut::<Body>(entity) else {
            return contacts;
        };
        body.age(dt);
        if body.feels_gravity {
            let gravity = body.gravity;
            body.velocity += gravity * dt;
        }
        (body.bounds, body.velocity)
    };

    if velocity != Vec2::ZERO {
        let mut candidate = previous.offset_by(velocity * dt);
        let mut vy = velocity.y;
        for &solid in &registry.solids {
            if solid == entity {
                continue;
            }
            let Some(obstacle) = registry.world.get::<Body>(solid) else {
                continue;
            };
            let top = obstacle.bounds.top;
            if vy > 0.0 && previous.top < top && candidate.intersects(&obstacle.bounds) {
                candidate.bottom = top;
                candidate.top = top - previous.height();
                vy = if obstacle.bouncy { -vy } else { 0.0 };
                trace!("entity {} landed on {} (vy -> {})", entity, solid, vy);
                contacts.push(solid);
            }
        }
        if let Some(mut body) = registry.world.get_mut::<Body>(entity) {
            body.bounds = candidate;
            body.velocity.y = vy;
        }
    }

    let world_bounds = registry.world_bounds;
    if let Some(mut body) = registry.world.get_mut::<Body>(entity)
        && body.auto_die_offscreen
        && !world_bounds.intersects(&body.bounds)
    {
        body.request_removal();
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rect::Rect;
    use crate::entity::EntityBuilder;

    fn add(registry: &mut Registry, body: Body) -> Entity {
        registry.add(EntityBuilder::new(body)).entity()
    }

    fn body_of(registry: &Registry, entity: Entity) -> &Body {
        registry.world.get::<Body>(entity).unwrap()
    }

    #[test]
    fn test_still_body_never_moves() {
        let mut registry = Registry::default();
        let rock = add(&mut registry, Body::new("rock", Rect::from_xywh(3.0, 4.0, 5.0, 6.0)));
        for dt in [0.0, 0.016, 1.0, 100.0] {
            step_body(&mut registry, rock, dt);
        }
        assert_eq!(body_of(&registry, rock).bounds, Rect::from_xywh(3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn test_gravity_accelerates() {
        let mut registry = Registry::default();
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(0.0, 0.0, 10.0, 10.0)).with_gravity(0.0, 100.0),
        );
        step_body(&mut registry, ball, 0.5);
        let body = body_of(&registry, ball);
        assert_eq!(body.velocity, Vec2::new(0.0, 50.0));
        assert_eq!(body.bounds.top, 25.0);
    }

    #[test]
    fn test_landing_on_solid_rests_on_top() {
        let mut registry = Registry::default();
        let floor = add(
            &mut registry,
            Body::new("floor", Rect::from_xywh(0.0, 100.0, 200.0, 10.0)).solid(),
        );
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(50.0, 85.0, 10.0, 10.0)).with_velocity(30.0, 400.0),
        );
        let contacts = step_body(&mut registry, ball, 0.016);
        assert_eq!(contacts.as_slice(), &[floor]);
        let body = body_of(&registry, ball);
        assert_eq!(body.bounds.bottom, 100.0);
        assert_eq!(body.bounds.height(), 10.0);
        assert_eq!(body.velocity.y, 0.0);
        // Horizontal motion is kept.
        assert!((body.bounds.left - 50.48).abs() < 1e-4);
    }

    #[test]
    fn test_bouncy_solid_reverses_vertical_velocity() {
        let mut registry = Registry::default();
        add(
            &mut registry,
            Body::new("pad", Rect::from_xywh(0.0, 100.0, 200.0, 10.0))
                .solid()
                .bouncy(),
        );
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(50.0, 85.0, 10.0, 10.0)).with_velocity(0.0, 400.0),
        );
        step_body(&mut registry, ball, 0.016);
        let body = body_of(&registry, ball);
        assert_eq!(body.velocity.y, -400.0);
        assert_eq!(body.bounds.bottom, 100.0);
    }

    #[test]
    fn test_rising_body_passes_through_solid() {
        let mut registry = Registry::default();
        add(
            &mut registry,
            Body::new("ledge", Rect::from_xywh(0.0, 100.0, 200.0, 10.0)).solid(),
        );
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(50.0, 112.0, 10.0, 10.0)).with_velocity(0.0, -400.0),
        );
        let contacts = step_body(&mut registry, ball, 0.016);
        assert!(contacts.is_empty());
        assert_eq!(body_of(&registry, ball).velocity.y, -400.0);
    }

    #[test]
    fn test_body_starting_below_solid_top_is_not_caught() {
        let mut registry = Registry::default();
        add(
            &mut registry,
            Body::new("wall", Rect::from_xywh(0.0, 100.0, 200.0, 100.0)).solid(),
        );
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(50.0, 120.0, 10.0, 10.0)).with_velocity(0.0, 100.0),
        );
        assert!(step_body(&mut registry, ball, 0.016).is_empty());
    }

    #[test]
    fn test_solid_does_not_collide_with_itself() {
        let mut registry = Registry::default();
        let lift = add(
            &mut registry,
            Body::new("lift", Rect::from_xywh(0.0, 0.0, 10.0, 10.0))
                .solid()
                .with_velocity(0.0, 10.0),
        );
        assert!(step_body(&mut registry, lift, 0.1).is_empty());
        assert_eq!(body_of(&registry, lift).bounds.top, 1.0);
    }

    #[test]
    fn test_auto_die_when_off_world() {
        let mut registry = Registry::default();
        registry.set_world_size(100.0, 100.0);
        let ball = add(
            &mut registry,
            Body::new("ball", Rect::from_xywh(95.0, 50.0, 10.0, 10.0))
                .with_velocity(1000.0, 0.0)
                .dying_offscreen(),
        );
        let stays = add(
            &mut registry,
            Body::new("stays", Rect::from_xywh(95.0, 50.0, 10.0, 10.0)).with_velocity(1000.0, 0.0),
        );
        step_body(&mut registry, ball, 0.1);
        step_body(&mut registry, stays, 0.1);
        assert!(body_of(&registry, ball).removal_requested());
        assert!(!body_of(&registry, stays).removal_requested());
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut registry = Registry::default();
        let spark = add(
            &mut registry,
            Body::new("spark", Rect::from_xywh(0.0, 0.0, 1.0, 1.0)).with_max_lifetime(0.03),
        );
        step_body(&mut registry, spark, 0.016);
        assert!(!body_of(&registry, spark).removal_requested());
        step_body(&mut registry, spark, 0.016);
        assert!(body_of(&registry, spark).removal_requested());
    }
}
