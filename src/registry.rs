//! The entity registry: sole owner of entities, the active level and the
//! session services.
//!
//! Entities live in a bevy_ecs [`World`], the single source of truth. The
//! registry keeps derived indices next to it:
//! - `order`: insertion order, which drives update and hit-testing. Removed
//!   entities leave tombstones that are skipped and compacted at the end of
//!   each frame, so entities added mid-frame are still visited in that frame.
//! - `names`: live name to entity.
//! - `z_index`: draw layers, ascending; insertion order within a layer.
//! - `solids`: obstacles for the physics pass, in insertion order.
//!
//! Every mutation that touches an indexed property (`name`, `z_order`,
//! `solid`) goes through the registry so the indices never drift.

use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use glam::Vec2;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::animation::Animation;
use crate::components::behavior::{Behavior, EntityBehavior};
use crate::components::body::Body;
use crate::components::label::Label;
use crate::components::rect::Rect;
use crate::components::sprite::Sprite;
use crate::entity::{EntityBuilder, EntityId};
use crate::events::input::{InputEvent, JoystickAxes};
use crate::level::{Level, Scene};
use crate::resources::gameconfig::EngineConfig;
use crate::resources::random::Rand;
use crate::resources::rendertarget::Canvas;
use crate::resources::services::Services;
use crate::resources::worldtime::WorldTime;
use crate::systems::{input, physics, render};

const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
const DEFAULT_WORLD_HEIGHT: f32 = 900.0;

pub struct Registry {
    pub(crate) world: World,
    pub(crate) order: Vec<Entity>,
    names: FxHashMap<String, Entity>,
    z_index: BTreeMap<i32, Vec<Entity>>,
    pub(crate) solids: Vec<Entity>,
    level: Option<Box<dyn Level>>,
    pending_level: Option<Box<dyn Level>>,
    scene: Option<Box<dyn Scene>>,
    pub(crate) world_bounds: Rect,
    pub(crate) joystick: JoystickAxes,
    services: Services,
    next_auto_name: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Services::default())
    }
}

impl Registry {
    pub fn new(services: Services) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        Self {
            world,
            order: Vec::new(),
            names: FxHashMap::default(),
            z_index: BTreeMap::new(),
            solids: Vec::new(),
            level: None,
            pending_level: None,
            scene: None,
            world_bounds: Rect::new(0.0, 0.0, DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
            joystick: JoystickAxes::default(),
            services,
            next_auto_name: 0,
        }
    }

    /// World size and default image taken from `config`.
    pub fn from_config(config: &EngineConfig, mut services: Services) -> Self {
        if let Some(key) = &config.default_image {
            services.images.set_default(key.as_str());
        }
        let mut registry = Self::new(services);
        registry.set_world_size(config.world_width, config.world_height);
        registry
    }

    // ==================== ENTITY LIFECYCLE ====================

    /// Register an entity and return its id.
    ///
    /// An empty name is replaced by a generated one. If a live entity already
    /// has the same name, it is torn down and replaced.
    pub fn add(&mut self, builder: impl Into<EntityBuilder>) -> EntityId {
        let EntityBuilder {
            mut body,
            sprite,
            animation,
            label,
            behavior,
        } = builder.into();

        if body.name.is_empty() {
            body.name = self.generate_name();
        }
        if let Some(&older) = self.names.get(&body.name) {
            warn!(
                "entity name '{}' already registered; replacing the older entity",
                body.name
            );
            self.teardown(older);
        }

        let name = body.name.clone();
        let z = body.z_order;
        let solid = body.solid;

        let mut spawned = self.world.spawn(body);
        if let Some(sprite) = sprite {
            spawned.insert(sprite);
        }
        if let Some(animation) = animation {
            spawned.insert(animation);
        }
        if let Some(label) = label {
            spawned.insert(label);
        }
        if let Some(behavior) = behavior {
            spawned.insert(behavior);
        }
        let entity = spawned.id();

        self.order.push(entity);
        self.names.insert(name.clone(), entity);
        self.z_index.entry(z).or_default().push(entity);
        if solid {
            self.solids.push(entity);
        }
        debug!("added entity '{}' z={} solid={}", name, z, solid);
        EntityId(entity)
    }

    /// Re-register an entity that may already be live.
    ///
    /// A live entity is left untouched (with a warning) and its id returned.
    /// A removed entity cannot come back: `None`.
    pub fn readd(&mut self, id: EntityId) -> Option<EntityId> {
        match self.body(id) {
            Some(body) => {
                warn!("entity '{}' is already registered; ignoring", body.name);
                Some(id)
            }
            None => None,
        }
    }

    /// Ask for `id` to be removed at the end of the current frame's update.
    pub fn remove(&mut self, id: EntityId) {
        if let Some(body) = self.body_mut(id) {
            body.request_removal();
        }
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.is_live_entity(id.entity())
    }

    pub(crate) fn is_live_entity(&self, entity: Entity) -> bool {
        self.world.get::<Body>(entity).is_some()
    }

    fn generate_name(&mut self) -> String {
        loop {
            let name = format!("entity{}", self.next_auto_name);
            self.next_auto_name += 1;
            if !self.names.contains_key(&name) {
                return name;
            }
        }
    }

    /// Remove an entity from the world and every index, immediately.
    fn teardown(&mut self, entity: Entity) {
        let Some(body) = self.world.get::<Body>(entity) else {
            return;
        };
        let z = body.z_order;
        let solid = body.solid;
        if self.names.get(&body.name) == Some(&entity) {
            let name = body.name.clone();
            self.names.remove(&name);
        }
        if let Some(bucket) = self.z_index.get_mut(&z) {
            bucket.retain(|e| *e != entity);
            if bucket.is_empty() {
                self.z_index.remove(&z);
            }
        }
        if solid {
            self.solids.retain(|e| *e != entity);
        }
        self.world.despawn(entity);
    }

    /// Despawn every entity one by one so their generations advance and old
    /// ids never resolve to entities spawned afterwards.
    fn clear_entities(&mut self) {
        for entity in std::mem::take(&mut self.order) {
            if self.is_live_entity(entity) {
                self.world.despawn(entity);
            }
        }
        self.names.clear();
        self.z_index.clear();
        self.solids.clear();
    }

    // ==================== LOOKUP ====================

    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied().map(EntityId)
    }

    /// Live entities whose name starts with `prefix`, in registration order.
    pub fn find_prefix(&self, prefix: &str) -> Vec<EntityId> {
        self.live_entities()
            .filter(|e| {
                self.world
                    .get::<Body>(*e)
                    .is_some_and(|b| b.name.starts_with(prefix))
            })
            .map(EntityId)
            .collect()
    }

    /// Live entities in registration order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.live_entities().map(EntityId).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn live_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|e| self.is_live_entity(*e))
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.world.get::<Body>(id.entity())
    }

    /// Mutable access to the body. The name is read-only; use
    /// [`Self::set_solid`] and [`Self::set_z_order`] for the indexed flags.
    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.world
            .get_mut::<Body>(id.entity())
            .map(|b| b.into_inner())
    }

    pub fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        self.world
            .get_mut::<Sprite>(id.entity())
            .map(|s| s.into_inner())
    }

    pub fn label_mut(&mut self, id: EntityId) -> Option<&mut Label> {
        self.world
            .get_mut::<Label>(id.entity())
            .map(|l| l.into_inner())
    }

    pub fn animation_mut(&mut self, id: EntityId) -> Option<&mut Animation> {
        self.world
            .get_mut::<Animation>(id.entity())
            .map(|a| a.into_inner())
    }

    // ==================== INDEXED PROPERTIES ====================

    pub fn set_solid(&mut self, id: EntityId, solid: bool) {
        let entity = id.entity();
        let Some(mut body) = self.world.get_mut::<Body>(entity) else {
            return;
        };
        if body.solid == solid {
            return;
        }
        body.solid = solid;
        if solid {
            self.solids.push(entity);
        } else {
            self.solids.retain(|e| *e != entity);
        }
    }

    /// Move the entity to layer `z`. It lands at the end of that layer, even
    /// if it was there before with a different position.
    pub fn set_z_order(&mut self, id: EntityId, z: i32) {
        let entity = id.entity();
        let Some(mut body) = self.world.get_mut::<Body>(entity) else {
            return;
        };
        let old = body.z_order;
        if old == z {
            return;
        }
        body.z_order = z;
        if let Some(bucket) = self.z_index.get_mut(&old) {
            bucket.retain(|e| *e != entity);
            if bucket.is_empty() {
                self.z_index.remove(&old);
            }
        }
        self.z_index.entry(z).or_default().push(entity);
    }

    /// Current obstacles, in registration order.
    pub fn solids(&self) -> Vec<EntityId> {
        self.solids.iter().copied().map(EntityId).collect()
    }

    /// Ids in draw order.
    pub fn draw_order(&self) -> Vec<EntityId> {
        self.z_index
            .values()
            .flatten()
            .copied()
            .map(EntityId)
            .collect()
    }

    // ==================== WORLD, LEVEL AND SCENE ====================

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    /// Resize the world. Only meaningful between levels, typically in `setup`.
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            warn!("ignoring non-positive world size {}x{}", width, height);
            return;
        }
        self.world_bounds = Rect::new(0.0, 0.0, width, height);
    }

    pub fn is_fully_on_screen(&self, id: EntityId) -> bool {
        self.body(id)
            .is_some_and(|b| self.world_bounds.contains_rect(&b.bounds))
    }

    pub fn is_fully_off_screen(&self, id: EntityId) -> bool {
        self.body(id)
            .is_some_and(|b| !self.world_bounds.intersects(&b.bounds))
    }

    /// Exact convex-shape overlap between two entities.
    pub fn shapes_collide(&self, a: EntityId, b: EntityId) -> bool {
        match (self.body(a), self.body(b)) {
            (Some(a), Some(b)) => a.collides_with(b),
            _ => false,
        }
    }

    /// Switch to `level` at the start of the next frame.
    pub fn set_level(&mut self, level: impl Level + 'static) {
        self.set_level_boxed(Box::new(level));
    }

    pub fn set_level_boxed(&mut self, level: Box<dyn Level>) {
        if self.pending_level.is_some() {
            debug!("replacing a level that was pending but never activated");
        }
        self.pending_level = Some(level);
    }

    pub fn has_level(&self) -> bool {
        self.level.is_some()
    }

    pub fn set_scene(&mut self, scene: impl Scene + 'static) {
        self.scene = Some(Box::new(scene));
    }

    pub fn clear_scene(&mut self) {
        self.scene = None;
    }

    /// Most recent stick positions.
    pub fn joystick(&self) -> JoystickAxes {
        self.joystick
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    pub fn rand(&mut self) -> &mut Rand {
        &mut self.services.rand
    }

    pub fn play_sound(&self, id: &str) {
        self.services.play_sound(id);
    }

    /// Stop the services' background threads at the end of a session.
    pub fn shutdown(&mut self) {
        self.services.shutdown();
    }

    // ==================== FRAME ====================

    /// Advance the simulation by `dt` seconds.
    ///
    /// 1. Activate a pending level: finish the old one, clear everything,
    ///    set up the new one.
    /// 2. Update every live entity in registration order, including those
    ///    added during this pass.
    /// 3. Update the level.
    /// 4. Remove entities that requested removal.
    pub fn update_frame(&mut self, dt: f32) {
        self.activate_pending_level();
        let dt = self.world.resource_mut::<WorldTime>().advance(dt);

        let mut i = 0;
        while i < self.order.len() {
            let entity = self.order[i];
            i += 1;
            if self.is_live_entity(entity) {
                self.update_entity(entity, dt);
            }
        }

        self.with_level(|level, registry| level.update(registry, dt));
        self.remove_requested();
    }

    fn update_entity(&mut self, entity: Entity, dt: f32) {
        let contacts: SmallVec<[Entity; 4]> = physics::step_body(self, entity, dt);
        for other in contacts {
            self.with_behavior(entity, |hooks, registry| {
                hooks.on_collision(registry, EntityId(entity), EntityId(other))
            });
            self.with_behavior(other, |hooks, registry| {
                hooks.on_collision(registry, EntityId(other), EntityId(entity))
            });
        }
        if let Some(mut animation) = self.world.get_mut::<Animation>(entity) {
            animation.advance(dt);
        }
        self.with_behavior(entity, |hooks, registry| {
            hooks.on_update(registry, EntityId(entity), dt)
        });
    }

    fn activate_pending_level(&mut self) {
        let Some(mut next) = self.pending_level.take() else {
            return;
        };
        if let Some(mut current) = self.level.take() {
            current.finish(self);
        }
        let dropped = self.len();
        self.clear_entities();
        self.scene = None;
        info!("level transition: cleared {} entities", dropped);
        next.setup(self);
        self.level = Some(next);
    }

    fn remove_requested(&mut self) {
        let doomed: Vec<Entity> = self
            .world
            .query::<(Entity, &Body)>()
            .iter(&self.world)
            .filter(|(_, body)| body.removal_requested())
            .map(|(entity, _)| entity)
            .collect();
        for entity in doomed {
            self.teardown(entity);
        }
        let world = &self.world;
        self.order.retain(|e| world.get::<Body>(*e).is_some());
    }

    /// Draw the scene, then every entity by ascending z-order.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let bounds = self.world_bounds;
        let scale = Vec2::new(
            canvas.width() / bounds.width(),
            canvas.height() / bounds.height(),
        );
        if let Some(scene) = self.scene.as_mut() {
            scene.draw(canvas, &mut self.services.images);
        }
        for bucket in self.z_index.values() {
            for &entity in bucket {
                render::draw_entity(
                    &mut self.world,
                    &mut self.services.images,
                    entity,
                    canvas,
                    scale,
                );
            }
        }
    }

    /// Route one input event. Pointer coordinates are normalized and scaled
    /// to world units here.
    pub fn dispatch(&mut self, event: InputEvent) {
        input::dispatch(self, event);
    }

    // ==================== HOOK PLUMBING ====================

    /// Run `f` with the entity's behavior detached. Returns `false` when the
    /// entity has no behavior (or is already inside one of its own hooks).
    pub(crate) fn with_behavior(
        &mut self,
        entity: Entity,
        f: impl FnOnce(&mut dyn EntityBehavior, &mut Registry),
    ) -> bool {
        let hooks = self
            .world
            .get_mut::<Behavior>(entity)
            .and_then(|mut b| b.hooks.take());
        let Some(mut hooks) = hooks else {
            return false;
        };
        f(hooks.as_mut(), self);
        if let Some(mut slot) = self.world.get_mut::<Behavior>(entity) {
            slot.hooks = Some(hooks);
        }
        true
    }

    /// Run `f` with the active level detached. `None` when no level is active.
    pub(crate) fn with_level<R>(
        &mut self,
        f: impl FnOnce(&mut dyn Level, &mut Registry) -> R,
    ) -> Option<R> {
        let mut level = self.level.take()?;
        let result = f(level.as_mut(), self);
        self.level = Some(level);
        Some(result)
    }

    /// First live entity, in registration order, whose bounds contain the point.
    pub(crate) fn hit_test(&self, x: f32, y: f32) -> Option<Entity> {
        self.live_entities().find(|e| {
            self.world
                .get::<Body>(*e)
                .is_some_and(|b| b.contains(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::behavior::FnBehavior;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn block(name: &str, x: f32, y: f32) -> EntityBuilder {
        EntityBuilder::new(Body::new(name, Rect::from_xywh(x, y, 10.0, 10.0)))
    }

    fn names(registry: &Registry, ids: &[EntityId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| registry.body(*id))
            .map(|b| b.name().to_string())
            .collect()
    }

    // ==================== ADD / FIND ====================

    #[test]
    fn test_add_and_find() {
        let mut registry = Registry::default();
        let id = registry.add(block("frog", 0.0, 0.0));
        assert_eq!(registry.find("frog"), Some(id));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_live(id));
    }

    #[test]
    fn test_empty_names_are_generated_and_unique() {
        let mut registry = Registry::default();
        let a = registry.add(block("", 0.0, 0.0));
        let b = registry.add(block("", 0.0, 0.0));
        let name_a = registry.body(a).unwrap().name().to_string();
        let name_b = registry.body(b).unwrap().name().to_string();
        assert!(!name_a.is_empty());
        assert_ne!(name_a, name_b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_generated_names_skip_taken() {
        let mut registry = Registry::default();
        registry.add(block("entity0", 0.0, 0.0));
        let id = registry.add(block("", 0.0, 0.0));
        assert_eq!(registry.body(id).unwrap().name(), "entity1");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_name_collision_replaces_older() {
        let mut registry = Registry::default();
        let first = registry.add(block("a", 0.0, 0.0).with_body(|b| b.solid().with_z_order(2)));
        let second = registry.add(block("a", 50.0, 0.0));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_live(first));
        assert_eq!(registry.find("a"), Some(second));
        assert!(registry.solids().is_empty());
        assert_eq!(registry.draw_order(), vec![second]);
    }

    #[test]
    fn test_readd_is_a_noop() {
        let mut registry = Registry::default();
        let id = registry.add(block("frog", 0.0, 0.0));
        assert_eq!(registry.readd(id), Some(id));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids(), vec![id]);
    }

    #[test]
    fn test_find_prefix_in_registration_order() {
        let mut registry = Registry::default();
        registry.add(block("orc2", 0.0, 0.0));
        registry.add(block("troll", 0.0, 0.0));
        registry.add(block("orc1", 0.0, 0.0));
        let orcs = registry.find_prefix("orc");
        assert_eq!(names(&registry, &orcs), vec!["orc2", "orc1"]);
        assert!(registry.find_prefix("goblin").is_empty());
    }

    // ==================== INDICES ====================

    #[test]
    fn test_draw_order_by_layer_then_insertion() {
        let mut registry = Registry::default();
        let five = registry.add(block("five", 0.0, 0.0).with_body(|b| b.with_z_order(5)));
        let one = registry.add(block("one", 0.0, 0.0).with_body(|b| b.with_z_order(1)));
        let three = registry.add(block("three", 0.0, 0.0).with_body(|b| b.with_z_order(3)));
        let one_b = registry.add(block("one_b", 0.0, 0.0).with_body(|b| b.with_z_order(1)));
        assert_eq!(registry.draw_order(), vec![one, one_b, three, five]);
    }

    #[test]
    fn test_set_z_order_appends_to_new_layer() {
        let mut registry = Registry::default();
        let a = registry.add(block("a", 0.0, 0.0));
        let b = registry.add(block("b", 0.0, 0.0));
        let c = registry.add(block("c", 0.0, 0.0).with_body(|b| b.with_z_order(1)));
        registry.set_z_order(a, 1);
        assert_eq!(registry.draw_order(), vec![b, c, a]);
        assert_eq!(registry.body(a).unwrap().z_order(), 1);
        // Same layer again is a no-op.
        registry.set_z_order(c, 1);
        assert_eq!(registry.draw_order(), vec![b, c, a]);
    }

    #[test]
    fn test_set_solid_updates_solid_set() {
        let mut registry = Registry::default();
        let a = registry.add(block("a", 0.0, 0.0));
        let b = registry.add(block("b", 0.0, 0.0).with_body(|b| b.solid()));
        assert_eq!(registry.solids(), vec![b]);
        registry.set_solid(a, true);
        registry.set_solid(a, true);
        assert_eq!(registry.solids(), vec![b, a]);
        registry.set_solid(b, false);
        assert_eq!(registry.solids(), vec![a]);
        assert!(!registry.body(b).unwrap().is_solid());
    }

    // ==================== FRAME ====================

    #[test]
    fn test_removal_happens_at_end_of_update() {
        let mut registry = Registry::default();
        let doomed = registry.add(block("doomed", 0.0, 0.0).with_body(|b| b.solid()));
        let keeper = registry.add(block("keeper", 0.0, 0.0));
        registry.remove(doomed);
        assert!(registry.is_live(doomed));
        registry.update_frame(0.016);
        assert!(!registry.is_live(doomed));
        assert!(registry.find("doomed").is_none());
        assert!(registry.solids().is_empty());
        assert_eq!(registry.draw_order(), vec![keeper]);
        assert_eq!(registry.order.len(), 1);
    }

    #[test]
    fn test_entity_added_mid_pass_updates_same_pass() {
        let mut registry = Registry::default();
        let spawned_updates = Arc::new(AtomicUsize::new(0));
        let counter = spawned_updates.clone();
        let spawner = FnBehavior::new().when_updated(move |registry, me, _dt| {
            let counter = counter.clone();
            registry.add(block("child", 0.0, 0.0).behavior(FnBehavior::new().when_updated(
                move |_, _, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
            )));
            registry.remove(me);
        });
        registry.add(block("spawner", 0.0, 0.0).behavior(spawner));
        registry.update_frame(0.016);
        assert_eq!(spawned_updates.load(Ordering::SeqCst), 1);
        assert!(registry.find("spawner").is_none());
        assert!(registry.find("child").is_some());
    }

    struct Spawns(&'static str);

    impl Level for Spawns {
        fn setup(&mut self, registry: &mut Registry) {
            registry.add(block(self.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_ids_from_previous_level_stay_dead() {
        let mut registry = Registry::default();
        registry.set_level(Spawns("x"));
        registry.update_frame(0.016);
        let x = registry.find("x").unwrap();

        registry.set_level(Spawns("y"));
        registry.update_frame(0.016);
        let y = registry.find("y").unwrap();

        assert_ne!(x, y);
        assert!(!registry.is_live(x));
        assert!(registry.body(x).is_none());

        // Stale handles must not reach the new level's entities.
        registry.remove(x);
        registry.set_z_order(x, 9);
        registry.update_frame(0.016);
        assert_eq!(registry.find("y"), Some(y));
        assert_eq!(registry.body(y).unwrap().z_order(), 0);
        assert_eq!(registry.ids(), vec![y]);
    }

    #[test]
    fn test_world_time_advances() {
        let mut registry = Registry::default();
        registry.update_frame(0.016);
        registry.update_frame(0.016);
        assert_eq!(registry.time().frame_count, 2);
    }

    #[test]
    fn test_on_screen_queries() {
        let mut registry = Registry::default();
        registry.set_world_size(100.0, 100.0);
        let inside = registry.add(block("inside", 10.0, 10.0));
        let straddling = registry.add(block("straddling", 95.0, 10.0));
        let outside = registry.add(block("outside", 200.0, 10.0));
        assert!(registry.is_fully_on_screen(inside));
        assert!(!registry.is_fully_off_screen(inside));
        assert!(!registry.is_fully_on_screen(straddling));
        assert!(!registry.is_fully_off_screen(straddling));
        assert!(registry.is_fully_off_screen(outside));
    }

    #[test]
    fn test_non_positive_world_size_is_ignored() {
        let mut registry = Registry::default();
        registry.set_world_size(0.0, 10.0);
        assert_eq!(registry.world_bounds(), Rect::new(0.0, 0.0, 1600.0, 900.0));
    }

    #[test]
    fn test_collision_hooks_fire_on_both_entities() {
        let mut registry = Registry::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (log_ball, log_floor) = (log.clone(), log.clone());
        registry.add(
            block("floor", 0.0, 100.0)
                .with_body(|b| b.solid())
                .behavior(FnBehavior::new().when_collided(move |registry, _me, other| {
                    let name = registry.body(other).unwrap().name().to_string();
                    log_floor.lock().unwrap().push(format!("floor hit by {name}"));
                })),
        );
        registry.add(
            block("ball", 0.0, 85.0)
                .with_body(|b| b.with_velocity(0.0, 500.0))
                .behavior(FnBehavior::new().when_collided(move |registry, _me, other| {
                    let name = registry.body(other).unwrap().name().to_string();
                    log_ball.lock().unwrap().push(format!("ball hit {name}"));
                })),
        );
        registry.update_frame(0.016);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["ball hit floor".to_string(), "floor hit by ball".to_string()]
        );
    }

    #[test]
    fn test_shapes_collide() {
        let mut registry = Registry::default();
        let a = registry.add(block("a", 0.0, 0.0));
        let b = registry.add(block("b", 5.0, 5.0));
        let c = registry.add(block("c", 50.0, 50.0));
        assert!(registry.shapes_collide(a, b));
        assert!(!registry.shapes_collide(a, c));
    }
}
