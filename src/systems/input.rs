//! Routing of queued input events to levels and entities.
//!
//! Pointer coordinates are scaled from normalized surface space to world
//! units first. Taps, flings and long presses then walk the claim chain:
//! the level's `on_any_*` hook, the first entity (registration order) under
//! the pointer, the level's `on_unclaimed_*` hook. Scrolls only reach the
//! level. Buttons and joystick updates go straight to the level, and the
//! joystick axes are cached on the registry.

use log::debug;

use crate::entity::EntityId;
use crate::events::input::InputEvent;
use crate::registry::Registry;

pub(crate) fn dispatch(registry: &mut Registry, event: InputEvent) {
    let w = registry.world_bounds.width();
    let h = registry.world_bounds.height();
    match event {
        InputEvent::Down { x, y } => {
            let (x, y) = (x * w, y * h);
            debug!("touch at {},{}", x, y);
            deliver_touch(registry, x, y);
        }
        InputEvent::Fling { x, y, dx, dy } => {
            let (x, y, dx, dy) = (x * w, y * h, dx * w, dy * h);
            debug!("fling at {},{} velocity {},{}", x, y, dx, dy);
            deliver_fling(registry, x, y, dx, dy);
        }
        InputEvent::Scroll {
            x,
            y,
            dx,
            dy,
            finished,
        } => {
            let (x, y, dx, dy) = (x * w, y * h, dx * w, dy * h);
            registry.with_level(|level, r| level.on_unclaimed_scroll(r, x, y, dx, dy, finished));
        }
        InputEvent::LongPress { x, y } => {
            let (x, y) = (x * w, y * h);
            debug!("long press at {},{}", x, y);
            deliver_long_press(registry, x, y);
        }
        InputEvent::ButtonDown(button) => {
            debug!("button down {:?}", button);
            registry.with_level(|level, r| level.on_button_down(r, button));
        }
        InputEvent::ButtonUp(button) => {
            registry.with_level(|level, r| level.on_button_up(r, button));
        }
        InputEvent::Joystick(axes) => {
            registry.joystick = axes;
            registry.with_level(|level, r| level.on_joystick(r, axes));
        }
    }
}

fn deliver_touch(registry: &mut Registry, x: f32, y: f32) {
    if registry
        .with_level(|level, r| level.on_any_touch(r, x, y))
        .unwrap_or(false)
    {
        return;
    }
    if let Some(entity) = registry.hit_test(x, y) {
        registry.with_behavior(entity, |hooks, r| {
            hooks.on_touch(r, EntityId(entity), x, y)
        });
        return;
    }
    registry.with_level(|level, r| level.on_unclaimed_touch(r, x, y));
}

fn deliver_fling(registry: &mut Registry, x: f32, y: f32, dx: f32, dy: f32) {
    if registry
        .with_level(|level, r| level.on_any_fling(r, x, y, dx, dy))
        .unwrap_or(false)
    {
        return;
    }
    if let Some(entity) = registry.hit_test(x, y) {
        registry.with_behavior(entity, |hooks, r| {
            hooks.on_fling(r, EntityId(entity), x, y, dx, dy)
        });
        return;
    }
    registry.with_level(|level, r| level.on_unclaimed_fling(r, x, y, dx, dy));
}

fn deliver_long_press(registry: &mut Registry, x: f32, y: f32) {
    if registry
        .with_level(|level, r| level.on_any_long_press(r, x, y))
        .unwrap_or(false)
    {
        return;
    }
    if let Some(entity) = registry.hit_test(x, y) {
        registry.with_behavior(entity, |hooks, r| {
            hooks.on_long_press(r, EntityId(entity), x, y)
        });
        return;
    }
    registry.with_level(|level, r| level.on_unclaimed_long_press(r, x, y));
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::components::behavior::FnBehavior;
    use crate::components::body::Body;
    use crate::components::rect::Rect;
    use crate::entity::{EntityBuilder, EntityId};
    use crate::events::input::{Button, InputEvent, JoystickAxes};
    use crate::level::Level;
    use crate::registry::Registry;

    type Log = Arc<Mutex<Vec<String>>>;

    /// Records every hook; claims taps when `greedy`.
    struct Recorder {
        log: Log,
        greedy: bool,
    }

    impl Level for Recorder {
        fn on_any_touch(&mut self, _: &mut Registry, x: f32, y: f32) -> bool {
            self.log.lock().unwrap().push(format!("any_touch {x},{y}"));
            self.greedy
        }
        fn on_unclaimed_touch(&mut self, _: &mut Registry, x: f32, y: f32) {
            self.log.lock().unwrap().push(format!("unclaimed_touch {x},{y}"));
        }
        fn on_unclaimed_fling(&mut self, _: &mut Registry, _x: f32, _y: f32, dx: f32, dy: f32) {
            self.log.lock().unwrap().push(format!("unclaimed_fling {dx},{dy}"));
        }
        fn on_unclaimed_scroll(
            &mut self,
            _: &mut Registry,
            x: f32,
            y: f32,
            _dx: f32,
            _dy: f32,
            finished: bool,
        ) {
            self.log
                .lock()
                .unwrap()
                .push(format!("scroll {x},{y} finished={finished}"));
        }
        fn on_unclaimed_long_press(&mut self, _: &mut Registry, x: f32, y: f32) {
            self.log.lock().unwrap().push(format!("unclaimed_long_press {x},{y}"));
        }
        fn on_button_down(&mut self, _: &mut Registry, button: Button) {
            self.log.lock().unwrap().push(format!("down {button:?}"));
        }
        fn on_button_up(&mut self, _: &mut Registry, button: Button) {
            self.log.lock().unwrap().push(format!("up {button:?}"));
        }
        fn on_joystick(&mut self, registry: &mut Registry, axes: JoystickAxes) {
            let cached = registry.joystick() == axes;
            self.log
                .lock()
                .unwrap()
                .push(format!("joystick {} cached={cached}", axes.right_x));
        }
    }

    /// 100x100 world with the recorder level active.
    fn setup(greedy: bool) -> (Registry, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::default();
        registry.set_world_size(100.0, 100.0);
        registry.set_level(Recorder {
            log: log.clone(),
            greedy,
        });
        registry.update_frame(0.016);
        (registry, log)
    }

    fn touchable(name: &str, x: f32, y: f32, log: &Log) -> EntityBuilder {
        let (touch_log, fling_log, press_log) = (log.clone(), log.clone(), log.clone());
        let tag = name.to_string();
        let (tag2, tag3) = (tag.clone(), tag.clone());
        EntityBuilder::new(Body::new(name, Rect::from_xywh(x, y, 20.0, 20.0))).behavior(
            FnBehavior::new()
                .when_touched(move |_, _, _, _| touch_log.lock().unwrap().push(format!("{tag} touched")))
                .when_flung(move |_, _, _, _, _, _| fling_log.lock().unwrap().push(format!("{tag2} flung")))
                .when_long_pressed(move |_, _, _, _| {
                    press_log.lock().unwrap().push(format!("{tag3} long pressed"))
                }),
        )
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    #[test]
    fn test_touch_scaled_to_world_and_claimed_by_first_entity() {
        let (mut registry, log) = setup(false);
        registry.add(touchable("back", 0.0, 0.0, &log).with_body(|b| b.with_z_order(10)));
        registry.add(touchable("front", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Down { x: 0.1, y: 0.1 });
        // Registration order wins, not z-order.
        assert_eq!(take(&log), vec!["any_touch 10,10", "back touched"]);
    }

    #[test]
    fn test_greedy_level_swallows_touch() {
        let (mut registry, log) = setup(true);
        registry.add(touchable("frog", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Down { x: 0.1, y: 0.1 });
        assert_eq!(take(&log), vec!["any_touch 10,10"]);
    }

    #[test]
    fn test_unclaimed_touch_falls_back_to_level() {
        let (mut registry, log) = setup(false);
        registry.add(touchable("frog", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Down { x: 0.5, y: 0.5 });
        assert_eq!(take(&log), vec!["any_touch 50,50", "unclaimed_touch 50,50"]);
    }

    #[test]
    fn test_entity_without_behavior_still_claims() {
        let (mut registry, log) = setup(false);
        registry.add(Body::new("rock", Rect::from_xywh(40.0, 40.0, 20.0, 20.0)));
        registry.dispatch(InputEvent::Down { x: 0.5, y: 0.5 });
        assert_eq!(take(&log), vec!["any_touch 50,50"]);
    }

    #[test]
    fn test_fling_and_long_press_chains() {
        let (mut registry, log) = setup(false);
        registry.add(touchable("frog", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Fling {
            x: 0.1,
            y: 0.1,
            dx: 1.0,
            dy: 0.0,
        });
        registry.dispatch(InputEvent::Fling {
            x: 0.9,
            y: 0.9,
            dx: 0.5,
            dy: 0.25,
        });
        registry.dispatch(InputEvent::LongPress { x: 0.1, y: 0.1 });
        registry.dispatch(InputEvent::LongPress { x: 0.9, y: 0.9 });
        assert_eq!(
            take(&log),
            vec![
                "frog flung",
                "unclaimed_fling 50,25",
                "frog long pressed",
                "unclaimed_long_press 90,90",
            ]
        );
    }

    #[test]
    fn test_scroll_only_reaches_level() {
        let (mut registry, log) = setup(false);
        registry.add(touchable("frog", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Scroll {
            x: 0.1,
            y: 0.1,
            dx: 0.0,
            dy: 0.1,
            finished: false,
        });
        registry.dispatch(InputEvent::Scroll {
            x: 0.1,
            y: 0.1,
            dx: 0.0,
            dy: 0.2,
            finished: true,
        });
        assert_eq!(
            take(&log),
            vec!["scroll 10,10 finished=false", "scroll 10,10 finished=true"]
        );
    }

    #[test]
    fn test_buttons_and_joystick_go_to_level() {
        let (mut registry, log) = setup(false);
        let axes = JoystickAxes {
            right_x: 0.5,
            ..Default::default()
        };
        registry.dispatch(InputEvent::ButtonDown(Button::R1));
        registry.dispatch(InputEvent::ButtonUp(Button::R1));
        registry.dispatch(InputEvent::Joystick(axes));
        assert_eq!(
            take(&log),
            vec!["down R1", "up R1", "joystick 0.5 cached=true"]
        );
        assert_eq!(registry.joystick(), axes);
    }

    #[test]
    fn test_touch_without_level_reaches_entity() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::default();
        registry.set_world_size(100.0, 100.0);
        let id: EntityId = registry.add(touchable("frog", 0.0, 0.0, &log));
        registry.dispatch(InputEvent::Down { x: 0.05, y: 0.05 });
        assert_eq!(take(&log), vec!["frog touched"]);
        assert!(registry.is_live(id));
    }
}
