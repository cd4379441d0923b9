use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use glam::Vec2;

use crate::components::animation::Animation;
use crate::components::behavior::Behavior;
use crate::components::body::Body;
use crate::components::label::Label;
use crate::components::rect::Rect;
use crate::components::sprite::Sprite;
use crate::resources::imagestore::ImageStore;
use crate::resources::rendertarget::Canvas;

/// Draw one entity: its image (animation frame or sprite) stretched over its
/// bounds, then its label, then any custom behavior drawing.
///
/// `scale` maps world units to canvas pixels.
pub(crate) fn draw_entity(
    world: &mut World,
    images: &mut ImageStore,
    entity: Entity,
    canvas: &mut dyn Canvas,
    scale: Vec2,
) {
    let Some(body) = world.get::<Body>(entity) else {
        return;
    };
    let b = body.bounds;
    let dest = Rect::new(
        b.left * scale.x,
        b.top * scale.y,
        b.right * scale.x,
        b.bottom * scale.y,
    );

    // An animation replaces the static sprite, even when it has nothing to show.
    let image = if let Some(mut animation) = world.get_mut::<Animation>(entity) {
        animation.current_image().and_then(|key| images.get(key))
    } else if let Some(sprite) = world.get::<Sprite>(entity) {
        images.get(&sprite.image_key)
    } else {
        None
    };
    if let Some(image) = image {
        canvas.draw_image(&image, dest);
    }

    if let Some(label) = world.get::<Label>(entity) {
        canvas.draw_text(
            &label.content,
            dest.left,
            dest.bottom,
            label.size * scale.y,
            label.color,
        );
    }

    let hooks = world
        .get_mut::<Behavior>(entity)
        .and_then(|mut slot| slot.hooks.take());
    if let Some(mut hooks) = hooks {
        if let Some(body) = world.get::<Body>(entity) {
            hooks.draw(body, canvas, scale);
        }
        if let Some(mut slot) = world.get_mut::<Behavior>(entity) {
            slot.hooks = Some(hooks);
        }
    }
}
