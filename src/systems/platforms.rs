//! Scripted level motion: the bobbing trophy and moving platforms.
//!
//! Moving platforms are kinematic. They are placed directly at their
//! oscillation target every step and never collide themselves. A platform
//! tagged `Ridable` carries a grounded player standing on it through the
//! regular axis mover, so the player still stops at walls while riding.

use bevy_ecs::prelude::*;

use crate::components::kind::EntityKind;
use crate::components::tags::CapabilityTag;
use crate::resources::registry::{BodyHandle, EntityRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::mover::{Axis, NoResponse, move_axis};

/// Angular speed of the trophy bob, radians per second.
pub const GOAL_BOB_RATE: f32 = 3.0;
/// How far (in pixels) feet may sit from a platform top and still ride it.
pub const RIDE_TOLERANCE: f32 = 1.0;

/// Nudge every goal by `-sin(elapsed * GOAL_BOB_RATE)` pixels.
pub fn bob_goals(registry: &mut EntityRegistry, elapsed: f32) {
    let dy = (elapsed * GOAL_BOB_RATE).sin();
    for body in registry.bodies_mut() {
        if body.valid && body.kind == EntityKind::Goal {
            let y = body.position.y - dy;
            body.set_y(y);
        }
    }
}

/// Whether `rider` is standing on top of `platform`.
fn is_riding(registry: &EntityRegistry, rider: BodyHandle, platform: BodyHandle) -> bool {
    let (Some(rider), Some(platform)) = (registry.get_valid(rider), registry.get_valid(platform))
    else {
        return false;
    };
    if !rider.grounded {
        return false;
    }
    let feet = rider.bounding_box();
    let top = platform.bounding_box();
    let bottom = feet.y + feet.height;
    let beside = feet.x + feet.width <= top.x || top.x + top.width <= feet.x;
    !beside && (bottom - top.y).abs() <= RIDE_TOLERANCE
}

/// Place every moving platform at its target for `elapsed` and carry riders.
/// Returns how many pixels the player was carried this step.
pub fn move_platforms(registry: &mut EntityRegistry, elapsed: f32) -> i32 {
    let platforms: Vec<(BodyHandle, f32)> = registry
        .iter_valid()
        .filter_map(|(handle, body)| {
            let motion = body.payload.motion()?;
            Some((handle, motion.x_at(elapsed)))
        })
        .collect();

    let player = registry.player();
    let mut carried = 0;
    for (handle, target_x) in platforms {
        let ridden = player.is_some_and(|p| {
            registry.has_tag(handle, CapabilityTag::Ridable) && is_riding(registry, p, handle)
        });
        let dx = match registry.get_mut(handle) {
            Some(body) => {
                let dx = target_x - body.position.x;
                body.position.x = target_x;
                dx
            }
            None => continue,
        };

        let Some(player) = player.filter(|_| ridden) else {
            continue;
        };
        let walls: Vec<BodyHandle> = registry
            .collidables()
            .into_iter()
            .filter(|&c| c != handle)
            .collect();
        let moved = move_axis(
            registry.bodies_mut(),
            player,
            &walls,
            dx,
            Axis::X,
            &mut NoResponse,
        );
        carried += moved.moved;
    }
    carried
}

pub fn goal_bob_system(mut registry: ResMut<EntityRegistry>, time: Res<WorldTime>) {
    bob_goals(&mut registry, time.elapsed);
}

pub fn moving_platform_system(mut registry: ResMut<EntityRegistry>, time: Res<WorldTime>) {
    move_platforms(&mut registry, time.elapsed);
}
