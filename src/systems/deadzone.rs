//! Dead zone trailing and culling.
//!
//! The hazard strip follows the player's respawn point, a fixed distance
//! below the player's feet. Anything that ends up below it is gone for good:
//! the registry invalidates it so it no longer collides or renders.

use bevy_ecs::prelude::*;

use crate::resources::debugmode::DebugMode;
use crate::resources::registry::EntityRegistry;

/// Distance between the respawn point's feet and the dead zone while playing.
pub const DEAD_ZONE_TRAIL: f32 = 32.0;

/// Move the dead zone under the current respawn point and cull every body
/// below it. Returns the number of bodies culled.
pub fn trail_dead_zone(registry: &mut EntityRegistry) -> usize {
    let (Some(player), Some(zone)) = (registry.player(), registry.dead_zone()) else {
        return 0;
    };
    let Some(player) = registry.get_valid(player) else {
        return 0;
    };
    let y = player.respawn.y + player.collider.size.y + DEAD_ZONE_TRAIL;
    if let Some(zone) = registry.get_mut(zone) {
        zone.set_y(y);
    }
    registry.cull_below(y)
}

pub fn dead_zone_system(mut registry: ResMut<EntityRegistry>, debug: Option<Res<DebugMode>>) {
    let culled = trail_dead_zone(&mut registry);
    if culled > 0 && debug.is_some() {
        log::debug!(
            "Dead zone culled {} bodies, {} still valid",
            culled,
            registry.count_valid()
        );
    }
}
