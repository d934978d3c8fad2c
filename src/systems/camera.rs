//! Camera follow.
//!
//! The camera only catches up while the player moves vertically: the lerp
//! factor is the vertical speed times `dt`, so a player standing still leaves
//! the view where it is. Rising zooms out, falling zooms back in.

use bevy_ecs::prelude::*;
use raylib::prelude::{Camera2D, Vector2};

use crate::resources::camera2d::Camera2DRes;
use crate::resources::registry::EntityRegistry;
use crate::resources::worldtime::WorldTime;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 2.0;
/// Rate at which zoom eases toward its target.
pub const ZOOM_RATE: f32 = 1.0;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Ease `camera` toward `focus` given the focus' vertical velocity.
pub fn follow(camera: &mut Camera2D, focus: Vector2, velocity_y: f32, dt: f32) {
    let t = velocity_y.abs() * dt;
    camera.target = Vector2::new(
        lerp(camera.target.x, focus.x, t),
        lerp(camera.target.y, focus.y, t),
    );
    let zoom_target = (camera.zoom - (-velocity_y).floor()).clamp(MIN_ZOOM, MAX_ZOOM);
    camera.zoom = lerp(camera.zoom, zoom_target, ZOOM_RATE * dt);
}

pub fn camera_follow(
    mut camera: ResMut<Camera2DRes>,
    registry: Res<EntityRegistry>,
    time: Res<WorldTime>,
) {
    let Some(player) = registry.player().and_then(|p| registry.get_valid(p)) else {
        return;
    };
    follow(&mut camera.0, player.position, player.velocity.y, time.delta);
}
