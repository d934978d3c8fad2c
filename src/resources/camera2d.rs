//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that systems can agree on
//! a single world/screen transform. The camera follow system pans and zooms
//! it; the renderer only reads it.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// Zoom a fresh run starts at.
pub const START_ZOOM: f32 = 2.0;

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera looking at the world origin, centered on a `width`x`height` screen.
    pub fn centered(width: u32, height: u32) -> Self {
        Camera2DRes(Camera2D {
            offset: Vector2::new(width as f32 / 2.0, height as f32 / 2.0),
            target: Vector2::zero(),
            rotation: 0.0,
            zoom: START_ZOOM,
        })
    }

    /// Back to the origin and the starting zoom, keeping the screen offset.
    pub fn reset(&mut self) {
        self.0.target = Vector2::zero();
        self.0.zoom = START_ZOOM;
    }
}
