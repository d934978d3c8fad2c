//! Debug toggle resource.
//!
//! The mere presence of this resource turns on the hitbox overlay and extra
//! diagnostics. Remove it to disable them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or log extra detail.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DebugMode {}
