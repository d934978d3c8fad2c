//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Frame deltas above this are clamped so a stalled window does not drain
/// the jump-boost timer in a single step.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// clamps it, applies the current `time_scale` and writes both `elapsed` and
/// `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.clamp(0.0, MAX_FRAME_DELTA) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}
