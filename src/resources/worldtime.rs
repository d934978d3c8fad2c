use bevy_ecs::prelude::Resource;

/// Simulation clock. `delta` is the scaled duration of the current step.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    /// Restart the clock for a new run, keeping the time scale.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
    }
}
