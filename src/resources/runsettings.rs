//! Parameters for the next run.
//!
//! Seeded from [`GameConfig`] and the command line at startup; the menu
//! overwrites the difficulty before every run.

use bevy_ecs::prelude::Resource;

use crate::level::Difficulty;
use crate::resources::gameconfig::GameConfig;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSettings {
    pub difficulty: Difficulty,
    /// Fixed level seed. `None` draws a fresh level every run.
    pub seed: Option<u64>,
    /// Runs started so far.
    pub runs: u32,
}

impl RunSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            seed: config.seed,
            runs: 0,
        }
    }

    /// Random source for the next level.
    pub fn level_rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
