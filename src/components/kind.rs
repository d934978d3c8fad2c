//! Body discriminant and the kind-specific payload.

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::player::PlayerData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Platform,
    /// Hazard strip trailing below the player.
    DeadZone,
    JumpBoost,
    Checkpoint,
    MovingPlatform,
    Goal,
}

/// Horizontal oscillation of a moving platform around `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformMotion {
    pub origin: Vector2,
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
}

impl PlatformMotion {
    /// Target x coordinate at `elapsed` seconds.
    pub fn x_at(&self, elapsed: f32) -> f32 {
        self.origin.x + self.amplitude * (elapsed * self.speed).sin()
    }
}

/// Extra state for the kinds that need it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    Player(Box<PlayerData>),
    MovingPlatform(PlatformMotion),
}

impl Payload {
    pub fn player(&self) -> Option<&PlayerData> {
        match self {
            Payload::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerData> {
        match self {
            Payload::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn motion(&self) -> Option<&PlatformMotion> {
        match self {
            Payload::MovingPlatform(motion) => Some(motion),
            _ => None,
        }
    }
}
