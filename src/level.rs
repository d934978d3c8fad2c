//! Procedural tower generation and the JSON level dump.
//!
//! A run is a vertical climb: two starting platforms at ground level, a
//! column of random platforms every four tiles up to the difficulty's top,
//! and the trophy on a wide final platform above it. [`populate_run`] builds
//! a complete run (player, dead zone, level) into an empty registry.
//!
//! The dump written by [`write_level_dump`] is a flat JSON array of
//! [`BodyRecord`]s, handy for eyeballing seeds without opening a window.

use std::path::Path;

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::body::{Body, PLAYER_SIZE, TILE};
use crate::components::kind::EntityKind;
use crate::components::tags::CapabilityTag;
use crate::resources::registry::EntityRegistry;

/// Where the player starts every run.
pub const PLAYER_SPAWN: Vector2 = Vector2 { x: 0.0, y: -25.0 };
/// Horizontal extent of the dead zone strip.
pub const DEAD_ZONE_WIDTH: f32 = 2000.0;
/// Gap between the player's feet and the dead zone at spawn.
pub const DEAD_ZONE_SPAWN_GAP: f32 = 16.0;
/// Vertical distance between platform rows.
pub const ROW_SPACING: i32 = 64;
/// Random platforms never spawn at or below this height.
pub const LOWEST_ROW: i32 = -100;
/// Random platforms spawn within `[-MAX_ROW_OFFSET, MAX_ROW_OFFSET]`.
pub const MAX_ROW_OFFSET: i32 = 200;

const MOVING_AMPLITUDE: f32 = 48.0;
const MOVING_SPEED: f32 = 1.5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Height of the topmost random row.
    pub fn top(self) -> i32 {
        match self {
            Difficulty::Easy => -2000,
            Difficulty::Medium => -5000,
            Difficulty::Hard => -10000,
        }
    }

    /// Case-insensitive parse used by the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Whether this difficulty adds moving platforms to the tower.
    pub fn has_moving_platforms(self) -> bool {
        !matches!(self, Difficulty::Easy)
    }
}

/// Spawn the player and the dead zone below it.
pub fn spawn_player_and_dead_zone(registry: &mut EntityRegistry) -> Result<(), String> {
    registry.try_spawn(Body::player(PLAYER_SPAWN))?;
    registry.try_spawn(Body::dead_zone(
        -DEAD_ZONE_WIDTH / 2.0,
        PLAYER_SPAWN.y + PLAYER_SIZE.y + DEAD_ZONE_SPAWN_GAP,
        DEAD_ZONE_WIDTH,
    ))?;
    Ok(())
}

/// Clear `registry` and fill it with a fresh run.
///
/// Returns how many bodies the level generator added.
pub fn populate_run(
    registry: &mut EntityRegistry,
    difficulty: Difficulty,
    rng: &mut fastrand::Rng,
) -> Result<usize, String> {
    registry.clear();
    spawn_player_and_dead_zone(registry)?;
    generate(registry, difficulty, rng)
}

/// Append the tower for `difficulty` to `registry`.
///
/// Returns the number of bodies spawned.
pub fn generate(
    registry: &mut EntityRegistry,
    difficulty: Difficulty,
    rng: &mut fastrand::Rng,
) -> Result<usize, String> {
    let before = registry.len();
    let top = difficulty.top();

    registry.try_spawn(Body::platform(0.0, 0.0, 3, 1))?;
    registry.try_spawn(Body::platform(-100.0, 0.0, 3, 1))?;
    registry.try_spawn(Body::pickup(-100.0, -TILE, EntityKind::JumpBoost))?;

    registry.try_spawn(Body::platform(0.0, (top - 100) as f32, 6, 3))?;
    registry.try_spawn(Body::pickup(38.0, (top - 160) as f32, EntityKind::Goal))?;

    let mut y = top;
    while y < LOWEST_ROW {
        let tiles = rng.u32(1..=3);
        let x = rng.i32(-MAX_ROW_OFFSET..=MAX_ROW_OFFSET);
        let (fx, fy) = (x as f32, y as f32);
        registry.try_spawn(Body::platform(fx, fy, tiles, 1))?;

        if y % 3 == 0 {
            registry.try_spawn(Body::platform(-fx, fy, tiles, 1))?;
        } else if y % 5 == 0 {
            registry.try_spawn(Body::pickup(fx, fy - TILE, EntityKind::JumpBoost))?;
        } else if y % 11 == 0 {
            registry.try_spawn(Body::pickup(fx, fy - TILE, EntityKind::Checkpoint))?;
        } else if y % 7 == 0 && difficulty.has_moving_platforms() {
            registry.try_spawn(Body::moving_platform(
                -fx,
                fy,
                tiles,
                MOVING_AMPLITUDE,
                MOVING_SPEED,
            ))?;
        }
        y += ROW_SPACING;
    }

    let spawned = registry.len() - before;
    log::info!(
        "Generated {:?} tower: {} bodies up to y={}",
        difficulty,
        spawned,
        top
    );
    Ok(spawned)
}

/// Flat, serializable view of a body for the level dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub solid: bool,
    pub tags: Vec<CapabilityTag>,
}

impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        let rect = body.bounding_box();
        Self {
            kind: body.kind,
            x: body.position.x,
            y: body.position.y,
            width: rect.width,
            height: rect.height,
            solid: body.solid,
            tags: body.tags.iter().copied().collect(),
        }
    }
}

/// Records for every valid body, in insertion order.
pub fn records(registry: &EntityRegistry) -> Vec<BodyRecord> {
    registry
        .iter_valid()
        .map(|(_, body)| BodyRecord::from(body))
        .collect()
}

/// Serialize the registry to pretty JSON.
pub fn level_to_json(registry: &EntityRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&records(registry))
}

/// Write the level dump to `path`.
pub fn write_level_dump(
    registry: &EntityRegistry,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = level_to_json(registry)?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(())
}
