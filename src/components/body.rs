//! The simulated body record.
//!
//! Every object in a run (player, platforms, pickups, the dead zone, the
//! goal) is a [`Body`] stored in the [`EntityRegistry`]. What a body *does*
//! is decided by three things:
//! - `solid`: whether it blocks an actor's step when it is hit;
//! - `tags`: which systems consider it at all (see [`CapabilityTag`]);
//! - `kind`: what the player's collision response does with it.
//!
//! [`EntityRegistry`]: crate::resources::registry::EntityRegistry

use raylib::prelude::{Rectangle, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::kind::{EntityKind, Payload, PlatformMotion};
use crate::components::player::{PlayerData, STARTING_JUMP_BOOST};
use crate::components::tags::{CapabilityTag, TagSet};
use crate::resources::registry::BodyHandle;
use crate::resources::texturestore::{TextureId, ids};

/// Side of a level tile in pixels.
pub const TILE: f32 = 16.0;
/// Player hitbox size.
pub const PLAYER_SIZE: Vector2 = Vector2 { x: 18.0, y: 24.0 };
/// Horizontal inset of the player hitbox from its position.
pub const PLAYER_HITBOX_INSET: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left origin, continuous.
    pub position: Vector2,
    /// Requested displacement per step, integrated by controllers.
    pub velocity: Vector2,
    /// Sub-pixel displacement not yet applied, per axis.
    pub remainder: Vector2,
    pub collider: BoxCollider,
    pub solid: bool,
    pub tags: TagSet,
    pub kind: EntityKind,
    /// Soft-delete flag. Invalid bodies are skipped by every system.
    pub valid: bool,
    /// Most recent collision query hit. Never cleared on a miss.
    pub last_collided: Option<BodyHandle>,
    pub grounded: bool,
    /// Seconds spent airborne since the last landing.
    pub fall_timer: f32,
    pub played_land: bool,
    pub respawn: Vector2,
    pub facing_left: bool,
    pub texture: Option<TextureId>,
    pub payload: Payload,
}

impl Body {
    /// Create a body, rejecting degenerate geometry.
    pub fn new(kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Result<Self, String> {
        let collider = BoxCollider::new(w, h);
        if !collider.is_well_formed() {
            return Err(format!(
                "Invalid body size {}x{} for {:?}: both extents must be positive",
                w, h, kind
            ));
        }
        Ok(Self::with_collider(kind, Vector2::new(x, y), collider))
    }

    fn with_collider(kind: EntityKind, position: Vector2, collider: BoxCollider) -> Self {
        Self {
            position,
            velocity: Vector2::zero(),
            remainder: Vector2::zero(),
            collider,
            solid: false,
            tags: TagSet::new(),
            kind,
            valid: true,
            last_collided: None,
            grounded: false,
            fall_timer: 0.0,
            played_land: true,
            respawn: position,
            facing_left: false,
            texture: None,
            payload: Payload::None,
        }
    }

    /// The player actor. Not collidable itself; its hitbox is inset from the
    /// sprite origin.
    pub fn player(respawn: Vector2) -> Self {
        let collider = BoxCollider::new(PLAYER_SIZE.x, PLAYER_SIZE.y)
            .with_offset(Vector2::new(PLAYER_HITBOX_INSET, 0.0));
        let mut body = Self::with_collider(EntityKind::Player, respawn, collider);
        body.respawn = respawn;
        body.payload = Payload::Player(Box::new(
            PlayerData::new().with_boost_time(STARTING_JUMP_BOOST),
        ));
        body
    }

    /// Solid level geometry, `tiles` tiles wide and `rows` tiles tall.
    pub fn platform(x: f32, y: f32, tiles: u32, rows: u32) -> Self {
        let collider = BoxCollider::new(TILE * tiles.max(1) as f32, TILE * rows.max(1) as f32);
        Self::with_collider(EntityKind::Platform, Vector2::new(x, y), collider)
            .solid(true)
            .with_tag(CapabilityTag::Collidable)
            .with_tag(CapabilityTag::Platform)
            .with_texture(ids::TILESET)
    }

    /// A platform oscillating horizontally that carries actors standing on it.
    pub fn moving_platform(x: f32, y: f32, tiles: u32, amplitude: f32, speed: f32) -> Self {
        let mut body = Self::platform(x, y, tiles, 1).with_tag(CapabilityTag::Ridable);
        body.kind = EntityKind::MovingPlatform;
        body.payload = Payload::MovingPlatform(PlatformMotion {
            origin: Vector2::new(x, y),
            amplitude,
            speed,
        });
        body
    }

    /// One-tile trigger: jump boost, checkpoint or goal.
    pub fn pickup(x: f32, y: f32, kind: EntityKind) -> Self {
        let texture = match kind {
            EntityKind::Goal => ids::TROPHY,
            _ => ids::COFFEE,
        };
        Self::with_collider(kind, Vector2::new(x, y), BoxCollider::new(TILE, TILE))
            .with_tag(CapabilityTag::Collidable)
            .with_texture(texture)
    }

    /// The hazard strip. Collidable so contact reaches the response, never solid.
    pub fn dead_zone(x: f32, y: f32, w: f32) -> Self {
        Self::with_collider(EntityKind::DeadZone, Vector2::new(x, y), BoxCollider::new(w, TILE))
            .with_tag(CapabilityTag::Collidable)
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_tag(mut self, tag: CapabilityTag) -> Self {
        self.tags.add(tag);
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn has_tag(&self, tag: CapabilityTag) -> bool {
        self.tags.has(tag)
    }

    /// Current world-space bounding box.
    pub fn bounding_box(&self) -> Rectangle {
        self.collider.rect(self.position)
    }

    /// Move to an absolute y, keeping x.
    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn player_data(&self) -> Option<&PlayerData> {
        self.payload.player()
    }

    pub fn player_data_mut(&mut self) -> Option<&mut PlayerData> {
        self.payload.player_mut()
    }
}
