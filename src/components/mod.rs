//! Body data for everything that lives in a run.
//!
//! Unlike a classic ECS layout, bodies are plain structs stored in insertion
//! order inside the [`EntityRegistry`](crate::resources::registry::EntityRegistry)
//! resource; the first-hit collision rule depends on that order.
//!
//! Submodules overview:
//! - [`animation`] – frame timer for sprite-strip animations
//! - [`body`] – the simulated body record and its kind constructors
//! - [`boxcollider`] – axis-aligned box with offset and the overlap test
//! - [`kind`] – body discriminant and kind-specific payloads
//! - [`player`] – player state machine data and jump tuning
//! - [`tags`] – capability tags (`Collidable`, `Ridable`, `Platform`)

pub mod animation;
pub mod body;
pub mod boxcollider;
pub mod kind;
pub mod player;
pub mod tags;
