//! Black Coffee library.
//!
//! Exposes the simulation (bodies, registry, mover, player controller, level
//! generator) and the ECS glue around it for the binary and the integration
//! tests.

pub mod components;
pub mod events;
pub mod level;
pub mod resources;
pub mod systems;
