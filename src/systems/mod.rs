//! Game systems.
//!
//! The simulation core is [`collision`] + [`mover`]; everything else feeds
//! it or reacts to it.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread (forward cues, poll replies)
//! - [`camera`] – ease the camera after the player
//! - [`collision`] – first-hit box query against a candidate list
//! - [`deadzone`] – trail the hazard under the respawn point and cull
//! - [`gameconfig`] – push config changes to the window
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`menu`] – keyboard screen flow
//! - [`mover`] – stepwise sub-pixel axis movement and the responder hook
//! - [`platforms`] – trophy bob and moving platforms
//! - [`player`] – player controller and its collision reactions
//! - [`render`] – draw the current screen using Raylib
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod camera;
pub mod collision;
pub mod deadzone;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod menu;
pub mod mover;
pub mod platforms;
pub mod player;
pub mod render;
pub mod time;
