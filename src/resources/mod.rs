//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camera2d` – shared 2D camera used for world/screen transforms
//! - `debugmode` – presence toggles the debug overlay and logs
//! - `gameconfig` – INI-backed window, run and audio settings
//! - `gamestate` – authoritative and pending screen
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `registry` – every body of the current run, in insertion order
//! - `runsettings` – difficulty and seed for the next run
//! - `texturestore` – texture ids and the loaded raylib textures
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod registry;
pub mod runsettings;
pub mod texturestore;
pub mod worldtime;
