//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications and run start
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod gamestate;
pub mod switchdebug;
