//! Audio cue messages exchanged with the background audio thread.
//!
//! Simulation code never touches the audio device. It writes [`AudioCmd`]
//! messages (fire and forget) and the audio systems forward them to the
//! thread that owns the raylib sounds.

use bevy_ecs::message::Message;

/// Sound effect ids used by gameplay.
pub const FX_JUMP: &str = "jump";
pub const FX_LAND: &str = "land";
pub const FX_PICKUP: &str = "pickup";

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

impl AudioCmd {
    /// Shorthand for a fire-and-forget effect cue.
    pub fn play(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}

/// Events sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}
