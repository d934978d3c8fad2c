//! Audio systems backed by a dedicated thread and raylib.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the raylib audio device
//!   and every loaded [`Sound`], and executes [`AudioCmd`]s.
//! - [`update_bevy_audio_cmds`] / [`forward_audio_cmds`] move cues written by
//!   gameplay systems onto the channel.
//! - [`poll_audio_messages`] / [`update_bevy_audio_messages`] bring the
//!   thread's replies back into the ECS and log load failures.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

/// Drain pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for msg in bridge.rx_msg.try_iter() {
        if let AudioMessage::FxLoadFailed { id, error } = &msg {
            log::warn!("Sound '{}' failed to load: {}", id, error);
        }
        writer.write(msg);
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS `AudioCmd` messages to the audio thread. Without a bridge the
/// cues are dropped.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        if let Some(bridge) = bridge.as_ref() {
            // Ignore send errors on shutdown
            let _ = bridge.tx_cmd.send(cmd.clone());
        }
    }
}

/// Advance the ECS message queue for `AudioCmd` so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks until [`AudioCmd::Shutdown`] arrives or the command channel closes.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            log::error!("Failed to initialize audio device: {}", e);
            // Keep draining so senders never block on a dead thread.
            for cmd in rx_cmd.iter() {
                if matches!(cmd, AudioCmd::Shutdown) {
                    break;
                }
            }
            return;
        }
    };

    log::debug!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                Ok(sound) => {
                    log::debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                    sounds.insert(id.clone(), sound);
                    let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                        id,
                        error: format!("{} ({})", e, path),
                    });
                }
            },
            AudioCmd::PlayFx { id } => {
                if let Some(sound) = sounds.get(&id) {
                    sound.play();
                } else {
                    log::trace!("[audio] fx play skipped id='{}' reason='not loaded'", id);
                }
            }
            AudioCmd::Shutdown => {
                log::debug!("[audio] shutdown requested");
                break;
            }
        }
    }

    // Sounds must drop before `audio`.
    sounds.clear();
    log::debug!("[audio] thread exiting");
}
