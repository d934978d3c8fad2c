//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and pushes the window settings to
//! raylib. Run parameters (difficulty, seed) are copied into
//! [`RunSettings`] so the next run picks them up.

use crate::resources::gameconfig::GameConfig;
use crate::resources::runsettings::RunSettings;
use bevy_ecs::prelude::*;

/// Apply [`GameConfig`] whenever it is added or modified.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    mut settings: ResMut<RunSettings>,
) {
    let Some(config) = maybe_config else {
        return;
    };

    if config.is_changed() || config.is_added() {
        let (w, h) = config.window_size();
        if rl.get_screen_width() != w as i32 || rl.get_screen_height() != h as i32 {
            log::info!(
                "Resizing window: {}x{} -> {}x{}",
                rl.get_screen_width(),
                rl.get_screen_height(),
                w,
                h
            );
            rl.set_window_size(w as i32, h as i32);
        }

        rl.set_target_fps(config.target_fps);

        settings.difficulty = config.difficulty;
        settings.seed = config.seed;

        log::debug!("GameConfig changes applied.");
    }
}
