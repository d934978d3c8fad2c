//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1024
//! height = 576
//! target_fps = 60
//!
//! [game]
//! difficulty = medium
//! seed = 1234
//! capacity = 1024
//!
//! [audio]
//! enabled = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::level::Difficulty;
use crate::resources::registry::DEFAULT_CAPACITY;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1024;
const DEFAULT_WINDOW_HEIGHT: u32 = 576;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_AUDIO_ENABLED: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings, run parameters and the audio switch. Changing it
/// at runtime makes [`apply_gameconfig_changes`] push the window settings to
/// raylib.
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second. Movement is per frame, so this is also the
    /// game speed.
    pub target_fps: u32,
    pub difficulty: Difficulty,
    /// Fixed level seed. Absent means a new random level each run.
    pub seed: Option<u64>,
    /// Maximum bodies per run.
    pub capacity: usize,
    pub audio_enabled: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            difficulty: Difficulty::default(),
            seed: None,
            capacity: DEFAULT_CAPACITY,
            audio_enabled: DEFAULT_AUDIO_ENABLED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or malformed values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [game] section
        if let Some(name) = config.get("game", "difficulty") {
            match Difficulty::from_name(&name) {
                Some(difficulty) => self.difficulty = difficulty,
                None => warn!("Unknown difficulty '{}' in config, keeping {:?}", name, self.difficulty),
            }
        }
        if let Some(seed) = config.getuint("game", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        if let Some(capacity) = config.getuint("game", "capacity").ok().flatten() {
            if capacity == 0 {
                warn!("Ignoring zero entity capacity in config");
            } else {
                self.capacity = capacity as usize;
            }
        }

        // [audio] section
        if let Some(enabled) = config.getbool("audio", "enabled").ok().flatten() {
            self.audio_enabled = enabled;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, difficulty={:?}, seed={:?}, capacity={}, audio={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.difficulty,
            self.seed,
            self.capacity,
            self.audio_enabled
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        let difficulty = format!("{:?}", self.difficulty).to_ascii_lowercase();
        config.set("game", "difficulty", Some(difficulty));
        if let Some(seed) = self.seed {
            config.set("game", "seed", Some(seed.to_string()));
        }
        config.set("game", "capacity", Some(self.capacity.to_string()));

        config.set("audio", "enabled", Some(self.audio_enabled.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blackcoffee_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1024, 576));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.seed, None);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.audio_enabled);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let mut config = GameConfig::with_path(temp_path("missing"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_size(), (1024, 576));
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_path("partial");
        std::fs::write(
            &path,
            "[window]\nwidth = 1280\n\n[game]\ndifficulty = Hard\nseed = 77\ncapacity = 0\n",
        )
        .unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.window_size(), (1280, 576));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let mut config = GameConfig::with_path(&path);
        config.difficulty = Difficulty::Medium;
        config.seed = Some(9);
        config.audio_enabled = false;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.difficulty, Difficulty::Medium);
        assert_eq!(loaded.seed, Some(9));
        assert!(!loaded.audio_enabled);
        let _ = std::fs::remove_file(&path);
    }
}
