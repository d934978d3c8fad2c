//! Opaque texture handles and the store that resolves them.
//!
//! Simulation code only ever carries [`TextureId`]s around. The binary loads
//! the actual raylib textures into a [`TextureStore`] (a non-send resource)
//! and the renderer resolves ids at draw time.

use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a visual asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Well-known texture ids used by the game.
pub mod ids {
    use super::TextureId;

    pub const PLAYER_IDLE: TextureId = TextureId(0);
    pub const PLAYER_WALK: TextureId = TextureId(1);
    pub const TILESET: TextureId = TextureId(2);
    pub const COFFEE: TextureId = TextureId(3);
    pub const TROPHY: TextureId = TextureId(4);
}

pub struct TextureStore {
    map: FxHashMap<TextureId, Texture2D>,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Load `path` under `id`. A missing or unreadable file is logged and the
    /// id is left unresolved; the renderer falls back to flat rectangles.
    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, id: TextureId, path: &str) {
        match rl.load_texture(thread, path) {
            Ok(texture) => {
                log::debug!("Loaded texture {:?} from {}", id, path);
                self.map.insert(id, texture);
            }
            Err(e) => log::warn!("Texture {} not loaded ({}), using placeholder", path, e),
        }
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture2D> {
        self.map.get(&id)
    }
}
