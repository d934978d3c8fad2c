//! Frame-timer sprite animation.
//!
//! An [`Animation`] walks through `frame_count` horizontal frames of a sprite
//! sheet, holding each one for `speed` seconds. The texture is referenced by
//! an opaque [`TextureId`]; nothing here looks at pixels.

use crate::resources::texturestore::TextureId;

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub texture: TextureId,
    /// Seconds each frame is held.
    pub speed: f32,
    pub frame_count: usize,
    pub timer: f32,
    pub current_frame: usize,
}

impl Animation {
    pub fn new(texture: TextureId, speed: f32, frame_count: usize) -> Self {
        Self {
            texture,
            speed,
            frame_count: frame_count.max(1),
            timer: 0.0,
            current_frame: 0,
        }
    }

    /// Advance the frame timer by `dt` seconds, wrapping to the first frame.
    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > self.speed {
            self.current_frame += 1;
            self.timer = 0.0;
            if self.current_frame >= self.frame_count {
                self.current_frame = 0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.timer = 0.0;
    }
}
