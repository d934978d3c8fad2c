//! Per-frame keyboard input resource.
//!
//! Captures the handful of keys the game reads and exposes them to systems
//! via the [`InputState`] resource. A/D walk, Space jumps, Escape backs out of
//! the current screen, 1/2/3 pick a difficulty in the menu and F11 toggles
//! the debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Released state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }

    /// Apply this frame's raw key readings.
    pub fn set(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }

    /// Simulate holding the key down starting this frame. Used by tests and
    /// scripted demos.
    pub fn press(&mut self) {
        self.set(true, true, false);
    }

    /// Keep the key held without a fresh edge.
    pub fn hold(&mut self) {
        self.set(true, false, false);
    }

    pub fn release(&mut self) {
        let was_active = self.active;
        self.set(false, false, was_active);
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub action_back: BoolState,
    // Menu choices
    pub option_1: BoolState,
    pub option_2: BoolState,
    pub option_3: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: BoolState::bound(KeyboardKey::KEY_A),
            move_right: BoolState::bound(KeyboardKey::KEY_D),
            jump: BoolState::bound(KeyboardKey::KEY_SPACE),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            option_1: BoolState::bound(KeyboardKey::KEY_ONE),
            option_2: BoolState::bound(KeyboardKey::KEY_TWO),
            option_3: BoolState::bound(KeyboardKey::KEY_THREE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Every action, for bulk polling.
    pub fn all_mut(&mut self) -> [&mut BoolState; 8] {
        [
            &mut self.move_left,
            &mut self.move_right,
            &mut self.jump,
            &mut self.action_back,
            &mut self.option_1,
            &mut self.option_2,
            &mut self.option_3,
            &mut self.mode_debug,
        ]
    }

    /// Drop every held key and edge.
    pub fn clear(&mut self) {
        for state in self.all_mut() {
            state.set(false, false, false);
        }
    }
}
