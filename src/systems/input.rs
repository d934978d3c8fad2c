//! Input systems.
//!
//! - [`update_input_state`] reads keyboard state from Raylib each frame and
//!   writes it into [`crate::resources::input::InputState`].
//! - Pressing the debug key triggers
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for state in input.all_mut() {
        let key = state.key_binding;
        state.set(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
    }

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
