//! Screen flow driven by the keyboard.
//!
//! - Menu: 1/2/3 pick Easy/Medium/Hard and start a run, Escape quits.
//! - Playing, Lost, Won: Escape goes back to the menu.
//!
//! The controller only requests transitions; the game state observer applies
//! them and builds the run.

use bevy_ecs::prelude::*;

use crate::level::Difficulty;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::runsettings::RunSettings;

/// Difficulty picked by the menu keys this frame, if any.
pub fn chosen_difficulty(input: &InputState) -> Option<Difficulty> {
    if input.option_1.just_pressed {
        Some(Difficulty::Easy)
    } else if input.option_2.just_pressed {
        Some(Difficulty::Medium)
    } else if input.option_3.just_pressed {
        Some(Difficulty::Hard)
    } else {
        None
    }
}

pub fn screen_controller(
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut settings: ResMut<RunSettings>,
) {
    match state.get() {
        GameStates::Menu => {
            if let Some(difficulty) = chosen_difficulty(&input) {
                settings.difficulty = difficulty;
                next_state.set(GameStates::Playing);
            } else if input.action_back.just_pressed {
                next_state.set(GameStates::Quitting);
            }
        }
        GameStates::Playing | GameStates::Lost | GameStates::Won => {
            if input.action_back.just_pressed {
                next_state.set(GameStates::Menu);
            }
        }
        GameStates::None | GameStates::Quitting => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gamestate::NextGameStates;

    fn world_in(state: GameStates) -> World {
        let mut world = World::new();
        let mut game_state = GameState::new();
        game_state.set(state);
        world.insert_resource(game_state);
        world.insert_resource(NextGameState::new());
        world.insert_resource(InputState::default());
        world.insert_resource(RunSettings::default());
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(screen_controller);
        schedule.run(world);
    }

    #[test]
    fn test_menu_key_picks_difficulty_and_starts() {
        let mut world = world_in(GameStates::Menu);
        world.resource_mut::<InputState>().option_3.press();
        run(&mut world);
        assert_eq!(world.resource::<RunSettings>().difficulty, Difficulty::Hard);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Pending(GameStates::Playing)
        );
    }

    #[test]
    fn test_escape_in_menu_quits() {
        let mut world = world_in(GameStates::Menu);
        world.resource_mut::<InputState>().action_back.press();
        run(&mut world);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Pending(GameStates::Quitting)
        );
    }

    #[test]
    fn test_escape_after_run_returns_to_menu() {
        for state in [GameStates::Playing, GameStates::Lost, GameStates::Won] {
            let mut world = world_in(state);
            world.resource_mut::<InputState>().action_back.press();
            run(&mut world);
            assert_eq!(
                world.resource::<NextGameState>().get(),
                &NextGameStates::Pending(GameStates::Menu)
            );
        }
    }

    #[test]
    fn test_menu_keys_ignored_while_playing() {
        let mut world = world_in(GameStates::Playing);
        world.resource_mut::<InputState>().option_2.press();
        run(&mut world);
        assert_eq!(world.resource::<NextGameState>().get(), &NextGameStates::Unchanged);
        assert_eq!(world.resource::<RunSettings>().difficulty, Difficulty::Easy);
    }
}
