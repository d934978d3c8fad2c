//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and queues the enter work for the new screen.
//!
//! Entering [`GameStates::Playing`] builds a fresh run through [`start_run`]:
//! the registry is cleared, the player and the dead zone are spawned and a
//! new tower is generated.
use crate::level::populate_run;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::registry::EntityRegistry;
use crate::resources::runsettings::RunSettings;
use crate::resources::worldtime::WorldTime;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs the enter hook, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            let old_state = game_state.get().clone();
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state.clone());
            next_game_state.reset();
            debug!("Exited {:?} state", old_state);
            on_state_enter(&new_state, &mut commands);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

fn on_state_enter(state: &GameStates, commands: &mut Commands) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Menu => debug!("Entered Menu state"),
        GameStates::Playing => commands.queue(start_run),
        GameStates::Lost => info!("Out of boost: the run is lost"),
        GameStates::Won => info!("Trophy reached: the run is won"),
        GameStates::Quitting => debug!("Entered Quitting state"),
    }
}

/// Build a fresh run from [`RunSettings`].
///
/// On failure the run is abandoned and the game goes back to the menu.
pub fn start_run(world: &mut World) {
    let mut settings = world.get_resource::<RunSettings>().copied().unwrap_or_default();
    let mut rng = settings.level_rng();

    let result = match world.get_resource_mut::<EntityRegistry>() {
        Some(mut registry) => populate_run(&mut registry, settings.difficulty, &mut rng),
        None => Err("EntityRegistry resource missing".to_string()),
    };

    match result {
        Ok(spawned) => {
            settings.runs += 1;
            info!(
                "Run {} started: {:?}, {} level bodies",
                settings.runs, settings.difficulty, spawned
            );
            world.insert_resource(settings);
            if let Some(mut time) = world.get_resource_mut::<WorldTime>() {
                time.reset();
            }
            if let Some(mut camera) = world.get_resource_mut::<Camera2DRes>() {
                camera.reset();
            }
        }
        Err(e) => {
            error!("Failed to start run: {}", e);
            if let Some(mut next) = world.get_resource_mut::<NextGameState>() {
                next.set(GameStates::Menu);
            }
        }
    }
}
