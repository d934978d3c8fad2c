//! Black Coffee main entry point.
//!
//! A vertical platformer built on an actor-vs-solid collision core:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for resources, scheduling, observers and messages
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini`, open the window
//! 2. Insert resources, start the audio thread, register observers
//! 3. Enter the menu, then every frame:
//!    - read input and apply screen transitions
//!    - while playing: moving platforms, player, dead zone, trophy, camera
//!    - forward audio cues, render
//! 4. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --difficulty hard --seed 42
//! cargo run --release -- --dump-level level.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use blackcoffee::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use blackcoffee::events::switchdebug::switch_debug_observer;
use blackcoffee::level::{self, Difficulty};
use blackcoffee::resources::audio::{init_audio_messages, load_game_fx, setup_audio, shutdown_audio, AudioBridge};
use blackcoffee::resources::camera2d::Camera2DRes;
use blackcoffee::resources::gameconfig::GameConfig;
use blackcoffee::resources::gamestate::{GameState, GameStates, NextGameState};
use blackcoffee::resources::input::InputState;
use blackcoffee::resources::registry::EntityRegistry;
use blackcoffee::resources::runsettings::RunSettings;
use blackcoffee::resources::texturestore::{TextureStore, ids};
use blackcoffee::resources::worldtime::WorldTime;
use blackcoffee::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use blackcoffee::systems::camera::camera_follow;
use blackcoffee::systems::deadzone::dead_zone_system;
use blackcoffee::systems::gameconfig::apply_gameconfig_changes;
use blackcoffee::systems::gamestate::{check_pending_state, state_is_playing};
use blackcoffee::systems::input::update_input_state;
use blackcoffee::systems::menu::screen_controller;
use blackcoffee::systems::platforms::{goal_bob_system, moving_platform_system};
use blackcoffee::systems::player::player_controller;
use blackcoffee::systems::render::render_system;
use blackcoffee::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

const ASSET_DIR: &str = "./assets";

/// I'm drinking black coffee!
#[derive(Parser)]
#[command(version, about = "Climb the tower on coffee before the dead zone catches you.")]
struct Cli {
    /// Configuration file to read (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Difficulty of the first run, overriding the config file.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Fixed level seed, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Generate a level, write it as JSON and exit.
    /// Optionally provide a path (default: level.json).
    #[arg(long, value_name = "PATH")]
    dump_level: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{} ({:?}), using defaults", e, config.config_path);
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    // Early-exit: dump a generated level and quit (no window/audio needed)
    if let Some(maybe_path) = cli.dump_level {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("level.json"));
        let settings = RunSettings::from_config(&config);
        let mut registry = EntityRegistry::with_capacity(config.capacity);
        let mut rng = settings.level_rng();
        if let Err(e) = level::populate_run(&mut registry, settings.difficulty, &mut rng) {
            log::error!("Error generating level: {e}");
            std::process::exit(1);
        }
        if let Err(e) = level::write_level_dump(&registry, &path) {
            log::error!("Error: {e}");
            std::process::exit(1);
        }
        println!(
            "{:?} level with {} bodies written to {}",
            settings.difficulty,
            registry.len(),
            path.display()
        );
        return;
    }

    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title("I'm drinking black coffee!")
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is a game key, not the exit key.
    rl.set_exit_key(None);

    let mut textures = TextureStore::new();
    for (id, file) in [
        (ids::PLAYER_IDLE, "Boy_idle.png"),
        (ids::PLAYER_WALK, "Boy_walk.png"),
        (ids::TILESET, "tileset_forest.png"),
        (ids::COFFEE, "coffee.png"),
        (ids::TROPHY, "gold.png"),
    ] {
        textures.load(&mut rl, &thread, id, &format!("{}/{}", ASSET_DIR, file));
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Camera2DRes::centered(window_width, window_height));
    world.insert_resource(EntityRegistry::with_capacity(config.capacity));
    world.insert_resource(RunSettings::from_config(&config));
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    if config.audio_enabled {
        setup_audio(&mut world);
        if let Some(bridge) = world.get_resource::<AudioBridge>() {
            load_game_fx(bridge, ASSET_DIR);
        }
    } else {
        log::info!("Audio disabled by config");
        init_audio_messages(&mut world);
    }

    world.insert_resource(config);
    world.insert_non_send_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(switch_debug_observer));
    // Ensure the observers are registered before anything triggers events.
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Menu);
    world.trigger(GameStateChangedEvent {});

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(update_input_state);
    update.add_systems(screen_controller.after(update_input_state));
    update.add_systems(check_pending_state.after(screen_controller));
    update.add_systems(
        (
            moving_platform_system,
            player_controller,
            dead_zone_system,
            goal_bob_system,
            camera_follow,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state),
    );
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain()
            .after(player_controller),
    );
    update.add_systems(render_system.after(camera_follow).after(forward_audio_cmds));

    if let Err(e) = update.initialize(&mut world) {
        log::error!("Failed to initialize schedule: {e}");
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<GameState>().is_quitting()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    shutdown_audio(&mut world);
    log::info!("Bye!");
}
