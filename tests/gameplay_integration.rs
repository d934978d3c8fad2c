//! Gameplay integration tests: the player controller, the axis mover and the
//! level working together on a plain registry, no ECS world involved.

use raylib::prelude::Vector2;

use blackcoffee::components::body::Body;
use blackcoffee::components::kind::EntityKind;
use blackcoffee::components::player::{BOOSTED_JUMP_POWER, JUMP_BOOST_PICKUP};
use blackcoffee::events::audio::FX_PICKUP;
use blackcoffee::level::{self, BodyRecord, Difficulty};
use blackcoffee::resources::input::InputState;
use blackcoffee::resources::registry::{BodyHandle, EntityRegistry};
use blackcoffee::systems::deadzone::{DEAD_ZONE_TRAIL, trail_dead_zone};
use blackcoffee::systems::player::{RunOutcome, step_player};

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn walking_right() -> InputState {
    let mut input = InputState::default();
    input.move_right.press();
    input.move_right.hold();
    input
}

fn set_boost(registry: &mut EntityRegistry, player: BodyHandle, seconds: f32) {
    registry
        .get_mut(player)
        .and_then(|b| b.player_data_mut())
        .unwrap()
        .jump_boost_time = seconds;
}

/// Player resting on a 10-tile floor spanning x -64..96 with its feet at y=0.
fn floor_world() -> (EntityRegistry, BodyHandle) {
    let mut registry = EntityRegistry::default();
    let player = registry.spawn(Body::player(Vector2::new(0.0, -24.0)));
    registry.spawn(Body::platform(-64.0, 0.0, 10, 1));
    let idle = InputState::default();
    for _ in 0..3 {
        step_player(&mut registry, &idle, DT);
    }
    assert!(registry.get(player).unwrap().grounded);
    (registry, player)
}

/// Player at the standard spawn falling toward the dead zone, nothing below.
fn falling_world() -> (EntityRegistry, BodyHandle) {
    let mut registry = EntityRegistry::default();
    let player = registry.spawn(Body::player(level::PLAYER_SPAWN));
    registry.spawn(Body::dead_zone(-1000.0, 15.0, 2000.0));
    (registry, player)
}

// =============================================================================
// Dead zone
// =============================================================================

#[test]
fn dead_zone_without_boost_loses_the_run() {
    let (mut registry, player) = falling_world();
    set_boost(&mut registry, player, 0.0);
    let idle = InputState::default();

    let outcome = (0..120).find_map(|_| step_player(&mut registry, &idle, DT).outcome);
    assert_eq!(outcome, Some(RunOutcome::Lost));
}

#[test]
fn dead_zone_with_boost_respawns_the_player() {
    let (mut registry, player) = falling_world();
    let idle = InputState::default();

    let mut respawns = 0;
    let mut last_y = registry.get(player).unwrap().position.y;
    for _ in 0..240 {
        let step = step_player(&mut registry, &idle, DT);
        assert_eq!(step.outcome, None);
        let y = registry.get(player).unwrap().position.y;
        // The zone top is at 15; the player is sent back before sinking into it.
        assert!(y <= -9.0, "player reached y={y}");
        if y < last_y - 5.0 {
            respawns += 1;
        }
        last_y = y;
    }
    assert!(respawns >= 1);
}

#[test]
fn trailing_dead_zone_culls_the_tower_below_the_checkpoint() {
    let mut registry = EntityRegistry::default();
    let mut rng = fastrand::Rng::with_seed(3);
    level::populate_run(&mut registry, Difficulty::Easy, &mut rng).unwrap();
    let player = registry.player().unwrap();
    let zone = registry.dead_zone().unwrap();

    registry.get_mut(player).unwrap().respawn = Vector2::new(0.0, -1000.0);
    let culled = trail_dead_zone(&mut registry);
    assert!(culled > 0);

    let zone_y = registry.get(zone).unwrap().position.y;
    assert!(approx_eq(zone_y, -1000.0 + 24.0 + DEAD_ZONE_TRAIL));
    for (_, body) in registry.iter_valid() {
        if body.kind != EntityKind::Player {
            assert!(body.position.y <= zone_y, "{:?} survived at {}", body.kind, body.position.y);
        }
    }
    assert!(registry.iter_valid().any(|(_, b)| b.kind == EntityKind::Goal));
}

// =============================================================================
// Pickups and the goal
// =============================================================================

#[test]
fn jump_boost_is_consumed_once_while_walking_through() {
    let (mut registry, player) = floor_world();
    set_boost(&mut registry, player, 0.0);
    let pickup = registry.spawn(Body::pickup(40.0, -16.0, EntityKind::JumpBoost));
    let input = walking_right();

    let mut pickups = 0;
    let mut boost_after_pickup = None;
    for _ in 0..60 {
        let step = step_player(&mut registry, &input, DT);
        let hits = step.cues.iter().filter(|c| **c == FX_PICKUP).count();
        if hits > 0 && boost_after_pickup.is_none() {
            boost_after_pickup = registry
                .get(player)
                .and_then(|b| b.player_data())
                .map(|d| (d.jump_boost_time, d.jump_power));
        }
        pickups += hits;
    }

    assert_eq!(pickups, 1);
    assert!(!registry.get(pickup).unwrap().valid);
    let (boost, power) = boost_after_pickup.unwrap();
    // Granted, then ticked once in the same step.
    assert!(approx_eq(boost, JUMP_BOOST_PICKUP - DT));
    assert!(approx_eq(power, BOOSTED_JUMP_POWER));
}

#[test]
fn checkpoint_moves_the_respawn_point() {
    let (mut registry, player) = floor_world();
    let checkpoint = registry.spawn(Body::pickup(40.0, -16.0, EntityKind::Checkpoint));
    let input = walking_right();

    for _ in 0..60 {
        step_player(&mut registry, &input, DT);
    }

    assert!(!registry.get(checkpoint).unwrap().valid);
    let respawn = registry.get(player).unwrap().respawn;
    assert!(approx_eq(respawn.y, -24.0));
    // Hitbox starts 4px in and is 18px wide: contact happens just before x=19.
    assert!(respawn.x > 10.0 && respawn.x < 20.0, "respawn.x = {}", respawn.x);
}

#[test]
fn goal_wins_the_run() {
    let (mut registry, _player) = floor_world();
    let goal = registry.spawn(Body::pickup(40.0, -16.0, EntityKind::Goal));
    let input = walking_right();

    let outcome = (0..60).find_map(|_| step_player(&mut registry, &input, DT).outcome);
    assert_eq!(outcome, Some(RunOutcome::Won));
    assert!(registry.get(goal).unwrap().valid);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn blocked_x_still_falls_along_the_wall() {
    let mut registry = EntityRegistry::default();
    let player = registry.spawn(Body::player(Vector2::new(0.0, -100.0)));
    let wall = registry.spawn(Body::platform(30.0, -200.0, 1, 20));
    let input = walking_right();

    for _ in 0..60 {
        step_player(&mut registry, &input, DT);
    }

    let body = registry.get(player).unwrap();
    // Right edge of the inset hitbox rests against the wall's left side.
    assert!(approx_eq(body.position.x, 8.0));
    assert!(body.position.y > -50.0);
    assert!(!body.grounded);
    assert_eq!(body.last_collided, Some(wall));
}

#[test]
fn first_platform_in_insertion_order_blocks() {
    let mut registry = EntityRegistry::default();
    let player = registry.spawn(Body::player(Vector2::new(0.0, -30.0)));
    let first = registry.spawn(Body::platform(-16.0, 0.0, 4, 1));
    let _second = registry.spawn(Body::platform(0.0, 0.0, 4, 1));
    let idle = InputState::default();

    for _ in 0..60 {
        step_player(&mut registry, &idle, DT);
    }

    let body = registry.get(player).unwrap();
    assert!(body.grounded);
    assert!(approx_eq(body.position.y, -24.0));
    assert_eq!(body.last_collided, Some(first));
}

// =============================================================================
// Level generation and dump
// =============================================================================

#[test]
fn seeded_levels_are_reproducible() {
    let build = |seed| {
        let mut registry = EntityRegistry::default();
        let mut rng = fastrand::Rng::with_seed(seed);
        level::populate_run(&mut registry, Difficulty::Medium, &mut rng).unwrap();
        level::level_to_json(&registry).unwrap()
    };
    assert_eq!(build(11), build(11));
    assert_ne!(build(11), build(12));
}

#[test]
fn level_dump_reads_back_as_records() {
    let mut registry = EntityRegistry::default();
    let mut rng = fastrand::Rng::with_seed(5);
    level::populate_run(&mut registry, Difficulty::Hard, &mut rng).unwrap();

    let path = std::env::temp_dir().join(format!("blackcoffee_dump_{}.json", std::process::id()));
    level::write_level_dump(&registry, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let loaded: Vec<BodyRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded, level::records(&registry));
    assert_eq!(loaded[0].kind, EntityKind::Player);
    assert_eq!(loaded[1].kind, EntityKind::DeadZone);
    assert!(loaded.iter().any(|r| r.kind == EntityKind::MovingPlatform));
}

#[test]
fn tiny_registry_reports_full_instead_of_panicking() {
    let mut registry = EntityRegistry::with_capacity(4);
    let mut rng = fastrand::Rng::with_seed(1);
    assert!(level::populate_run(&mut registry, Difficulty::Easy, &mut rng).is_err());
}
