//! Player controller.
//!
//! [`step_player`] advances the player by one simulation step:
//! input → jump → animation state → friction → X move → gravity → Y move →
//! timers. Velocities are in pixels per step; `dt` only drives the easing
//! rates and the timers.
//!
//! [`PlayerContact`] is the player's [`CollisionResponder`]. It reacts to the
//! kind of body the player touched (hazard, pickups, goal) and collects audio
//! cues and the run outcome for the caller. [`player_controller`] is the ECS
//! wrapper that turns those into [`AudioCmd`] messages and a state request.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::kind::EntityKind;
use crate::components::player::PlayerState;
use crate::events::audio::{AudioCmd, FX_JUMP, FX_LAND, FX_PICKUP};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::registry::{BodyHandle, EntityRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::mover::{Axis, CollisionResponder, move_axis};

/// Top walking speed in pixels per step.
pub const WALK_SPEED: f32 = 2.0;
/// Rate at which horizontal velocity approaches the walk target.
pub const WALK_ACCEL: f32 = 22.0;
pub const GROUND_FRICTION: f32 = 10.0;
pub const AIR_FRICTION: f32 = 12.0;
/// Maximum fall speed in pixels per step.
pub const TERMINAL_FALL: f32 = 3.6;
/// Rate at which vertical velocity approaches [`TERMINAL_FALL`].
pub const GRAVITY: f32 = 13.0;
/// Walk animation frame time while a direction is held.
pub const WALK_CADENCE_FAST: f32 = 0.1;
pub const CADENCE_RATE: f32 = 4.0;

/// Move `current` toward `target` by at most `increase`, never overshooting.
pub fn approach(current: f32, target: f32, increase: f32) -> f32 {
    if current < target {
        (current + increase).min(target)
    } else {
        (current - increase).max(target)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Lost,
    Won,
}

impl RunOutcome {
    pub fn game_state(self) -> GameStates {
        match self {
            RunOutcome::Lost => GameStates::Lost,
            RunOutcome::Won => GameStates::Won,
        }
    }
}

/// Gameplay reactions to the player's contacts.
#[derive(Debug, Default)]
pub struct PlayerContact {
    /// Last outcome reached this step. A goal touched after the dead zone wins.
    pub outcome: Option<RunOutcome>,
    pub cues: Vec<&'static str>,
}

impl PlayerContact {
    fn finish(&mut self, outcome: RunOutcome) {
        if let Some(previous) = self.outcome.replace(outcome) {
            log::debug!("{:?} overridden by {:?} in the same step", previous, outcome);
        }
    }
}

impl CollisionResponder for PlayerContact {
    fn on_collision(&mut self, bodies: &mut [Body], actor: BodyHandle, hit: BodyHandle) {
        let kind = match bodies.get(hit.index()) {
            Some(body) if body.valid => body.kind,
            _ => return,
        };
        match kind {
            EntityKind::DeadZone => {
                let player = &mut bodies[actor.index()];
                let boost = player.player_data().map_or(0.0, |d| d.jump_boost_time);
                if boost <= 0.0 {
                    self.finish(RunOutcome::Lost);
                } else {
                    log::debug!(
                        "Dead zone touched with {:.2}s boost left, respawning at {:?}",
                        boost,
                        player.respawn
                    );
                    player.position = player.respawn;
                }
            }
            EntityKind::JumpBoost => {
                bodies[hit.index()].valid = false;
                if let Some(data) = bodies[actor.index()].player_data_mut() {
                    data.grant_jump_boost();
                }
                self.cues.push(FX_PICKUP);
            }
            EntityKind::Checkpoint => {
                bodies[hit.index()].valid = false;
                let player = &mut bodies[actor.index()];
                player.respawn = player.position;
                log::debug!("Checkpoint reached, respawn now {:?}", player.respawn);
                self.cues.push(FX_PICKUP);
            }
            EntityKind::Goal => self.finish(RunOutcome::Won),
            EntityKind::Player | EntityKind::Platform | EntityKind::MovingPlatform => {}
        }
    }

    fn on_land(&mut self, _bodies: &mut [Body], _actor: BodyHandle) {
        self.cues.push(FX_LAND);
    }
}

/// Result of one [`step_player`] call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerStep {
    pub outcome: Option<RunOutcome>,
    /// Sound effect ids to play, in the order they happened.
    pub cues: Vec<&'static str>,
}

/// Advance the registry's player by one step. Does nothing without a player.
pub fn step_player(registry: &mut EntityRegistry, input: &InputState, dt: f32) -> PlayerStep {
    let Some(player) = registry.player() else {
        return PlayerStep::default();
    };
    let collidables = registry.collidables();
    let bodies = registry.bodies_mut();
    let mut contact = PlayerContact::default();

    let body = match bodies.get_mut(player.index()) {
        Some(body) if body.valid => body,
        _ => panic!("Player handle {:?} does not refer to a valid body", player),
    };
    let Body {
        velocity,
        grounded,
        played_land,
        facing_left,
        payload,
        ..
    } = body;
    let Some(data) = payload.player_mut() else {
        panic!("Player body {:?} carries no player payload", player);
    };

    // A wins over D when both are held.
    let walk_dir = if input.move_left.active {
        Some(-1.0)
    } else if input.move_right.active {
        Some(1.0)
    } else {
        None
    };

    match walk_dir {
        Some(dir) => {
            data.walk.speed = approach(data.walk.speed, WALK_CADENCE_FAST, CADENCE_RATE * dt);
            velocity.x = approach(velocity.x, dir * WALK_SPEED, WALK_ACCEL * dt);
            *facing_left = dir < 0.0;
            data.state = PlayerState::Walking;
        }
        None => data.state = PlayerState::Idle,
    }

    if input.jump.just_pressed && *grounded {
        *grounded = false;
        *played_land = false;
        velocity.y = -data.jump_power;
        contact.cues.push(FX_JUMP);
    }

    data.apply_state_change();

    if walk_dir.is_none() {
        let friction = if *grounded {
            GROUND_FRICTION
        } else {
            AIR_FRICTION
        };
        velocity.x = approach(velocity.x, 0.0, friction * dt);
    }

    let vx = velocity.x;
    move_axis(bodies, player, &collidables, vx, Axis::X, &mut contact);

    let body = &mut bodies[player.index()];
    body.velocity.y = approach(body.velocity.y, TERMINAL_FALL, GRAVITY * dt);
    let vy = body.velocity.y;
    move_axis(bodies, player, &collidables, vy, Axis::Y, &mut contact);

    let body = &mut bodies[player.index()];
    if !body.grounded {
        body.fall_timer += dt;
    }
    if let Some(data) = body.player_data_mut() {
        data.animation_mut().update(dt);
        data.tick_boost(dt);
    }

    PlayerStep {
        outcome: contact.outcome,
        cues: contact.cues,
    }
}

/// ECS wrapper around [`step_player`]. Runs only while playing.
pub fn player_controller(
    mut registry: ResMut<EntityRegistry>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut next_state: ResMut<NextGameState>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let step = step_player(&mut registry, &input, time.delta);
    for cue in step.cues {
        audio.write(AudioCmd::play(cue));
    }
    if let Some(outcome) = step.outcome {
        log::info!("Run finished: {:?}", outcome);
        next_state.set(outcome.game_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::{BASE_JUMP_POWER, BOOSTED_JUMP_POWER, WALK_CADENCE};
    use raylib::prelude::Vector2;

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 1.0 / 60.0;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Player standing on a wide floor, no dead zone.
    fn standing_world() -> (EntityRegistry, BodyHandle) {
        let mut registry = EntityRegistry::default();
        let player = registry.spawn(Body::player(Vector2::new(0.0, -24.0)));
        registry.spawn(Body::platform(-64.0, 0.0, 10, 1));
        // Settle onto the floor.
        let input = InputState::default();
        for _ in 0..5 {
            step_player(&mut registry, &input, DT);
        }
        assert!(registry.get(player).unwrap().grounded);
        (registry, player)
    }

    #[test]
    fn test_approach_never_overshoots() {
        assert!(approx_eq(approach(0.0, 2.0, 0.5), 0.5));
        assert!(approx_eq(approach(1.8, 2.0, 0.5), 2.0));
        assert!(approx_eq(approach(0.0, -2.0, 0.5), -0.5));
        assert!(approx_eq(approach(-1.9, -2.0, 0.5), -2.0));
        assert!(approx_eq(approach(3.0, 3.0, 1.0), 3.0));
    }

    #[test]
    fn test_walk_accelerates_toward_target() {
        let (mut registry, player) = standing_world();
        let mut input = InputState::default();
        input.move_right.press();
        step_player(&mut registry, &input, DT);
        let body = registry.get(player).unwrap();
        assert!(approx_eq(body.velocity.x, 22.0 * DT));
        assert!(!body.facing_left);
        assert_eq!(body.player_data().unwrap().state, PlayerState::Walking);

        input.move_right.hold();
        for _ in 0..30 {
            step_player(&mut registry, &input, DT);
        }
        assert!(approx_eq(registry.get(player).unwrap().velocity.x, WALK_SPEED));
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let (mut registry, player) = standing_world();
        let mut input = InputState::default();
        input.move_left.press();
        input.move_right.press();
        step_player(&mut registry, &input, DT);
        let body = registry.get(player).unwrap();
        assert!(body.velocity.x < 0.0);
        assert!(body.facing_left);
    }

    #[test]
    fn test_friction_brings_player_to_rest() {
        let (mut registry, player) = standing_world();
        registry.get_mut(player).unwrap().velocity.x = 2.0;
        let input = InputState::default();
        step_player(&mut registry, &input, DT);
        let vx = registry.get(player).unwrap().velocity.x;
        assert!(approx_eq(vx, 2.0 - GROUND_FRICTION * DT));
        for _ in 0..20 {
            step_player(&mut registry, &input, DT);
        }
        assert!(approx_eq(registry.get(player).unwrap().velocity.x, 0.0));
    }

    #[test]
    fn test_jump_requires_ground_and_fresh_press() {
        let (mut registry, player) = standing_world();
        let mut input = InputState::default();
        input.jump.press();
        let step = step_player(&mut registry, &input, DT);
        assert_eq!(step.cues, vec![FX_JUMP]);
        let body = registry.get(player).unwrap();
        assert!(!body.grounded);
        assert!(!body.played_land);
        // Jump power minus one step of gravity easing.
        assert!(approx_eq(body.velocity.y, -BASE_JUMP_POWER + GRAVITY * DT));

        // Holding space in the air does nothing; pressing again does nothing either.
        input.jump.hold();
        let step = step_player(&mut registry, &input, DT);
        assert!(step.cues.is_empty());
        input.jump.press();
        let step = step_player(&mut registry, &input, DT);
        assert!(!step.cues.contains(&FX_JUMP));
    }

    #[test]
    fn test_landing_cue_plays_once_after_jump() {
        let (mut registry, player) = standing_world();
        let mut input = InputState::default();
        input.jump.press();
        step_player(&mut registry, &input, DT);
        input.jump.release();

        let mut lands = 0;
        for _ in 0..240 {
            let step = step_player(&mut registry, &input, DT);
            lands += step.cues.iter().filter(|c| **c == FX_LAND).count();
        }
        assert_eq!(lands, 1);
        let body = registry.get(player).unwrap();
        assert!(body.grounded);
        assert!(approx_eq(body.fall_timer, 0.0));
    }

    #[test]
    fn test_fall_timer_accumulates_in_air() {
        let mut registry = EntityRegistry::default();
        let player = registry.spawn(Body::player(Vector2::new(0.0, -500.0)));
        let input = InputState::default();
        for _ in 0..10 {
            step_player(&mut registry, &input, DT);
        }
        assert!(approx_eq(registry.get(player).unwrap().fall_timer, 10.0 * DT));
    }

    #[test]
    fn test_idle_restores_walk_cadence() {
        let (mut registry, player) = standing_world();
        let mut input = InputState::default();
        input.move_right.press();
        for _ in 0..10 {
            step_player(&mut registry, &input, DT);
        }
        let cadence = registry.get(player).unwrap().player_data().unwrap().walk.speed;
        assert!(cadence < WALK_CADENCE);

        input.move_right.release();
        step_player(&mut registry, &input, DT);
        let data = registry.get(player).unwrap().player_data().unwrap();
        assert_eq!(data.state, PlayerState::Idle);
        assert!(approx_eq(data.walk.speed, WALK_CADENCE));
    }

    #[test]
    fn test_boost_expiry_halves_jump_power() {
        let (mut registry, player) = standing_world();
        {
            let data = registry.get_mut(player).unwrap().player_data_mut().unwrap();
            data.grant_jump_boost();
            data.jump_boost_time = 0.01;
        }
        let input = InputState::default();
        step_player(&mut registry, &input, DT);
        step_player(&mut registry, &input, DT);
        let data = registry.get(player).unwrap().player_data().unwrap();
        assert!(approx_eq(data.jump_power, BOOSTED_JUMP_POWER / 2.0));
        step_player(&mut registry, &input, DT);
        let data = registry.get(player).unwrap().player_data().unwrap();
        assert!(approx_eq(data.jump_power, BASE_JUMP_POWER));
    }

    #[test]
    fn test_later_outcome_in_a_step_wins() {
        let mut registry = EntityRegistry::default();
        let player = registry.spawn(Body::player(Vector2::new(0.0, -24.0)));
        let zone = registry.spawn(Body::dead_zone(-100.0, 0.0, 200.0));
        let goal = registry.spawn(Body::pickup(0.0, -16.0, EntityKind::Goal));
        registry
            .get_mut(player)
            .and_then(|b| b.player_data_mut())
            .unwrap()
            .jump_boost_time = 0.0;

        let mut contact = PlayerContact::default();
        contact.on_collision(registry.bodies_mut(), player, zone);
        assert_eq!(contact.outcome, Some(RunOutcome::Lost));
        contact.on_collision(registry.bodies_mut(), player, goal);
        assert_eq!(contact.outcome, Some(RunOutcome::Won));

        contact.on_collision(registry.bodies_mut(), player, zone);
        assert_eq!(contact.outcome, Some(RunOutcome::Lost));
    }

    #[test]
    fn test_no_player_is_a_no_op() {
        let mut registry = EntityRegistry::default();
        registry.spawn(Body::platform(0.0, 0.0, 1, 1));
        let step = step_player(&mut registry, &InputState::default(), DT);
        assert_eq!(step, PlayerStep::default());
    }
}
