//! Player payload: controller state machine data, jump tuning and animations.

use crate::components::animation::Animation;
use crate::resources::texturestore::ids;

/// Jump impulse magnitude without boost, in pixels per step.
pub const BASE_JUMP_POWER: f32 = 5.0;
/// Jump impulse magnitude while a jump boost is active.
pub const BOOSTED_JUMP_POWER: f32 = 10.0;
/// Upper bound of the boost timer, in seconds.
pub const MAX_JUMP_BOOST: f32 = 20.0;
/// Seconds granted by a single jump-boost pickup.
pub const JUMP_BOOST_PICKUP: f32 = 4.0;
/// Boost time the player starts a run with.
pub const STARTING_JUMP_BOOST: f32 = 20.0;
/// Default walk cadence, restored every time the player goes idle.
pub const WALK_CADENCE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub state: PlayerState,
    pub prev_state: PlayerState,
    /// Magnitude of the upward impulse applied on jump.
    pub jump_power: f32,
    /// Set while `jump_power` holds the boosted value, cleared when it is
    /// halved back.
    pub jump_boosted: bool,
    /// While positive, a dead-zone contact respawns instead of ending the run.
    pub jump_boost_time: f32,
    pub idle: Animation,
    pub walk: Animation,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerData {
    pub fn new() -> Self {
        Self {
            state: PlayerState::Idle,
            prev_state: PlayerState::Idle,
            jump_power: BASE_JUMP_POWER,
            jump_boosted: false,
            jump_boost_time: 0.0,
            idle: Animation::new(ids::PLAYER_IDLE, WALK_CADENCE, 4),
            walk: Animation::new(ids::PLAYER_WALK, WALK_CADENCE, 6),
        }
    }

    pub fn with_boost_time(mut self, seconds: f32) -> Self {
        self.jump_boost_time = seconds;
        self
    }

    /// Animation matching the current state.
    pub fn animation(&self) -> &Animation {
        match self.state {
            PlayerState::Idle => &self.idle,
            PlayerState::Walking => &self.walk,
        }
    }

    pub fn animation_mut(&mut self) -> &mut Animation {
        match self.state {
            PlayerState::Idle => &mut self.idle,
            PlayerState::Walking => &mut self.walk,
        }
    }

    /// Switch animations when the state changed since the last call.
    ///
    /// Entering `Walking` rewinds the idle track; entering `Idle` rewinds the
    /// walk track and restores its default cadence.
    pub fn apply_state_change(&mut self) -> bool {
        if self.prev_state == self.state {
            return false;
        }
        match self.state {
            PlayerState::Idle => {
                self.walk.reset();
                self.walk.speed = WALK_CADENCE;
            }
            PlayerState::Walking => self.idle.reset(),
        }
        self.prev_state = self.state;
        true
    }

    /// Pickup effect: boosted jump and more boost time, capped.
    pub fn grant_jump_boost(&mut self) {
        self.jump_power = BOOSTED_JUMP_POWER;
        self.jump_boosted = true;
        self.jump_boost_time = (self.jump_boost_time + JUMP_BOOST_PICKUP).min(MAX_JUMP_BOOST);
    }

    /// Decay the boost timer. At expiry a boosted jump is halved once.
    pub fn tick_boost(&mut self, dt: f32) {
        if self.jump_boost_time > 0.0 {
            self.jump_boost_time -= dt;
        } else if self.jump_boosted {
            self.jump_power /= 2.0;
            self.jump_boosted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_defaults() {
        let data = PlayerData::new();
        assert_eq!(data.state, PlayerState::Idle);
        assert!(approx_eq(data.jump_power, BASE_JUMP_POWER));
        assert!(!data.jump_boosted);
        assert!(approx_eq(data.jump_boost_time, 0.0));
    }

    #[test]
    fn test_grant_jump_boost_clamps() {
        let mut data = PlayerData::new().with_boost_time(18.0);
        data.grant_jump_boost();
        assert!(approx_eq(data.jump_power, BOOSTED_JUMP_POWER));
        assert!(approx_eq(data.jump_boost_time, MAX_JUMP_BOOST));

        let mut data = PlayerData::new().with_boost_time(1.0);
        data.grant_jump_boost();
        assert!(approx_eq(data.jump_boost_time, 5.0));
    }

    #[test]
    fn test_boost_expiry_halves_once() {
        let mut data = PlayerData::new();
        data.grant_jump_boost();
        data.tick_boost(10.0);
        assert!(data.jump_boost_time <= 0.0);
        assert!(approx_eq(data.jump_power, BOOSTED_JUMP_POWER));

        data.tick_boost(0.016);
        assert!(approx_eq(data.jump_power, BASE_JUMP_POWER));

        data.tick_boost(0.016);
        data.tick_boost(0.016);
        assert!(approx_eq(data.jump_power, BASE_JUMP_POWER));
    }

    #[test]
    fn test_state_change_resets_animations() {
        let mut data = PlayerData::new();
        data.state = PlayerState::Walking;
        data.walk.speed = 0.1;
        assert!(data.apply_state_change());
        assert!(!data.apply_state_change());

        data.walk.update(0.5);
        data.state = PlayerState::Idle;
        assert!(data.apply_state_change());
        assert_eq!(data.walk.current_frame, 0);
        assert!(approx_eq(data.walk.speed, WALK_CADENCE));
    }
}
