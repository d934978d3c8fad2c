//! Axis mover: stepwise, sub-pixel accumulating actor movement.
//!
//! [`move_axis`] turns a continuous displacement into whole-pixel steps and
//! resolves each step against a list of collidable bodies:
//!
//! 1. add the request to the actor's remainder on that axis;
//! 2. round the remainder to the nearest integer (half away from zero) and
//!    keep the fractional rest for the next call;
//! 3. probe one pixel at a time in the direction of travel;
//! 4. on contact, hand the hit to a [`CollisionResponder`]; a non-solid hit
//!    (a trigger) lets the step through, a solid hit ends the move and the
//!    undelivered pixels are dropped. Solids the actor already overlaps do
//!    not block, but any other solid the probe reaches does, even when it
//!    is not the first hit in list order.
//!
//! A body stays in contact for several consecutive probes while the actor
//! passes through it. The responder hears about it once per call.
//!
//! Callers resolve X completely before Y. That is what gives platformer
//! sliding: a diagonal move into a wall still completes the open axis.
//!
//! The mover only ever mutates the actor's position, velocity, remainder and
//! grounding fields, plus whatever the responder chooses to do.

use raylib::prelude::Vector2;

use crate::components::body::Body;
use crate::resources::registry::BodyHandle;
use crate::systems::collision::{first_blocking, first_collision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn get(self, v: Vector2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    pub fn get_mut(self, v: &mut Vector2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }

    /// Unit vector along the axis scaled by `amount`.
    pub fn offset(self, amount: f32) -> Vector2 {
        match self {
            Axis::X => Vector2::new(amount, 0.0),
            Axis::Y => Vector2::new(0.0, amount),
        }
    }
}

/// Reaction hook invoked by the mover. Implementations carry the gameplay
/// semantics; the mover only knows "blocked" or "not blocked".
pub trait CollisionResponder {
    /// `actor` probed into `hit`. May mutate any body (invalidate `hit`,
    /// teleport `actor`) but must not invalidate `actor`.
    fn on_collision(&mut self, bodies: &mut [Body], actor: BodyHandle, hit: BodyHandle);

    /// The actor landed after falling and had not yet played its landing cue.
    fn on_land(&mut self, _bodies: &mut [Body], _actor: BodyHandle) {}
}

/// Responder that ignores every contact.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResponse;

impl CollisionResponder for NoResponse {
    fn on_collision(&mut self, _bodies: &mut [Body], _actor: BodyHandle, _hit: BodyHandle) {}
}

/// What a single [`move_axis`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisMove {
    /// Signed whole pixels actually applied.
    pub moved: i32,
    /// Solid body that stopped the move, if any.
    pub blocked_by: Option<BodyHandle>,
    /// Whether this call turned a fall into a landing.
    pub landed: bool,
}

fn actor_body(bodies: &mut [Body], actor: BodyHandle) -> &mut Body {
    match bodies.get_mut(actor.index()) {
        Some(body) if body.valid => body,
        _ => panic!("move_axis called with invalid actor {:?}", actor),
    }
}

/// Move `actor` by `amount` pixels along `axis`, one pixel at a time.
///
/// Panics if `actor` does not refer to a valid body.
pub fn move_axis(
    bodies: &mut [Body],
    actor: BodyHandle,
    collidables: &[BodyHandle],
    amount: f32,
    axis: Axis,
    responder: &mut dyn CollisionResponder,
) -> AxisMove {
    let mut result = AxisMove::default();

    let body = actor_body(bodies, actor);
    *axis.get_mut(&mut body.remainder) += amount;
    let rounded = axis.get(body.remainder).round();
    let mut remaining = rounded as i32;
    if remaining == 0 {
        return result;
    }
    *axis.get_mut(&mut body.remainder) -= rounded;
    let sign = remaining.signum();
    let mut reported: Option<BodyHandle> = None;

    while remaining != 0 {
        let body = actor_body(bodies, actor);
        let probe = body
            .collider
            .rect(body.position + axis.offset(sign as f32));

        let Some(hit) = first_collision(bodies, actor, collidables, &probe) else {
            step(bodies, actor, axis, sign);
            remaining -= sign;
            result.moved += sign;
            continue;
        };

        if reported != Some(hit) {
            reported = Some(hit);
            responder.on_collision(bodies, actor, hit);
        }

        // The responder may have invalidated the hit or teleported the actor.
        let body = actor_body(bodies, actor);
        let here = body.bounding_box();
        let probe = body
            .collider
            .rect(body.position + axis.offset(sign as f32));
        let Some(blocker) = first_blocking(bodies, actor, collidables, &here, &probe) else {
            step(bodies, actor, axis, sign);
            remaining -= sign;
            result.moved += sign;
            continue;
        };

        if blocker != hit {
            actor_body(bodies, actor).last_collided = Some(blocker);
            if reported != Some(blocker) {
                reported = Some(blocker);
                responder.on_collision(bodies, actor, blocker);
            }
        }

        result.blocked_by = Some(blocker);
        if axis == Axis::Y {
            let body = actor_body(bodies, actor);
            let falling = body.velocity.y > 0.0;
            body.velocity.y = 0.0;
            if falling {
                body.grounded = true;
                body.fall_timer = 0.0;
                result.landed = true;
                if !body.played_land {
                    body.played_land = true;
                    responder.on_land(bodies, actor);
                }
            }
        }
        break;
    }

    if axis == Axis::Y && result.blocked_by.is_none() && result.moved != 0 {
        actor_body(bodies, actor).grounded = false;
    }

    result
}

fn step(bodies: &mut [Body], actor: BodyHandle, axis: Axis, sign: i32) {
    let body = actor_body(bodies, actor);
    *axis.get_mut(&mut body.position) += sign as f32;
}
