//! Collision query.
//!
//! [`first_collision`] answers "does this probe rectangle hit anything?" for a
//! single actor against a candidate list. The first overlapping candidate in
//! list order wins, not the nearest one; candidate lists come from
//! [`EntityRegistry::collidables`](crate::resources::registry::EntityRegistry::collidables)
//! and are therefore in level insertion order.

use raylib::prelude::Rectangle;

use crate::components::body::Body;
use crate::components::boxcollider::BoxCollider;
use crate::resources::registry::BodyHandle;

/// Return the first candidate whose box overlaps `probe` and record it as the
/// actor's `last_collided`.
///
/// The actor itself and invalid candidates are skipped. On a miss the actor's
/// `last_collided` keeps its previous value.
pub fn first_collision(
    bodies: &mut [Body],
    actor: BodyHandle,
    candidates: &[BodyHandle],
    probe: &Rectangle,
) -> Option<BodyHandle> {
    let hit = candidates.iter().copied().find(|&candidate| {
        candidate != actor
            && bodies
                .get(candidate.index())
                .is_some_and(|body| body.valid && BoxCollider::rects_overlap(&body.bounding_box(), probe))
    })?;
    if let Some(actor_body) = bodies.get_mut(actor.index()) {
        actor_body.last_collided = Some(hit);
    }
    Some(hit)
}

/// First valid solid candidate that `probe` overlaps but `current` does not.
///
/// Solids the actor already sits inside are skipped so it can walk out of
/// them, while a fresh solid further down the list still blocks.
pub fn first_blocking(
    bodies: &[Body],
    actor: BodyHandle,
    candidates: &[BodyHandle],
    current: &Rectangle,
    probe: &Rectangle,
) -> Option<BodyHandle> {
    candidates.iter().copied().find(|&candidate| {
        candidate != actor
            && bodies.get(candidate.index()).is_some_and(|body| {
                let rect = body.bounding_box();
                body.valid
                    && body.solid
                    && BoxCollider::rects_overlap(&rect, probe)
                    && !BoxCollider::rects_overlap(&rect, current)
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::kind::EntityKind;
    use raylib::prelude::Vector2;

    fn bodies() -> Vec<Body> {
        vec![
            Body::new(EntityKind::Player, 0.0, 0.0, 10.0, 10.0).unwrap(),
            Body::platform(20.0, 0.0, 1, 1),
            Body::platform(15.0, 0.0, 1, 1),
        ]
    }

    #[test]
    fn test_miss_leaves_last_collided() {
        let mut bodies = bodies();
        bodies[0].last_collided = Some(BodyHandle(2));
        let probe = Rectangle::new(-100.0, -100.0, 10.0, 10.0);
        let hit = first_collision(&mut bodies, BodyHandle(0), &[BodyHandle(1), BodyHandle(2)], &probe);
        assert!(hit.is_none());
        assert_eq!(bodies[0].last_collided, Some(BodyHandle(2)));
    }

    #[test]
    fn test_first_in_list_order_wins() {
        let mut bodies = bodies();
        // Probe overlaps both platforms; list order decides, not distance.
        let probe = Rectangle::new(18.0, 0.0, 10.0, 10.0);
        let hit = first_collision(&mut bodies, BodyHandle(0), &[BodyHandle(1), BodyHandle(2)], &probe);
        assert_eq!(hit, Some(BodyHandle(1)));
        assert_eq!(bodies[0].last_collided, Some(BodyHandle(1)));

        let hit = first_collision(&mut bodies, BodyHandle(0), &[BodyHandle(2), BodyHandle(1)], &probe);
        assert_eq!(hit, Some(BodyHandle(2)));
    }

    #[test]
    fn test_skips_self_and_invalid() {
        let mut bodies = bodies();
        bodies[1].valid = false;
        let probe = bodies[0].collider.rect(Vector2::new(11.0, 0.0));
        let candidates = [BodyHandle(0), BodyHandle(1), BodyHandle(2)];
        assert_eq!(first_collision(&mut bodies, BodyHandle(0), &candidates, &probe), Some(BodyHandle(2)));

        let probe = bodies[0].collider.rect(Vector2::new(0.0, 0.0));
        assert_eq!(first_collision(&mut bodies, BodyHandle(0), &[BodyHandle(0)], &probe), None);
    }

    #[test]
    fn test_blocking_skips_solids_already_overlapped() {
        let mut bodies = bodies();
        // Platform 1 spans x 20..36, platform 2 spans x 15..31.
        // Stepping left: already inside 1, about to enter 2.
        let current = Rectangle::new(31.0, 0.0, 10.0, 10.0);
        let probe = Rectangle::new(30.0, 0.0, 10.0, 10.0);
        let candidates = [BodyHandle(1), BodyHandle(2)];
        assert_eq!(
            first_blocking(&bodies, BodyHandle(0), &candidates, &current, &probe),
            Some(BodyHandle(2))
        );

        bodies[2].solid = false;
        assert_eq!(first_blocking(&bodies, BodyHandle(0), &candidates, &current, &probe), None);
    }
}
