//! Entity registry resource.
//!
//! [`EntityRegistry`] owns every [`Body`] of the current run in insertion
//! order. Bodies are appended, never removed: invalidation flips
//! [`Body::valid`] and the body drops out of every query. The insertion order
//! is the iteration order of [`EntityRegistry::collidables`], which is what
//! makes the "first hit wins" collision query deterministic.
//!
//! Handles are plain indices. They stay meaningful for the whole run because
//! slots are never reused; [`EntityRegistry::clear`] starts a new run and
//! invalidates all previously issued handles.

use bevy_ecs::prelude::Resource;

use crate::components::body::Body;
use crate::components::kind::EntityKind;
use crate::components::tags::CapabilityTag;

/// Default maximum number of bodies per run.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Non-owning reference to a body in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Resource, Debug, Clone)]
pub struct EntityRegistry {
    bodies: Vec<Body>,
    capacity: usize,
    player: Option<BodyHandle>,
    dead_zone: Option<BodyHandle>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EntityRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            capacity,
            player: None,
            dead_zone: None,
        }
    }

    /// Number of bodies ever spawned this run, valid or not.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Append a body, or report that the registry is full.
    pub fn try_spawn(&mut self, body: Body) -> Result<BodyHandle, String> {
        if self.bodies.len() >= self.capacity {
            return Err(format!(
                "Entity registry full: capacity {} exceeded while spawning {:?}",
                self.capacity, body.kind
            ));
        }
        let handle = BodyHandle(self.bodies.len());
        match body.kind {
            EntityKind::Player => self.player = Some(handle),
            EntityKind::DeadZone => self.dead_zone = Some(handle),
            _ => {}
        }
        self.bodies.push(body);
        Ok(handle)
    }

    /// Append a body. Exceeding the capacity is a programming error and panics.
    pub fn spawn(&mut self, body: Body) -> BodyHandle {
        match self.try_spawn(body) {
            Ok(handle) => handle,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0)
    }

    /// Valid body behind `handle`, if any.
    pub fn get_valid(&self, handle: BodyHandle) -> Option<&Body> {
        self.get(handle).filter(|b| b.valid)
    }

    /// Tag query on a live body. Asking about a stale or invalid handle is a
    /// programming error and panics.
    pub fn has_tag(&self, handle: BodyHandle, tag: CapabilityTag) -> bool {
        match self.get_valid(handle) {
            Some(body) => body.has_tag(tag),
            None => panic!("Tag query on invalid body {:?}", handle),
        }
    }

    /// Handles of every valid body tagged [`CapabilityTag::Collidable`], in
    /// insertion order.
    pub fn collidables(&self) -> Vec<BodyHandle> {
        self.iter_valid()
            .filter(|(_, body)| body.has_tag(CapabilityTag::Collidable))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Soft-delete a body. Returns whether it was valid before.
    pub fn invalidate(&mut self, handle: BodyHandle) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(body) if body.valid => {
                body.valid = false;
                true
            }
            _ => false,
        }
    }

    /// Invalidate every non-player body whose position is below `y`.
    /// Returns how many bodies were culled.
    pub fn cull_below(&mut self, y: f32) -> usize {
        let mut culled = 0;
        for body in self.bodies.iter_mut() {
            if body.valid && body.kind != EntityKind::Player && body.position.y > y {
                body.valid = false;
                culled += 1;
            }
        }
        culled
    }

    pub fn player(&self) -> Option<BodyHandle> {
        self.player
    }

    pub fn dead_zone(&self) -> Option<BodyHandle> {
        self.dead_zone
    }

    /// All bodies, including invalid ones. Movement code indexes this slice
    /// with handles.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter_valid(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.valid)
            .map(|(i, body)| (BodyHandle(i), body))
    }

    pub fn count_valid(&self) -> usize {
        self.bodies.iter().filter(|b| b.valid).count()
    }

    /// Drop every body and handle, ready for a new run.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.player = None;
        self.dead_zone = None;
    }
}
