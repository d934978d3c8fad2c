//! Capability tags.
//!
//! A [`TagSet`] lists the behaviors a body opts into. Other systems only ever
//! ask "does this body carry tag X?"; the mover itself never looks at tags,
//! the registry uses [`CapabilityTag::Collidable`] to build the per-step
//! collidable view.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Maximum number of tags a single body can carry.
pub const MAX_TAGS: usize = 10;

/// Behaviors a body can participate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityTag {
    /// Takes part in collision queries (blocking or as a trigger).
    Collidable,
    /// Carries actors standing on top of it when it moves.
    Ridable,
    /// Level geometry the player can stand on.
    Platform,
}

/// Unordered set of capability tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    tags: ArrayVec<CapabilityTag, MAX_TAGS>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag.
    ///
    /// Not idempotent: adding the same tag twice stores it twice. Panics when
    /// more than [`MAX_TAGS`] tags are added.
    pub fn add(&mut self, tag: CapabilityTag) {
        if self.tags.try_push(tag).is_err() {
            panic!("TagSet overflow: a body cannot carry more than {MAX_TAGS} tags");
        }
    }

    pub fn has(&self, tag: CapabilityTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityTag> {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_has_nothing() {
        let tags = TagSet::new();
        assert!(tags.is_empty());
        assert!(!tags.has(CapabilityTag::Collidable));
        assert!(!tags.has(CapabilityTag::Ridable));
        assert!(!tags.has(CapabilityTag::Platform));
    }

    #[test]
    fn test_add_and_has() {
        let mut tags = TagSet::new();
        tags.add(CapabilityTag::Collidable);
        tags.add(CapabilityTag::Platform);
        assert!(tags.has(CapabilityTag::Collidable));
        assert!(tags.has(CapabilityTag::Platform));
        assert!(!tags.has(CapabilityTag::Ridable));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_add_is_not_idempotent() {
        let mut tags = TagSet::new();
        tags.add(CapabilityTag::Collidable);
        tags.add(CapabilityTag::Collidable);
        assert_eq!(tags.len(), 2);
        assert!(tags.has(CapabilityTag::Collidable));
    }

    #[test]
    #[should_panic(expected = "TagSet overflow")]
    fn test_overflow_panics() {
        let mut tags = TagSet::new();
        for _ in 0..=MAX_TAGS {
            tags.add(CapabilityTag::Platform);
        }
    }
}
