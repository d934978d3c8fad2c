use raylib::prelude::{Rectangle, Vector2};

/// Axis-aligned collision box, placed relative to a body's position.
///
/// The box itself is never stored in world space: [`BoxCollider::rect`]
/// derives it from the current position every time, so it cannot go stale
/// when the position changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size and no offset.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Both extents strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// World-space rectangle of the collider for a body at `position`.
    pub fn rect(&self, position: Vector2) -> Rectangle {
        Rectangle::new(
            position.x + self.offset.x,
            position.y + self.offset.y,
            self.size.x,
            self.size.y,
        )
    }

    /// Open-interval AABB overlap: rectangles that only share an edge do not
    /// overlap.
    pub fn rects_overlap(a: &Rectangle, b: &Rectangle) -> bool {
        a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
    }
}
