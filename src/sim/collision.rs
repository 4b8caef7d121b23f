//! Axis-aligned collision detection
//!
//! The only geometry the simulation knows: axis-aligned boxes and a strict
//! overlap test. Entities expose their box via `bounds()` and all pairwise
//! checks funnel through [`overlaps`].

use glam::Vec2;

/// An axis-aligned bounding box, top-left anchored (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Extents, strictly positive for anything that can collide
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Strict AABB intersection test.
///
/// Touching edges and zero-area boxes do not count as overlapping; all four
/// comparisons are strict. Pure and symmetric in its arguments.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}
