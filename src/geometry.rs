//! Rectangle geometry shared by placement and simulation
//!
//! Everything is axis-aligned in container space: origin at the top-left,
//! x to the right, y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Extent of a tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Bounds of the layout area, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Same container with negative dimensions treated as zero
    pub fn normalized(&self) -> Self {
        Self {
            width: self.width.max(0.0),
            height: self.height.max(0.0),
        }
    }

    /// Largest valid top-left corner for an item of `size`.
    ///
    /// Collapses to zero on an axis where the item does not fit, which pins
    /// oversized items to the container's corner.
    #[inline]
    pub fn max_origin(&self, size: Size) -> Vec2 {
        Vec2::new(
            clamp_span(self.width, size.width),
            clamp_span(self.height, size.height),
        )
    }

    /// Clamp a top-left position so the item stays inside
    #[inline]
    pub fn clamp_origin(&self, pos: Vec2, size: Size) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_origin(size))
    }

    /// Whether an item at `pos` already respects the bounds
    pub fn contains_origin(&self, pos: Vec2, size: Size) -> bool {
        let max = self.max_origin(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }

    /// Whether either dimension shrank relative to `previous`
    pub fn shrunk_from(&self, previous: &Container) -> bool {
        self.width < previous.width || self.height < previous.height
    }
}

/// Free span along one axis: `bound - extent`, never negative
#[inline]
pub fn clamp_span(bound: f32, extent: f32) -> f32 {
    (bound - extent).max(0.0)
}

/// Axis-aligned bounding box `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self {
            min: origin,
            max: origin + size.as_vec2(),
        }
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        let m = Vec2::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Strict overlap test; boxes that only touch do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Overlap test between two boxes with a clearance margin around the first
#[inline]
pub fn overlaps_with_gap(a: &Aabb, b: &Aabb, gap: f32) -> bool {
    a.expanded(gap).intersects(b)
}
