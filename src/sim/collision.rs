//! Collision detection for circles against line segments and boxes
//!
//! Slices are polylines swept by the pointer; a fast swipe covers a lot of
//! ground between two motion events, so every segment of the path is tested
//! rather than just its endpoints.

use glam::Vec2;

/// Closest point on segment `a..b` to `p`
///
/// A zero-length segment degenerates to the point `a`.
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to segment `a..b`
#[inline]
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Whether a circle is cut by a single segment
#[inline]
pub fn circle_hits_segment(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> bool {
    point_segment_distance(center, a, b) < radius
}

/// Whether any segment of `path` cuts the circle. Paths with fewer than two
/// points never hit.
pub fn circle_hits_path(center: Vec2, radius: f32, path: &[Vec2]) -> bool {
    path.windows(2)
        .any(|seg| circle_hits_segment(center, radius, seg[0], seg[1]))
}

/// Axis-aligned rectangle (y grows downward, like the canvas)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Overlap between this rect and the circle's bounding square
    pub fn overlaps_circle_box(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.min.x
            && center.x - radius < self.max.x
            && center.y + radius > self.min.y
            && center.y - radius < self.max.y
    }
}
