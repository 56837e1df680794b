//! 2D vector primitives
//!
//! Named wrappers over `DVec2` whose zero-vector behavior the collision code
//! relies on explicitly.

use glam::DVec2;

/// Length of a vector
#[inline]
pub fn magnitude(v: DVec2) -> f64 {
    v.length()
}

/// Unit vector in the direction of `v`, or zero for the zero vector
#[inline]
pub fn normalize(v: DVec2) -> DVec2 {
    v.normalize_or_zero()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

#[inline]
pub fn dot(a: DVec2, b: DVec2) -> f64 {
    a.dot(b)
}

/// Rotate 90 degrees counter-clockwise: (x, y) -> (-y, x)
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    v.perp()
}
