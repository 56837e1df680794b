//! Rotating square boundary geometry
//!
//! The boundary is a square described by its circumcircle:
//! - center: fixed rotation center
//! - circumradius: distance from center to every vertex
//! - rotation_angle: current orientation in degrees (accumulates, never wrapped)
//!
//! Vertices sit at 0°, 90°, 180°, 270° offset by the rotation angle, so the
//! square only ever changes orientation, never size.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::magnitude;
use crate::polar_to_cartesian;

/// Number of boundary vertices (and edges)
pub const VERTEX_COUNT: usize = 4;

/// Angular spacing between adjacent vertices, in degrees
const VERTEX_STEP_DEGREES: f64 = 360.0 / VERTEX_COUNT as f64;

/// Vertex positions of a square with the given circumradius and rotation
pub fn square_vertices(
    center: DVec2,
    circumradius: f64,
    angle_degrees: f64,
) -> [DVec2; VERTEX_COUNT] {
    std::array::from_fn(|i| {
        polar_to_cartesian(center, circumradius, i as f64 * VERTEX_STEP_DEGREES + angle_degrees)
    })
}

/// One side of the boundary, from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: DVec2,
    pub end: DVec2,
}

impl Edge {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Direction vector from start to end (not normalized)
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        magnitude(self.delta())
    }
}

/// Edges of a closed polygon; edge i joins vertex i and vertex (i + 1) mod 4
pub fn edges_of(vertices: &[DVec2; VERTEX_COUNT]) -> [Edge; VERTEX_COUNT] {
    std::array::from_fn(|i| Edge::new(vertices[i], vertices[(i + 1) % VERTEX_COUNT]))
}

/// The rotating square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    /// Rotation center (fixed)
    pub center: DVec2,
    /// Center-to-vertex distance
    pub circumradius: f64,
    /// Current rotation (degrees)
    pub rotation_angle: f64,
    /// Rotation added every tick (degrees)
    pub angular_speed: f64,
}

impl Boundary {
    pub fn new(center: DVec2, circumradius: f64, angular_speed: f64) -> Self {
        Self {
            center,
            circumradius,
            rotation_angle: 0.0,
            angular_speed,
        }
    }

    /// Start from a non-zero orientation
    pub fn with_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Advance the rotation by one tick
    #[inline]
    pub fn rotate(&mut self) {
        self.rotation_angle += self.angular_speed;
    }

    /// Current vertex positions
    pub fn vertices(&self) -> [DVec2; VERTEX_COUNT] {
        square_vertices(self.center, self.circumradius, self.rotation_angle)
    }

    /// Current edges
    pub fn edges(&self) -> [Edge; VERTEX_COUNT] {
        edges_of(&self.vertices())
    }

    /// Length of one side of the square
    #[inline]
    pub fn side_length(&self) -> f64 {
        self.circumradius * std::f64::consts::SQRT_2
    }

    /// Center-to-edge distance (radius of the inscribed circle)
    #[inline]
    pub fn inradius(&self) -> f64 {
        self.circumradius / std::f64::consts::SQRT_2
    }
}
