//! Simulation state and core types
//!
//! Everything a tick reads or writes lives here. Bodies are stored in a plain
//! `Vec`; one body and many bodies run through the same code path.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::boundary::{Boundary, VERTEX_COUNT};
use super::tick::tick;
use super::vector::magnitude;

/// Display color, opaque to the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW_DARK: Color = Color::rgb(128, 128, 0);
    pub const RED_DARK: Color = Color::rgb(128, 0, 0);
    pub const BLUE_DARK: Color = Color::rgb(0, 0, 128);
    pub const GREEN_DARK: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::YELLOW
    }
}

/// A ball bouncing inside the boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    /// Speed at creation; every reflection rescales back to it
    pub reference_speed: f64,
    #[serde(default)]
    pub color: Color,
}

impl Body {
    /// Create a body; the reference speed is taken from the initial velocity
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, color: Color) -> Self {
        Self {
            position,
            velocity,
            radius,
            reference_speed: magnitude(velocity),
            color,
        }
    }

    /// Current speed
    #[inline]
    pub fn speed(&self) -> f64 {
        magnitude(self.velocity)
    }

    /// Drawing data for this body
    pub fn view(&self) -> BodyView {
        BodyView {
            position: self.position,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// The subset of a body a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub position: DVec2,
    pub radius: f64,
    pub color: Color,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// The rotating square
    pub boundary: Boundary,
    /// All bodies, in stable iteration order
    pub bodies: Vec<Body>,
    /// Ticks advanced so far
    pub(crate) tick_count: u64,
}

impl SimulationState {
    pub fn new(boundary: Boundary, bodies: Vec<Body>) -> Self {
        Self {
            boundary,
            bodies,
            tick_count: 0,
        }
    }

    /// Advance one tick; returns how many bodies had a contact resolved
    pub fn advance(&mut self) -> usize {
        tick(self)
    }

    /// Current boundary vertices
    pub fn vertices(&self) -> [DVec2; VERTEX_COUNT] {
        self.boundary.vertices()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Drawing data for every body
    pub fn body_views(&self) -> Vec<BodyView> {
        self.bodies.iter().map(Body::view).collect()
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
