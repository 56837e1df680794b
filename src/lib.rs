//! Roto Square - bouncing balls inside a rotating square
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boundary geometry, collisions, tick)
//! - `settings`: Construction-time configuration and presets
//! - `frame`: Fixed-rate frame loop driving the simulation
//! - `renderer`: Frame consumers (log, ASCII, JSON trace)

pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use frame::{FrameLoop, Pacing, RunSummary, StopHandle};
pub use settings::{ConfigError, SimConfig};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Target tick rate of the frame driver
    pub const TICK_RATE: u32 = 60;

    /// World window the presets are laid out in
    pub const WORLD_WIDTH: f64 = 800.0;
    pub const WORLD_HEIGHT: f64 = 600.0;

    /// Boundary defaults (side-to-side extent of the square, halved for circumradius)
    pub const SQUARE_SIZE: f64 = 400.0;
    pub const MULTI_SQUARE_SIZE: f64 = 450.0;
    /// Degrees per tick
    pub const ROTATION_SPEED: f64 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 10.0;
    /// Per-axis launch speed; the preset balls move diagonally
    pub const BALL_AXIS_SPEED: f64 = 4.0;

    /// Contact fires this far before exact geometric contact
    pub const CONTACT_BUFFER: f64 = 1.0;
    /// Extra separation added on top of the overlap when pushing out
    pub const PUSH_OUT_MARGIN: f64 = 1.0;
}

/// Unit vector for an angle given in degrees
#[inline]
pub fn unit_from_degrees(degrees: f64) -> DVec2 {
    let theta = degrees.to_radians();
    DVec2::new(theta.cos(), theta.sin())
}

/// Convert polar (r, degrees) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, degrees: f64) -> DVec2 {
    center + unit_from_degrees(degrees) * r
}

/// World window center, used as the boundary center by the presets
#[inline]
pub fn world_center() -> DVec2 {
    // Integer halving mirrors how the presets were laid out on a pixel grid
    DVec2::new(
        (consts::WORLD_WIDTH / 2.0).floor(),
        (consts::WORLD_HEIGHT / 2.0).floor(),
    )
}
