//! Simulation configuration and presets
//!
//! Everything here is consumed once, at construction time. The simulation core
//! trusts its inputs; validation happens in this layer before a
//! `SimulationState` is built.

use std::fs;
use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Body, Boundary, Color, SimulationState};
use crate::{unit_from_degrees, world_center};

/// Error type for configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("boundary circumradius must be positive and finite, got {0}")]
    Circumradius(f64),
    #[error("boundary angular speed must be finite, got {0}")]
    AngularSpeed(f64),
    #[error("boundary center is not finite")]
    Center,
    #[error("boundary initial angle must be finite, got {0}")]
    InitialAngle(f64),
    #[error("body {index}: radius must be positive and finite, got {radius}")]
    Radius { index: usize, radius: f64 },
    #[error("body {index}: initial speed must be positive and finite")]
    Speed { index: usize },
    #[error("body {index}: position is not finite")]
    Position { index: usize },
    #[error("no bodies configured")]
    NoBodies,
}

/// Boundary construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub center: DVec2,
    /// Half the side-to-side extent of the square
    pub circumradius: f64,
    /// Degrees per tick
    pub angular_speed: f64,
    /// Starting rotation (degrees)
    #[serde(default)]
    pub initial_angle: f64,
}

/// Body construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub position: DVec2,
    pub velocity: DVec2,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub color: Color,
}

fn default_radius() -> f64 {
    BALL_RADIUS
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub boundary: BoundaryConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::single_ball()
    }
}

impl SimConfig {
    /// One yellow ball launched diagonally from the center of a 400-wide square
    pub fn single_ball() -> Self {
        let center = world_center();
        Self {
            boundary: BoundaryConfig {
                center,
                circumradius: (SQUARE_SIZE / 2.0).floor(),
                angular_speed: ROTATION_SPEED,
                initial_angle: 0.0,
            },
            bodies: vec![BodyConfig {
                position: center,
                velocity: DVec2::new(BALL_AXIS_SPEED, BALL_AXIS_SPEED),
                radius: BALL_RADIUS,
                color: Color::YELLOW,
            }],
        }
    }

    /// Eight balls in four same-colored pairs, inside a 450-wide square
    pub fn eight_balls() -> Self {
        let c = world_center();
        let s = BALL_AXIS_SPEED;
        let layout = [
            (DVec2::new(-50.0, 0.0), DVec2::new(s, s), Color::YELLOW),
            (DVec2::new(-25.0, 0.0), DVec2::new(s, s), Color::YELLOW_DARK),
            (DVec2::new(50.0, 0.0), DVec2::new(-s, -s), Color::RED),
            (DVec2::new(25.0, 0.0), DVec2::new(-s, -s), Color::RED_DARK),
            (DVec2::new(0.0, -50.0), DVec2::new(s, -s), Color::BLUE),
            (DVec2::new(0.0, -25.0), DVec2::new(s, -s), Color::BLUE_DARK),
            (DVec2::new(-50.0, -50.0), DVec2::new(-s, s), Color::GREEN),
            (DVec2::new(-25.0, -25.0), DVec2::new(-s, s), Color::GREEN_DARK),
        ];

        Self {
            boundary: BoundaryConfig {
                center: c,
                circumradius: (MULTI_SQUARE_SIZE / 2.0).floor(),
                angular_speed: ROTATION_SPEED,
                initial_angle: 0.0,
            },
            bodies: layout
                .into_iter()
                .map(|(offset, velocity, color)| BodyConfig {
                    position: c + offset,
                    velocity,
                    radius: BALL_RADIUS,
                    color,
                })
                .collect(),
        }
    }

    /// `count` balls at seeded random spots and headings
    ///
    /// Bodies start inside the inscribed circle (shrunk by a radius and the
    /// contact buffer) so none begins in contact at any rotation.
    pub fn scattered(seed: u64, count: usize) -> Self {
        const PALETTE: [Color; 8] = [
            Color::YELLOW,
            Color::YELLOW_DARK,
            Color::RED,
            Color::RED_DARK,
            Color::BLUE,
            Color::BLUE_DARK,
            Color::GREEN,
            Color::GREEN_DARK,
        ];

        let mut rng = Pcg32::seed_from_u64(seed);
        let center = world_center();
        let circumradius = (MULTI_SQUARE_SIZE / 2.0).floor();
        let inradius = circumradius / std::f64::consts::SQRT_2;
        let max_r = inradius - BALL_RADIUS - CONTACT_BUFFER - 1.0;
        let speed = BALL_AXIS_SPEED * std::f64::consts::SQRT_2;

        let bodies = (0..count)
            .map(|i| {
                // sqrt keeps the spread uniform over the disc
                let r = max_r * rng.random::<f64>().sqrt();
                let at = rng.random_range(0.0..360.0);
                let heading = rng.random_range(0.0..360.0);
                BodyConfig {
                    position: center + unit_from_degrees(at) * r,
                    velocity: unit_from_degrees(heading) * speed,
                    radius: BALL_RADIUS,
                    color: PALETTE[i % PALETTE.len()],
                }
            })
            .collect();

        Self {
            boundary: BoundaryConfig {
                center,
                circumradius,
                angular_speed: ROTATION_SPEED,
                initial_angle: 0.0,
            },
            bodies,
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded config from {} ({} bodies)",
            path.display(),
            config.bodies.len()
        );
        Ok(config)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the construction-time assumptions the core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.boundary;
        if !(b.circumradius.is_finite() && b.circumradius > 0.0) {
            return Err(ConfigError::Circumradius(b.circumradius));
        }
        if !b.angular_speed.is_finite() {
            return Err(ConfigError::AngularSpeed(b.angular_speed));
        }
        if !b.center.is_finite() {
            return Err(ConfigError::Center);
        }
        if !b.initial_angle.is_finite() {
            return Err(ConfigError::InitialAngle(b.initial_angle));
        }
        if b.angular_speed == 0.0 {
            log::warn!("angular speed is 0, boundary will not rotate");
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        for (index, body) in self.bodies.iter().enumerate() {
            if !(body.radius.is_finite() && body.radius > 0.0) {
                return Err(ConfigError::Radius {
                    index,
                    radius: body.radius,
                });
            }
            if !body.position.is_finite() {
                return Err(ConfigError::Position { index });
            }
            let speed = body.velocity.length();
            if !(speed.is_finite() && speed > 0.0) {
                return Err(ConfigError::Speed { index });
            }
            if (body.position - b.center).length() + body.radius > b.circumradius {
                log::warn!("body {index} may start outside the boundary");
            }
        }

        Ok(())
    }

    /// Validate and build the simulation state
    pub fn build(&self) -> Result<SimulationState, ConfigError> {
        self.validate()?;

        let boundary = Boundary::new(
            self.boundary.center,
            self.boundary.circumradius,
            self.boundary.angular_speed,
        )
        .with_angle(self.boundary.initial_angle);

        let bodies = self
            .bodies
            .iter()
            .map(|b| Body::new(b.position, b.velocity, b.radius, b.color))
            .collect();

        Ok(SimulationState::new(boundary, bodies))
    }
}
