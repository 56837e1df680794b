//! Frame consumers
//!
//! The simulation knows nothing about drawing. Each tick the frame loop hands
//! a renderer a `Frame`: the boundary vertices plus what is needed to draw
//! each body.

pub mod ascii;
pub mod logger;
pub mod trace;

pub use ascii::AsciiRenderer;
pub use logger::LogRenderer;
pub use trace::TraceRenderer;

use glam::DVec2;
use serde::Serialize;
use thiserror::Error;

use crate::sim::{BodyView, SimulationState};

/// Whether the frame loop should keep going after a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Render data for one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub vertices: [DVec2; 4],
    pub bodies: Vec<BodyView>,
}

impl Frame {
    /// Snapshot the drawable parts of a simulation state
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            tick: state.tick_count(),
            vertices: state.vertices(),
            bodies: state.body_views(),
        }
    }
}

/// Something that can present frames
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Flow;
}

/// Error type for renderers that write somewhere
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
