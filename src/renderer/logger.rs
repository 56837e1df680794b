//! Headless renderer that reports through the `log` facade

use super::{Flow, Frame, Renderer};

/// Logs a one-line summary every `every` ticks
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }

    /// Whether a frame at this tick gets logged
    pub fn should_log(&self, tick: u64) -> bool {
        tick % self.every == 0
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        // Once per second at the default tick rate
        Self::new(crate::consts::TICK_RATE as u64)
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) -> Flow {
        if !self.should_log(frame.tick) {
            return Flow::Continue;
        }

        let v0 = frame.vertices[0];
        log::info!(
            "tick {}: vertex0=({:.1}, {:.1}) bodies={}",
            frame.tick,
            v0.x,
            v0.y,
            frame.bodies.len()
        );
        for (i, body) in frame.bodies.iter().enumerate() {
            log::debug!(
                "  body {}: pos=({:.2}, {:.2}) r={}",
                i,
                body.position.x,
                body.position.y,
                body.radius
            );
        }

        Flow::Continue
    }
}
