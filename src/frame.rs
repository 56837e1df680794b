//! Fixed-rate frame loop
//!
//! Drives a `SimulationState` one tick at a time and hands each frame to a
//! renderer. Timing lives here, never in the simulation. The stop signal is
//! only observed between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::consts::TICK_RATE;
use crate::renderer::{Flow, Frame, Renderer};
use crate::sim::SimulationState;

/// How the loop spaces out ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Sleep so ticks happen at most this many times per second
    Fixed(u32),
    /// Run ticks back to back (tests, batch runs)
    Unpaced,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed(TICK_RATE)
    }
}

/// Cloneable handle that asks a running loop to stop after the current tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stop handle was raised
    Signal,
    /// The renderer asked to stop (e.g. window closed)
    Renderer,
    /// The tick limit was reached
    TickLimit,
}

/// Outcome of `FrameLoop::run`
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Ticks advanced during this run
    pub ticks: u64,
    /// Contacts resolved during this run
    pub contacts: u64,
    pub elapsed: Duration,
    pub reason: StopReason,
}

/// Sleeps until the next tick deadline, like a frame-rate limiter
struct Pacer {
    interval: Option<Duration>,
    next: Instant,
}

impl Pacer {
    fn new(pacing: Pacing) -> Self {
        let interval = match pacing {
            Pacing::Fixed(rate) if rate > 0 => Some(Duration::from_secs(1) / rate),
            _ => None,
        };
        Self {
            interval,
            next: Instant::now(),
        }
    }

    fn wait(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };
        self.next += interval;
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks
            self.next = now;
        }
    }
}

/// Owns the simulation and runs it at a fixed rate
pub struct FrameLoop {
    state: SimulationState,
    pacing: Pacing,
    stop: StopHandle,
}

impl FrameLoop {
    pub fn new(state: SimulationState) -> Self {
        Self {
            state,
            pacing: Pacing::default(),
            stop: StopHandle::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Handle for stopping the loop from elsewhere (signal handler, another thread)
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    /// Run until stopped or until `max_ticks` ticks have been advanced
    pub fn run<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        max_ticks: Option<u64>,
    ) -> RunSummary {
        let started = Instant::now();
        let mut pacer = Pacer::new(self.pacing);
        let mut ticks = 0u64;
        let mut contacts = 0u64;

        log::info!(
            "Frame loop starting: {} bodies, pacing {:?}",
            self.state.bodies.len(),
            self.pacing
        );

        let reason = 'run: {
            if renderer.draw(&Frame::capture(&self.state)) == Flow::Stop {
                break 'run StopReason::Renderer;
            }

            loop {
                if self.stop.is_stopped() {
                    break 'run StopReason::Signal;
                }
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break 'run StopReason::TickLimit;
                }

                contacts += self.state.advance() as u64;
                ticks += 1;

                if renderer.draw(&Frame::capture(&self.state)) == Flow::Stop {
                    break 'run StopReason::Renderer;
                }

                pacer.wait();
            }
        };

        let summary = RunSummary {
            ticks,
            contacts,
            elapsed: started.elapsed(),
            reason,
        };
        log::info!(
            "Frame loop stopped ({:?}) after {} ticks, {} contacts, {:.2?}",
            summary.reason,
            summary.ticks,
            summary.contacts,
            summary.elapsed
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    /// Counts frames and optionally stops after a number of them
    struct CountingRenderer {
        frames: u64,
        stop_after: Option<u64>,
        stop_handle: Option<(u64, StopHandle)>,
    }

    impl CountingRenderer {
        fn new() -> Self {
            Self {
                frames: 0,
                stop_after: None,
                stop_handle: None,
            }
        }
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, frame: &Frame) -> Flow {
            assert_eq!(frame.tick, self.frames);
            self.frames += 1;
            if let Some((at, handle)) = &self.stop_handle
                && frame.tick == *at
            {
                handle.stop();
            }
            match self.stop_after {
                Some(n) if self.frames >= n => Flow::Stop,
                _ => Flow::Continue,
            }
        }
    }

    fn unpaced() -> FrameLoop {
        FrameLoop::new(SimConfig::single_ball().build().unwrap()).with_pacing(Pacing::Unpaced)
    }

    #[test]
    fn test_runs_to_tick_limit() {
        let mut frame_loop = unpaced();
        let mut renderer = CountingRenderer::new();
        let summary = frame_loop.run(&mut renderer, Some(120));
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(frame_loop.state().tick_count(), 120);
        // Initial frame plus one per tick
        assert_eq!(renderer.frames, 121);
    }

    #[test]
    fn test_stop_signal_checked_between_ticks() {
        let mut frame_loop = unpaced();
        let mut renderer = CountingRenderer::new();
        renderer.stop_handle = Some((10, frame_loop.stop_handle()));
        let summary = frame_loop.run(&mut renderer, Some(1_000));
        // Raised while drawing tick 10; tick 10 completed, tick 11 never ran
        assert_eq!(summary.reason, StopReason::Signal);
        assert_eq!(summary.ticks, 10);
        assert_eq!(frame_loop.state().tick_count(), 10);
    }

    #[test]
    fn test_stop_from_another_thread_leaves_trace_complete() {
        use crate::renderer::TraceRenderer;

        let mut frame_loop = FrameLoop::new(SimConfig::eight_balls().build().unwrap())
            .with_pacing(Pacing::Fixed(1_000));
        let stop = frame_loop.stop_handle();
        let signaller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            stop.stop();
        });

        let mut renderer = TraceRenderer::new(Vec::new());
        let summary = frame_loop.run(&mut renderer, None);
        signaller.join().unwrap();

        assert_eq!(summary.reason, StopReason::Signal);
        assert!(summary.ticks > 0);

        // Every tick that ran was drawn in full before the loop returned
        let out = String::from_utf8(renderer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len() as u64, summary.ticks + 1);
        for line in &lines {
            let frame: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(frame["bodies"].as_array().unwrap().len(), 8);
        }
        let last: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
        assert_eq!(last["tick"], summary.ticks);
    }

    #[test]
    fn test_renderer_can_stop() {
        let mut frame_loop = unpaced();
        let mut renderer = CountingRenderer::new();
        renderer.stop_after = Some(5);
        let summary = frame_loop.run(&mut renderer, None);
        assert_eq!(summary.reason, StopReason::Renderer);
        assert_eq!(summary.ticks, 4);
    }

    #[test]
    fn test_prestopped_loop_never_ticks() {
        let mut frame_loop = unpaced();
        frame_loop.stop_handle().stop();
        let summary = frame_loop.run(&mut CountingRenderer::new(), None);
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.reason, StopReason::Signal);
    }

    #[test]
    fn test_fixed_pacing_spaces_ticks() {
        let mut frame_loop = FrameLoop::new(SimConfig::single_ball().build().unwrap())
            .with_pacing(Pacing::Fixed(200));
        let summary = frame_loop.run(&mut CountingRenderer::new(), Some(10));
        // 10 ticks at 5ms each
        assert!(summary.elapsed >= Duration::from_millis(45));
    }
}
