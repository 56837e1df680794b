//! JSON Lines trace of every frame, for offline plotting or diffing runs

use std::io::Write;

use super::{Flow, Frame, RenderError, Renderer};

/// Writes one JSON object per frame
pub struct TraceRenderer<W: Write> {
    out: W,
    frames: u64,
    error: Option<RenderError>,
}

impl<W: Write> TraceRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            error: None,
        }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and hand back the writer, or the first error hit while tracing
    pub fn finish(mut self) -> Result<W, RenderError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Renderer for TraceRenderer<W> {
    fn draw(&mut self, frame: &Frame) -> Flow {
        match self.write_frame(frame) {
            Ok(()) => {
                self.frames += 1;
                Flow::Continue
            }
            Err(err) => {
                log::error!("trace write failed at tick {}: {err}", frame.tick);
                self.error = Some(err);
                Flow::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    #[test]
    fn test_one_line_per_frame() {
        let mut state = SimConfig::eight_balls().build().unwrap();
        let mut renderer = TraceRenderer::new(Vec::new());
        for _ in 0..3 {
            state.advance();
            assert_eq!(renderer.draw(&Frame::capture(&state)), Flow::Continue);
        }
        assert_eq!(renderer.frames(), 3);

        let out = String::from_utf8(renderer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);

        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["tick"], 3);
        assert_eq!(last["bodies"].as_array().unwrap().len(), 8);
        assert_eq!(last["vertices"].as_array().unwrap().len(), 4);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_stops_and_reports() {
        let state = SimConfig::single_ball().build().unwrap();
        let mut renderer = TraceRenderer::new(FailingWriter);
        assert_eq!(renderer.draw(&Frame::capture(&state)), Flow::Stop);
        assert!(renderer.finish().is_err());
    }
}
