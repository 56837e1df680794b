//! Terminal renderer: the world window rasterized into a character grid
//!
//! One character is one "pixel". World coordinates follow screen convention
//! (y grows downward), matching how the presets are laid out.

use std::io::Write;

use glam::DVec2;

use super::{Flow, Frame, Renderer};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::Color;

const EMPTY: char = ' ';
const WALL: char = '#';

/// Character for a body, picked from its display color
pub fn glyph_for(color: Color) -> char {
    match color {
        Color::YELLOW => 'Y',
        Color::YELLOW_DARK => 'y',
        Color::RED => 'R',
        Color::RED_DARK => 'r',
        Color::BLUE => 'B',
        Color::BLUE_DARK => 'b',
        Color::GREEN => 'G',
        Color::GREEN_DARK => 'g',
        _ => 'o',
    }
}

/// Rasterizes frames and writes them to `out`
pub struct AsciiRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    /// World-space size of one cell
    cell: DVec2,
    every: u64,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            cols,
            rows,
            cell: DVec2::new(WORLD_WIDTH / cols as f64, WORLD_HEIGHT / rows as f64),
            every: 1,
        }
    }

    /// Only redraw every `every` ticks
    pub fn with_interval(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    fn cell_of(&self, p: DVec2) -> Option<(usize, usize)> {
        let c = (p / self.cell).floor();
        if c.x < 0.0 || c.y < 0.0 {
            return None;
        }
        let (col, row) = (c.x as usize, c.y as usize);
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    fn cell_center(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new(col as f64 + 0.5, row as f64 + 0.5) * self.cell
    }

    /// Rasterize a frame into text, one line per row
    pub fn render(&self, frame: &Frame) -> String {
        let mut grid = vec![vec![EMPTY; self.cols]; self.rows];

        // Boundary outline: sample each edge at half-cell spacing
        let step = self.cell.min_element() * 0.5;
        for i in 0..frame.vertices.len() {
            let a = frame.vertices[i];
            let b = frame.vertices[(i + 1) % frame.vertices.len()];
            let samples = ((b - a).length() / step).ceil().max(1.0) as usize;
            for s in 0..=samples {
                let p = a.lerp(b, s as f64 / samples as f64);
                if let Some((col, row)) = self.cell_of(p) {
                    grid[row][col] = WALL;
                }
            }
        }

        // Bodies: every cell whose center falls inside the circle, plus the
        // cell holding the body center so small bodies never vanish
        for body in &frame.bodies {
            let glyph = glyph_for(body.color);
            let min = self.cell_of(body.position - DVec2::splat(body.radius));
            let max = self.cell_of(body.position + DVec2::splat(body.radius));
            if let (Some((c0, r0)), Some((c1, r1))) = (min, max) {
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if self.cell_center(col, row).distance(body.position) <= body.radius {
                            grid[row][col] = glyph;
                        }
                    }
                }
            }
            if let Some((col, row)) = self.cell_of(body.position) {
                grid[row][col] = glyph;
            }
        }

        let mut text = String::with_capacity((self.cols + 1) * self.rows);
        for row in grid {
            text.extend(row);
            text.push('\n');
        }
        text
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn draw(&mut self, frame: &Frame) -> Flow {
        if frame.tick % self.every != 0 {
            return Flow::Continue;
        }

        let text = self.render(frame);
        // Clear screen and home the cursor before each frame
        let written = writeln!(self.out, "\x1b[2J\x1b[H{}tick {}", text, frame.tick)
            .and_then(|_| self.out.flush());

        match written {
            Ok(()) => Flow::Continue,
            Err(e) => {
                log::error!("ASCII renderer write failed: {e}");
                Flow::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyView;

    fn frame_with(bodies: Vec<BodyView>) -> Frame {
        let center = DVec2::new(400.0, 300.0);
        Frame {
            tick: 0,
            vertices: crate::sim::square_vertices(center, 200.0, 45.0),
            bodies,
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let renderer = AsciiRenderer::new(Vec::new(), 80, 30);
        let text = renderer.render(&frame_with(Vec::new()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.chars().count() == 80));
    }

    #[test]
    fn test_body_glyph_at_expected_cell() {
        let renderer = AsciiRenderer::new(Vec::new(), 80, 30);
        // Cells are 10 x 20 world units; (405, 310) lands in column 40, row 15
        let body = BodyView {
            position: DVec2::new(405.0, 310.0),
            radius: 10.0,
            color: Color::RED,
        };
        let text = renderer.render(&frame_with(vec![body]));
        let row: Vec<char> = text.lines().nth(15).unwrap().chars().collect();
        assert_eq!(row[40], 'R');
    }

    #[test]
    fn test_outline_drawn() {
        let renderer = AsciiRenderer::new(Vec::new(), 80, 30);
        let text = renderer.render(&frame_with(Vec::new()));
        // At 45° the left edge is vertical at x ≈ 258.6 -> column 25
        let row: Vec<char> = text.lines().nth(15).unwrap().chars().collect();
        assert_eq!(row[25], WALL);
        assert_eq!(row[40], EMPTY);
    }

    #[test]
    fn test_draw_writes_frame() {
        let mut renderer = AsciiRenderer::new(Vec::new(), 20, 10);
        assert_eq!(renderer.draw(&frame_with(Vec::new())), Flow::Continue);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[2J\x1b[H"));
        assert!(out.ends_with("tick 0\n"));
    }

    #[test]
    fn test_unknown_color_glyph() {
        assert_eq!(glyph_for(Color::rgb(1, 2, 3)), 'o');
        assert_eq!(glyph_for(Color::GREEN_DARK), 'g');
    }
}
