//! Cell rasterizer for terminal rendering.
//!
//! Draws the core pipeline's ordered triangle list into a buffer of
//! colored cells. There is no depth buffer: triangles are drawn strictly
//! in the order given and later draws overwrite earlier cells, which is
//! exactly what the pipeline's painter's-algorithm ordering relies on.
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use stlview_core::{Rgb, ShadedTriangle};

/// Character used for every occupied cell; color carries the shading.
const FILL_CHAR: char = '█';

/// Rasterizer that converts screen-space triangles to terminal cells.
pub struct CellRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Rgb>>,
}

impl CellRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Draws a frame's triangles in the order given.
    pub fn draw_frame(&mut self, frame: &[ShadedTriangle]) {
        for triangle in frame {
            if let Some(fill) = triangle.fill {
                self.fill_triangle(triangle.points, fill);
            }
            if let Some(outline) = triangle.outline {
                self.stroke_triangle(triangle.points, outline);
            }
        }
    }

    fn fill_triangle(&mut self, points: [(i32, i32); 3], color: Rgb) {
        let [v0, v1, v2] = points.map(|(x, y)| (x as f32, y as f32));

        // Bounding box, clipped to the buffer
        let min_x = points[0].0.min(points[1].0).min(points[2].0).max(0);
        let max_x = points[0]
            .0
            .max(points[1].0)
            .max(points[2].0)
            .min(self.width as i32 - 1);
        let min_y = points[0].1.min(points[1].1).min(points[2].1).max(0);
        let max_y = points[0]
            .1
            .max(points[1].1)
            .max(points[2].1)
            .min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set_cell(x, y, color);
                    }
                }
            }
        }
    }

    fn stroke_triangle(&mut self, points: [(i32, i32); 3], color: Rgb) {
        self.draw_line(points[0], points[1], color);
        self.draw_line(points[1], points[2], color);
        self.draw_line(points[2], points[0], color);
    }

    /// Bresenham line, clipped per cell.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        let (mut x, mut y) = from;
        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        let step_x = if from.0 < to.0 { 1 } else { -1 };
        let step_y = if from.1 < to.1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.set_cell(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn set_cell(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Some(color);
    }

    #[cfg(test)]
    fn cell(&self, x: usize, y: usize) -> Option<Rgb> {
        self.cells[y * self.width + x]
    }

    /// Queues the buffer contents to the terminal.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(rgb) => {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: rgb.r,
                            g: rgb.g,
                            b: rgb.b,
                        }))?;
                        writer.queue(Print(FILL_CHAR))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            // Raw mode: newline alone does not return the carriage.
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle. Returns
/// `None` for degenerate (zero-area) triangles.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
