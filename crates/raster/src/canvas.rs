//! Row-major pixel buffer with clipped drawing primitives.
//!
//! Coordinates are continuous pixel space: `(0, 0)` is the top-left corner
//! of the top-left pixel and pixel `(i, j)` has its centre at
//! `(i + 0.5, j + 0.5)`. Anything that falls outside the buffer is clipped.

use flowfield_core::error::EngineError;
use flowfield_core::{Srgb, Viewport};

/// An opaque sRGB image the size of a viewport.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<Srgb>,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if `width * height`
    /// overflows `usize`.
    pub fn new(viewport: Viewport, background: Srgb) -> Result<Self, EngineError> {
        let width = viewport.width() as usize;
        let height = viewport.height() as usize;
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![background; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Srgb] {
        &self.data
    }

    pub fn fill(&mut self, color: Srgb) {
        self.data.fill(color);
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: i64, y: i64) -> Option<Srgb> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Writes one pixel; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Srgb) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Paints a `size`-pixel square centred on `(cx, cy)`.
    ///
    /// Sizes below one still cover a single pixel.
    pub fn stamp(&mut self, cx: f64, cy: f64, size: f64, color: Srgb) {
        if !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let n = size.round().max(1.0) as i64;
        let half = n as f64 / 2.0;
        let x0 = (cx - half).round() as i64;
        let y0 = (cy - half).round() as i64;
        for y in y0..y0 + n {
            for x in x0..x0 + n {
                self.set(x, y, color);
            }
        }
    }

    /// Draws a segment by stamping `width`-sized squares along it.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Srgb) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let steps = steps as i64;
        if steps == 0 {
            self.stamp(from.0, from.1, width, color);
            return;
        }
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            self.stamp(from.0 + dx * t, from.1 + dy * t, width, color);
        }
    }

    /// Fills the pixels whose centres lie inside the triangle (edges
    /// included). Degenerate triangles cover nothing.
    pub fn triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Srgb) {
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() {
            return;
        }
        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as i64;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as i64;
        let max_x = a.0.max(b.0).max(c.0).ceil().min(self.width as f64) as i64;
        let max_y = a.1.max(b.1).max(c.1).ceil().min(self.height as f64) as i64;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.set(x, y, color);
                }
            }
        }
    }
}

/// Twice the signed area of `(a, b, p)`.
fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}
