//! CPU [`RenderSurface`]: draws frames into a [`Canvas`].

use flowfield_core::error::EngineError;
use flowfield_core::{Frame, Primitive, RenderSurface, Srgb, Viewport};
use tracing::{debug, trace};

use crate::canvas::Canvas;

/// Clear colour, `#333333`.
pub const BACKGROUND: Srgb = Srgb {
    r: 0.2,
    g: 0.2,
    b: 0.2,
};

/// Software rasterizer for simulation frames.
///
/// Clip space `[-1, 1]^2` maps onto the whole canvas with `+y` up. Every
/// vertex in the frame is drawn: `lines` pairs them into one segment per
/// particle, `points` stamps each one, `triangles` fills consecutive
/// triplets with the first vertex's colour.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    viewport: Viewport,
    canvas: Canvas,
}

impl RasterSurface {
    pub fn new(viewport: Viewport) -> Result<Self, EngineError> {
        Ok(Self {
            viewport,
            canvas: Canvas::new(viewport, BACKGROUND)?,
        })
    }

    /// Reallocates the canvas, cleared to the background.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            "resized raster surface"
        );
        self.canvas = Canvas::new(viewport, BACKGROUND)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn clear(&mut self) {
        self.canvas.fill(BACKGROUND);
    }

    /// RGBA8 bytes of the current image.
    pub fn to_rgba8(&self) -> Vec<u8> {
        crate::pixel::canvas_to_rgba(&self.canvas)
    }

    #[cfg(feature = "png")]
    pub fn write_png(&self, path: &std::path::Path) -> Result<(), EngineError> {
        crate::snapshot::write_png(&self.canvas, path)
    }

    /// Clip space to continuous pixel coordinates.
    fn to_pixel(&self, [x, y]: [f32; 2]) -> (f64, f64) {
        let w = f64::from(self.viewport.width());
        let h = f64::from(self.viewport.height());
        (
            (f64::from(x) + 1.0) / 2.0 * w,
            (1.0 - f64::from(y)) / 2.0 * h,
        )
    }
}

fn vertex_srgb([r, g, b, _]: [f32; 4]) -> Srgb {
    Srgb {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
    }
}

impl RenderSurface for RasterSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), EngineError> {
        frame.validate()?;
        if !frame.preserve {
            self.clear();
        }
        let vertices = frame.vertex_count();
        match frame.primitive {
            Primitive::Lines => {
                let width = f64::from(frame.line_width);
                for v in (0..vertices).step_by(2) {
                    let from = self.to_pixel(frame.vertex(v));
                    let to = self.to_pixel(frame.vertex(v + 1));
                    let color = vertex_srgb(frame.vertex_color(v));
                    self.canvas.line(from, to, width, color);
                }
            }
            Primitive::Points => {
                let size = f64::from(frame.point_size);
                for v in 0..vertices {
                    let (x, y) = self.to_pixel(frame.vertex(v));
                    let color = vertex_srgb(frame.vertex_color(v));
                    self.canvas.stamp(x, y, size, color);
                }
            }
            Primitive::Triangles => {
                // A trailing partial triplet is dropped.
                for v in (0..vertices - vertices % 3).step_by(3) {
                    let a = self.to_pixel(frame.vertex(v));
                    let b = self.to_pixel(frame.vertex(v + 1));
                    let c = self.to_pixel(frame.vertex(v + 2));
                    let color = vertex_srgb(frame.vertex_color(v));
                    self.canvas.triangle(a, b, c, color);
                }
            }
        }
        trace!(vertices, primitive = %frame.primitive, "presented frame");
        Ok(())
    }
}
