//! Render and viewport boundaries.
//!
//! The core never draws. After each step it exposes a [`Frame`]: the flat
//! position and colour buffers plus how to assemble them. Anything that can
//! put those on a screen or into an image implements [`RenderSurface`].

use serde::{Deserialize, Serialize};

use crate::config::{Primitive, RenderConfig};
use crate::error::EngineError;
use crate::particles::{COLOR_STRIDE, POSITION_STRIDE};

/// Surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `EngineError::InvalidDimensions` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// One frame's worth of render data, borrowed from the simulation.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// `prev_x, prev_y, cur_x, cur_y` per particle, in [-1, 1] clip space.
    pub positions: &'a [f32],
    /// `r, g, b, a` per vertex, two vertices per particle.
    pub colors: &'a [f32],
    pub primitive: Primitive,
    pub point_size: f32,
    pub line_width: f32,
    /// Keep earlier frames instead of clearing first.
    pub preserve: bool,
}

impl<'a> Frame<'a> {
    pub fn new(positions: &'a [f32], colors: &'a [f32], render: &RenderConfig) -> Self {
        Self {
            positions,
            colors,
            primitive: render.primitive,
            point_size: render.point_size as f32,
            line_width: render.line_width as f32,
            preserve: render.preserve,
        }
    }

    /// Two vertices per particle.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len() / POSITION_STRIDE
    }

    /// Checks that both buffers describe the same whole number of particles.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.positions.len() % POSITION_STRIDE != 0 {
            return Err(EngineError::BufferMismatch {
                expected: self.particle_count() * POSITION_STRIDE,
                got: self.positions.len(),
            });
        }
        let expected = self.particle_count() * COLOR_STRIDE;
        if self.colors.len() != expected {
            return Err(EngineError::BufferMismatch {
                expected,
                got: self.colors.len(),
            });
        }
        Ok(())
    }

    /// Position of vertex `v` (two per particle).
    pub fn vertex(&self, v: usize) -> [f32; 2] {
        [self.positions[v * 2], self.positions[v * 2 + 1]]
    }

    /// RGBA of vertex `v`.
    pub fn vertex_color(&self, v: usize) -> [f32; 4] {
        let k = v * 4;
        [
            self.colors[k],
            self.colors[k + 1],
            self.colors[k + 2],
            self.colors[k + 3],
        ]
    }
}

/// A consumer of frames: GPU backend, CPU rasterizer, recorder.
pub trait RenderSurface {
    /// Current surface size; the simulation scales its step by it.
    fn viewport(&self) -> Viewport;

    /// Draws one frame.
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_zero_sides() {
        assert!(matches!(
            Viewport::new(0, 10),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(Viewport::new(10, 0).is_err());
        let vp = Viewport::new(640, 480).unwrap();
        assert_eq!((vp.width(), vp.height()), (640, 480));
    }

    #[test]
    fn frame_counts_two_vertices_per_particle() {
        let positions = [0.0_f32; 12];
        let colors = [1.0_f32; 24];
        let frame = Frame::new(&positions, &colors, &RenderConfig::default());
        assert_eq!(frame.particle_count(), 3);
        assert_eq!(frame.vertex_count(), 6);
        frame.validate().unwrap();
    }

    #[test]
    fn frame_vertex_accessors_follow_layout() {
        let positions = [0.1, 0.2, 0.3, 0.4];
        let colors = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let frame = Frame::new(&positions, &colors, &RenderConfig::default());
        assert_eq!(frame.vertex(0), [0.1, 0.2]);
        assert_eq!(frame.vertex(1), [0.3, 0.4]);
        assert_eq!(frame.vertex_color(1), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn frame_validate_catches_mismatched_buffers() {
        let positions = [0.0_f32; 8];
        let colors = [0.0_f32; 8];
        let frame = Frame::new(&positions, &colors, &RenderConfig::default());
        assert!(matches!(
            frame.validate(),
            Err(EngineError::BufferMismatch {
                expected: 16,
                got: 8
            })
        ));
        let ragged = [0.0_f32; 6];
        assert!(Frame::new(&ragged, &colors, &RenderConfig::default())
            .validate()
            .is_err());
    }

    #[test]
    fn frame_carries_render_settings() {
        let render = RenderConfig {
            primitive: Primitive::Points,
            point_size: 3.0,
            line_width: 2.0,
            preserve: false,
        };
        let frame = Frame::new(&[], &[], &render);
        assert_eq!(frame.primitive, Primitive::Points);
        assert_eq!(frame.point_size, 3.0);
        assert_eq!(frame.line_width, 2.0);
        assert!(!frame.preserve);
    }
}
