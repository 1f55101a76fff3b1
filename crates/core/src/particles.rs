//! Particle population stored as flat, render-ready buffers.
//!
//! Each particle is a short segment from its previous to its current
//! position. Positions live in a flat `f32` buffer (`prev_x, prev_y, cur_x,
//! cur_y` per particle) and colours in a parallel buffer (`r, g, b, a` for
//! each endpoint), so a renderer can upload both as-is.
//!
//! A particle is either advecting or freshly reset. Leaving the [-1, 1]
//! square on either axis respawns it in the same step; it is never clamped
//! and never observed out of bounds.

use glam::DVec2;

use crate::color::Srgb;
use crate::color_map::ColorMapper;
use crate::config::ColorConfig;
use crate::field_source::FieldSource;
use crate::noise_field::NoiseField;
use crate::prng::Xorshift64;

/// Floats per particle in the position buffer.
pub const POSITION_STRIDE: usize = 4;
/// Floats per particle in the colour buffer.
pub const COLOR_STRIDE: usize = 8;

/// Everything a respawn needs to pick a colour.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    pub mapper: &'a ColorMapper,
    pub noise: &'a NoiseField,
    pub config: &'a ColorConfig,
    /// Current colour phase.
    pub phase: f64,
}

impl Painter<'_> {
    pub fn color_at(&self, point: DVec2) -> Srgb {
        self.mapper
            .color_for(self.noise, self.config, point, self.phase)
    }
}

/// N particles with their position and colour buffers.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    positions: Vec<f32>,
    colors: Vec<f32>,
    rng: Xorshift64,
}

impl ParticleSystem {
    /// Allocates `count` particles and resets each one.
    pub fn create(count: usize, rng: Xorshift64, painter: &Painter<'_>) -> Self {
        let mut system = Self {
            positions: vec![0.0; count * POSITION_STRIDE],
            colors: vec![0.0; count * COLOR_STRIDE],
            rng,
        };
        for i in 0..count {
            system.reset(i, painter);
        }
        system
    }

    pub fn len(&self) -> usize {
        self.positions.len() / POSITION_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat position buffer, 4 floats per particle.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat colour buffer, 8 floats per particle.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Previous and current position of particle `i`.
    pub fn segment(&self, i: usize) -> (DVec2, DVec2) {
        let p = &self.positions[i * POSITION_STRIDE..(i + 1) * POSITION_STRIDE];
        (
            DVec2::new(f64::from(p[0]), f64::from(p[1])),
            DVec2::new(f64::from(p[2]), f64::from(p[3])),
        )
    }

    /// Respawns particle `i` at a uniformly random point in [-1, 1)^2.
    ///
    /// Both endpoints collapse onto the new point and receive the same
    /// colour with alpha 1.
    pub fn reset(&mut self, i: usize, painter: &Painter<'_>) {
        let x = self.rng.next_signed_unit();
        let y = self.rng.next_signed_unit();
        // Colour is computed at the stored (f32) position.
        let (xf, yf) = (x as f32, y as f32);
        let j = i * POSITION_STRIDE;
        self.positions[j..j + POSITION_STRIDE].copy_from_slice(&[xf, yf, xf, yf]);

        let c = painter.color_at(DVec2::new(f64::from(xf), f64::from(yf)));
        let (r, g, b) = (c.r as f32, c.g as f32, c.b as f32);
        let k = i * COLOR_STRIDE;
        self.colors[k..k + COLOR_STRIDE].copy_from_slice(&[r, g, b, 1.0, r, g, b, 1.0]);
    }

    /// Advects every particle one step through `field` at `time`.
    ///
    /// `step` scales the field vector per axis (speed over surface width and
    /// height, so apparent speed is the same on both axes). Returns how many
    /// particles left the square and were respawned.
    pub fn step<F>(&mut self, field: &F, time: f64, step: DVec2, painter: &Painter<'_>) -> usize
    where
        F: FieldSource + ?Sized,
    {
        let mut respawned = 0;
        for i in 0..self.len() {
            let j = i * POSITION_STRIDE;
            let current = DVec2::new(
                f64::from(self.positions[j + 2]),
                f64::from(self.positions[j + 3]),
            );
            self.positions[j] = self.positions[j + 2];
            self.positions[j + 1] = self.positions[j + 3];

            let next = current + field.sample(current, time) * step;
            if in_bounds(next) {
                self.positions[j + 2] = next.x as f32;
                self.positions[j + 3] = next.y as f32;
            } else {
                self.reset(i, painter);
                respawned += 1;
            }
        }
        respawned
    }
}

/// Inside the closed [-1, 1] square. NaN counts as outside.
fn in_bounds(p: DVec2) -> bool {
    (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y)
}
