//! Point-to-colour mapping through the precomputed palettes.

use std::f64::consts::PI;

use glam::DVec2;

use crate::color::Srgb;
use crate::config::{ColorConfig, ColorFunction};
use crate::noise_field::NoiseField;
use crate::palette::{PaletteTable, Palettes};

/// Maps a point and a colour phase to a palette entry.
///
/// Owns the palette tables; the noise field and colour settings are passed
/// in so one mapper serves every restart. Mapping never mutates anything.
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    palettes: Palettes,
}

impl ColorMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    /// Colour for `point` at phase `z`, dispatched on `config.function`.
    pub fn color_for(&self, noise: &NoiseField, config: &ColorConfig, point: DVec2, z: f64) -> Srgb {
        let table = self.palettes.table(config.scheme);
        match config.function {
            ColorFunction::Angle => angle_color(table, point, z),
            ColorFunction::Noise => noise_color(table, noise, point, z),
        }
    }
}

/// Polar angle of `point` rotated by phase `z`.
///
/// The angle is normalized to [0, 1], shifted by `z`, folded back once if it
/// passes 1, and the final index wraps modulo the table size.
fn angle_color(table: &PaletteTable, point: DVec2, z: f64) -> Srgb {
    let n = table.len() as f64;
    let mut theta = (point.y.atan2(point.x) / PI + 1.0) / 2.0 + z;
    if theta > 1.0 {
        theta -= 1.0;
    }
    let index = (z / 10.0 + theta * n).floor().rem_euclid(n);
    table.get(index as usize)
}

/// Noise at `(x, y, z)` remapped from [-1, 1] to a palette index.
///
/// A sample of exactly 1.0 would index one past the end; the table clamps it
/// to the last entry.
fn noise_color(table: &PaletteTable, noise: &NoiseField, point: DVec2, z: f64) -> Srgb {
    let v = (noise.sample3d(point.x, point.y, z) + 1.0) / 2.0;
    let index = (v * table.len() as f64).floor().max(0.0);
    table.get(index as usize)
}
