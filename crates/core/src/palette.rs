//! Precomputed palette lookup tables.
//!
//! Both schemes are sampled once at startup into fixed-size tables so the
//! per-particle colour lookup in the hot path is a single index.

use crate::color::{cubehelix, hsl_to_srgb, Srgb};
use crate::config::ColorScheme;

/// Entries per palette table.
pub const PALETTE_SIZE: usize = 1000;

const CUBEHELIX_START: f64 = 0.5;
const CUBEHELIX_HUE: f64 = 1.5;
const CUBEHELIX_LAMBDA_MIN: f64 = 0.15;
const CUBEHELIX_LAMBDA_SPAN: f64 = 0.6;

/// A fixed table of [`PALETTE_SIZE`] colours, all channels in [0, 1].
#[derive(Debug, Clone)]
pub struct PaletteTable {
    colors: Vec<Srgb>,
}

impl PaletteTable {
    /// Samples `scheme` at `PALETTE_SIZE` evenly spaced positions.
    pub fn build(scheme: ColorScheme) -> Self {
        let n = PALETTE_SIZE as f64;
        let colors = (0..PALETTE_SIZE)
            .map(|i| {
                let t = i as f64 / n;
                match scheme {
                    ColorScheme::Hsl => hsl_to_srgb(360.0 * t, 1.0, 0.5),
                    ColorScheme::Cubehelix => cubehelix(
                        CUBEHELIX_START,
                        CUBEHELIX_LAMBDA_MIN + CUBEHELIX_LAMBDA_SPAN * t,
                        CUBEHELIX_HUE,
                    ),
                }
                .clamped()
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept alongside `len` for clippy.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`, clamped to the last entry.
    pub fn get(&self, index: usize) -> Srgb {
        self.colors[index.min(self.colors.len() - 1)]
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }
}

/// Both palette tables, built together once.
#[derive(Debug, Clone)]
pub struct Palettes {
    hsl: PaletteTable,
    cubehelix: PaletteTable,
}

impl Palettes {
    pub fn new() -> Self {
        Self {
            hsl: PaletteTable::build(ColorScheme::Hsl),
            cubehelix: PaletteTable::build(ColorScheme::Cubehelix),
        }
    }

    pub fn table(&self, scheme: ColorScheme) -> &PaletteTable {
        match scheme {
            ColorScheme::Hsl => &self.hsl,
            ColorScheme::Cubehelix => &self.cubehelix,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::new()
    }
}
