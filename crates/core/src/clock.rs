//! Noise and colour phase accumulators.

use serde::{Deserialize, Serialize};

/// Speeds are expressed in units of this fraction per tick.
pub const SPEED_SCALE: f64 = 10_000.0;

/// Two independent, monotonically increasing phases advanced once per tick.
///
/// `noise_offset` is the time coordinate fed to the vector field;
/// `color_offset` is the phase fed to the colour mapper. Neither wraps:
/// consumers that treat them periodically normalize on their side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    noise_offset: f64,
    color_offset: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances both phases by `speed / 10000`.
    pub fn tick(&mut self, noise_speed: f64, color_speed: f64) {
        self.noise_offset += noise_speed / SPEED_SCALE;
        self.color_offset += color_speed / SPEED_SCALE;
    }

    pub fn noise_offset(&self) -> f64 {
        self.noise_offset
    }

    pub fn color_offset(&self) -> f64 {
        self.color_offset
    }

    /// Back to zero. Only a full restart does this.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
