//! Reproducible description of a run.
//!
//! A [`Seed`] captures everything needed to recreate a rendered frame:
//! viewport, PRNG seed, tick count and the full configuration.

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::surface::Viewport;
use serde::{Deserialize, Serialize};

/// Reproducible description of a run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// buffers after `steps` ticks. `config` may be omitted from JSON, in which
/// case defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    #[serde(default)]
    pub steps: usize,
    #[serde(default)]
    pub config: SimulationConfig,
}

impl Seed {
    /// Creates a Seed with default config and zero steps.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            steps: 0,
            config: SimulationConfig::default(),
        }
    }

    pub fn viewport(&self) -> Result<Viewport, EngineError> {
        Viewport::new(self.width, self.height)
    }

    /// Checks the viewport and every configuration group.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.viewport()?;
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorScheme, Primitive};

    #[test]
    fn new_creates_seed_with_defaults() {
        let s = Seed::new(512, 384, 42);
        assert_eq!((s.width, s.height, s.seed, s.steps), (512, 384, 42, 0));
        assert_eq!(s.config, SimulationConfig::default());
    }

    #[test]
    fn json_round_trip_with_custom_config() {
        let mut s = Seed::new(800, 600, 8675309);
        s.steps = 240;
        s.config.color.scheme = ColorScheme::Hsl;
        s.config.render.primitive = Primitive::Triangles;
        s.config.noise.octaves = 4;

        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_config_and_steps_fall_back_to_defaults() {
        let s: Seed = serde_json::from_str(r#"{"width": 64, "height": 32, "seed": 7}"#).unwrap();
        assert_eq!(s, Seed::new(64, 32, 7));
    }

    #[test]
    fn json_contains_expected_keys() {
        let v = serde_json::to_value(Seed::new(128, 128, 1)).unwrap();
        for key in ["width", "height", "seed", "steps", "config"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(v["config"]["field"]["function"], "angle");
    }

    #[test]
    fn validate_fails_for_zero_dimension() {
        assert!(matches!(
            Seed::new(0, 512, 42).validate(),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(Seed::new(512, 0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_out_of_range_config() {
        let mut s = Seed::new(64, 64, 1);
        s.config.noise.falloff = 1.5;
        assert!(matches!(
            s.validate(),
            Err(EngineError::ParamOutOfRange { .. })
        ));
    }
}
