//! Vector field sources: map a point in space and time to a 2D direction.
//!
//! [`FlowField`] is the noise-driven field the particles follow. It reads the
//! current [`FieldConfig`] and [`NoiseConfig`] by reference, so it is built
//! per tick and always sees the latest settings. Three strategies turn the
//! multi-octave noise scalar into a vector: an angle mapping, a numerical
//! gradient, and the gradient's perpendicular (curl).
//!
//! All implementations are deterministic: same inputs produce the same output.

use glam::DVec2;

use crate::config::{FieldConfig, FieldFunction, NoiseConfig};
use crate::noise_field::NoiseField;

/// Finite-difference step for the gradient and curl strategies.
pub const GRADIENT_EPSILON: f64 = 1e-8;

/// Squared gradient magnitude below which the vector is rescaled.
const FLAT_THRESHOLD_SQ: f64 = 0.01;
/// Magnitude a flat-region gradient is rescaled to.
const FLAT_MAGNITUDE: f64 = 0.1;

/// A source of 2D vectors for advection.
pub trait FieldSource: Send + Sync {
    /// Sample the field at `point` at the given time.
    fn sample(&self, point: DVec2, time: f64) -> DVec2;
}

/// Constant field, the same vector everywhere. Handy for driving particles
/// along a known path.
#[derive(Debug, Clone, Copy)]
pub struct UniformField(pub DVec2);

impl FieldSource for UniformField {
    fn sample(&self, _point: DVec2, _time: f64) -> DVec2 {
        self.0
    }
}

/// Multi-octave sum of a [`NoiseField`], normalized back toward [-1, 1].
#[derive(Debug, Clone, Copy)]
pub struct OctaveNoise<'a> {
    noise: &'a NoiseField,
    config: &'a NoiseConfig,
}

impl<'a> OctaveNoise<'a> {
    pub fn new(noise: &'a NoiseField, config: &'a NoiseConfig) -> Self {
        Self { noise, config }
    }

    /// Sums `octaves` layers, doubling frequency and scaling amplitude by
    /// `falloff` each layer, then divides by the total amplitude.
    ///
    /// With one octave this is exactly one raw sample at `frequency`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut sum = 0.0;
        let mut max_amp = 0.0;
        let mut amp = 1.0;
        let mut freq = self.config.frequency;
        for _ in 0..self.config.octaves {
            sum += amp * self.noise.sample3d(x * freq, y * freq, z * freq);
            max_amp += amp;
            amp *= self.config.falloff;
            freq *= 2.0;
        }
        if max_amp > 0.0 {
            sum / max_amp
        } else {
            0.0
        }
    }
}

/// The noise-driven vector field, dispatched on [`FieldConfig::function`].
#[derive(Debug, Clone, Copy)]
pub struct FlowField<'a> {
    octaves: OctaveNoise<'a>,
    config: &'a FieldConfig,
}

impl<'a> FlowField<'a> {
    pub fn new(
        noise: &'a NoiseField,
        noise_config: &'a NoiseConfig,
        field_config: &'a FieldConfig,
    ) -> Self {
        Self {
            octaves: OctaveNoise::new(noise, noise_config),
            config: field_config,
        }
    }

    /// Noise scalar mapped to a unit vector at `base + s * range` degrees.
    pub fn angle(&self, point: DVec2, time: f64) -> DVec2 {
        let s = self.octaves.sample(point.x, point.y, time);
        let angle = (self.config.base_angle + s * self.config.angle_range).to_radians();
        let (sin, cos) = angle.sin_cos();
        DVec2::new(cos, sin)
    }

    /// Central-difference gradient of the octave noise in x and y.
    ///
    /// Flat regions (squared magnitude under 0.01) are rescaled to magnitude
    /// 0.1 so particles keep drifting; steeper regions are left as is, so flow
    /// speed follows the slope. An exactly zero gradient stays zero.
    pub fn gradient(&self, point: DVec2, time: f64) -> DVec2 {
        let h = GRADIENT_EPSILON / 2.0;
        let (x, y) = (point.x, point.y);
        let n = |x: f64, y: f64| self.octaves.sample(x, y, time);
        let g = DVec2::new(
            (n(x + h, y) - n(x - h, y)) / GRADIENT_EPSILON,
            (n(x, y + h) - n(x, y - h)) / GRADIENT_EPSILON,
        );
        let mag_sq = g.length_squared();
        if mag_sq < FLAT_THRESHOLD_SQ && mag_sq > 0.0 {
            g * (FLAT_MAGNITUDE / mag_sq.sqrt())
        } else {
            g
        }
    }

    /// Gradient rotated a quarter turn: `(-dy, dx)`.
    pub fn curl(&self, point: DVec2, time: f64) -> DVec2 {
        self.gradient(point, time).perp()
    }
}

impl FieldSource for FlowField<'_> {
    fn sample(&self, point: DVec2, time: f64) -> DVec2 {
        match self.config.function {
            FieldFunction::Angle => self.angle(point, time),
            FieldFunction::Grad => self.gradient(point, time),
            FieldFunction::Curl => self.curl(point, time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise_config(octaves: u32) -> NoiseConfig {
        NoiseConfig {
            octaves,
            frequency: 1.0,
            falloff: 0.92,
            speed: 10.0,
        }
    }

    fn field_config(function: FieldFunction) -> FieldConfig {
        FieldConfig {
            function,
            base_angle: 36.0,
            angle_range: 36.0,
        }
    }

    // =======================================================================
    // Octave noise
    // =======================================================================

    #[test]
    fn one_octave_equals_raw_sample_at_base_frequency() {
        let noise = NoiseField::new(42);
        let mut config = noise_config(1);
        config.frequency = 2.5;
        let octaves = OctaveNoise::new(&noise, &config);
        for i in 0..50 {
            let p = i as f64 * 0.13 - 3.0;
            let expected = noise.sample3d(p * 2.5, -p * 2.5, 0.7 * 2.5);
            assert_eq!(octaves.sample(p, -p, 0.7), expected, "mismatch at {p}");
        }
    }

    #[test]
    fn zero_falloff_keeps_only_first_octave() {
        let noise = NoiseField::new(9);
        let mut config = noise_config(6);
        config.falloff = 0.0;
        let octaves = OctaveNoise::new(&noise, &config);
        let expected = noise.sample3d(0.4, 0.9, 0.1);
        assert_eq!(octaves.sample(0.4, 0.9, 0.1), expected);
    }

    #[test]
    fn more_octaves_change_the_signal() {
        let noise = NoiseField::new(3);
        let one = noise_config(1);
        let four = noise_config(4);
        let differs = (0..20).any(|i| {
            let p = i as f64 * 0.31 + 0.05;
            OctaveNoise::new(&noise, &one).sample(p, p, 0.0)
                != OctaveNoise::new(&noise, &four).sample(p, p, 0.0)
        });
        assert!(differs);
    }

    // =======================================================================
    // Strategies
    // =======================================================================

    #[test]
    fn angle_mode_respects_base_angle_when_range_is_zero() {
        let noise = NoiseField::new(1);
        let nc = noise_config(1);
        let fc = FieldConfig {
            function: FieldFunction::Angle,
            base_angle: 90.0,
            angle_range: 0.0,
        };
        let v = FlowField::new(&noise, &nc, &fc).sample(DVec2::new(0.3, -0.2), 1.0);
        assert!(v.x.abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12, "{v}");
    }

    #[test]
    fn curl_is_grad_rotated_a_quarter_turn() {
        let noise = NoiseField::new(5);
        let nc = noise_config(3);
        let grad_cfg = field_config(FieldFunction::Grad);
        let curl_cfg = field_config(FieldFunction::Curl);
        let p = DVec2::new(0.25, -0.6);
        let g = FlowField::new(&noise, &nc, &grad_cfg).sample(p, 0.4);
        let c = FlowField::new(&noise, &nc, &curl_cfg).sample(p, 0.4);
        assert_eq!(c, DVec2::new(-g.y, g.x));
    }

    #[test]
    fn gradient_matches_slope_of_octave_noise() {
        let noise = NoiseField::new(11);
        let nc = noise_config(1);
        let fc = field_config(FieldFunction::Grad);
        let field = FlowField::new(&noise, &nc, &fc);
        let octaves = OctaveNoise::new(&noise, &nc);
        let p = DVec2::new(0.37, 0.81);
        let g = field.gradient(p, 0.2);
        // Only compare when the raw gradient was not rescaled.
        if g.length_squared() >= FLAT_THRESHOLD_SQ {
            let h = 1e-5;
            let dx = (octaves.sample(p.x + h, p.y, 0.2) - octaves.sample(p.x - h, p.y, 0.2)) / (2.0 * h);
            assert!((g.x - dx).abs() < 1e-3 * dx.abs().max(1.0), "{} vs {dx}", g.x);
        }
    }

    #[test]
    fn uniform_field_ignores_position_and_time() {
        let field = UniformField(DVec2::new(0.5, -0.25));
        assert_eq!(field.sample(DVec2::ZERO, 0.0), DVec2::new(0.5, -0.25));
        assert_eq!(field.sample(DVec2::new(9.0, 9.0), 99.0), DVec2::new(0.5, -0.25));
    }

    #[test]
    fn flow_field_is_usable_as_trait_object() {
        let noise = NoiseField::new(1);
        let nc = noise_config(1);
        let fc = field_config(FieldFunction::Curl);
        let flow = FlowField::new(&noise, &nc, &fc);
        let sources: Vec<&dyn FieldSource> = vec![&flow, &UniformField(DVec2::X)];
        for s in sources {
            assert!(s.sample(DVec2::new(0.1, 0.2), 0.0).is_finite());
        }
    }

    // =======================================================================
    // Property-based tests
    // =======================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn unit_square() -> impl Strategy<Value = DVec2> {
            (-1.0_f64..=1.0, -1.0_f64..=1.0).prop_map(|(x, y)| DVec2::new(x, y))
        }

        proptest! {
            #[test]
            fn angle_mode_is_unit_length(
                p in unit_square(),
                t in 0.0_f64..50.0,
                base in 0.0_f64..360.0,
                range in 0.0_f64..=180.0,
                octaves in 1u32..=10,
                seed: u32,
            ) {
                let noise = NoiseField::new(seed);
                let nc = noise_config(octaves);
                let fc = FieldConfig { function: FieldFunction::Angle, base_angle: base, angle_range: range };
                let v = FlowField::new(&noise, &nc, &fc).sample(p, t);
                prop_assert!((v.length() - 1.0).abs() < 1e-9, "|{v}| = {}", v.length());
            }

            #[test]
            fn curl_is_perpendicular_to_grad(
                p in unit_square(),
                t in 0.0_f64..50.0,
                octaves in 1u32..=10,
                seed: u32,
            ) {
                let noise = NoiseField::new(seed);
                let nc = noise_config(octaves);
                let g = FlowField::new(&noise, &nc, &field_config(FieldFunction::Grad)).sample(p, t);
                let c = FlowField::new(&noise, &nc, &field_config(FieldFunction::Curl)).sample(p, t);
                prop_assert!(g.dot(c).abs() < 1e-9, "grad {g} . curl {c} = {}", g.dot(c));
            }

            #[test]
            fn gradient_is_never_flatter_than_floor(
                p in unit_square(),
                t in 0.0_f64..50.0,
                seed: u32,
            ) {
                let noise = NoiseField::new(seed);
                let nc = noise_config(2);
                let g = FlowField::new(&noise, &nc, &field_config(FieldFunction::Grad)).sample(p, t);
                prop_assert!(g.is_finite());
                if g != DVec2::ZERO {
                    prop_assert!(g.length() >= FLAT_MAGNITUDE - 1e-9, "|{g}| below floor");
                }
            }

            #[test]
            fn octave_noise_stays_normalized(
                x in -10.0_f64..10.0,
                y in -10.0_f64..10.0,
                z in 0.0_f64..100.0,
                octaves in 1u32..=10,
                falloff in 0.0_f64..=1.0,
            ) {
                let noise = NoiseField::new(42);
                let nc = NoiseConfig { octaves, frequency: 1.0, falloff, speed: 0.0 };
                let v = OctaveNoise::new(&noise, &nc).sample(x, y, z);
                prop_assert!((-1.0..=1.0).contains(&v), "{v}");
            }
        }
    }
}
