//! Seeded 3D coherent noise.
//!
//! [`NoiseField`] wraps the `noise` crate's OpenSimplex generator. It is a
//! gradient-noise source (smooth, so callers can take finite differences of
//! it) whose permutation table is built once from the seed; after that every
//! sample is a pure function of `(x, y, z)`.
//!
//! The 3D OpenSimplex output only spans about [-0.535, 0.535], so it is
//! stretched by [`RANGE_SCALE`] onto the full [-1, 1] and clamped there.

use std::fmt;

use noise::{Clamp, NoiseFn, OpenSimplex, ScaleBias};

/// Stretch that maps the measured 3D OpenSimplex extremes onto [-1, 1].
pub const RANGE_SCALE: f64 = 1.87;

type Generator = Clamp<f64, ScaleBias<f64, OpenSimplex, 3>, 3>;

/// Deterministic 3D gradient noise in [-1, 1].
pub struct NoiseField {
    noise: Generator,
    seed: u32,
}

impl NoiseField {
    /// Builds the permutation table for `seed`.
    pub fn new(seed: u32) -> Self {
        let scaled = ScaleBias::new(OpenSimplex::new(seed)).set_scale(RANGE_SCALE);
        Self {
            noise: Clamp::new(scaled).set_bounds(-1.0, 1.0),
            seed,
        }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the noise at `(x, y, z)`, in [-1, 1] with extremes near ±1.
    pub fn sample3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z])
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_samples() {
        let a = NoiseField::new(99);
        let b = NoiseField::new(99);
        for i in 0..100 {
            let p = i as f64 * 0.173;
            assert_eq!(
                a.sample3d(p, -p * 0.5, p * 0.1).to_bits(),
                b.sample3d(p, -p * 0.5, p * 0.1).to_bits(),
                "diverged at sample {i}"
            );
        }
    }

    #[test]
    fn different_seeds_produce_different_fields() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..50).any(|i| {
            let p = i as f64 * 0.37 + 0.11;
            a.sample3d(p, p * 0.7, 0.3) != b.sample3d(p, p * 0.7, 0.3)
        });
        assert!(differs, "seeds 1 and 2 produced identical samples");
    }

    #[test]
    fn field_is_not_constant() {
        let field = NoiseField::new(7);
        let first = field.sample3d(0.13, 0.29, 0.0);
        let varies = (1..50).any(|i| {
            let p = i as f64 * 0.21 + 0.13;
            (field.sample3d(p, 0.29, 0.0) - first).abs() > 1e-3
        });
        assert!(varies, "noise field looks constant");
    }

    #[test]
    fn dense_grid_reaches_both_ends_of_the_range() {
        let field = NoiseField::new(42);
        let (mut min, mut max) = (f64::MAX, f64::MIN);
        for k in 0..3 {
            let z = k as f64 * 7.31;
            for j in 0..300 {
                for i in 0..300 {
                    let v = field.sample3d(i as f64 * 0.37, j as f64 * 0.37, z);
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
        assert!(max > 0.9 && min < -0.9, "range [{min}, {max}]");
        assert!(max <= 1.0 && min >= -1.0, "range [{min}, {max}]");
    }

    #[test]
    fn output_is_the_stretched_open_simplex_sample() {
        let raw = OpenSimplex::new(5);
        let field = NoiseField::new(5);
        for i in 0..50 {
            let p = [i as f64 * 0.29, 1.0 - i as f64 * 0.11, 0.4];
            let expected = (raw.get(p) * RANGE_SCALE).clamp(-1.0, 1.0);
            assert!((field.sample3d(p[0], p[1], p[2]) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn debug_shows_seed() {
        let dbg = format!("{:?}", NoiseField::new(31337));
        assert!(dbg.contains("31337"), "got: {dbg}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn samples_stay_in_unit_range(
                seed: u32,
                x in -1e3_f64..1e3,
                y in -1e3_f64..1e3,
                z in 0.0_f64..1e3,
            ) {
                let v = NoiseField::new(seed).sample3d(x, y, z);
                prop_assert!((-1.0..=1.0).contains(&v), "sample({x}, {y}, {z}) = {v}");
            }

            #[test]
            fn small_perturbations_give_small_changes(
                x in -100.0_f64..100.0,
                y in -100.0_f64..100.0,
                z in 0.0_f64..100.0,
                axis in 0usize..3,
            ) {
                let field = NoiseField::new(42);
                let h = 1e-6;
                let mut p = [x, y, z];
                let base = field.sample3d(p[0], p[1], p[2]);
                p[axis] += h;
                let moved = field.sample3d(p[0], p[1], p[2]);
                // Gradient noise has bounded slope; even after the range
                // stretch a 1e-6 nudge moves the output by well under 1e-4.
                prop_assert!(
                    (moved - base).abs() < 1e-4,
                    "jump of {} along axis {axis} at ({x}, {y}, {z})",
                    (moved - base).abs()
                );
            }
        }
    }
}
