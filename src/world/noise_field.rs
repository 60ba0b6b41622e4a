use noise::NoiseFn;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

const TABLE_SIZE: usize = 256;

const GRADIENTS: [[f64; 2]; 8] = [
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [FRAC_1_SQRT_2, FRAC_1_SQRT_2],
    [-FRAC_1_SQRT_2, FRAC_1_SQRT_2],
    [FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
    [-FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
];

/// Seeded 2D gradient noise.
///
/// `sample` returns a signed value. With unit gradients the magnitude never
/// exceeds `sqrt(2)/2`, so callers may rely on the `[-1, 1]` bound.
/// `sample_unit` remaps to `[0, 1]`. Non-finite inputs yield NaN.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u64,
    perm: [u8; TABLE_SIZE * 2],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255u8).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & (TABLE_SIZE - 1)];
        }

        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let cell_x = x.floor();
        let cell_z = z.floor();

        let xi = (cell_x as i64 & 255) as usize;
        let zi = (cell_z as i64 & 255) as usize;

        let fx = x - cell_x;
        let fz = z - cell_z;

        let u = fade(fx);
        let v = fade(fz);

        let p = &self.perm;
        let a = p[xi] as usize + zi;
        let b = p[xi + 1] as usize + zi;

        let aa = p[p[a] as usize];
        let ab = p[p[a + 1] as usize];
        let ba = p[p[b] as usize];
        let bb = p[p[b + 1] as usize];

        lerp(
            lerp(gradient(aa, fx, fz), gradient(ba, fx - 1.0, fz), u),
            lerp(
                gradient(ab, fx, fz - 1.0),
                gradient(bb, fx - 1.0, fz - 1.0),
                u,
            ),
            v,
        )
    }

    pub fn sample_unit(&self, x: f64, z: f64) -> f64 {
        self.sample(x, z) * 0.5 + 0.5
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn gradient(hash: u8, x: f64, z: f64) -> f64 {
    let g = GRADIENTS[(hash & 7) as usize];
    g[0] * x + g[1] * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_samples() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..200 {
            let x = i as f64 * 0.731 - 50.0;
            let z = i as f64 * -1.37 + 12.5;
            assert_eq!(a.sample(x, z), b.sample(x, z));
            assert_eq!(a.sample(x, z), a.sample(x, z));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..100).any(|i| {
            let x = i as f64 * 0.37 + 0.5;
            a.sample(x, x * 0.5) != b.sample(x, x * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn lattice_points_are_zero() {
        let field = NoiseField::new(7);
        for x in -5..5 {
            for z in -5..5 {
                assert_eq!(field.sample(x as f64, z as f64), 0.0);
            }
        }
    }

    #[test]
    fn continuous_across_cell_boundaries() {
        let field = NoiseField::new(99);
        for i in -10..10 {
            let edge = i as f64;
            let z = 0.37 + i as f64 * 0.11;
            let left = field.sample(edge - 1e-9, z);
            let right = field.sample(edge + 1e-9, z);
            assert!((left - right).abs() < 1e-6, "jump at x={edge}");

            let below = field.sample(z, edge - 1e-9);
            let above = field.sample(z, edge + 1e-9);
            assert!((below - above).abs() < 1e-6, "jump at z={edge}");
        }
    }

    #[test]
    fn samples_stay_in_signed_unit_range() {
        let field = NoiseField::new(3);
        for i in 0..2000 {
            let x = i as f64 * 0.173 - 100.0;
            let z = i as f64 * 0.311 + 40.0;
            let value = field.sample(x, z);
            assert!((-1.0..=1.0).contains(&value));
            let unit = field.sample_unit(x, z);
            assert!((0.0..=1.0).contains(&unit));
        }
    }

    #[test]
    fn non_finite_input_yields_nan() {
        let field = NoiseField::new(5);
        assert!(field.sample(f64::NAN, 1.0).is_nan());
        assert!(field.sample(f64::INFINITY, 1.0).is_nan());
        assert!(field.sample(0.5, f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn usable_through_noise_fn() {
        let field = NoiseField::new(11);
        let via_trait = NoiseFn::<f64, 2>::get(&field, [3.25, -8.5]);
        assert_eq!(via_trait, field.sample(3.25, -8.5));
    }
}
