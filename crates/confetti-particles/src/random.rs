//! Uniform random sampling over ranges

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed numbers.
///
/// Implementors only supply a `[0, 1)` draw; the range helpers are derived
/// from it so every stochastic decision in the simulation goes through one
/// entropy stream.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [0, max). `max = 0` yields 0.
    fn random(&mut self, max: f32) -> f32 {
        self.random_range(max, 0.0)
    }

    /// Returns a float in [min, max). Note the argument order: upper bound first.
    fn random_range(&mut self, max: f32, min: f32) -> f32 {
        let v = self.next_f32() * (max - min) + min;
        // A draw just below 1 can round up to `max` in f32
        if max > min && v >= max {
            min
        } else {
            v
        }
    }

    /// Uniform index into a collection of `len` items, `None` when empty
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = self.random(len as f32) as usize;
        Some(idx.min(len - 1))
    }
}

/// Default random source backed by a small, fast PRNG
pub struct ParticleRng {
    inner: SmallRng,
}

impl ParticleRng {
    /// Deterministic stream, for tests and reproducible renders
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
        }
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for ParticleRng {
    fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a single draw forever
    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn largest_draw_stays_below_max() {
        let mut rng = Fixed(1.0 - f32::EPSILON / 2.0);
        assert!(rng.next_f32() < 1.0);

        let gy = rng.random_range(4.5, 2.0);
        assert!((2.0..4.5).contains(&gy), "gy = {gy}");

        let w = rng.random_range(18.0, 10.0);
        assert!((10.0..18.0).contains(&w), "w = {w}");

        let band = rng.random_range(0.0, -50.0);
        assert!((-50.0..0.0).contains(&band), "band = {band}");

        assert_eq!(rng.random(0.0), 0.0);
        assert_eq!(rng.pick_index(3), Some(2));
    }

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.random_range(10.0, -3.0);
            assert!((-3.0..10.0).contains(&v));
        }
    }

    #[test]
    fn random_with_zero_max_is_zero() {
        let mut rng = ParticleRng::new(7);
        for _ in 0..100 {
            assert_eq!(rng.random(0.0), 0.0);
        }
    }

    #[test]
    fn rng_is_roughly_uniform() {
        let mut rng = ParticleRng::new(1234);
        let mut buckets = [0u32; 10];
        let samples = 100_000;
        for _ in 0..samples {
            let v = rng.random_range(20.0, 10.0);
            buckets[((v - 10.0) as usize).min(9)] += 1;
        }
        let expected = samples as f32 / 10.0;
        for count in buckets {
            assert!(
                (count as f32 - expected).abs() < expected * 0.05,
                "bucket count {count} too far from {expected}"
            );
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn pick_index_stays_in_range() {
        let mut rng = ParticleRng::new(5);
        assert_eq!(rng.pick_index(0), None);
        assert_eq!(rng.pick_index(1), Some(0));
        let mut seen = [false; 3];
        for _ in 0..200 {
            let idx = rng.pick_index(3).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
