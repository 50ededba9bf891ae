use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the score jitter and of the picks made when a user has no history.
///
/// Recommendations are deliberately non-deterministic; tests pass a
/// [`FixedRandom`] to pin both values.
pub trait RandomSource {
    /// Uniform value in `[0, max)`; `0.0` when `max <= 0`.
    fn jitter(&mut self, max: f64) -> f64;
    /// Uniform index in `[0, len)`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn jitter(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..max)
    }

    fn index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible source for replaying a recommendation run.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn jitter(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(0.0..max)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Constant jitter and index, clamped into range. A jitter at or above
/// `max` becomes the largest value below it, keeping the half-open bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRandom {
    pub jitter: f64,
    pub index: usize,
}

impl FixedRandom {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedRandom {
    fn jitter(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        if self.jitter >= max {
            // next representable value below a positive `max`
            return f64::from_bits(max.to_bits() - 1);
        }
        self.jitter.max(0.0)
    }

    fn index(&mut self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}
