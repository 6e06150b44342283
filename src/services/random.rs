//! Injectable randomness for seat maps, schedules and booking references.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Uniform index in `[0, bound)`; `0` when `bound` is zero.
    fn next_below(&self, bound: usize) -> usize;
}

/// Thread-local OS-seeded generator, used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen()
    }

    fn next_below(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic generator for reproducible layouts.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).gen()
    }

    fn next_below(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..bound)
    }
}
