use core::ops::RangeInclusive;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Uniform integer sampler feeding puzzle generation.
pub trait RandomSource {
    /// Draws a value from `range`, both ends included.
    fn next_in(&mut self, range: RangeInclusive<Value>) -> Value;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_in(&mut self, range: RangeInclusive<Value>) -> Value {
        (**self).next_in(range)
    }
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in(&mut self, range: RangeInclusive<Value>) -> Value {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }
}

/// Reproducible source, the same seed replays the same rounds.
pub type SeededSource = RngSource<SmallRng>;

impl RngSource<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}
