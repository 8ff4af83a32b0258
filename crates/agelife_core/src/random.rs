//! Pluggable randomness for the breeding and mortality rules.
//!
//! Every random decision in the engine goes through [`RandomSource`], so a
//! seeded [`RngSource`] reproduces a run exactly and a [`FixedSource`] pins
//! each draw to a known value for rule-level tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest value strictly below 1.0.
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

pub trait RandomSource {
    /// Uniform integer in `[1, 100]`.
    fn percent(&mut self) -> u32;

    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn percent(&mut self) -> u32 {
        (**self).percent()
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }
}

/// Adapter from any [`rand::Rng`] to a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R = ChaCha8Rng> {
    rng: R,
}

impl RngSource<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn percent(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

/// A source that answers every draw from the same point in `[0, 1)`.
///
/// `value` is treated as a quantile: `0.0` is the smallest possible draw of
/// every kind and [`FixedSource::max`] the largest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource {
    value: f64,
}

impl FixedSource {
    /// Out-of-range values are clamped into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        let value = if value.is_nan() { 0.0 } else { value };
        Self {
            value: value.clamp(0.0, MAX_UNIT),
        }
    }

    pub fn min() -> Self {
        Self::new(0.0)
    }

    pub fn max() -> Self {
        Self::new(MAX_UNIT)
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl RandomSource for FixedSource {
    fn percent(&mut self) -> u32 {
        ((self.value * 100.0) as u32 + 1).min(100)
    }

    fn unit(&mut self) -> f64 {
        self.value
    }

    fn below(&mut self, bound: u32) -> u32 {
        ((self.value * f64::from(bound)) as u32).min(bound.saturating_sub(1))
    }
}
