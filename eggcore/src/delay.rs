//! Shake-arm delay sampling

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Default shake-arm window in whole seconds, both ends included.
pub const DEFAULT_SHAKE_DELAY_SECS: RangeInclusive<u64> = 4..=6;

/// Anything that can hand out the next shake-arm delay.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// Closures work as delay sources, which keeps tests deterministic.
impl<F> DelaySource for F
where
    F: FnMut() -> Duration,
{
    fn next_delay(&mut self) -> Duration {
        self()
    }
}

/// Uniform whole-second delays drawn from an inclusive range.
pub struct RandomDelay<R: Rng> {
    secs: RangeInclusive<u64>,
    rng: R,
}

impl<R: Rng> RandomDelay<R> {
    pub fn with_rng(secs: RangeInclusive<u64>, rng: R) -> Self {
        Self { secs, rng }
    }
}

impl RandomDelay<StdRng> {
    /// Reproducible sequence of delays.
    pub fn seeded(secs: RangeInclusive<u64>, seed: u64) -> Self {
        Self::with_rng(secs, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(secs: RangeInclusive<u64>) -> Self {
        Self::with_rng(secs, StdRng::from_entropy())
    }
}

impl<R: Rng> DelaySource for RandomDelay<R> {
    fn next_delay(&mut self) -> Duration {
        Duration::from_secs(self.rng.gen_range(self.secs.clone()))
    }
}
