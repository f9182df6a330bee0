// ABOUTME: Politeness pacing between requests: the delay range and the Sleeper seam.
// ABOUTME: Delays are drawn uniformly from the range; sleeping blocks the calling thread by default.

use std::time::Duration;

use rand::Rng;

/// Bounds of the pause taken before every target but the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Create a range; the bounds are ordered if given backwards.
    pub fn new(a: Duration, b: Duration) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// A range from (fractional) seconds, as the CLI takes them. Negative values count as zero.
    pub fn from_secs_f64(min: f64, max: f64) -> Self {
        Self::new(
            Duration::from_secs_f64(min.max(0.0)),
            Duration::from_secs_f64(max.max(0.0)),
        )
    }

    /// Always the same pause.
    pub fn fixed(d: Duration) -> Self {
        Self { min: d, max: d }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draw a pause uniformly from `[min, max]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        Duration::from_secs_f64(rng.gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64()))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(1),
            max: Duration::from_secs(3),
        }
    }
}

/// Performs the pause between targets.
pub trait Sleeper {
    fn sleep(&mut self, d: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}
