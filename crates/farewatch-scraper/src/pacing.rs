//! Randomised pauses between page requests.
//!
//! Consecutive searches against one site are spaced by a uniformly random
//! delay so the request pattern does not look machine-timed.

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    /// Pauses between `min` and `max` inclusive. Bounds given in the wrong
    /// order are swapped.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// No pause at all; used by tests and dry runs.
    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws one delay from the configured range.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis =
            rand::rng().random_range(duration_millis(self.min)..=duration_millis(self.max));
        Duration::from_millis(millis)
    }

    /// Sleeps for one randomly drawn delay.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = delay.as_millis(), "pacing before next request");
        tokio::time::sleep(delay).await;
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(3))
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
