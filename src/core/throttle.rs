//! Minimum-interval throttle for catalog requests.

use std::time::Duration;

use super::clock::Clock;

/// Enforces a minimum interval between consecutive calls.
///
/// Call `wait` immediately before each request. The first call never blocks.
///
/// ```
/// use std::time::Duration;
/// use tts_deck::core::{ManualClock, Throttle};
///
/// let clock = ManualClock::new();
/// let mut throttle = Throttle::new(Duration::from_millis(100));
///
/// throttle.wait(&clock);
/// throttle.wait(&clock);
///
/// assert_eq!(clock.total_slept(), Duration::from_millis(100));
/// ```
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Duration>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Sleep until at least `interval` has passed since the previous call.
    pub fn wait(&mut self, clock: &dyn Clock) {
        if let Some(last) = self.last {
            let between = clock.now().saturating_sub(last);
            if between < self.interval {
                clock.sleep(self.interval - between);
            }
        }
        self.last = Some(clock.now());
    }
}
