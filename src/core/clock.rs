//! Monotonic time sources.
//!
//! Sessions measure elapsed time against an injected `Clock` rather than
//! reading the system clock directly. A clock reports time as a `Duration`
//! since its own origin; only differences between readings are meaningful.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic clock consumed by game sessions.
pub trait Clock {
    /// Time elapsed since this clock's origin. Never decreases.
    fn now(&self) -> Duration;
}

/// Clock backed by `std::time::Instant`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and replays.
///
/// ```
/// use std::time::Duration;
/// use guess_challenge::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance_secs(5);
/// assert_eq!(clock.now(), Duration::from_secs(5));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
