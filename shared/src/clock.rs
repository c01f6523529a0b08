use std::{cell::Cell, time::Duration};

use crate::backends::Timestamp;

/// Monotonic time source for deadlines and game time.
pub trait Clock {
    /// Time elapsed since the clock was created
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`]. Works on native and in the browser.
pub struct SystemClock {
    start_millis: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start_millis: Timestamp::now_millis(),
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
        let elapsed = (Timestamp::now_millis() - self.start_millis).max(0.0);
        Duration::from_secs_f64(elapsed / 1000.0)
    }
}

/// A clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
