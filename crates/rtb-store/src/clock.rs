//! Time source for save timestamps and dated filenames

use chrono::{Local, NaiveDateTime};

/// Abstraction over the current local time
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// System clock (production use).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The instant returned by every call to [`Clock::now`]
    pub current_time: NaiveDateTime,
}

impl FixedClock {
    /// Create a clock frozen at `time`.
    #[must_use]
    pub fn new(time: NaiveDateTime) -> Self {
        Self { current_time: time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.current_time
    }
}
