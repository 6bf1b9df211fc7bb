#![forbid(unsafe_code)]

//! Time sources for debounce and suppression windows.
//!
//! The engine never sleeps or schedules; it only compares instants. Hosts
//! use [`MonotonicClock`]; tests (and deterministic replay harnesses)
//! inject a [`ManualClock`] and advance it explicitly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// A monotonic time source the engine samples synchronously.
pub trait NotificationClock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl NotificationClock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A hand-driven clock. Clones share the same time, so a test can keep a
/// handle while the engine owns the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Advance the shared time.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationClock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualClock, MonotonicClock, NotificationClock};
    use std::time::Duration;

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_is_frozen_until_advanced() {
        let clock = ManualClock::new();
        let a = clock.now();
        assert_eq!(clock.now(), a);
        clock.advance(Duration::from_millis(75));
        assert_eq!(clock.now() - a, Duration::from_millis(75));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(10));
        assert_eq!(clock.now(), handle.now());
    }
}
