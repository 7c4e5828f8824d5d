//! Time sources for session and question clocks.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::{Local, NaiveDate};

/// A monotonic millisecond clock plus the current calendar date.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;

    /// Today's date, used to stamp history entries.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
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
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    today: NaiveDate,
}

impl ManualClock {
    /// Create a clock at zero milliseconds on the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            today,
        }
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let handle = clock.clone();
        handle.advance(1500);
        assert_eq!(clock.now_ms(), 1500);
        assert_eq!(clock.today().to_string(), "2024-03-01");
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
