//! Wall-clock abstraction for event timestamps.
//!
//! Stall events are stamped with the time of day at which they were
//! detected. Analysis code asks a [`Clock`] instead of reading system time
//! directly, so tests can pin timestamps.

use std::cell::Cell;

use chrono::{Duration, NaiveTime};

/// Source of the current time of day.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: NaiveTime,
}

impl FixedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self { time }
    }

    /// Build from hour/minute/second/microsecond. Returns `None` when out of range.
    pub fn from_hms_micro(hour: u32, min: u32, sec: u32, micro: u32) -> Option<Self> {
        NaiveTime::from_hms_micro_opt(hour, min, sec, micro).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.time
    }
}

/// A clock that advances by a fixed step every time it is read.
///
/// The first call returns the start instant. Wraps around midnight.
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<NaiveTime>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: NaiveTime, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveTime {
        let current = self.next.get();
        self.next.set(current + self.step);
        current
    }
}

/// Render a time of day as `HH:MM:SS.ffffff`.
pub fn format_timestamp(time: NaiveTime) -> String {
    time.format("%H:%M:%S%.6f").to_string()
}
