//! Human readable durations for timing reports.
use std::time::Duration;

use derive_more::Display;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Unit a duration is reported in
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum TimerUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimerUnit {
    /// Largest unit that still keeps the count readable. Thresholds are
    /// compared against the raw nanosecond count.
    #[must_use]
    pub fn for_nanos(nanos: u128) -> Self {
        if nanos < NANOS_PER_MICRO {
            TimerUnit::Nanoseconds
        } else if nanos < NANOS_PER_MILLI {
            TimerUnit::Microseconds
        } else if nanos < NANOS_PER_SEC {
            TimerUnit::Milliseconds
        } else {
            TimerUnit::Seconds
        }
    }

    #[must_use]
    pub fn nanos_per_unit(self) -> u128 {
        match self {
            TimerUnit::Nanoseconds => 1,
            TimerUnit::Microseconds => NANOS_PER_MICRO,
            TimerUnit::Milliseconds => NANOS_PER_MILLI,
            TimerUnit::Seconds => NANOS_PER_SEC,
        }
    }
}

/// Renders `duration` as `"<count> <unit>"`, truncating towards zero.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    let unit = TimerUnit::for_nanos(nanos);
    format!("{} {unit}", nanos / unit.nanos_per_unit())
}
