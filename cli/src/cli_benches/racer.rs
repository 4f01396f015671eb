//! How far does `fibonacci_range(0, end)` get within a time budget?
//!
//! Grows `end` one index at a time, averaging several runs per candidate,
//! until the average reaches the budget. The values computed along the way
//! are checked against the reference table before anything is reported.
use std::fmt;
use std::time::Duration;

use anyhow::{ensure, Result};
use fib256_runner::fibonacci::{fibonacci_range, MAX_FIBONACCI_INDEX};
use fib256_runner::reference;
use fib256_runner::timer::format_duration;
use fib256_runner::U256;
use log::{debug, trace};

use crate::runner::{timed, Timed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceOutcome {
    /// `F(0..=end)` averaged under the budget, `F(0..=end + 1)` did not.
    WithinBudget { end: u32, budget: Duration },
    /// Every index up to [`MAX_FIBONACCI_INDEX`] stayed under the budget;
    /// `average` is the mean time for the whole table.
    Everything { average: Duration },
}

impl fmt::Display for RaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceOutcome::WithinBudget { end, budget } => write!(
                f,
                "Computed Fibonacci numbers 0 to {end} within {}.",
                format_duration(*budget)
            ),
            RaceOutcome::Everything { average } => write!(
                f,
                "Computed all Fibonacci numbers 0 to {MAX_FIBONACCI_INDEX} in {}.",
                format_duration(*average)
            ),
        }
    }
}

/// Mean wall-clock time of `runs` calls to `fibonacci_range(0, end)`, along
/// with the values from the last call.
///
/// # Panics
///
/// Panics if `runs` is zero.
#[must_use]
pub fn average_range_time(end: u32, runs: u32) -> (Vec<U256>, Duration) {
    assert!(runs > 0, "need at least one run to average");
    let mut total = Duration::ZERO;
    let mut values = Vec::new();
    for _ in 0..runs {
        let Timed { value, elapsed } = timed(|| fibonacci_range(0, end));
        total += elapsed;
        values = value;
    }
    (values, total / runs)
}

/// # Errors
///
/// Errors if `runs` is zero, or if any computed value disagrees with the
/// reference table.
pub fn race(runs: u32, budget: Duration) -> Result<RaceOutcome> {
    ensure!(runs > 0, "The number of runs must be positive.");
    let mut end = 1;
    let values = loop {
        let (values, average) = average_range_time(end, runs);
        trace!("fibonacci_range(0, {end}) averaged {average:?} over {runs} runs");
        if average >= budget {
            end -= 1;
            break values;
        }
        if end == MAX_FIBONACCI_INDEX {
            reference::verify(&values, 0)?;
            let (_, average) = average_range_time(MAX_FIBONACCI_INDEX, runs);
            debug!("whole table averaged {average:?}");
            return Ok(RaceOutcome::Everything { average });
        }
        end += 1;
    };
    // `values` covers one index more than fit in the budget.
    reference::verify(&values[..=end as usize], 0)?;
    debug!("largest prefix within {budget:?} ends at {end}");
    Ok(RaceOutcome::WithinBudget { end, budget })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_stops_immediately() {
        let outcome = race(1, Duration::ZERO).unwrap();
        assert_eq!(outcome, RaceOutcome::WithinBudget {
            end: 0,
            budget: Duration::ZERO,
        });
        assert_eq!(
            outcome.to_string(),
            "Computed Fibonacci numbers 0 to 0 within 0 Nanoseconds."
        );
    }

    #[test]
    fn generous_budget_covers_everything() {
        let outcome = race(1, Duration::from_secs(3600)).unwrap();
        assert!(matches!(outcome, RaceOutcome::Everything { .. }));
        assert!(outcome
            .to_string()
            .starts_with("Computed all Fibonacci numbers 0 to 374 in "));
    }

    #[test]
    fn zero_runs_is_an_error() {
        assert!(race(0, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn average_keeps_last_values() {
        let (values, _) = average_range_time(10, 3);
        assert_eq!(values.len(), 11);
        assert_eq!(values[10], U256::from(55_u64));
    }
}
