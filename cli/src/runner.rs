//! Commands of the `fib256` binary, on top of the
//! [`fib256_runner`] engine.
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::builder::RangedI64ValueParser;
use fib256_runner::fibonacci::{
    fibonacci, fibonacci_range, MAX_EXACT_FIBONACCI_INDEX, MAX_FIBONACCI_INDEX,
};
use fib256_runner::timer::format_duration;
use fib256_runner::{reference, U256};
use itertools::Itertools;
use log::{debug, warn};

/// Parser for Fibonacci indices given on the command line.
///
/// Negative numbers are parsed as numbers too, so `-1` is reported as out of
/// range instead of as an unknown flag.
#[must_use]
pub fn index_parser() -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(MAX_FIBONACCI_INDEX))
}

/// Value returned by `f` and the wall-clock time it took.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    // Keep the optimiser from discarding the computation.
    let value = black_box(f());
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Outcome of `fib256 <N>`.
#[derive(Debug, Clone)]
pub struct SingleReport {
    pub n: u32,
    pub value: U256,
    pub single: Duration,
    pub range: Duration,
}

impl fmt::Display for SingleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n;
        writeln!(f, "fibonacci({n}) = {}", self.value)?;
        writeln!(
            f,
            "Computed fibonacci({n}) in {}",
            format_duration(self.single)
        )?;
        write!(
            f,
            "Computed fibonacci_range(0, {n}) in {}",
            format_duration(self.range)
        )
    }
}

fn ensure_index(n: u32) -> Result<()> {
    ensure!(
        n <= MAX_FIBONACCI_INDEX,
        "Argument must be between 0 and {MAX_FIBONACCI_INDEX}, got {n}."
    );
    Ok(())
}

/// Computes `F(n)` once and `F(0..=n)` once, timing both.
///
/// # Errors
///
/// Errors if `n` is past [`MAX_FIBONACCI_INDEX`].
pub fn run(n: u32) -> Result<SingleReport> {
    ensure_index(n)?;
    if n > MAX_EXACT_FIBONACCI_INDEX {
        warn!("F({n}) does not fit in 256 bits, the value shown is reduced modulo 2^256");
    }
    let Timed {
        value,
        elapsed: single,
    } = timed(|| fibonacci(n));
    let Timed {
        value: range_values,
        elapsed: range,
    } = timed(|| fibonacci_range(0, n));
    debug!(
        "fibonacci({n}) took {single:?}, fibonacci_range(0, {n}) took {range:?} for {} values",
        range_values.len()
    );
    Ok(SingleReport {
        n,
        value,
        single,
        range,
    })
}

/// `index value` lines for `F(start..=end)`.
///
/// # Errors
///
/// Errors if the range is empty or reaches past [`MAX_FIBONACCI_INDEX`].
pub fn range(start: u32, end: u32) -> Result<String> {
    ensure_index(end)?;
    ensure!(
        start <= end,
        "Range start {start} must not be greater than range end {end}."
    );
    let values = fibonacci_range(start, end);
    Ok((start..)
        .zip(values)
        .map(|(index, value)| format!("{index} {value}"))
        .join("\n"))
}

/// Recomputes `F(0..=end)` and checks it against the reference table.
///
/// # Errors
///
/// Errors if `end` is out of range, or with the first mismatching index.
pub fn verify(end: u32) -> Result<String> {
    ensure_index(end)?;
    let results = fibonacci_range(0, end);
    reference::verify(&results, 0)?;
    Ok(format!("All Fibonacci numbers from 0 to {end} match!"))
}
