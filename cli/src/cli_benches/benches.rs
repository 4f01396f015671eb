use std::time::Duration;

use clap::Args as Args_;

use super::racer::{race, RaceOutcome};

#[derive(Debug, Args_, Clone, PartialEq, Eq)]
pub struct BenchArgs {
    /// Runs averaged for every candidate range
    #[arg(long, env = "FIB256_BENCH_RUNS", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,
    /// Time budget the prefix range has to stay under, in milliseconds
    #[arg(long, env = "FIB256_BENCH_BUDGET_MS", default_value_t = 1000)]
    pub budget_ms: u64,
}

impl BenchArgs {
    #[must_use]
    pub fn budget(&self) -> Duration { Duration::from_millis(self.budget_ms) }

    /// # Errors
    ///
    /// Errors if the computed values disagree with the reference table.
    pub fn run(&self) -> Result<RaceOutcome, anyhow::Error> { race(self.runs, self.budget()) }
}
