#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use fib256_cli::cli_benches::benches::BenchArgs;
use fib256_cli::runner::{self, index_parser};
use fib256_runner::fibonacci::MAX_FIBONACCI_INDEX;
use log::debug;
#[cfg(not(target_arch = "wasm32"))]
use mimalloc::MiMalloc;

#[cfg(not(target_arch = "wasm32"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Computes Fibonacci numbers over 256-bit unsigned integers by matrix
/// exponentiation, and times how long it takes.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Index of the Fibonacci number to compute, between 0 and 374
    #[arg(required = true, allow_negative_numbers = true, value_parser = index_parser())]
    n: Option<u32>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Prints one `index value` line per Fibonacci number in START..=END
    Range {
        #[arg(allow_negative_numbers = true, value_parser = index_parser())]
        start: u32,
        #[arg(allow_negative_numbers = true, value_parser = index_parser())]
        end: u32,
    },
    /// Recomputes F(0..=END) and checks it against the reference table
    Verify {
        #[arg(long, default_value_t = MAX_FIBONACCI_INDEX, value_parser = index_parser())]
        end: u32,
    },
    /// Finds how many Fibonacci numbers can be computed within a time budget
    Bench(BenchArgs),
}

/// Run me eg like `cargo run -- -vv 100`
fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    debug!("{cli:?}");
    match (cli.command, cli.n) {
        (Some(Command::Range { start, end }), _) => println!("{}", runner::range(start, end)?),
        (Some(Command::Verify { end }), _) => println!("{}", runner::verify(end)?),
        (Some(Command::Bench(bench)), _) => println!("{}", bench.run()?),
        (None, Some(n)) => println!("{}", runner::run(n)?),
        (None, None) => {
            return Err(anyhow!(
                "An integer argument is required to run this program! Example: `fib256 100`"
            ))
        }
    }
    Ok(())
}
