//! Command-line interface for scoring candidates against job postings.
//!
//! Every command loads a JSON dataset, builds a [`MatchEngine`] over it, and
//! prints the result as pretty JSON on stdout. Diagnostics go to stderr
//! through `tracing-subscriber`.
//!
//! [`MatchEngine`]: accessmatch_engine::MatchEngine
#![forbid(unsafe_code)]

use std::io::Write;

use clap::Parser;

mod args;
mod commands;
mod error;
mod store;
mod telemetry;

use args::{CachedArgs, RankArgs, RecomputeArgs, ScoreArgs};
pub use error::CliError;

const ARG_DATASET: &str = "dataset";
const ARG_CANDIDATE: &str = "candidate";
const ARG_JOB: &str = "job";
const ARG_CACHE_DB: &str = "cache-db";
const ARG_SCORING: &str = "scoring";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, loading, scoring, or
/// writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    telemetry::init(&cli.log_level)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Score(args) => commands::run_score(args, writer),
        Command::Recompute(args) => commands::run_recompute(args, writer),
        Command::Cached(args) => commands::run_cached(args, writer),
        Command::Rank(args) => commands::run_rank(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "accessmatch",
    about = "Score candidates with disabilities against accessible job postings",
    version
)]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, value_name = "filter", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Score one candidate against one job.
    Score(ScoreArgs),
    /// Rescore every active job for a candidate and cache the results.
    Recompute(RecomputeArgs),
    /// Print cached Basic Match records, refreshing stale ones.
    Cached(CachedArgs),
    /// Rank active jobs for a candidate by Smart Match.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
