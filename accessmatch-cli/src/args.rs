//! Subcommand arguments and their resolved configurations.
//!
//! Arguments are layered from flags, configuration files, and
//! `ACCESSMATCH_CMDS_<COMMAND>_<FIELD>` environment variables before being
//! resolved into configurations with every required value present.

use std::num::NonZeroUsize;
use std::time::Duration;

use accessmatch_core::{CandidateId, JobId};
use accessmatch_data::fs::file_is_file;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_CACHE_DB, ARG_CANDIDATE, ARG_DATASET, ARG_JOB, ARG_SCORING, CliError};

pub(crate) const CMD_SCORE: &str = "score";
pub(crate) const CMD_RECOMPUTE: &str = "recompute";
pub(crate) const CMD_CACHED: &str = "cached";
pub(crate) const CMD_RANK: &str = "rank";

const DEFAULT_RANK_LIMIT: usize = 10;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Which calculator the `score` command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MatchMode {
    /// Subtype and barrier coverage, cached.
    #[default]
    Basic,
    /// Five weighted criteria with reasons and alerts, never cached.
    Smart,
}

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = CMD_SCORE,
    about = "Score one candidate against one job",
    long_about = "Score one candidate against one job posting. Basic Match \
                 results are written to the score cache; Smart Match results \
                 are printed only."
)]
#[ortho_config(prefix = "ACCESSMATCH")]
pub(crate) struct ScoreArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Candidate identifier.
    #[arg(long = ARG_CANDIDATE, value_name = "id")]
    #[serde(default)]
    pub(crate) candidate: Option<u64>,
    /// Job identifier.
    #[arg(long = ARG_JOB, value_name = "id")]
    #[serde(default)]
    pub(crate) job: Option<u64>,
    /// Calculator to run.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) mode: Option<MatchMode>,
    /// SQLite score cache. An in-memory cache is used when omitted.
    #[arg(long = ARG_CACHE_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) cache_db: Option<Utf8PathBuf>,
    /// JSON file overriding scoring weights and thresholds.
    #[arg(long = ARG_SCORING, value_name = "path")]
    #[serde(default)]
    pub(crate) scoring: Option<Utf8PathBuf>,
}

/// CLI arguments for the `recompute` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = CMD_RECOMPUTE,
    about = "Rescore every active job for a candidate and cache the results"
)]
#[ortho_config(prefix = "ACCESSMATCH")]
pub(crate) struct RecomputeArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Candidate identifier.
    #[arg(long = ARG_CANDIDATE, value_name = "id")]
    #[serde(default)]
    pub(crate) candidate: Option<u64>,
    /// SQLite score cache. An in-memory cache is used when omitted.
    #[arg(long = ARG_CACHE_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) cache_db: Option<Utf8PathBuf>,
    /// JSON file overriding scoring weights and thresholds.
    #[arg(long = ARG_SCORING, value_name = "path")]
    #[serde(default)]
    pub(crate) scoring: Option<Utf8PathBuf>,
    /// Worker threads for a dedicated pool; 0 or unset shares the global pool.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) threads: Option<usize>,
}

/// CLI arguments for the `cached` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = CMD_CACHED,
    about = "Print cached Basic Match records, best first",
    long_about = "Print the cached Basic Match records for a candidate, best \
                 score first. When nothing is cached or any record is older \
                 than the maximum age, every active job is rescored first."
)]
#[ortho_config(prefix = "ACCESSMATCH")]
pub(crate) struct CachedArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Candidate identifier.
    #[arg(long = ARG_CANDIDATE, value_name = "id")]
    #[serde(default)]
    pub(crate) candidate: Option<u64>,
    /// SQLite score cache. An in-memory cache is used when omitted.
    #[arg(long = ARG_CACHE_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) cache_db: Option<Utf8PathBuf>,
    /// JSON file overriding scoring weights and thresholds.
    #[arg(long = ARG_SCORING, value_name = "path")]
    #[serde(default)]
    pub(crate) scoring: Option<Utf8PathBuf>,
    /// Age in hours after which cached records are recomputed.
    #[arg(long, value_name = "hours")]
    #[serde(default)]
    pub(crate) max_age_hours: Option<u64>,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = CMD_RANK,
    about = "Rank active jobs for a candidate by Smart Match"
)]
#[ortho_config(prefix = "ACCESSMATCH")]
pub(crate) struct RankArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Candidate identifier.
    #[arg(long = ARG_CANDIDATE, value_name = "id")]
    #[serde(default)]
    pub(crate) candidate: Option<u64>,
    /// Maximum number of ranked jobs to print.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// JSON file overriding scoring weights and thresholds.
    #[arg(long = ARG_SCORING, value_name = "path")]
    #[serde(default)]
    pub(crate) scoring: Option<Utf8PathBuf>,
    /// Worker threads for a dedicated pool; 0 or unset shares the global pool.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) threads: Option<usize>,
}

/// Inputs every command shares once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Inputs {
    /// Dataset file.
    pub(crate) dataset: Utf8PathBuf,
    /// Candidate to score.
    pub(crate) candidate: CandidateId,
    /// SQLite cache location, if any.
    pub(crate) cache_db: Option<Utf8PathBuf>,
    /// Scoring overrides file, if any.
    pub(crate) scoring: Option<Utf8PathBuf>,
}

impl Inputs {
    fn resolve(
        command: &'static str,
        dataset: Option<Utf8PathBuf>,
        candidate: Option<u64>,
        cache_db: Option<Utf8PathBuf>,
        scoring: Option<Utf8PathBuf>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            dataset: required(dataset, command, ARG_DATASET)?,
            candidate: CandidateId(required(candidate, command, ARG_CANDIDATE)?),
            cache_db,
            scoring,
        })
    }

    /// Check that the dataset and any scoring file exist.
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.dataset, ARG_DATASET)?;
        if let Some(scoring) = &self.scoring {
            require_file(scoring, ARG_SCORING)?;
        }
        Ok(())
    }
}

/// Resolved `score` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) inputs: Inputs,
    pub(crate) job: JobId,
    pub(crate) mode: MatchMode,
}

/// Resolved `recompute` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecomputeConfig {
    pub(crate) inputs: Inputs,
    pub(crate) threads: Option<NonZeroUsize>,
}

/// Resolved `cached` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CachedConfig {
    pub(crate) inputs: Inputs,
    pub(crate) max_cache_age: Option<Duration>,
}

/// Resolved `rank` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) inputs: Inputs,
    pub(crate) limit: usize,
    pub(crate) threads: Option<NonZeroUsize>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

impl RecomputeArgs {
    pub(crate) fn into_config(self) -> Result<RecomputeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecomputeConfig::try_from(merged)
    }
}

impl CachedArgs {
    pub(crate) fn into_config(self) -> Result<CachedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CachedConfig::try_from(merged)
    }
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let inputs = Inputs::resolve(
            CMD_SCORE,
            args.dataset,
            args.candidate,
            args.cache_db,
            args.scoring,
        )?;
        Ok(Self {
            inputs,
            job: JobId(required(args.job, CMD_SCORE, ARG_JOB)?),
            mode: args.mode.unwrap_or_default(),
        })
    }
}

impl TryFrom<RecomputeArgs> for RecomputeConfig {
    type Error = CliError;

    fn try_from(args: RecomputeArgs) -> Result<Self, Self::Error> {
        let inputs = Inputs::resolve(
            CMD_RECOMPUTE,
            args.dataset,
            args.candidate,
            args.cache_db,
            args.scoring,
        )?;
        Ok(Self {
            inputs,
            threads: args.threads.and_then(NonZeroUsize::new),
        })
    }
}

impl TryFrom<CachedArgs> for CachedConfig {
    type Error = CliError;

    fn try_from(args: CachedArgs) -> Result<Self, Self::Error> {
        let inputs = Inputs::resolve(
            CMD_CACHED,
            args.dataset,
            args.candidate,
            args.cache_db,
            args.scoring,
        )?;
        Ok(Self {
            inputs,
            max_cache_age: args
                .max_age_hours
                .map(|hours| Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR))),
        })
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let inputs = Inputs::resolve(CMD_RANK, args.dataset, args.candidate, None, args.scoring)?;
        Ok(Self {
            inputs,
            limit: args.limit.unwrap_or(DEFAULT_RANK_LIMIT),
            threads: args.threads.and_then(NonZeroUsize::new),
        })
    }
}

fn required<T>(
    value: Option<T>,
    command: &'static str,
    field: &'static str,
) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { command, field })
}

fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
