//! Command execution against a dataset-backed engine.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;
use std::time::Duration;

use accessmatch_core::{CatalogIndex, MemoryCandidateProvider, MemoryJobProvider};
use accessmatch_data::Dataset;
use accessmatch_data::fs::open_utf8_file;
use accessmatch_engine::{EngineConfig, MatchEngine};
use accessmatch_scorer::{BasicMatchConfig, SmartMatchConfig};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::args::{
    CachedArgs, CachedConfig, Inputs, MatchMode, RankArgs, RankConfig, RecomputeArgs,
    RecomputeConfig, ScoreArgs, ScoreConfig,
};
use crate::store::ScoreStore;

pub(crate) type CliEngine =
    MatchEngine<MemoryCandidateProvider, MemoryJobProvider, CatalogIndex, ScoreStore>;

/// Calculator overrides read from `--scoring`.
///
/// Either section may be omitted; omitted fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ScoringOverrides {
    pub(crate) basic: BasicMatchConfig,
    pub(crate) smart: SmartMatchConfig,
}

/// Engine settings that vary by command.
#[derive(Debug, Clone, Copy, Default)]
struct EngineTuning {
    threads: Option<NonZeroUsize>,
    max_cache_age: Option<Duration>,
}

pub(crate) fn run_score(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.inputs.validate_sources()?;
    execute_score(&config, writer)
}

pub(crate) fn run_recompute(
    args: RecomputeArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.inputs.validate_sources()?;
    execute_recompute(&config, writer)
}

pub(crate) fn run_cached(args: CachedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.inputs.validate_sources()?;
    execute_cached(&config, writer)
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.inputs.validate_sources()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_score(
    config: &ScoreConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let engine = build_engine(&config.inputs, EngineTuning::default())?;
    let candidate = config.inputs.candidate;
    match config.mode {
        MatchMode::Basic => {
            let result = engine.compute_basic_match(candidate, config.job)?;
            write_json(writer, &result)
        }
        MatchMode::Smart => {
            let result = engine.compute_smart_match(candidate, config.job)?;
            write_json(writer, &result)
        }
    }
}

pub(crate) fn execute_recompute(
    config: &RecomputeConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let tuning = EngineTuning {
        threads: config.threads,
        ..EngineTuning::default()
    };
    let engine = build_engine(&config.inputs, tuning)?;
    let report = engine.recompute_all_for_candidate(config.inputs.candidate)?;
    write_json(writer, &report)
}

pub(crate) fn execute_cached(
    config: &CachedConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let tuning = EngineTuning {
        max_cache_age: config.max_cache_age,
        ..EngineTuning::default()
    };
    let engine = build_engine(&config.inputs, tuning)?;
    let records = engine.get_cached_matches(config.inputs.candidate)?;
    write_json(writer, &records)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let tuning = EngineTuning {
        threads: config.threads,
        ..EngineTuning::default()
    };
    let engine = build_engine(&config.inputs, tuning)?;
    let report =
        engine.compute_smart_matches_for_candidate(config.inputs.candidate, config.limit)?;
    write_json(writer, &report)
}

fn build_engine(inputs: &Inputs, tuning: EngineTuning) -> Result<CliEngine, CliError> {
    let providers = Dataset::load(&inputs.dataset)?.into_providers()?;
    let scoring = inputs
        .scoring
        .as_deref()
        .map(load_scoring)
        .transpose()?
        .unwrap_or_default();
    let defaults = EngineConfig::default();
    let config = EngineConfig {
        max_cache_age: tuning.max_cache_age.unwrap_or(defaults.max_cache_age),
        worker_threads: tuning.threads,
        basic: scoring.basic,
        smart: scoring.smart,
    };
    let cache = ScoreStore::open(inputs.cache_db.as_deref())?;
    let engine = MatchEngine::with_config(
        providers.candidates,
        providers.jobs,
        providers.catalog,
        cache,
        config,
    )?;
    Ok(engine)
}

/// Load calculator overrides from a JSON file.
pub(crate) fn load_scoring(path: &Utf8Path) -> Result<ScoringOverrides, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenScoring {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseScoring {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
