//! Error types emitted by the accessmatch CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use accessmatch_core::{CacheError, MatchError};
use accessmatch_data::DatasetError;
use accessmatch_engine::EngineError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the accessmatch CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error(
        "missing {field} for `{command}` (set --{field} or {})",
        env_var(.command, .field)
    )]
    MissingArgument {
        /// Subcommand being configured.
        command: &'static str,
        /// Missing option.
        field: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The log filter could not be parsed.
    #[error("invalid log filter {filter:?}: {source}")]
    LogFilter {
        /// Rejected filter.
        filter: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] tracing_subscriber::util::TryInitError),
    /// Loading the dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Opening the scoring overrides failed.
    #[error("failed to open scoring overrides at {path:?}: {source}")]
    OpenScoring {
        /// Overrides file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Scoring overrides are not valid JSON for the configuration.
    #[error("failed to parse scoring overrides at {path:?}: {source}")]
    ParseScoring {
        /// Overrides file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Creating the directory for the cache database failed.
    #[error("failed to prepare cache directory for {path:?}: {source}")]
    PrepareCacheDir {
        /// Cache database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the score cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// The engine rejected its configuration.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Scoring failed.
    #[error(transparent)]
    Match(#[from] MatchError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

fn env_var(command: &str, field: &str) -> String {
    format!(
        "ACCESSMATCH_CMDS_{}_{}",
        command.to_uppercase(),
        field.replace('-', "_").to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arguments_name_their_environment_variable() {
        let err = CliError::MissingArgument {
            command: "score",
            field: "cache-db",
        };
        assert_eq!(
            err.to_string(),
            "missing cache-db for `score` (set --cache-db or ACCESSMATCH_CMDS_SCORE_CACHE_DB)"
        );
    }
}
