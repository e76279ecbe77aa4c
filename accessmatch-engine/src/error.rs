//! Errors raised while constructing an engine.

use accessmatch_scorer::ConfigError;
use thiserror::Error;

/// Engine construction failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calculator configuration was rejected.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
    /// The dedicated worker pool could not be started.
    #[error("failed to build a {threads}-thread worker pool")]
    ThreadPool {
        /// Requested worker count.
        threads: usize,
        /// Underlying rayon failure.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
