//! Errors raised while loading a dataset.

use accessmatch_core::{CatalogError, EntityRef};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures loading a dataset document or turning it into providers.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path:?}: {source}")]
    Open {
        /// File that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the opened file failed part way.
    #[error("failed to read dataset at {path:?}: {source}")]
    Read {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not a valid dataset.
    #[error("failed to parse dataset JSON at {path:?}: {source}")]
    Parse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Decoder error with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// The catalog section could not be indexed.
    #[error("dataset catalog is invalid: {0}")]
    Catalog(#[from] CatalogError),
    /// A candidate or job id appears more than once.
    #[error("dataset lists {entity} more than once")]
    DuplicateRecord {
        /// Repeated record.
        entity: EntityRef,
    },
}
