//! Score cache contract and its implementations.
//!
//! The cache keeps the last Basic Match result per candidate and job pair.
//! Writes are upserts keyed by the pair; concurrent writes to different keys
//! never contend and writes to the same key resolve last-write-wins.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BasicMatchResult, CandidateId, EntityRef, JobId, MatchError, SubtypeBreakdown};

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryScoreCache;
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use sqlite::SqliteScoreCache;

/// Records older than this are stale.
pub const DEFAULT_MAX_CACHE_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Composite key of a cached score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Candidate side of the pair.
    pub candidate_id: CandidateId,
    /// Job side of the pair.
    pub job_id: JobId,
}

impl CacheKey {
    /// Key for `candidate` and `job`.
    #[must_use]
    pub const fn new(candidate_id: CandidateId, job_id: JobId) -> Self {
        Self {
            candidate_id,
            job_id,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.candidate_id, self.job_id)
    }
}

/// Persisted Basic Match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScoreRecord {
    /// Candidate scored.
    pub candidate_id: CandidateId,
    /// Job scored against.
    pub job_id: JobId,
    /// Weighted total.
    pub score_total: u8,
    /// Subtype acceptance score.
    pub score_subtypes: u8,
    /// Barrier resolution score.
    pub score_accessibilities: u8,
    /// Subtype-barrier pairs resolved.
    pub resolved_count: usize,
    /// Subtype-barrier pairs faced.
    pub total_count: usize,
    /// Per-subtype explanation.
    pub breakdown: Vec<SubtypeBreakdown>,
    /// Compatibility verdict.
    pub compatible: bool,
    /// When the score was computed.
    pub computed_at: DateTime<Utc>,
}

impl MatchScoreRecord {
    /// Snapshot `result` as computed at `computed_at`.
    #[must_use]
    pub fn from_result(result: &BasicMatchResult, computed_at: DateTime<Utc>) -> Self {
        Self {
            candidate_id: result.candidate_id,
            job_id: result.job_id,
            score_total: result.score_total,
            score_subtypes: result.score_subtypes,
            score_accessibilities: result.score_accessibilities,
            resolved_count: result.resolved_count,
            total_count: result.total_count,
            breakdown: result.breakdown.clone(),
            compatible: result.compatible,
            computed_at,
        }
    }

    /// Key the record is stored under.
    #[must_use]
    pub const fn key(&self) -> CacheKey {
        CacheKey::new(self.candidate_id, self.job_id)
    }

    /// Report whether the record is older than `max_age` at `now`.
    ///
    /// A record exactly `max_age` old is still fresh.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use chrono::{TimeDelta, TimeZone, Utc};
    /// use accessmatch_core::{CandidateId, JobId, MatchScoreRecord};
    ///
    /// let computed = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    /// let record = MatchScoreRecord {
    ///     candidate_id: CandidateId(1),
    ///     job_id: JobId(2),
    ///     score_total: 60,
    ///     score_subtypes: 0,
    ///     score_accessibilities: 100,
    ///     resolved_count: 0,
    ///     total_count: 0,
    ///     breakdown: Vec::new(),
    ///     compatible: false,
    ///     computed_at: computed,
    /// };
    /// let day = Duration::from_secs(86_400);
    /// assert!(!record.is_stale(computed + TimeDelta::hours(24), day));
    /// assert!(record.is_stale(computed + TimeDelta::hours(25), day));
    /// ```
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let Ok(limit) = TimeDelta::from_std(max_age) else {
            return false;
        };
        now.signed_duration_since(self.computed_at) > limit
    }
}

/// Errors raised by cache backends.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Opening the backing database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open score cache at {path}: {source}")]
    Open {
        /// Database location.
        path: std::path::PathBuf,
        /// Driver error.
        #[source]
        source: rusqlite::Error,
    },
    /// A statement against the backing database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("score cache {operation} failed: {source}")]
    Query {
        /// Operation being attempted.
        operation: &'static str,
        /// Driver error.
        #[source]
        source: rusqlite::Error,
    },
    /// A breakdown could not be serialised for storage.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to encode breakdown for {key}: {source}")]
    Encode {
        /// Record being written.
        key: CacheKey,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A stored breakdown could not be parsed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to decode breakdown for {key}: {source}")]
    Decode {
        /// Record being read.
        key: CacheKey,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A numeric column does not fit the in-memory type.
    #[error("stored value {value} for {field} is out of range")]
    ValueOutOfRange {
        /// Column name.
        field: &'static str,
        /// Offending value, rendered as text.
        value: String,
    },
    /// A thread panicked while holding the backend lock.
    #[error("score cache lock was poisoned")]
    Poisoned,
}

/// Storage for Basic Match results.
///
/// Implementations must be safe to share across the batch worker threads.
pub trait ScoreCache: Send + Sync {
    /// Insert or replace the record stored under its key.
    ///
    /// # Errors
    /// Returns [`CacheError`] when the backend fails.
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), CacheError>;

    /// Record stored under `key`, if any.
    ///
    /// # Errors
    /// Returns [`CacheError`] when the backend fails.
    fn get(&self, key: CacheKey) -> Result<Option<MatchScoreRecord>, CacheError>;

    /// Drop the record stored under `key`, reporting whether one existed.
    ///
    /// # Errors
    /// Returns [`CacheError`] when the backend fails.
    fn remove(&self, key: CacheKey) -> Result<bool, CacheError>;

    /// Every record for `candidate`, ordered by job id.
    ///
    /// # Errors
    /// Returns [`CacheError`] when the backend fails.
    fn records_for_candidate(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, CacheError>;

    /// Record stored under `key`, or [`MatchError::NotFound`].
    ///
    /// # Errors
    /// Returns [`MatchError::NotFound`] for a missing record and
    /// [`MatchError::Cache`] when the backend fails.
    fn fetch(&self, key: CacheKey) -> Result<MatchScoreRecord, MatchError> {
        self.get(key)?
            .ok_or(MatchError::NotFound {
                entity: EntityRef::MatchScore(key),
            })
    }
}
