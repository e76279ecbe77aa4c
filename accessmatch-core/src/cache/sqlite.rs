//! `SQLite`-backed score cache.

use std::fmt::Display;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::DateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{CacheError, CacheKey, MatchScoreRecord, ScoreCache};
use crate::{CandidateId, JobId};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS match_scores (
    candidate_id          INTEGER NOT NULL,
    job_id                INTEGER NOT NULL,
    score_total           INTEGER NOT NULL,
    score_subtypes        INTEGER NOT NULL,
    score_accessibilities INTEGER NOT NULL,
    resolved_count        INTEGER NOT NULL,
    total_count           INTEGER NOT NULL,
    breakdown             TEXT    NOT NULL,
    compatible            INTEGER NOT NULL,
    computed_at_ms        INTEGER NOT NULL,
    PRIMARY KEY (candidate_id, job_id)
);
";

const UPSERT: &str = "
INSERT INTO match_scores (
    candidate_id, job_id, score_total, score_subtypes, score_accessibilities,
    resolved_count, total_count, breakdown, compatible, computed_at_ms
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
ON CONFLICT(candidate_id, job_id) DO UPDATE SET
    score_total = excluded.score_total,
    score_subtypes = excluded.score_subtypes,
    score_accessibilities = excluded.score_accessibilities,
    resolved_count = excluded.resolved_count,
    total_count = excluded.total_count,
    breakdown = excluded.breakdown,
    compatible = excluded.compatible,
    computed_at_ms = excluded.computed_at_ms
";

const DELETE: &str = "DELETE FROM match_scores WHERE candidate_id = ?1 AND job_id = ?2";

const SELECT_COLUMNS: &str = "
SELECT candidate_id, job_id, score_total, score_subtypes, score_accessibilities,
       resolved_count, total_count, breakdown, compatible, computed_at_ms
FROM match_scores
";

/// Score cache persisted in a `SQLite` database.
///
/// A single connection is shared behind a mutex, which serialises writes to
/// the same key. Breakdowns are stored as JSON text and timestamps as Unix
/// milliseconds.
#[derive(Debug)]
pub struct SqliteScoreCache {
    connection: Mutex<Connection>,
}

impl SqliteScoreCache {
    /// Open or create a cache at `path`.
    ///
    /// # Errors
    /// Returns [`CacheError::Open`] when the database cannot be opened and
    /// [`CacheError::Query`] when the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let location = path.as_ref();
        let connection = Connection::open(location).map_err(|source| CacheError::Open {
            path: location.to_path_buf(),
            source,
        })?;
        Self::with_connection(connection)
    }

    /// Open a cache that lives only as long as the value.
    ///
    /// # Errors
    /// Returns [`CacheError::Open`] when `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let connection = Connection::open_in_memory().map_err(|source| CacheError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, CacheError> {
        connection
            .execute_batch(SCHEMA)
            .map_err(|source| CacheError::Query {
                operation: "schema creation",
                source,
            })?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.connection.lock().map_err(|_| CacheError::Poisoned)
    }
}

impl ScoreCache for SqliteScoreCache {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), CacheError> {
        let key = record.key();
        let breakdown = serde_json::to_string(&record.breakdown)
            .map_err(|source| CacheError::Encode { key, source })?;
        let candidate_id = to_column("candidate_id", record.candidate_id.get())?;
        let job_id = to_column("job_id", record.job_id.get())?;
        let resolved_count = to_column("resolved_count", record.resolved_count)?;
        let total_count = to_column("total_count", record.total_count)?;

        let connection = self.lock()?;
        connection
            .execute(
                UPSERT,
                params![
                    candidate_id,
                    job_id,
                    record.score_total,
                    record.score_subtypes,
                    record.score_accessibilities,
                    resolved_count,
                    total_count,
                    breakdown,
                    record.compatible,
                    record.computed_at.timestamp_millis(),
                ],
            )
            .map_err(|source| CacheError::Query {
                operation: "upsert",
                source,
            })?;
        Ok(())
    }

    fn get(&self, key: CacheKey) -> Result<Option<MatchScoreRecord>, CacheError> {
        let candidate_id = to_column("candidate_id", key.candidate_id.get())?;
        let job_id = to_column("job_id", key.job_id.get())?;
        let query = format!("{SELECT_COLUMNS} WHERE candidate_id = ?1 AND job_id = ?2");

        let raw = {
            let connection = self.lock()?;
            connection
                .query_row(&query, params![candidate_id, job_id], StoredRow::read)
                .optional()
                .map_err(|source| CacheError::Query {
                    operation: "lookup",
                    source,
                })?
        };
        raw.map(StoredRow::into_record).transpose()
    }

    fn remove(&self, key: CacheKey) -> Result<bool, CacheError> {
        let candidate_id = to_column("candidate_id", key.candidate_id.get())?;
        let job_id = to_column("job_id", key.job_id.get())?;
        let connection = self.lock()?;
        let deleted = connection
            .execute(DELETE, params![candidate_id, job_id])
            .map_err(|source| CacheError::Query {
                operation: "delete",
                source,
            })?;
        Ok(deleted > 0)
    }

    fn records_for_candidate(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, CacheError> {
        let candidate_id = to_column("candidate_id", candidate.get())?;
        let query = format!("{SELECT_COLUMNS} WHERE candidate_id = ?1 ORDER BY job_id");
        let listing_error = |source: rusqlite::Error| CacheError::Query {
            operation: "listing",
            source,
        };

        let rows = {
            let connection = self.lock()?;
            let mut statement = connection.prepare(&query).map_err(listing_error)?;
            let mapped = statement
                .query_map(params![candidate_id], StoredRow::read)
                .map_err(listing_error)?;
            mapped
                .collect::<Result<Vec<_>, _>>()
                .map_err(listing_error)?
        };
        rows.into_iter().map(StoredRow::into_record).collect()
    }
}

/// Row as stored, before range checks.
struct StoredRow {
    candidate_id: i64,
    job_id: i64,
    score_total: i64,
    score_subtypes: i64,
    score_accessibilities: i64,
    resolved_count: i64,
    total_count: i64,
    breakdown: String,
    compatible: bool,
    computed_at_ms: i64,
}

impl StoredRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            candidate_id: row.get(0)?,
            job_id: row.get(1)?,
            score_total: row.get(2)?,
            score_subtypes: row.get(3)?,
            score_accessibilities: row.get(4)?,
            resolved_count: row.get(5)?,
            total_count: row.get(6)?,
            breakdown: row.get(7)?,
            compatible: row.get(8)?,
            computed_at_ms: row.get(9)?,
        })
    }

    fn into_record(self) -> Result<MatchScoreRecord, CacheError> {
        let candidate_id = CandidateId(from_column("candidate_id", self.candidate_id)?);
        let job_id = JobId(from_column("job_id", self.job_id)?);
        let key = CacheKey::new(candidate_id, job_id);
        let breakdown = serde_json::from_str(&self.breakdown)
            .map_err(|source| CacheError::Decode { key, source })?;
        let computed_at = DateTime::from_timestamp_millis(self.computed_at_ms).ok_or_else(|| {
            CacheError::ValueOutOfRange {
                field: "computed_at_ms",
                value: self.computed_at_ms.to_string(),
            }
        })?;

        Ok(MatchScoreRecord {
            candidate_id,
            job_id,
            score_total: from_column("score_total", self.score_total)?,
            score_subtypes: from_column("score_subtypes", self.score_subtypes)?,
            score_accessibilities: from_column(
                "score_accessibilities",
                self.score_accessibilities,
            )?,
            resolved_count: from_column("resolved_count", self.resolved_count)?,
            total_count: from_column("total_count", self.total_count)?,
            breakdown,
            compatible: self.compatible,
            computed_at,
        })
    }
}

fn to_column<T>(field: &'static str, value: T) -> Result<i64, CacheError>
where
    T: TryInto<i64> + Copy + Display,
{
    value.try_into().map_err(|_| CacheError::ValueOutOfRange {
        field,
        value: value.to_string(),
    })
}

fn from_column<T>(field: &'static str, value: i64) -> Result<T, CacheError>
where
    T: TryFrom<i64>,
{
    T::try_from(value).map_err(|_| CacheError::ValueOutOfRange {
        field,
        value: value.to_string(),
    })
}
