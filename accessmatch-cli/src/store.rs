//! Score cache selection for a CLI invocation.

use accessmatch_core::{
    CacheError, CacheKey, CandidateId, MatchScoreRecord, MemoryScoreCache, ScoreCache,
    SqliteScoreCache,
};
use accessmatch_data::fs::ensure_parent_dir;
use camino::Utf8Path;

use crate::CliError;

/// Cache chosen by `--cache-db`: SQLite when a path is given, else memory.
pub(crate) enum ScoreStore {
    Memory(MemoryScoreCache),
    Sqlite(SqliteScoreCache),
}

impl ScoreStore {
    pub(crate) fn open(path: Option<&Utf8Path>) -> Result<Self, CliError> {
        let Some(location) = path else {
            return Ok(Self::Memory(MemoryScoreCache::new()));
        };
        ensure_parent_dir(location).map_err(|source| CliError::PrepareCacheDir {
            path: location.to_path_buf(),
            source,
        })?;
        log::debug!("opening score cache at {location}");
        Ok(Self::Sqlite(SqliteScoreCache::open(location)?))
    }
}

impl ScoreCache for ScoreStore {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.upsert(record),
            Self::Sqlite(cache) => cache.upsert(record),
        }
    }

    fn get(&self, key: CacheKey) -> Result<Option<MatchScoreRecord>, CacheError> {
        match self {
            Self::Memory(cache) => cache.get(key),
            Self::Sqlite(cache) => cache.get(key),
        }
    }

    fn remove(&self, key: CacheKey) -> Result<bool, CacheError> {
        match self {
            Self::Memory(cache) => cache.remove(key),
            Self::Sqlite(cache) => cache.remove(key),
        }
    }

    fn records_for_candidate(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, CacheError> {
        match self {
            Self::Memory(cache) => cache.records_for_candidate(candidate),
            Self::Sqlite(cache) => cache.records_for_candidate(candidate),
        }
    }
}
