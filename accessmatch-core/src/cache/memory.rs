//! Sharded in-memory score cache.

use dashmap::DashMap;

use super::{CacheError, CacheKey, MatchScoreRecord, ScoreCache};
use crate::CandidateId;

/// Score cache held in a concurrent map.
///
/// Writes to different keys land on independent shards; writes to the same
/// key are serialised by the shard lock.
#[derive(Debug, Default)]
pub struct MemoryScoreCache {
    records: DashMap<CacheKey, MatchScoreRecord>,
}

impl MemoryScoreCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreCache for MemoryScoreCache {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), CacheError> {
        self.records.insert(record.key(), record);
        Ok(())
    }

    fn get(&self, key: CacheKey) -> Result<Option<MatchScoreRecord>, CacheError> {
        Ok(self.records.get(&key).map(|entry| entry.value().clone()))
    }

    fn remove(&self, key: CacheKey) -> Result<bool, CacheError> {
        Ok(self.records.remove(&key).is_some())
    }

    fn records_for_candidate(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, CacheError> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| entry.key().candidate_id == candidate)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_unstable_by_key(|record| record.job_id);
        Ok(records)
    }
}
