//! Facade crate for the accessmatch compatibility engine.
//!
//! This crate re-exports the core domain types and calculators, and exposes
//! the engine, the SQLite score cache, and the dataset loader behind feature
//! flags.

#![forbid(unsafe_code)]

pub use accessmatch_core::{
    BasicMatchResult, CacheError, CacheKey, CancellationToken, CandidateId, CandidateProfile,
    CandidateProfileProvider, CandidateRecord, CatalogError, CatalogIndex, CatalogProvider,
    CatalogSnapshot, Clock, Criterion, CriterionScore, EducationLevel, EntityRef, JobId,
    JobMetadata, JobProvider, JobRecord, JobRequirements, JobScope, Location, MatchError,
    MatchScoreRecord, MatchTier, MemoryCandidateProvider, MemoryJobProvider, MemoryScoreCache,
    ScoreCache, SmartMatchResult, SystemClock, WorkRegime,
};
pub use accessmatch_scorer::{
    BasicMatchCalculator, BasicMatchConfig, ConfigError, SmartMatchCalculator, SmartMatchConfig,
};

#[cfg(feature = "store-sqlite")]
pub use accessmatch_core::SqliteScoreCache;

#[cfg(feature = "engine")]
pub use accessmatch_engine::{BatchReport, EngineConfig, EngineError, MatchEngine, SkippedJob};

#[cfg(feature = "data")]
pub use accessmatch_data::{Dataset, DatasetError, DatasetProviders};
