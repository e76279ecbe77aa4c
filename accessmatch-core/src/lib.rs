//! Core domain types for the accessmatch compatibility engine.
//!
//! The crate models the reference catalog (disability types, subtypes,
//! barriers, and the accessibilities that resolve them), the candidate and job
//! views the calculators consume, the result types they produce, and the
//! score cache contract. Collaborators (profile, job, and catalog sources)
//! are expressed as traits so the engine never embeds their storage.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod attributes;
pub mod cache;
mod cancel;
pub mod catalog;
mod clock;
mod error;
mod ids;
pub mod job;
mod outcome;
pub mod profile;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use attributes::{EducationLevel, Location, WorkRegime};
pub use cache::{
    CacheError, CacheKey, DEFAULT_MAX_CACHE_AGE, MatchScoreRecord, MemoryScoreCache, ScoreCache,
};
#[cfg(feature = "store-sqlite")]
pub use cache::SqliteScoreCache;
pub use cancel::CancellationToken;
pub use catalog::{
    Accessibility, Barrier, CatalogError, CatalogIndex, CatalogProvider, CatalogSnapshot,
    DisabilitySubtype, DisabilityType,
};
pub use clock::{Clock, SystemClock};
pub use error::{EntityRef, MatchError};
pub use ids::{AccessibilityId, BarrierId, CandidateId, DisabilityTypeId, JobId, SubtypeId};
pub use job::{
    JobMetadata, JobProvider, JobRecord, JobRequirements, JobScope, MemoryJobProvider,
    resolve_job,
};
pub use outcome::{
    BarrierBreakdown, BasicMatchResult, Criterion, CriterionScore, MatchTier, SmartMatchResult,
    SubtypeBreakdown,
};
pub use profile::{
    CandidateProfile, CandidateProfileProvider, CandidateRecord, DeclaredSubtype,
    MemoryCandidateProvider, ResolvedBarrier, ResolvedSubtype, resolve_candidate_profile,
};
