//! Orchestration for the accessmatch compatibility engine.
//!
//! [`MatchEngine`] ties the collaborator traits from `accessmatch-core` to
//! the calculators from `accessmatch-scorer` and exposes the operations an
//! API layer calls:
//!
//! - [`MatchEngine::compute_basic_match`] scores one pair and caches it.
//! - [`MatchEngine::recompute_all_for_candidate`] rescores every active job
//!   in parallel and caches each result.
//! - [`MatchEngine::get_cached_matches`] returns cached records, refreshing
//!   them when any is stale.
//! - [`MatchEngine::compute_smart_match`] and
//!   [`MatchEngine::compute_smart_matches_for_candidate`] run the
//!   five-criterion Smart Match, which is never cached.
//!
//! Batch operations isolate per-job failures in a [`BatchReport`] and honour
//! a [`CancellationToken`](accessmatch_core::CancellationToken) between jobs.
//!
//! # Examples
//!
//! ```
//! use accessmatch_core::{
//!     CandidateId, CandidateRecord, CatalogIndex, JobId, JobRecord, MemoryCandidateProvider,
//!     MemoryJobProvider, MemoryScoreCache,
//! };
//! use accessmatch_engine::MatchEngine;
//!
//! let candidates = MemoryCandidateProvider::new([CandidateRecord::new(CandidateId(1))]);
//! let jobs = MemoryJobProvider::new([JobRecord::new(JobId(7), "Data analyst")]);
//! let engine = MatchEngine::new(
//!     candidates,
//!     jobs,
//!     CatalogIndex::default(),
//!     MemoryScoreCache::new(),
//! );
//!
//! let report = engine
//!     .recompute_all_for_candidate(CandidateId(1))
//!     .expect("candidate exists");
//! assert_eq!(report.items.len(), 1);
//! assert!(report.is_complete());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod engine;
mod error;
mod report;

pub use config::EngineConfig;
pub use engine::MatchEngine;
pub use error::EngineError;
pub use report::{BatchReport, SkippedJob};
