//! Engine error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::{
    AccessibilityId, BarrierId, CacheError, CacheKey, CandidateId, DisabilityTypeId, JobId,
    SubtypeId,
};

/// Reference to any entity the engine can fail to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A job candidate.
    Candidate(CandidateId),
    /// A job posting.
    Job(JobId),
    /// A top-level disability category.
    DisabilityType(DisabilityTypeId),
    /// A disability subtype.
    Subtype(SubtypeId),
    /// A barrier.
    Barrier(BarrierId),
    /// An accessibility resource.
    Accessibility(AccessibilityId),
    /// A cached Basic Match record.
    MatchScore(CacheKey),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate(id) => id.fmt(f),
            Self::Job(id) => id.fmt(f),
            Self::DisabilityType(id) => id.fmt(f),
            Self::Subtype(id) => id.fmt(f),
            Self::Barrier(id) => id.fmt(f),
            Self::Accessibility(id) => id.fmt(f),
            Self::MatchScore(key) => write!(f, "match score for {key}"),
        }
    }
}

impl From<CandidateId> for EntityRef {
    fn from(id: CandidateId) -> Self {
        Self::Candidate(id)
    }
}

impl From<JobId> for EntityRef {
    fn from(id: JobId) -> Self {
        Self::Job(id)
    }
}

impl From<DisabilityTypeId> for EntityRef {
    fn from(id: DisabilityTypeId) -> Self {
        Self::DisabilityType(id)
    }
}

impl From<SubtypeId> for EntityRef {
    fn from(id: SubtypeId) -> Self {
        Self::Subtype(id)
    }
}

impl From<BarrierId> for EntityRef {
    fn from(id: BarrierId) -> Self {
        Self::Barrier(id)
    }
}

impl From<AccessibilityId> for EntityRef {
    fn from(id: AccessibilityId) -> Self {
        Self::Accessibility(id)
    }
}

/// Errors surfaced by resolvers, calculators' callers, and the engine.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A candidate, job, catalog entity, or cached record does not resolve.
    #[error("{entity} was not found")]
    NotFound {
        /// The entity that failed to resolve.
        entity: EntityRef,
    },
    /// A job is listed as active but its record contradicts the listing.
    #[error("{job} is in an invalid state: {reason}")]
    InvalidState {
        /// The offending job.
        job: JobId,
        /// Human-readable explanation.
        reason: String,
    },
    /// Reading or writing the score cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl MatchError {
    /// Build a [`MatchError::NotFound`] for any entity reference.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::{JobId, MatchError};
    ///
    /// let err = MatchError::not_found(JobId(4));
    /// assert_eq!(err.to_string(), "job 4 was not found");
    /// ```
    pub fn not_found(entity: impl Into<EntityRef>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Report whether the error is a [`MatchError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
