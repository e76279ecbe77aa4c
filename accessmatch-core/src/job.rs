//! Job postings and the requirement resolver.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    AccessibilityId, EducationLevel, JobId, Location, MatchError, SubtypeId, WorkRegime,
};

const fn active_by_default() -> bool {
    true
}

/// Raw job record as stored by the job source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job identifier.
    pub id: JobId,
    /// Posting title.
    #[serde(default)]
    pub title: String,
    /// Subtypes the job declares willing to accept.
    #[serde(default)]
    pub accepted_subtype_ids: BTreeSet<SubtypeId>,
    /// Accessibilities the job declares providing.
    #[serde(default)]
    pub offered_accessibility_ids: BTreeSet<AccessibilityId>,
    /// Minimum education level required.
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    /// Where the work happens.
    #[serde(default)]
    pub work_regime: Option<WorkRegime>,
    /// Workplace location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Whether the posting is open.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl JobRecord {
    /// Active job with no declarations or attributes.
    pub fn new(id: JobId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            accepted_subtype_ids: BTreeSet::new(),
            offered_accessibility_ids: BTreeSet::new(),
            education_level: None,
            work_regime: None,
            location: None,
            is_active: true,
        }
    }

    /// Split the record into the views the calculators consume.
    #[must_use]
    pub fn into_parts(self) -> (JobRequirements, JobMetadata) {
        (
            JobRequirements {
                job_id: self.id,
                accepted_subtype_ids: self.accepted_subtype_ids,
                offered_accessibility_ids: self.offered_accessibility_ids,
            },
            JobMetadata {
                title: self.title,
                education_level: self.education_level,
                work_regime: self.work_regime,
                location: self.location,
            },
        )
    }
}

/// Structural requirements used by both calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirements {
    /// Job identifier.
    pub job_id: JobId,
    /// Subtypes the job accepts.
    pub accepted_subtype_ids: BTreeSet<SubtypeId>,
    /// Accessibilities the job offers.
    pub offered_accessibility_ids: BTreeSet<AccessibilityId>,
}

/// Descriptive attributes used by the Smart Match criteria.
///
/// Missing fields score neutrally rather than failing the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Posting title.
    pub title: String,
    /// Minimum education level required.
    pub education_level: Option<EducationLevel>,
    /// Where the work happens.
    pub work_regime: Option<WorkRegime>,
    /// Workplace location.
    pub location: Option<Location>,
}

impl JobMetadata {
    /// Report whether the job is fully remote.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.work_regime == Some(WorkRegime::Remote)
    }
}

/// Source of job postings.
///
/// # Errors
/// Implementations return [`MatchError::NotFound`] for unknown jobs.
pub trait JobProvider: Send + Sync {
    /// Identifiers of jobs currently listed as active.
    fn active_jobs(&self) -> Result<Vec<JobId>, MatchError>;

    /// Fetch the stored record for `job`, whatever its status.
    fn get_job(&self, job: JobId) -> Result<JobRecord, MatchError>;
}

/// Job provider backed by an ordered map.
///
/// The active listing is derived from `is_active` unless an explicit listing
/// is installed with [`MemoryJobProvider::with_listing`].
#[derive(Debug, Clone, Default)]
pub struct MemoryJobProvider {
    records: BTreeMap<JobId, JobRecord>,
    listing: Option<Vec<JobId>>,
}

impl MemoryJobProvider {
    /// Build a provider from records. Later duplicates replace earlier ones.
    pub fn new(records: impl IntoIterator<Item = JobRecord>) -> Self {
        Self {
            records: records.into_iter().map(|rec| (rec.id, rec)).collect(),
            listing: None,
        }
    }

    /// Replace the derived active listing with `listing`.
    ///
    /// Useful when the listing and the records come from different sources
    /// and may disagree.
    #[must_use]
    pub fn with_listing(mut self, listing: Vec<JobId>) -> Self {
        self.listing = Some(listing);
        self
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, record: JobRecord) {
        self.records.insert(record.id, record);
    }

    /// Number of stored jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the provider is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl JobProvider for MemoryJobProvider {
    fn active_jobs(&self) -> Result<Vec<JobId>, MatchError> {
        Ok(self.listing.clone().unwrap_or_else(|| {
            self.records
                .values()
                .filter(|rec| rec.is_active)
                .map(|rec| rec.id)
                .collect()
        }))
    }

    fn get_job(&self, job: JobId) -> Result<JobRecord, MatchError> {
        self.records
            .get(&job)
            .cloned()
            .ok_or_else(|| MatchError::not_found(job))
    }
}

/// How a job was reached, which decides how an inactive record is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobScope {
    /// Direct request for one pair. Inactive jobs are still scored.
    Explicit,
    /// Lookup restricted to open postings. Inactive jobs are not found.
    ActiveOnly,
    /// Job taken from the active listing. An inactive record contradicts the
    /// listing and is reported as invalid.
    Listed,
}

/// Fetch a job and split it into requirements and metadata.
///
/// # Errors
/// Returns [`MatchError::NotFound`] for unknown jobs, or for inactive jobs
/// under [`JobScope::ActiveOnly`]. Returns [`MatchError::InvalidState`] for
/// inactive jobs under [`JobScope::Listed`].
///
/// # Examples
/// ```
/// use accessmatch_core::{JobId, JobRecord, JobScope, MemoryJobProvider, resolve_job};
///
/// let mut closed = JobRecord::new(JobId(3), "Archivist");
/// closed.is_active = false;
/// let jobs = MemoryJobProvider::new([closed]);
///
/// assert!(resolve_job(&jobs, JobId(3), JobScope::Explicit).is_ok());
/// assert!(resolve_job(&jobs, JobId(3), JobScope::ActiveOnly).is_err());
/// ```
pub fn resolve_job<J>(
    provider: &J,
    job: JobId,
    scope: JobScope,
) -> Result<(JobRequirements, JobMetadata), MatchError>
where
    J: JobProvider + ?Sized,
{
    let record = provider.get_job(job)?;
    if !record.is_active {
        match scope {
            JobScope::Explicit => {}
            JobScope::ActiveOnly => return Err(MatchError::not_found(job)),
            JobScope::Listed => {
                return Err(MatchError::InvalidState {
                    job,
                    reason: "listed as active but the posting is closed".to_owned(),
                });
            }
        }
    }
    Ok(record.into_parts())
}
