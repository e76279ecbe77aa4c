//! Partial-success reports for batch operations.

use accessmatch_core::{JobId, MatchError};
use serde::{Serialize, Serializer};

/// A job left out of a batch, with the error that excluded it.
#[derive(Debug, Serialize)]
pub struct SkippedJob {
    /// Job that failed to score.
    pub job_id: JobId,
    /// Why it was skipped.
    #[serde(rename = "reason", serialize_with = "display")]
    pub error: MatchError,
}

/// Items produced by a batch plus the jobs it skipped.
///
/// A cancelled batch keeps every item computed before cancellation was
/// observed.
#[derive(Debug, Serialize)]
pub struct BatchReport<T> {
    /// Scored items.
    pub items: Vec<T>,
    /// Jobs that failed without aborting the batch.
    pub skipped: Vec<SkippedJob>,
    /// Whether the batch stopped early.
    pub cancelled: bool,
}

impl<T> BatchReport<T> {
    /// Report whether every listed job was scored.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.skipped.is_empty() && !self.cancelled
    }

    /// Ids of the skipped jobs in listing order.
    #[must_use]
    pub fn skipped_job_ids(&self) -> Vec<JobId> {
        self.skipped.iter().map(|skip| skip.job_id).collect()
    }
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
            cancelled: false,
        }
    }
}

fn display<S>(error: &MatchError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_jobs_serialise_their_reason_as_text() {
        let report: BatchReport<u8> = BatchReport {
            items: vec![1],
            skipped: vec![SkippedJob {
                job_id: JobId(9),
                error: MatchError::not_found(JobId(9)),
            }],
            cancelled: false,
        };
        let json = serde_json::to_value(&report).expect("serialise report");
        assert_eq!(json["skipped"][0]["reason"], "job 9 was not found");
        assert_eq!(json["skipped"][0]["job_id"], 9);
        assert!(!report.is_complete());
    }
}
