//! Results produced by the Basic and Smart calculators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BarrierId, CandidateId, JobId, SubtypeId};

/// One barrier a candidate faces, annotated against a job's offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierBreakdown {
    /// Barrier identifier.
    pub barrier_id: BarrierId,
    /// Catalog description.
    pub description: String,
    /// Whether the job offers at least one resolving accessibility.
    pub resolved: bool,
    /// Every accessibility that would resolve the barrier.
    pub resolving_accessibilities: Vec<String>,
    /// Resolving accessibilities the job actually offers.
    pub offered_accessibilities: Vec<String>,
}

/// Barrier breakdown for one declared subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtypeBreakdown {
    /// Subtype identifier.
    pub subtype_id: SubtypeId,
    /// Subtype name.
    pub subtype_name: String,
    /// Whether the job accepts this subtype.
    pub accepted: bool,
    /// Barriers faced for this subtype.
    pub barriers: Vec<BarrierBreakdown>,
}

/// Two-factor compatibility score for a candidate and a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMatchResult {
    /// Candidate scored.
    pub candidate_id: CandidateId,
    /// Job scored against.
    pub job_id: JobId,
    /// Weighted total in `0..=100`.
    pub score_total: u8,
    /// Share of declared subtypes the job accepts, in `0..=100`.
    pub score_subtypes: u8,
    /// Share of subtype-barrier pairs the job resolves, in `0..=100`.
    pub score_accessibilities: u8,
    /// Declared subtypes the job accepts.
    pub accepted_subtypes: usize,
    /// Declared subtypes.
    pub total_subtypes: usize,
    /// Subtype-barrier pairs resolved.
    pub resolved_count: usize,
    /// Subtype-barrier pairs faced.
    pub total_count: usize,
    /// Per-subtype explanation.
    pub breakdown: Vec<SubtypeBreakdown>,
    /// At least one subtype accepted and the total meets the threshold.
    pub compatible: bool,
}

/// Smart Match criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Share of barriers the job resolves.
    AccessibilityCoverage,
    /// Share of the candidate's disability types the job accepts.
    DisabilityTypeAlignment,
    /// Candidate education against the job requirement.
    EducationLevel,
    /// Candidate regime preference against the job regime.
    WorkRegime,
    /// Candidate location against the workplace.
    Location,
}

impl Criterion {
    /// Every criterion in presentation order.
    pub const ALL: [Self; 5] = [
        Self::AccessibilityCoverage,
        Self::DisabilityTypeAlignment,
        Self::EducationLevel,
        Self::WorkRegime,
        Self::Location,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessibilityCoverage => "accessibility coverage",
            Self::DisabilityTypeAlignment => "disability type alignment",
            Self::EducationLevel => "education level",
            Self::WorkRegime => "work regime",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score for one Smart Match criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// Criterion scored.
    pub criterion: Criterion,
    /// Normalised score in `0..=100`.
    pub score: u8,
    /// Normalised weight applied to the score.
    pub weight: f64,
    /// Contribution to the total, `score * weight`.
    pub weighted: f64,
    /// Short explanation of the score.
    pub detail: String,
}

/// Classification of a Smart Match total, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Below the fair threshold.
    Baixo,
    /// Fair.
    Razoavel,
    /// Good.
    Bom,
    /// Excellent.
    Excelente,
    /// Perfect.
    Perfeito,
}

impl MatchTier {
    /// Return the tier's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baixo => "baixo",
            Self::Razoavel => "razoavel",
            Self::Bom => "bom",
            Self::Excelente => "excelente",
            Self::Perfeito => "perfeito",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five-criterion compatibility score with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartMatchResult {
    /// Candidate scored.
    pub candidate_id: CandidateId,
    /// Job scored against.
    pub job_id: JobId,
    /// Posting title.
    pub job_title: String,
    /// Weighted total in `0..=100`.
    pub score_total: u8,
    /// Classification of the total.
    pub tier: MatchTier,
    /// Total meets the threshold and some accessibility coverage exists.
    pub compatible: bool,
    /// Per-criterion scores in presentation order.
    pub criteria: Vec<CriterionScore>,
    /// Strengths, strongest first.
    pub reasons: Vec<String>,
    /// Weaknesses, weakest first.
    pub alerts: Vec<String>,
}

impl SmartMatchResult {
    /// Score of a given criterion, if present.
    #[must_use]
    pub fn criterion_score(&self, criterion: Criterion) -> Option<u8> {
        self.criteria
            .iter()
            .find(|entry| entry.criterion == criterion)
            .map(|entry| entry.score)
    }
}
