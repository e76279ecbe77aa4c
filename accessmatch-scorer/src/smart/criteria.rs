//! Per-criterion scoring for Smart Match.
//!
//! Each function returns the normalised score together with the evidence the
//! narrative layer turns into details, reasons, and alerts.

use std::collections::BTreeSet;

use accessmatch_core::{
    CandidateProfile, CatalogProvider, Criterion, DisabilityTypeId, EducationLevel,
    JobMetadata, JobRequirements, Location, WorkRegime,
};

use crate::{
    PartialCredit,
    coverage::{CoverageReport, ratio_percent},
};

/// Scored criterion with its supporting evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assessment {
    pub(crate) criterion: Criterion,
    pub(crate) score: u8,
    pub(crate) evidence: Evidence,
}

/// What a criterion score was based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Evidence {
    Coverage {
        resolved: usize,
        total: usize,
        unresolved: Vec<String>,
    },
    Alignment {
        matched: usize,
        total: usize,
    },
    Education(EducationFit),
    Regime(RegimeFit),
    Location(LocationFit),
    /// One or both sides did not state the attribute.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EducationFit {
    Meets {
        held: EducationLevel,
        required: EducationLevel,
    },
    Below {
        held: EducationLevel,
        required: EducationLevel,
        steps: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegimeFit {
    Exact(WorkRegime),
    Partial {
        preferred: WorkRegime,
        offered: WorkRegime,
    },
    Mismatch {
        preferred: WorkRegime,
        offered: WorkRegime,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LocationFit {
    Remote,
    SameCity(Location),
    SameState {
        home: Location,
        workplace: Location,
    },
    Elsewhere {
        home: Location,
        workplace: Location,
    },
}

impl Assessment {
    const fn new(criterion: Criterion, score: u8, evidence: Evidence) -> Self {
        Self {
            criterion,
            score,
            evidence,
        }
    }

    const fn missing(criterion: Criterion, partial: &PartialCredit) -> Self {
        Self::new(criterion, partial.neutral, Evidence::Missing)
    }
}

pub(crate) fn accessibility_coverage(report: &CoverageReport) -> Assessment {
    Assessment::new(
        Criterion::AccessibilityCoverage,
        report.coverage.score(),
        Evidence::Coverage {
            resolved: report.coverage.resolved,
            total: report.coverage.total,
            unresolved: report.unresolved(),
        },
    )
}

/// Share of the candidate's disability types among the parent types of the
/// job's accepted subtypes. A candidate without catalogued types scores 0.
pub(crate) fn disability_type_alignment<C>(
    catalog: &C,
    profile: &CandidateProfile,
    requirements: &JobRequirements,
) -> Assessment
where
    C: CatalogProvider + ?Sized,
{
    let candidate_types = profile.disability_types();
    let job_types: BTreeSet<DisabilityTypeId> = requirements
        .accepted_subtype_ids
        .iter()
        .filter_map(|id| catalog.subtype(*id).map(|subtype| subtype.type_id))
        .collect();
    let matched = candidate_types.intersection(&job_types).count();
    let total = candidate_types.len();
    Assessment::new(
        Criterion::DisabilityTypeAlignment,
        ratio_percent(matched, total),
        Evidence::Alignment { matched, total },
    )
}

/// Full marks at or above the requirement; below it, a fixed penalty per
/// missing level down to a floor.
pub(crate) fn education_level(
    candidate_level: Option<EducationLevel>,
    job_level: Option<EducationLevel>,
    partial: &PartialCredit,
) -> Assessment {
    let (Some(held), Some(required)) = (candidate_level, job_level) else {
        return Assessment::missing(Criterion::EducationLevel, partial);
    };
    let steps = held.shortfall(required);
    if steps == 0 {
        return Assessment::new(
            Criterion::EducationLevel,
            100,
            Evidence::Education(EducationFit::Meets { held, required }),
        );
    }
    let penalty = partial.education_step_penalty.saturating_mul(steps);
    let score = 100_u8.saturating_sub(penalty).max(partial.education_floor);
    Assessment::new(
        Criterion::EducationLevel,
        score,
        Evidence::Education(EducationFit::Below {
            held,
            required,
            steps,
        }),
    )
}

pub(crate) fn work_regime(
    candidate_regime: Option<WorkRegime>,
    job_regime: Option<WorkRegime>,
    partial: &PartialCredit,
) -> Assessment {
    let (Some(preferred), Some(offered)) = (candidate_regime, job_regime) else {
        return Assessment::missing(Criterion::WorkRegime, partial);
    };
    let (score, fit) = if preferred == offered {
        (100, RegimeFit::Exact(offered))
    } else if preferred.overlaps(offered) {
        (
            partial.regime_partial,
            RegimeFit::Partial { preferred, offered },
        )
    } else {
        (0, RegimeFit::Mismatch { preferred, offered })
    };
    Assessment::new(Criterion::WorkRegime, score, Evidence::Regime(fit))
}

/// A remote job scores full marks wherever the candidate lives.
pub(crate) fn location(
    candidate_home: Option<&Location>,
    job: &JobMetadata,
    partial: &PartialCredit,
) -> Assessment {
    if job.is_remote() {
        return Assessment::new(
            Criterion::Location,
            100,
            Evidence::Location(LocationFit::Remote),
        );
    }
    let (Some(home), Some(workplace)) = (candidate_home, job.location.as_ref()) else {
        return Assessment::missing(Criterion::Location, partial);
    };
    let (score, fit) = if home.same_city(workplace) {
        (100, LocationFit::SameCity(workplace.clone()))
    } else if home.same_state(workplace) {
        (
            partial.same_state,
            LocationFit::SameState {
                home: home.clone(),
                workplace: workplace.clone(),
            },
        )
    } else {
        (
            0,
            LocationFit::Elsewhere {
                home: home.clone(),
                workplace: workplace.clone(),
            },
        )
    };
    Assessment::new(Criterion::Location, score, Evidence::Location(fit))
}
