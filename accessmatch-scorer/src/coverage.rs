//! Barrier resolution shared by both calculators.
//!
//! A barrier counts once per declared subtype that faces it, so a barrier
//! shared by two subtypes must be resolved in both contexts.

use std::collections::BTreeSet;

use accessmatch_core::{
    AccessibilityId, BarrierBreakdown, CandidateProfile, CatalogProvider, EntityRef,
    JobRequirements, ResolvedBarrier, SubtypeBreakdown,
};

/// Resolved and total subtype-barrier pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BarrierCoverage {
    pub(crate) resolved: usize,
    pub(crate) total: usize,
}

impl BarrierCoverage {
    /// Percentage of pairs resolved; nothing to resolve scores 100.
    pub(crate) fn score(self) -> u8 {
        if self.total == 0 {
            100
        } else {
            ratio_percent(self.resolved, self.total)
        }
    }
}

/// Coverage counts with the per-subtype explanation behind them.
#[derive(Debug, Clone)]
pub(crate) struct CoverageReport {
    pub(crate) coverage: BarrierCoverage,
    pub(crate) breakdown: Vec<SubtypeBreakdown>,
}

impl CoverageReport {
    /// Descriptions of unresolved barriers, first occurrence only.
    pub(crate) fn unresolved(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.breakdown
            .iter()
            .flat_map(|subtype| &subtype.barriers)
            .filter(|barrier| !barrier.resolved && seen.insert(barrier.barrier_id))
            .map(|barrier| barrier.description.clone())
            .collect()
    }
}

/// Walk every declared subtype-barrier pair against the job's offer.
pub(crate) fn assess<C>(
    catalog: &C,
    profile: &CandidateProfile,
    requirements: &JobRequirements,
) -> CoverageReport
where
    C: CatalogProvider + ?Sized,
{
    let mut coverage = BarrierCoverage::default();
    let breakdown = profile
        .subtypes
        .iter()
        .map(|subtype| {
            let barriers: Vec<_> = subtype
                .barriers
                .iter()
                .map(|barrier| annotate(catalog, barrier, &requirements.offered_accessibility_ids))
                .collect();
            coverage.total += barriers.len();
            coverage.resolved += barriers.iter().filter(|barrier| barrier.resolved).count();
            SubtypeBreakdown {
                subtype_id: subtype.subtype_id,
                subtype_name: subtype.subtype_name.clone(),
                accepted: requirements.accepted_subtype_ids.contains(&subtype.subtype_id),
                barriers,
            }
        })
        .collect();
    CoverageReport {
        coverage,
        breakdown,
    }
}

fn annotate<C>(
    catalog: &C,
    barrier: &ResolvedBarrier,
    offered: &BTreeSet<AccessibilityId>,
) -> BarrierBreakdown
where
    C: CatalogProvider + ?Sized,
{
    let resolving = catalog.accessibilities_for_barrier(barrier.barrier_id);
    let offered_matches: Vec<_> = resolving.intersection(offered).copied().collect();
    BarrierBreakdown {
        barrier_id: barrier.barrier_id,
        description: barrier.description.clone(),
        resolved: !offered_matches.is_empty(),
        resolving_accessibilities: resolving
            .iter()
            .map(|id| accessibility_name(catalog, *id))
            .collect(),
        offered_accessibilities: offered_matches
            .into_iter()
            .map(|id| accessibility_name(catalog, id))
            .collect(),
    }
}

fn accessibility_name<C>(catalog: &C, id: AccessibilityId) -> String
where
    C: CatalogProvider + ?Sized,
{
    catalog
        .entity_name(EntityRef::Accessibility(id))
        .map_or_else(|| id.to_string(), str::to_owned)
}

/// `round(100 * part / whole)`, or 0 when `whole` is zero.
pub(crate) fn ratio_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    round_percent(percentage(part, whole))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "ratios are computed in floating point before rounding"
)]
fn percentage(part: usize, whole: usize) -> f64 {
    100.0 * (part as f64) / (whole as f64)
}

/// Round to the nearest integer and clamp into `0..=100`.
///
/// Non-finite values map to zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped into 0..=100 before the cast"
)]
pub(crate) fn round_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
