//! Unit coverage for the Smart Match calculator.

use accessmatch_core::test_support::{
    LOW_VISION, NARROW_DOORWAYS, RAMPS, STAIRS, WHEELCHAIR_USER, WIDE_DOORS, candidate, job,
    sample_catalog,
};
use accessmatch_core::{
    AccessibilityId, CandidateProfile, CandidateRecord, CatalogIndex, Criterion, EducationLevel,
    JobRecord, Location, MatchTier, MemoryCandidateProvider, SubtypeId, WorkRegime,
    resolve_candidate_profile,
};
use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn catalog() -> CatalogIndex {
    sample_catalog()
}

fn profile_of(catalog: &CatalogIndex, record: CandidateRecord) -> CandidateProfile {
    let id = record.id;
    let provider = MemoryCandidateProvider::new([record]);
    resolve_candidate_profile(&provider, catalog, id).expect("candidate resolves")
}

fn recife_graduate() -> CandidateRecord {
    CandidateRecord {
        education_level: Some(EducationLevel::Undergraduate),
        work_regime: Some(WorkRegime::OnSite),
        location: Some(Location::new("Recife", "PE")),
        ..candidate(1, &[(WHEELCHAIR_USER, &[STAIRS, NARROW_DOORWAYS])])
    }
}

fn posting(accepted: &[SubtypeId], offered: &[AccessibilityId]) -> JobRecord {
    JobRecord {
        education_level: Some(EducationLevel::Undergraduate),
        work_regime: Some(WorkRegime::OnSite),
        location: Some(Location::new("Recife", "PE")),
        ..job(7, accepted, offered)
    }
}

fn score(catalog: &CatalogIndex, record: CandidateRecord, posting: JobRecord) -> SmartMatchResult {
    let profile = profile_of(catalog, record);
    let (requirements, metadata) = posting.into_parts();
    SmartMatchCalculator::default().compute(catalog, &profile, &requirements, &metadata)
}

#[rstest]
fn perfect_fit_caps_reasons(catalog: CatalogIndex) {
    let result = score(
        &catalog,
        recife_graduate(),
        posting(&[WHEELCHAIR_USER], &[RAMPS, WIDE_DOORS]),
    );

    assert_eq!(result.score_total, 100);
    assert_eq!(result.tier, MatchTier::Perfeito);
    assert!(result.compatible);
    assert_eq!(result.reasons.len(), 4);
    assert!(result.alerts.is_empty());
    assert_eq!(result.job_title, "Job 7");
}

#[rstest]
fn criteria_follow_canonical_order(catalog: CatalogIndex) {
    let result = score(
        &catalog,
        recife_graduate(),
        posting(&[WHEELCHAIR_USER], &[RAMPS]),
    );

    let order: Vec<Criterion> = result.criteria.iter().map(|c| c.criterion).collect();
    assert_eq!(order, Criterion::ALL.to_vec());
    let weight_sum: f64 = result.criteria.iter().map(|c| c.weight).sum();
    assert!((weight_sum - 1.0).abs() < 1e-9);
    assert_eq!(
        result.criterion_score(Criterion::AccessibilityCoverage),
        Some(50)
    );
}

#[rstest]
fn remote_job_scores_full_location_across_states(catalog: CatalogIndex) {
    let remote = JobRecord {
        work_regime: Some(WorkRegime::Remote),
        location: Some(Location::new("Porto Alegre", "RS")),
        ..posting(&[WHEELCHAIR_USER], &[RAMPS, WIDE_DOORS])
    };

    let result = score(&catalog, recife_graduate(), remote);

    assert_eq!(result.criterion_score(Criterion::Location), Some(100));
    assert_eq!(result.criterion_score(Criterion::WorkRegime), Some(0));
}

#[rstest]
fn zero_coverage_is_never_compatible(catalog: CatalogIndex) {
    let result = score(&catalog, recife_graduate(), posting(&[WHEELCHAIR_USER], &[]));

    assert_eq!(result.criterion_score(Criterion::AccessibilityCoverage), Some(0));
    assert_eq!(result.score_total, 65);
    assert_eq!(result.tier, MatchTier::Bom);
    assert!(!result.compatible);
    assert_eq!(
        result.alerts,
        vec!["No offered accessibility resolves: Stairs, Narrow doorways".to_owned()]
    );
}

#[rstest]
fn weak_criteria_cap_alerts_lowest_first(catalog: CatalogIndex) {
    let record = CandidateRecord {
        education_level: Some(EducationLevel::Elementary),
        work_regime: Some(WorkRegime::Remote),
        location: Some(Location::new("Manaus", "AM")),
        ..candidate(2, &[(WHEELCHAIR_USER, &[STAIRS])])
    };
    let mismatch = JobRecord {
        education_level: Some(EducationLevel::Postgraduate),
        ..posting(&[LOW_VISION], &[])
    };

    let result = score(&catalog, record, mismatch);

    assert_eq!(result.criterion_score(Criterion::EducationLevel), Some(20));
    assert_eq!(result.score_total, 3);
    assert_eq!(result.tier, MatchTier::Baixo);
    assert!(result.reasons.is_empty());
    assert_eq!(result.alerts.len(), 3);
    assert!(result
        .alerts
        .iter()
        .all(|alert| !alert.contains("education")));
}

#[rstest]
fn missing_attributes_score_neutral(catalog: CatalogIndex) {
    let record = candidate(3, &[(WHEELCHAIR_USER, &[STAIRS])]);
    let bare = job(8, &[WHEELCHAIR_USER], &[RAMPS]);

    let result = score(&catalog, record, bare);

    for criterion in [
        Criterion::EducationLevel,
        Criterion::WorkRegime,
        Criterion::Location,
    ] {
        assert_eq!(result.criterion_score(criterion), Some(50));
    }
    assert_eq!(result.score_total, 80);
    assert_eq!(result.tier, MatchTier::Excelente);
    assert!(result.compatible);
    assert_eq!(result.reasons.len(), 2);
    assert!(result.alerts.is_empty());
}

#[rstest]
fn raised_threshold_withholds_compatibility(catalog: CatalogIndex) {
    let strict = SmartMatchCalculator::new(SmartMatchConfig {
        compatible_threshold: 90,
        ..SmartMatchConfig::default()
    })
    .expect("valid configuration");
    let profile = profile_of(&catalog, candidate(3, &[(WHEELCHAIR_USER, &[STAIRS])]));
    let (requirements, metadata) = job(8, &[WHEELCHAIR_USER], &[RAMPS]).into_parts();

    let result = strict.compute(&catalog, &profile, &requirements, &metadata);

    assert_eq!(result.score_total, 80);
    assert!(!result.compatible);
}

#[rstest]
#[case([100, 100, 100, 100, 100], 100)]
#[case([0, 0, 0, 0, 0], 0)]
#[case([100, 100, 0, 0, 0], 60)]
#[case([50, 50, 50, 50, 50], 50)]
#[case([0, 0, 0, 0, 100], 10)]
fn weighted_total_uses_default_weights(#[case] scores: [u8; 5], #[case] expected: u8) {
    assert_eq!(SmartMatchCalculator::default().weighted_total(&scores), expected);
}
