//! Unit tests for the catalog index.

use super::*;
use crate::test_support::{
    AUDIO_ONLY, BLINDNESS, ELEVATOR, INACCESSIBLE_SCREENS, OPEN_PLAN_NOISE, PHYSICAL, RAMPS,
    SCREEN_READER, STAIRS, WHEELCHAIR_USER, sample_catalog, sample_snapshot,
};
use rstest::{fixture, rstest};

#[fixture]
fn index() -> CatalogIndex {
    sample_catalog()
}

#[rstest]
fn subtypes_expose_their_barriers(index: CatalogIndex) {
    let barriers: Vec<_> = index.barriers_of(WHEELCHAIR_USER).iter().copied().collect();
    assert_eq!(barriers, vec![STAIRS, BarrierId(101)]);
    assert_eq!(
        index.barriers_of(BLINDNESS).iter().copied().collect::<Vec<_>>(),
        vec![INACCESSIBLE_SCREENS]
    );
}

#[rstest]
fn barriers_expose_resolving_accessibilities(index: CatalogIndex) {
    let resolving = index.accessibilities_resolving(STAIRS);
    assert!(resolving.contains(&RAMPS));
    assert!(resolving.contains(&ELEVATOR));
    assert_eq!(resolving.len(), 2);
}

#[rstest]
fn unresolvable_barrier_has_no_accessibilities(index: CatalogIndex) {
    assert!(index.contains_barrier(OPEN_PLAN_NOISE));
    assert!(index.accessibilities_resolving(OPEN_PLAN_NOISE).is_empty());
}

#[rstest]
#[case(SubtypeId(999))]
#[case(SubtypeId(0))]
fn unknown_subtypes_yield_empty_sets(index: CatalogIndex, #[case] unknown: SubtypeId) {
    assert!(index.barriers_of(unknown).is_empty());
    assert!(index.parent_type_of(unknown).is_none());
}

#[rstest]
#[case(EntityRef::Barrier(STAIRS), "Stairs")]
#[case(EntityRef::Accessibility(SCREEN_READER), "Screen reader software")]
#[case(EntityRef::Subtype(WHEELCHAIR_USER), "Wheelchair user")]
#[case(EntityRef::DisabilityType(PHYSICAL), "Physical")]
fn describe_returns_names(index: CatalogIndex, #[case] entity: EntityRef, #[case] name: &str) {
    assert_eq!(index.describe(entity).ok(), Some(name));
}

#[rstest]
#[case(EntityRef::Barrier(BarrierId(404)))]
#[case(EntityRef::Candidate(crate::CandidateId(1)))]
fn describe_reports_missing_entities(index: CatalogIndex, #[case] entity: EntityRef) {
    let err = index.describe(entity).expect_err("entity should be missing");
    assert!(err.is_not_found());
}

#[rstest]
fn dangling_edges_are_skipped() {
    let mut snapshot = sample_snapshot();
    snapshot.subtype_barriers.push(SubtypeBarrierEdge {
        subtype_id: WHEELCHAIR_USER,
        barrier_id: BarrierId(404),
    });
    snapshot.barrier_accessibilities.push(BarrierAccessibilityEdge {
        barrier_id: AUDIO_ONLY,
        accessibility_id: AccessibilityId(4040),
    });

    let index = CatalogIndex::build(snapshot).expect("catalog builds");

    assert!(!index.barriers_of(WHEELCHAIR_USER).contains(&BarrierId(404)));
    assert!(
        !index
            .accessibilities_resolving(AUDIO_ONLY)
            .contains(&AccessibilityId(4040))
    );
}

#[rstest]
fn duplicate_barriers_are_rejected() {
    let mut snapshot = sample_snapshot();
    snapshot.barriers.push(Barrier {
        id: STAIRS,
        description: "Steps".into(),
    });

    let err = CatalogIndex::build(snapshot).expect_err("duplicate id must fail");

    assert_eq!(
        err,
        CatalogError::DuplicateEntity {
            entity: EntityRef::Barrier(STAIRS)
        }
    );
    assert_eq!(err.to_string(), "barrier 100 is defined more than once");
}

#[rstest]
fn subtype_with_unknown_type_is_still_indexed() {
    let mut snapshot = sample_snapshot();
    snapshot.subtypes.push(DisabilitySubtype {
        id: SubtypeId(77),
        name: "Orphan".into(),
        type_id: DisabilityTypeId(77),
    });

    let index = CatalogIndex::build(snapshot).expect("catalog builds");

    assert_eq!(index.parent_type_of(SubtypeId(77)), Some(DisabilityTypeId(77)));
    assert_eq!(index.subtype_count(), 6);
}

#[rstest]
fn provider_trait_delegates_to_index(index: CatalogIndex) {
    let provider: &dyn CatalogProvider = &index;
    assert_eq!(provider.barriers_for_subtype(BLINDNESS).len(), 1);
    assert_eq!(
        provider.entity_name(EntityRef::Barrier(STAIRS)),
        Some("Stairs")
    );
    assert_eq!(
        provider.subtype(BLINDNESS).map(|entry| entry.type_id),
        Some(DisabilityTypeId(2))
    );
}
