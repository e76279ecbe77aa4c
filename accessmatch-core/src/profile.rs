//! Candidate profiles and the resolver that joins them with the catalog.
//!
//! A [`CandidateProfileProvider`] returns the raw declarations a candidate
//! made. [`resolve_candidate_profile`] turns them into the ordered, described
//! view the calculators score.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    BarrierId, CandidateId, CatalogProvider, DisabilityTypeId, EducationLevel, EntityRef,
    Location, MatchError, SubtypeId, WorkRegime,
};

/// One subtype a candidate declared, with the barriers they report facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredSubtype {
    /// Declared subtype.
    pub subtype_id: SubtypeId,
    /// Barriers the candidate faces for this subtype.
    #[serde(default)]
    pub barrier_ids: Vec<BarrierId>,
}

/// Raw candidate record as stored by the profile source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Candidate identifier.
    pub id: CandidateId,
    /// Declared subtypes in declaration order.
    #[serde(default)]
    pub subtypes: Vec<DeclaredSubtype>,
    /// Highest completed education level.
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    /// Preferred work regime.
    #[serde(default)]
    pub work_regime: Option<WorkRegime>,
    /// Home location.
    #[serde(default)]
    pub location: Option<Location>,
}

impl CandidateRecord {
    /// Candidate with no declarations or attributes.
    #[must_use]
    pub const fn new(id: CandidateId) -> Self {
        Self {
            id,
            subtypes: Vec::new(),
            education_level: None,
            work_regime: None,
            location: None,
        }
    }
}

/// Source of candidate records.
///
/// # Errors
/// Implementations return [`MatchError::NotFound`] for unknown candidates.
pub trait CandidateProfileProvider: Send + Sync {
    /// Fetch the stored record for `candidate`.
    fn get_profile(&self, candidate: CandidateId) -> Result<CandidateRecord, MatchError>;
}

/// Candidate provider backed by an ordered map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCandidateProvider {
    records: BTreeMap<CandidateId, CandidateRecord>,
}

impl MemoryCandidateProvider {
    /// Build a provider from records. Later duplicates replace earlier ones.
    pub fn new(records: impl IntoIterator<Item = CandidateRecord>) -> Self {
        Self {
            records: records.into_iter().map(|rec| (rec.id, rec)).collect(),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, record: CandidateRecord) {
        self.records.insert(record.id, record);
    }

    /// Number of stored candidates.
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

impl CandidateProfileProvider for MemoryCandidateProvider {
    fn get_profile(&self, candidate: CandidateId) -> Result<CandidateRecord, MatchError> {
        self.records
            .get(&candidate)
            .cloned()
            .ok_or_else(|| MatchError::not_found(candidate))
    }
}

/// Barrier a candidate faces, with its catalog description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBarrier {
    /// Barrier identifier.
    pub barrier_id: BarrierId,
    /// Catalog description.
    pub description: String,
}

/// Declared subtype joined with catalog names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSubtype {
    /// Subtype identifier.
    pub subtype_id: SubtypeId,
    /// Catalog name, or the id rendered as text when the subtype is unknown.
    pub subtype_name: String,
    /// Parent disability type, when the subtype is catalogued.
    pub type_id: Option<DisabilityTypeId>,
    /// Barriers faced for this subtype, deduplicated, in declaration order.
    pub barriers: Vec<ResolvedBarrier>,
}

/// Candidate view consumed by the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Candidate identifier.
    pub candidate_id: CandidateId,
    /// Declared subtypes in declaration order.
    pub subtypes: Vec<ResolvedSubtype>,
    /// Highest completed education level.
    pub education_level: Option<EducationLevel>,
    /// Preferred work regime.
    pub work_regime: Option<WorkRegime>,
    /// Home location.
    pub location: Option<Location>,
}

impl CandidateProfile {
    /// Number of subtype-barrier pairs across all declared subtypes.
    #[must_use]
    pub fn barrier_pair_count(&self) -> usize {
        self.subtypes.iter().map(|entry| entry.barriers.len()).sum()
    }

    /// Distinct disability types behind the declared subtypes.
    #[must_use]
    pub fn disability_types(&self) -> BTreeSet<DisabilityTypeId> {
        self.subtypes.iter().filter_map(|entry| entry.type_id).collect()
    }
}

/// Assemble the scored view of a candidate.
///
/// Barriers missing from the catalog are dropped with a warning rather than
/// failing the profile. A subtype declared more than once is merged into its
/// first declaration, and a barrier repeated within a subtype keeps one
/// pair. Subtypes absent from the catalog still count toward the subtype
/// total but carry no parent type.
///
/// # Errors
/// Propagates [`MatchError::NotFound`] from the provider.
///
/// # Examples
/// ```
/// use accessmatch_core::{
///     CandidateId, CatalogIndex, CatalogSnapshot, CandidateRecord,
///     MemoryCandidateProvider, resolve_candidate_profile,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = CatalogIndex::build(CatalogSnapshot::default())?;
/// let provider = MemoryCandidateProvider::new([CandidateRecord::new(CandidateId(1))]);
/// let profile = resolve_candidate_profile(&provider, &catalog, CandidateId(1))?;
/// assert!(profile.subtypes.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn resolve_candidate_profile<P, C>(
    provider: &P,
    catalog: &C,
    candidate: CandidateId,
) -> Result<CandidateProfile, MatchError>
where
    P: CandidateProfileProvider + ?Sized,
    C: CatalogProvider + ?Sized,
{
    let record = provider.get_profile(candidate)?;
    let subtypes = merge_declarations(&record.subtypes)
        .iter()
        .map(|declared| resolve_subtype(catalog, candidate, declared))
        .collect();
    Ok(CandidateProfile {
        candidate_id: record.id,
        subtypes,
        education_level: record.education_level,
        work_regime: record.work_regime,
        location: record.location,
    })
}

/// Fold repeated subtype ids into one declaration, keeping first-seen order.
fn merge_declarations(declared: &[DeclaredSubtype]) -> Vec<DeclaredSubtype> {
    let mut positions: BTreeMap<SubtypeId, usize> = BTreeMap::new();
    let mut merged: Vec<DeclaredSubtype> = Vec::with_capacity(declared.len());
    for entry in declared {
        let existing = positions
            .get(&entry.subtype_id)
            .and_then(|&position| merged.get_mut(position));
        if let Some(first) = existing {
            first.barrier_ids.extend_from_slice(&entry.barrier_ids);
        } else {
            positions.insert(entry.subtype_id, merged.len());
            merged.push(entry.clone());
        }
    }
    merged
}

fn resolve_subtype<C>(
    catalog: &C,
    candidate: CandidateId,
    declared: &DeclaredSubtype,
) -> ResolvedSubtype
where
    C: CatalogProvider + ?Sized,
{
    let entry = catalog.subtype(declared.subtype_id);
    let subtype_name = entry.map_or_else(
        || {
            log::warn!("{candidate} declares uncatalogued {}", declared.subtype_id);
            declared.subtype_id.to_string()
        },
        |known| known.name.clone(),
    );

    let mut seen = BTreeSet::new();
    let mut barriers = Vec::with_capacity(declared.barrier_ids.len());
    for barrier_id in &declared.barrier_ids {
        let Some(description) = catalog.entity_name(EntityRef::Barrier(*barrier_id)) else {
            log::warn!("{candidate} reports unknown {barrier_id}; ignoring");
            continue;
        };
        if seen.insert(*barrier_id) {
            barriers.push(ResolvedBarrier {
                barrier_id: *barrier_id,
                description: description.to_owned(),
            });
        }
    }

    ResolvedSubtype {
        subtype_id: declared.subtype_id,
        subtype_name,
        type_id: entry.map(|known| known.type_id),
        barriers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogIndex;
    use crate::test_support::{
        BLINDNESS, INACCESSIBLE_SCREENS, NARROW_DOORWAYS, PHYSICAL, STAIRS, VISUAL,
        WHEELCHAIR_USER, candidate, sample_catalog,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> CatalogIndex {
        sample_catalog()
    }

    fn resolve(record: CandidateRecord, catalog: &CatalogIndex) -> CandidateProfile {
        let id = record.id;
        let provider = MemoryCandidateProvider::new([record]);
        resolve_candidate_profile(&provider, catalog, id).expect("candidate resolves")
    }

    #[rstest]
    fn resolves_names_and_types(catalog: CatalogIndex) {
        let record = candidate(
            1,
            &[
                (WHEELCHAIR_USER, &[STAIRS, NARROW_DOORWAYS]),
                (BLINDNESS, &[INACCESSIBLE_SCREENS]),
            ],
        );

        let profile = resolve(record, &catalog);

        assert_eq!(profile.subtypes.len(), 2);
        let first = profile.subtypes.first().expect("first subtype");
        assert_eq!(first.subtype_name, "Wheelchair user");
        assert_eq!(first.type_id, Some(PHYSICAL));
        assert_eq!(first.barriers.len(), 2);
        assert_eq!(profile.barrier_pair_count(), 3);
        assert_eq!(
            profile.disability_types().into_iter().collect::<Vec<_>>(),
            vec![PHYSICAL, VISUAL]
        );
    }

    #[rstest]
    fn unknown_barriers_are_ignored(catalog: CatalogIndex) {
        let record = candidate(2, &[(WHEELCHAIR_USER, &[STAIRS, BarrierId(9_999)])]);

        let profile = resolve(record, &catalog);

        assert_eq!(profile.barrier_pair_count(), 1);
    }

    #[rstest]
    fn repeated_barriers_collapse_within_a_subtype(catalog: CatalogIndex) {
        let record = candidate(3, &[(WHEELCHAIR_USER, &[STAIRS, STAIRS])]);

        let profile = resolve(record, &catalog);

        assert_eq!(profile.barrier_pair_count(), 1);
    }

    #[rstest]
    fn repeated_subtypes_merge_into_one_declaration(catalog: CatalogIndex) {
        let record = candidate(
            6,
            &[
                (WHEELCHAIR_USER, &[STAIRS]),
                (BLINDNESS, &[INACCESSIBLE_SCREENS]),
                (WHEELCHAIR_USER, &[NARROW_DOORWAYS, STAIRS]),
            ],
        );

        let profile = resolve(record, &catalog);

        let order: Vec<_> = profile.subtypes.iter().map(|entry| entry.subtype_id).collect();
        assert_eq!(order, vec![WHEELCHAIR_USER, BLINDNESS]);
        let first = profile.subtypes.first().expect("merged subtype");
        let barriers: Vec<_> = first.barriers.iter().map(|entry| entry.barrier_id).collect();
        assert_eq!(barriers, vec![STAIRS, NARROW_DOORWAYS]);
        assert_eq!(profile.barrier_pair_count(), 3);
    }

    #[rstest]
    fn subtype_without_barriers_is_kept(catalog: CatalogIndex) {
        let record = candidate(4, &[(WHEELCHAIR_USER, &[])]);

        let profile = resolve(record, &catalog);

        assert_eq!(profile.subtypes.len(), 1);
        assert_eq!(profile.barrier_pair_count(), 0);
    }

    #[rstest]
    fn uncatalogued_subtype_counts_without_type(catalog: CatalogIndex) {
        let record = candidate(5, &[(SubtypeId(555), &[STAIRS])]);

        let profile = resolve(record, &catalog);

        let only = profile.subtypes.first().expect("subtype kept");
        assert_eq!(only.subtype_name, "subtype 555");
        assert!(only.type_id.is_none());
        assert!(profile.disability_types().is_empty());
    }

    #[rstest]
    fn missing_candidate_is_not_found(catalog: CatalogIndex) {
        let provider = MemoryCandidateProvider::default();

        let err = resolve_candidate_profile(&provider, &catalog, CandidateId(8))
            .expect_err("candidate is missing");

        assert_eq!(err.to_string(), "candidate 8 was not found");
    }
}
