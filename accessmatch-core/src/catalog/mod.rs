//! Reference catalog and its in-memory index.
//!
//! The catalog is a four-level graph: disability types own subtypes, subtypes
//! typically face barriers, and accessibilities resolve barriers. The
//! [`CatalogIndex`] flattens the many-to-many edges into adjacency sets once so
//! scoring never re-walks relational joins.

use std::collections::{BTreeSet, HashMap, hash_map::Entry};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AccessibilityId, BarrierId, DisabilityTypeId, EntityRef, MatchError, SubtypeId};

static NO_BARRIERS: BTreeSet<BarrierId> = BTreeSet::new();
static NO_ACCESSIBILITIES: BTreeSet<AccessibilityId> = BTreeSet::new();

/// Top-level disability category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabilityType {
    /// Identifier.
    pub id: DisabilityTypeId,
    /// Display name.
    pub name: String,
}

/// Specific condition under a disability type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabilitySubtype {
    /// Identifier.
    pub id: SubtypeId,
    /// Display name.
    pub name: String,
    /// Parent disability type.
    pub type_id: DisabilityTypeId,
}

/// Environmental or social obstacle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    /// Identifier.
    pub id: BarrierId,
    /// Human-readable description.
    pub description: String,
}

/// Resource or accommodation that resolves one or more barriers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    /// Identifier.
    pub id: AccessibilityId,
    /// Human-readable description.
    pub description: String,
}

/// Edge stating that a subtype typically faces a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtypeBarrierEdge {
    /// Subtype side of the edge.
    pub subtype_id: SubtypeId,
    /// Barrier side of the edge.
    pub barrier_id: BarrierId,
}

/// Edge stating that an accessibility resolves a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierAccessibilityEdge {
    /// Barrier side of the edge.
    pub barrier_id: BarrierId,
    /// Accessibility side of the edge.
    pub accessibility_id: AccessibilityId,
}

/// Flat reference data as supplied by the reference-data repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Disability types.
    #[serde(default)]
    pub types: Vec<DisabilityType>,
    /// Disability subtypes.
    #[serde(default)]
    pub subtypes: Vec<DisabilitySubtype>,
    /// Barriers.
    #[serde(default)]
    pub barriers: Vec<Barrier>,
    /// Accessibilities.
    #[serde(default)]
    pub accessibilities: Vec<Accessibility>,
    /// Subtype to barrier edges.
    #[serde(default)]
    pub subtype_barriers: Vec<SubtypeBarrierEdge>,
    /// Barrier to accessibility edges.
    #[serde(default)]
    pub barrier_accessibilities: Vec<BarrierAccessibilityEdge>,
}

/// Errors returned by [`CatalogIndex::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two catalog entries share an identifier.
    #[error("{entity} is defined more than once")]
    DuplicateEntity {
        /// The repeated entity.
        entity: EntityRef,
    },
}

/// Read-only lookups the calculators need from the catalog.
///
/// Implementations must be `Send + Sync` so batch scoring can share one
/// catalog across worker threads. Unknown ids yield empty sets or `None`
/// rather than errors.
pub trait CatalogProvider: Send + Sync {
    /// Barriers typically faced by a subtype.
    fn barriers_for_subtype(&self, subtype: SubtypeId) -> &BTreeSet<BarrierId>;

    /// Accessibilities that resolve a barrier.
    fn accessibilities_for_barrier(&self, barrier: BarrierId) -> &BTreeSet<AccessibilityId>;

    /// Display name or description of an entity.
    fn entity_name(&self, entity: EntityRef) -> Option<&str>;

    /// Subtype record, including its parent type.
    fn subtype(&self, subtype: SubtypeId) -> Option<&DisabilitySubtype>;
}

/// In-memory arena of catalog entities with precomputed adjacency sets.
///
/// Rebuilding is a full reload via [`CatalogIndex::build`]; the index is never
/// patched in place.
///
/// # Examples
/// ```
/// use accessmatch_core::{
///     Barrier, BarrierId, CatalogIndex, CatalogSnapshot, DisabilitySubtype,
///     DisabilityType, DisabilityTypeId, SubtypeId,
/// };
/// use accessmatch_core::catalog::SubtypeBarrierEdge;
///
/// # fn main() -> Result<(), accessmatch_core::CatalogError> {
/// let snapshot = CatalogSnapshot {
///     types: vec![DisabilityType { id: DisabilityTypeId(1), name: "Physical".into() }],
///     subtypes: vec![DisabilitySubtype {
///         id: SubtypeId(10),
///         name: "Wheelchair user".into(),
///         type_id: DisabilityTypeId(1),
///     }],
///     barriers: vec![Barrier { id: BarrierId(100), description: "Stairs".into() }],
///     subtype_barriers: vec![SubtypeBarrierEdge {
///         subtype_id: SubtypeId(10),
///         barrier_id: BarrierId(100),
///     }],
///     ..CatalogSnapshot::default()
/// };
/// let index = CatalogIndex::build(snapshot)?;
/// assert!(index.barriers_of(SubtypeId(10)).contains(&BarrierId(100)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    types: HashMap<DisabilityTypeId, DisabilityType>,
    subtypes: HashMap<SubtypeId, DisabilitySubtype>,
    barriers: HashMap<BarrierId, Barrier>,
    accessibilities: HashMap<AccessibilityId, Accessibility>,
    barriers_by_subtype: HashMap<SubtypeId, BTreeSet<BarrierId>>,
    accessibilities_by_barrier: HashMap<BarrierId, BTreeSet<AccessibilityId>>,
}

impl CatalogIndex {
    /// Build the index from a snapshot.
    ///
    /// Edges that reference unknown entities are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateEntity`] when an id is defined twice
    /// within the same entity kind.
    pub fn build(snapshot: CatalogSnapshot) -> Result<Self, CatalogError> {
        let mut index = Self::default();
        for entry in snapshot.types {
            insert_unique(&mut index.types, entry.id, entry)?;
        }
        for entry in snapshot.subtypes {
            if !index.types.contains_key(&entry.type_id) {
                log::warn!(
                    "{} references unknown {}",
                    entry.id,
                    entry.type_id
                );
            }
            insert_unique(&mut index.subtypes, entry.id, entry)?;
        }
        for entry in snapshot.barriers {
            insert_unique(&mut index.barriers, entry.id, entry)?;
        }
        for entry in snapshot.accessibilities {
            insert_unique(&mut index.accessibilities, entry.id, entry)?;
        }
        for edge in snapshot.subtype_barriers {
            index.link_subtype_barrier(edge);
        }
        for edge in snapshot.barrier_accessibilities {
            index.link_barrier_accessibility(edge);
        }
        Ok(index)
    }

    fn link_subtype_barrier(&mut self, edge: SubtypeBarrierEdge) {
        if !self.subtypes.contains_key(&edge.subtype_id)
            || !self.barriers.contains_key(&edge.barrier_id)
        {
            log::warn!(
                "skipping edge {} -> {}: endpoint missing from catalog",
                edge.subtype_id,
                edge.barrier_id
            );
            return;
        }
        self.barriers_by_subtype
            .entry(edge.subtype_id)
            .or_default()
            .insert(edge.barrier_id);
    }

    fn link_barrier_accessibility(&mut self, edge: BarrierAccessibilityEdge) {
        if !self.barriers.contains_key(&edge.barrier_id)
            || !self.accessibilities.contains_key(&edge.accessibility_id)
        {
            log::warn!(
                "skipping edge {} -> {}: endpoint missing from catalog",
                edge.barrier_id,
                edge.accessibility_id
            );
            return;
        }
        self.accessibilities_by_barrier
            .entry(edge.barrier_id)
            .or_default()
            .insert(edge.accessibility_id);
    }

    /// Barriers typically faced by `subtype`; empty for unknown subtypes.
    #[must_use]
    pub fn barriers_of(&self, subtype: SubtypeId) -> &BTreeSet<BarrierId> {
        self.barriers_by_subtype.get(&subtype).unwrap_or(&NO_BARRIERS)
    }

    /// Accessibilities resolving `barrier`; empty for unknown barriers.
    #[must_use]
    pub fn accessibilities_resolving(&self, barrier: BarrierId) -> &BTreeSet<AccessibilityId> {
        self.accessibilities_by_barrier
            .get(&barrier)
            .unwrap_or(&NO_ACCESSIBILITIES)
    }

    /// Return the name or description of an entity.
    ///
    /// # Errors
    /// Returns [`MatchError::NotFound`] when the entity is not a catalog entry.
    pub fn describe(&self, entity: EntityRef) -> Result<&str, MatchError> {
        self.lookup_name(entity)
            .ok_or(MatchError::NotFound { entity })
    }

    /// Parent type of a subtype, when both are known.
    #[must_use]
    pub fn parent_type_of(&self, subtype: SubtypeId) -> Option<DisabilityTypeId> {
        self.subtypes.get(&subtype).map(|entry| entry.type_id)
    }

    /// Report whether a barrier is part of the catalog.
    #[must_use]
    pub fn contains_barrier(&self, barrier: BarrierId) -> bool {
        self.barriers.contains_key(&barrier)
    }

    /// Number of subtypes indexed.
    #[must_use]
    pub fn subtype_count(&self) -> usize {
        self.subtypes.len()
    }

    fn lookup_name(&self, entity: EntityRef) -> Option<&str> {
        match entity {
            EntityRef::DisabilityType(id) => self.types.get(&id).map(|e| e.name.as_str()),
            EntityRef::Subtype(id) => self.subtypes.get(&id).map(|e| e.name.as_str()),
            EntityRef::Barrier(id) => self.barriers.get(&id).map(|e| e.description.as_str()),
            EntityRef::Accessibility(id) => {
                self.accessibilities.get(&id).map(|e| e.description.as_str())
            }
            EntityRef::Candidate(_) | EntityRef::Job(_) | EntityRef::MatchScore(_) => None,
        }
    }
}

impl CatalogProvider for CatalogIndex {
    fn barriers_for_subtype(&self, subtype: SubtypeId) -> &BTreeSet<BarrierId> {
        self.barriers_of(subtype)
    }

    fn accessibilities_for_barrier(&self, barrier: BarrierId) -> &BTreeSet<AccessibilityId> {
        self.accessibilities_resolving(barrier)
    }

    fn entity_name(&self, entity: EntityRef) -> Option<&str> {
        self.lookup_name(entity)
    }

    fn subtype(&self, subtype: SubtypeId) -> Option<&DisabilitySubtype> {
        self.subtypes.get(&subtype)
    }
}

fn insert_unique<K, V>(map: &mut HashMap<K, V>, key: K, value: V) -> Result<(), CatalogError>
where
    K: std::hash::Hash + Eq + Copy + Into<EntityRef>,
{
    match map.entry(key) {
        Entry::Occupied(_) => Err(CatalogError::DuplicateEntity { entity: key.into() }),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
