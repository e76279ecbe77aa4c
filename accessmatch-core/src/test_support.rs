//! Test-only fixtures shared by unit, behaviour, and property tests.
//!
//! The sample catalog is small but covers every edge shape the calculators
//! care about: subtypes sharing a barrier, barriers with several resolving
//! accessibilities, and a barrier nothing resolves.

use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};

use crate::catalog::{BarrierAccessibilityEdge, SubtypeBarrierEdge};
use crate::{
    Accessibility, AccessibilityId, Barrier, BarrierId, CandidateId, CandidateRecord,
    CatalogIndex, CatalogSnapshot, Clock, DeclaredSubtype, DisabilitySubtype, DisabilityType,
    DisabilityTypeId, JobId, JobRecord, SubtypeId,
};

/// Physical disability type.
pub const PHYSICAL: DisabilityTypeId = DisabilityTypeId(1);
/// Visual disability type.
pub const VISUAL: DisabilityTypeId = DisabilityTypeId(2);
/// Hearing disability type.
pub const HEARING: DisabilityTypeId = DisabilityTypeId(3);

/// Wheelchair user: faces stairs and narrow doorways.
pub const WHEELCHAIR_USER: SubtypeId = SubtypeId(10);
/// Reduced mobility: faces stairs and long standing periods.
pub const REDUCED_MOBILITY: SubtypeId = SubtypeId(11);
/// Low vision: faces small print and inaccessible screens.
pub const LOW_VISION: SubtypeId = SubtypeId(20);
/// Blindness: faces inaccessible screens.
pub const BLINDNESS: SubtypeId = SubtypeId(21);
/// Deafness: faces audio-only announcements.
pub const DEAFNESS: SubtypeId = SubtypeId(30);

/// Stairs.
pub const STAIRS: BarrierId = BarrierId(100);
/// Narrow doorways.
pub const NARROW_DOORWAYS: BarrierId = BarrierId(101);
/// Small print.
pub const SMALL_PRINT: BarrierId = BarrierId(102);
/// Inaccessible screens.
pub const INACCESSIBLE_SCREENS: BarrierId = BarrierId(103);
/// Audio-only announcements.
pub const AUDIO_ONLY: BarrierId = BarrierId(104);
/// Long standing periods.
pub const LONG_STANDING: BarrierId = BarrierId(105);
/// Loud open-plan office; no accessibility resolves it.
pub const OPEN_PLAN_NOISE: BarrierId = BarrierId(106);

/// Access ramps.
pub const RAMPS: AccessibilityId = AccessibilityId(1000);
/// Elevator.
pub const ELEVATOR: AccessibilityId = AccessibilityId(1001);
/// Wide doors.
pub const WIDE_DOORS: AccessibilityId = AccessibilityId(1002);
/// Screen reader software.
pub const SCREEN_READER: AccessibilityId = AccessibilityId(1003);
/// Large print materials.
pub const LARGE_PRINT: AccessibilityId = AccessibilityId(1004);
/// Sign language interpreter.
pub const INTERPRETER: AccessibilityId = AccessibilityId(1005);
/// Visual alerts.
pub const VISUAL_ALERTS: AccessibilityId = AccessibilityId(1006);
/// Adjustable workstation.
pub const ADJUSTABLE_DESK: AccessibilityId = AccessibilityId(1007);

/// Snapshot of the sample catalog.
#[must_use]
pub fn sample_snapshot() -> CatalogSnapshot {
    let types = vec![
        named_type(PHYSICAL, "Physical"),
        named_type(VISUAL, "Visual"),
        named_type(HEARING, "Hearing"),
    ];
    let subtypes = vec![
        subtype(WHEELCHAIR_USER, "Wheelchair user", PHYSICAL),
        subtype(REDUCED_MOBILITY, "Reduced mobility", PHYSICAL),
        subtype(LOW_VISION, "Low vision", VISUAL),
        subtype(BLINDNESS, "Blindness", VISUAL),
        subtype(DEAFNESS, "Deafness", HEARING),
    ];
    let barriers = [
        (STAIRS, "Stairs"),
        (NARROW_DOORWAYS, "Narrow doorways"),
        (SMALL_PRINT, "Small print"),
        (INACCESSIBLE_SCREENS, "Inaccessible screens"),
        (AUDIO_ONLY, "Audio-only announcements"),
        (LONG_STANDING, "Long standing periods"),
        (OPEN_PLAN_NOISE, "Loud open-plan office"),
    ]
    .into_iter()
    .map(|(id, description)| Barrier {
        id,
        description: description.to_owned(),
    })
    .collect();
    let accessibilities = [
        (RAMPS, "Access ramps"),
        (ELEVATOR, "Elevator"),
        (WIDE_DOORS, "Wide doors"),
        (SCREEN_READER, "Screen reader software"),
        (LARGE_PRINT, "Large print materials"),
        (INTERPRETER, "Sign language interpreter"),
        (VISUAL_ALERTS, "Visual alerts"),
        (ADJUSTABLE_DESK, "Adjustable workstation"),
    ]
    .into_iter()
    .map(|(id, description)| Accessibility {
        id,
        description: description.to_owned(),
    })
    .collect();
    let subtype_barriers = [
        (WHEELCHAIR_USER, STAIRS),
        (WHEELCHAIR_USER, NARROW_DOORWAYS),
        (REDUCED_MOBILITY, STAIRS),
        (REDUCED_MOBILITY, LONG_STANDING),
        (LOW_VISION, SMALL_PRINT),
        (LOW_VISION, INACCESSIBLE_SCREENS),
        (BLINDNESS, INACCESSIBLE_SCREENS),
        (DEAFNESS, AUDIO_ONLY),
        (DEAFNESS, OPEN_PLAN_NOISE),
    ]
    .into_iter()
    .map(|(subtype_id, barrier_id)| SubtypeBarrierEdge {
        subtype_id,
        barrier_id,
    })
    .collect();
    let barrier_accessibilities = [
        (STAIRS, RAMPS),
        (STAIRS, ELEVATOR),
        (NARROW_DOORWAYS, WIDE_DOORS),
        (SMALL_PRINT, LARGE_PRINT),
        (SMALL_PRINT, SCREEN_READER),
        (INACCESSIBLE_SCREENS, SCREEN_READER),
        (AUDIO_ONLY, INTERPRETER),
        (AUDIO_ONLY, VISUAL_ALERTS),
        (LONG_STANDING, ADJUSTABLE_DESK),
    ]
    .into_iter()
    .map(|(barrier_id, accessibility_id)| BarrierAccessibilityEdge {
        barrier_id,
        accessibility_id,
    })
    .collect();

    CatalogSnapshot {
        types,
        subtypes,
        barriers,
        accessibilities,
        subtype_barriers,
        barrier_accessibilities,
    }
}

/// Index built from [`sample_snapshot`].
///
/// # Panics
/// Never in practice: the sample snapshot has unique ids.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture data is static and valid")]
pub fn sample_catalog() -> CatalogIndex {
    CatalogIndex::build(sample_snapshot()).expect("sample catalog is valid")
}

/// Candidate declaring `subtypes`, each with its own barrier ids.
#[must_use]
pub fn candidate(id: u64, subtypes: &[(SubtypeId, &[BarrierId])]) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id),
        subtypes: subtypes
            .iter()
            .map(|(subtype_id, barriers)| DeclaredSubtype {
                subtype_id: *subtype_id,
                barrier_ids: barriers.to_vec(),
            })
            .collect(),
        ..CandidateRecord::new(CandidateId(id))
    }
}

/// Active job accepting `accepted` subtypes and offering `offered`.
#[must_use]
pub fn job(id: u64, accepted: &[SubtypeId], offered: &[AccessibilityId]) -> JobRecord {
    JobRecord {
        accepted_subtype_ids: accepted.iter().copied().collect(),
        offered_accessibility_ids: offered.iter().copied().collect(),
        ..JobRecord::new(JobId(id), format!("Job {id}"))
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward.
    ///
    /// # Panics
    /// Panics if a previous holder of the lock panicked.
    #[expect(clippy::expect_used, reason = "test clock lock is never poisoned")]
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.lock().expect("clock lock");
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
    }
}

fn named_type(id: DisabilityTypeId, name: &str) -> DisabilityType {
    DisabilityType {
        id,
        name: name.to_owned(),
    }
}

fn subtype(id: SubtypeId, name: &str, type_id: DisabilityTypeId) -> DisabilitySubtype {
    DisabilitySubtype {
        id,
        name: name.to_owned(),
        type_id,
    }
}
