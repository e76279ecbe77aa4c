//! Strongly typed integer identifiers.
//!
//! Every entity shares the same `u64` representation; distinct wrapper types
//! keep a barrier id from being passed where a subtype id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the raw numeric identifier.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifier of a job candidate.
    CandidateId,
    "candidate"
);
define_id!(
    /// Identifier of a job posting.
    JobId,
    "job"
);
define_id!(
    /// Identifier of a top-level disability category.
    DisabilityTypeId,
    "disability type"
);
define_id!(
    /// Identifier of a specific condition under a disability type.
    SubtypeId,
    "subtype"
);
define_id!(
    /// Identifier of an environmental or social barrier.
    BarrierId,
    "barrier"
);
define_id!(
    /// Identifier of an accessibility resource.
    AccessibilityId,
    "accessibility"
);
