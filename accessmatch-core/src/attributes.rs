//! Candidate and job attributes used by the Smart Match criteria.
//!
//! Education levels form an ordinal scale; work regimes and locations are
//! compared for exact or partial agreement.
//!
//! # Examples
//! ```
//! use accessmatch_core::{EducationLevel, WorkRegime};
//!
//! assert!(EducationLevel::Undergraduate > EducationLevel::HighSchool);
//! assert_eq!(WorkRegime::Hybrid.as_str(), "hybrid");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal education scale, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// Primary schooling.
    Elementary,
    /// Secondary schooling.
    HighSchool,
    /// Technical or vocational course.
    Technical,
    /// Bachelor's degree.
    Undergraduate,
    /// Specialisation, master's, or doctorate.
    Postgraduate,
}

impl EducationLevel {
    /// Return the position of the level on the ordinal scale.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::EducationLevel;
    ///
    /// assert_eq!(EducationLevel::Elementary.rank(), 0);
    /// assert_eq!(EducationLevel::Postgraduate.rank(), 4);
    /// ```
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Elementary => 0,
            Self::HighSchool => 1,
            Self::Technical => 2,
            Self::Undergraduate => 3,
            Self::Postgraduate => 4,
        }
    }

    /// Number of steps `self` sits below `required`, or zero when it meets it.
    #[must_use]
    pub const fn shortfall(self, required: Self) -> u8 {
        required.rank().saturating_sub(self.rank())
    }

    /// Return the level as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::HighSchool => "high_school",
            Self::Technical => "technical",
            Self::Undergraduate => "undergraduate",
            Self::Postgraduate => "postgraduate",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the work is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkRegime {
    /// Fully at the employer's premises.
    OnSite,
    /// Split between premises and remote work.
    Hybrid,
    /// Fully remote.
    Remote,
}

impl WorkRegime {
    /// Return the regime as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnSite => "on_site",
            Self::Hybrid => "hybrid",
            Self::Remote => "remote",
        }
    }

    /// Report whether two differing regimes still overlap.
    ///
    /// A hybrid arrangement overlaps with both on-site and remote work; on-site
    /// and remote never overlap.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::WorkRegime;
    ///
    /// assert!(WorkRegime::Hybrid.overlaps(WorkRegime::Remote));
    /// assert!(!WorkRegime::OnSite.overlaps(WorkRegime::Remote));
    /// ```
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self == other || self == Self::Hybrid || other == Self::Hybrid
    }
}

impl fmt::Display for WorkRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// City and state of a candidate or job.
///
/// Comparisons ignore case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City name.
    pub city: String,
    /// State or province name or code.
    pub state: String,
}

impl Location {
    /// Construct a location.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Report whether both locations name the same, non-empty state.
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        same_place(&self.state, &other.state)
    }

    /// Report whether both locations name the same city within the same state.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::Location;
    ///
    /// let office = Location::new("Campinas", "SP");
    /// assert!(office.same_city(&Location::new(" campinas ", "sp")));
    /// assert!(!office.same_city(&Location::new("Campinas", "MG")));
    /// ```
    #[must_use]
    pub fn same_city(&self, other: &Self) -> bool {
        self.same_state(other) && same_place(&self.city, &other.city)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.city.trim(), self.state.trim())
    }
}

fn same_place(lhs: &str, rhs: &str) -> bool {
    let left = lhs.trim();
    !left.is_empty() && left.to_lowercase() == rhs.trim().to_lowercase()
}
