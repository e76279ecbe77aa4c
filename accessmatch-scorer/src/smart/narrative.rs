//! Human-readable details, reasons, and alerts for Smart Match criteria.

use super::criteria::{Assessment, EducationFit, Evidence, LocationFit, RegimeFit};

/// One-line explanation of how a criterion was scored.
pub(crate) fn detail(assessment: &Assessment) -> String {
    match &assessment.evidence {
        Evidence::Coverage { total: 0, .. } => "no barriers to resolve".to_owned(),
        Evidence::Coverage {
            resolved, total, ..
        } => format!("{resolved} of {total} barriers resolved"),
        Evidence::Alignment { matched, total } => {
            format!("{matched} of {total} disability types accepted")
        }
        Evidence::Education(EducationFit::Meets { held, required }) => {
            format!("{held} meets required {required}")
        }
        Evidence::Education(EducationFit::Below {
            held,
            required,
            steps,
        }) => format!("{held} is {steps} {} below required {required}", levels(*steps)),
        Evidence::Regime(RegimeFit::Exact(regime)) => format!("{regime} matches preference"),
        Evidence::Regime(RegimeFit::Partial { preferred, offered }) => {
            format!("{offered} partially fits preferred {preferred}")
        }
        Evidence::Regime(RegimeFit::Mismatch { preferred, offered }) => {
            format!("{offered} does not fit preferred {preferred}")
        }
        Evidence::Location(LocationFit::Remote) => "remote position".to_owned(),
        Evidence::Location(LocationFit::SameCity(place)) => format!("same city ({place})"),
        Evidence::Location(LocationFit::SameState { workplace, .. }) => {
            format!("same state ({})", workplace.state.trim())
        }
        Evidence::Location(LocationFit::Elsewhere { home, workplace }) => {
            format!("{workplace} is outside {home}")
        }
        Evidence::Missing => format!("{} not specified", assessment.criterion),
    }
}

/// Strength statement for a high-scoring criterion.
pub(crate) fn reason(assessment: &Assessment) -> String {
    match &assessment.evidence {
        Evidence::Coverage { total: 0, .. } => {
            "You reported no barriers this job needs to resolve".to_owned()
        }
        Evidence::Coverage {
            resolved, total, ..
        } => format!("The job resolves {resolved} of the {total} barriers you face"),
        Evidence::Alignment { matched, total } if matched == total => {
            "The job accepts every disability type you declared".to_owned()
        }
        Evidence::Alignment { matched, total } => {
            format!("The job accepts {matched} of your {total} disability types")
        }
        Evidence::Education(EducationFit::Meets { held, required }) => {
            format!("Your education ({held}) meets the requirement ({required})")
        }
        Evidence::Education(EducationFit::Below { held, required, .. }) => {
            format!("Your education ({held}) is close to the requirement ({required})")
        }
        Evidence::Regime(RegimeFit::Exact(regime)) => {
            format!("The work regime ({regime}) matches your preference")
        }
        Evidence::Regime(RegimeFit::Partial { preferred, offered }) => {
            format!("The work regime ({offered}) is compatible with your preference ({preferred})")
        }
        Evidence::Location(LocationFit::Remote) => {
            "Fully remote position, so location is no constraint".to_owned()
        }
        Evidence::Location(LocationFit::SameCity(place)) => {
            format!("The workplace is in your city ({place})")
        }
        Evidence::Location(LocationFit::SameState { workplace, .. }) => {
            format!("The workplace is in your state ({workplace})")
        }
        Evidence::Regime(RegimeFit::Mismatch { .. })
        | Evidence::Location(LocationFit::Elsewhere { .. })
        | Evidence::Missing => format!(
            "Strong {} ({})",
            assessment.criterion,
            detail(assessment)
        ),
    }
}

/// Weakness statement for a low-scoring criterion.
pub(crate) fn alert(assessment: &Assessment) -> String {
    match &assessment.evidence {
        Evidence::Coverage { unresolved, .. } if !unresolved.is_empty() => format!(
            "No offered accessibility resolves: {}",
            unresolved.join(", ")
        ),
        Evidence::Alignment { total: 0, .. } => {
            "No catalogued disability type was declared".to_owned()
        }
        Evidence::Alignment { matched: 0, .. } => {
            "The job does not accept any of your disability types".to_owned()
        }
        Evidence::Alignment { matched, total } => {
            format!("The job accepts only {matched} of your {total} disability types")
        }
        Evidence::Education(EducationFit::Below {
            held,
            required,
            steps,
        }) => format!(
            "Your education ({held}) is {steps} {} below the requirement ({required})",
            levels(*steps)
        ),
        Evidence::Regime(RegimeFit::Mismatch { preferred, offered }) => {
            format!("The work regime ({offered}) does not fit your preference ({preferred})")
        }
        Evidence::Regime(RegimeFit::Partial { preferred, offered }) => {
            format!("The work regime ({offered}) only partly fits your preference ({preferred})")
        }
        Evidence::Location(LocationFit::Elsewhere { home, workplace }) => {
            format!("The workplace ({workplace}) is outside your state ({home})")
        }
        Evidence::Location(LocationFit::SameState { home, workplace }) => {
            format!("The workplace ({workplace}) is in another city from yours ({home})")
        }
        Evidence::Coverage { .. }
        | Evidence::Education(EducationFit::Meets { .. })
        | Evidence::Regime(RegimeFit::Exact(_))
        | Evidence::Location(LocationFit::Remote | LocationFit::SameCity(_))
        | Evidence::Missing => format!(
            "Weak {} ({})",
            assessment.criterion,
            detail(assessment)
        ),
    }
}

const fn levels(steps: u8) -> &'static str {
    if steps == 1 { "level" } else { "levels" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accessmatch_core::{Criterion, EducationLevel, Location};

    fn assessment(criterion: Criterion, score: u8, evidence: Evidence) -> Assessment {
        Assessment {
            criterion,
            score,
            evidence,
        }
    }

    #[test]
    fn coverage_alert_lists_unresolved_barriers() {
        let weak = assessment(
            Criterion::AccessibilityCoverage,
            0,
            Evidence::Coverage {
                resolved: 0,
                total: 2,
                unresolved: vec!["Stairs".into(), "Narrow doorways".into()],
            },
        );
        assert_eq!(
            alert(&weak),
            "No offered accessibility resolves: Stairs, Narrow doorways"
        );
        assert_eq!(detail(&weak), "0 of 2 barriers resolved");
    }

    #[test]
    fn education_detail_pluralises_levels() {
        let one = assessment(
            Criterion::EducationLevel,
            70,
            Evidence::Education(EducationFit::Below {
                held: EducationLevel::Technical,
                required: EducationLevel::Undergraduate,
                steps: 1,
            }),
        );
        assert_eq!(detail(&one), "technical is 1 level below required undergraduate");
    }

    #[test]
    fn missing_evidence_names_the_criterion() {
        let neutral = assessment(Criterion::WorkRegime, 50, Evidence::Missing);
        assert_eq!(detail(&neutral), "work regime not specified");
    }

    #[test]
    fn same_city_reason_names_the_place() {
        let strong = assessment(
            Criterion::Location,
            100,
            Evidence::Location(LocationFit::SameCity(Location::new("Natal", "RN"))),
        );
        assert_eq!(reason(&strong), "The workplace is in your city (Natal/RN)");
    }
}
