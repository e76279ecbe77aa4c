//! Compatibility calculators for candidates and job postings.
//!
//! The crate provides two scoring strategies over the same catalog graph:
//! - **Basic Match** blends the share of the candidate's subtypes the job
//!   accepts with the share of their barriers the job's accessibilities
//!   resolve. [`BasicMatchCalculator`] produces a cacheable
//!   [`BasicMatchResult`](accessmatch_core::BasicMatchResult) with a
//!   per-subtype breakdown.
//! - **Smart Match** scores five criteria (accessibility coverage,
//!   disability-type alignment, education level, work regime, location),
//!   classifies the weighted total into a tier, and explains it with reasons
//!   and alerts. [`SmartMatchCalculator`] is always computed fresh.
//!
//! Both calculators are pure: they read the catalog, profile, and job views
//! handed to them and never perform I/O.
//!
//! # Examples
//!
//! ```
//! use accessmatch_scorer::{BasicMatchConfig, SmartMatchCalculator, SmartMatchConfig};
//!
//! let config = SmartMatchConfig {
//!     compatible_threshold: 70,
//!     ..SmartMatchConfig::default()
//! };
//! let calculator = SmartMatchCalculator::new(config).expect("valid configuration");
//! assert_eq!(calculator.config().compatible_threshold, 70);
//! assert!(BasicMatchConfig::default().validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod basic;
mod config;
mod coverage;
mod error;
mod smart;

pub use basic::BasicMatchCalculator;
pub use config::{
    ACCESSIBILITY_WEIGHT, ALIGNMENT_WEIGHT, BASIC_COMPATIBLE_THRESHOLD, BOM_THRESHOLD,
    BasicMatchConfig, COVERAGE_WEIGHT, CriterionWeights, EDUCATION_FLOOR,
    EDUCATION_STEP_PENALTY, EDUCATION_WEIGHT, EXCELENTE_THRESHOLD, LOCATION_WEIGHT, MAX_ALERTS,
    MAX_REASONS, NEUTRAL_SCORE, PERFEITO_THRESHOLD, PartialCredit, RAZOAVEL_THRESHOLD,
    REGIME_PARTIAL_SCORE, REGIME_WEIGHT, SAME_STATE_SCORE, SMART_COMPATIBLE_THRESHOLD,
    STRONG_THRESHOLD, SUBTYPE_WEIGHT, SmartMatchConfig, TierThresholds, WEAK_THRESHOLD,
};
pub use error::ConfigError;
pub use smart::SmartMatchCalculator;
