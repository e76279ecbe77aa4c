//! Weights, thresholds, and partial-credit values for both calculators.
//!
//! Every value is available as a named constant and as a field of an
//! overridable configuration struct whose `Default` uses those constants.

use accessmatch_core::{Criterion, MatchTier};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Basic Match weight of the accepted-subtype ratio.
pub const SUBTYPE_WEIGHT: f64 = 0.4;
/// Basic Match weight of the resolved-barrier ratio.
pub const ACCESSIBILITY_WEIGHT: f64 = 0.6;
/// Minimum Basic Match total for a compatible pair.
pub const BASIC_COMPATIBLE_THRESHOLD: u8 = 50;

/// Smart Match weight of accessibility coverage.
pub const COVERAGE_WEIGHT: f64 = 0.35;
/// Smart Match weight of disability-type alignment.
pub const ALIGNMENT_WEIGHT: f64 = 0.25;
/// Smart Match weight of education level.
pub const EDUCATION_WEIGHT: f64 = 0.15;
/// Smart Match weight of work regime.
pub const REGIME_WEIGHT: f64 = 0.15;
/// Smart Match weight of location.
pub const LOCATION_WEIGHT: f64 = 0.10;

/// Minimum Smart Match total for a compatible pair.
pub const SMART_COMPATIBLE_THRESHOLD: u8 = 60;
/// Criterion score at or above which a reason is emitted.
pub const STRONG_THRESHOLD: u8 = 80;
/// Criterion score at or below which an alert is emitted.
pub const WEAK_THRESHOLD: u8 = 40;
/// Maximum number of reasons returned.
pub const MAX_REASONS: usize = 4;
/// Maximum number of alerts returned.
pub const MAX_ALERTS: usize = 3;

/// Lowest total classified as [`MatchTier::Perfeito`].
pub const PERFEITO_THRESHOLD: u8 = 95;
/// Lowest total classified as [`MatchTier::Excelente`].
pub const EXCELENTE_THRESHOLD: u8 = 80;
/// Lowest total classified as [`MatchTier::Bom`].
pub const BOM_THRESHOLD: u8 = 60;
/// Lowest total classified as [`MatchTier::Razoavel`].
pub const RAZOAVEL_THRESHOLD: u8 = 40;

/// Score given to a criterion whose inputs are missing.
pub const NEUTRAL_SCORE: u8 = 50;
/// Score for a regime that overlaps without matching exactly.
pub const REGIME_PARTIAL_SCORE: u8 = 60;
/// Score for a workplace in the candidate's state but another city.
pub const SAME_STATE_SCORE: u8 = 60;
/// Points lost per education level below the requirement.
pub const EDUCATION_STEP_PENALTY: u8 = 30;
/// Lowest score for a candidate below the education requirement.
pub const EDUCATION_FLOOR: u8 = 20;

/// Basic Match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicMatchConfig {
    /// Weight of the accepted-subtype ratio.
    pub subtype_weight: f64,
    /// Weight of the resolved-barrier ratio.
    pub accessibility_weight: f64,
    /// Minimum total for a compatible pair.
    pub compatible_threshold: u8,
}

impl Default for BasicMatchConfig {
    fn default() -> Self {
        Self {
            subtype_weight: SUBTYPE_WEIGHT,
            accessibility_weight: ACCESSIBILITY_WEIGHT,
            compatible_threshold: BASIC_COMPATIBLE_THRESHOLD,
        }
    }
}

impl BasicMatchConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the weights are unusable or the threshold
    /// exceeds 100.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !weights_are_usable(&[self.subtype_weight, self.accessibility_weight]) {
            return Err(ConfigError::InvalidWeights {
                context: "basic match",
            });
        }
        check_threshold("basic compatible", self.compatible_threshold)?;
        Ok(self)
    }
}

/// Smart Match weight per criterion.
///
/// Weights are normalised by their sum, so they need not add up to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    /// Accessibility coverage weight.
    pub accessibility_coverage: f64,
    /// Disability-type alignment weight.
    pub disability_type_alignment: f64,
    /// Education level weight.
    pub education_level: f64,
    /// Work regime weight.
    pub work_regime: f64,
    /// Location weight.
    pub location: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            accessibility_coverage: COVERAGE_WEIGHT,
            disability_type_alignment: ALIGNMENT_WEIGHT,
            education_level: EDUCATION_WEIGHT,
            work_regime: REGIME_WEIGHT,
            location: LOCATION_WEIGHT,
        }
    }
}

impl CriterionWeights {
    /// Weight configured for `criterion`.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::AccessibilityCoverage => self.accessibility_coverage,
            Criterion::DisabilityTypeAlignment => self.disability_type_alignment,
            Criterion::EducationLevel => self.education_level,
            Criterion::WorkRegime => self.work_regime,
            Criterion::Location => self.location,
        }
    }

    fn as_array(&self) -> [f64; 5] {
        Criterion::ALL.map(|criterion| self.get(criterion))
    }

    /// Weight of `criterion` divided by the sum of all weights.
    #[expect(
        clippy::float_arithmetic,
        reason = "normalising weights divides by their sum"
    )]
    #[must_use]
    pub fn normalised(&self, criterion: Criterion) -> f64 {
        let total: f64 = self.as_array().iter().sum();
        if total > 0.0 {
            self.get(criterion) / total
        } else {
            0.0
        }
    }
}

/// Lowest total for each tier above [`MatchTier::Baixo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Lowest total for [`MatchTier::Perfeito`].
    pub perfeito: u8,
    /// Lowest total for [`MatchTier::Excelente`].
    pub excelente: u8,
    /// Lowest total for [`MatchTier::Bom`].
    pub bom: u8,
    /// Lowest total for [`MatchTier::Razoavel`].
    pub razoavel: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            perfeito: PERFEITO_THRESHOLD,
            excelente: EXCELENTE_THRESHOLD,
            bom: BOM_THRESHOLD,
            razoavel: RAZOAVEL_THRESHOLD,
        }
    }
}

impl TierThresholds {
    /// Classify a Smart Match total.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::MatchTier;
    /// use accessmatch_scorer::TierThresholds;
    ///
    /// let tiers = TierThresholds::default();
    /// assert_eq!(tiers.classify(95), MatchTier::Perfeito);
    /// assert_eq!(tiers.classify(79), MatchTier::Bom);
    /// assert_eq!(tiers.classify(39), MatchTier::Baixo);
    /// ```
    #[must_use]
    pub const fn classify(&self, total: u8) -> MatchTier {
        if total >= self.perfeito {
            MatchTier::Perfeito
        } else if total >= self.excelente {
            MatchTier::Excelente
        } else if total >= self.bom {
            MatchTier::Bom
        } else if total >= self.razoavel {
            MatchTier::Razoavel
        } else {
            MatchTier::Baixo
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        check_threshold("perfeito", self.perfeito)?;
        check_threshold("excelente", self.excelente)?;
        check_threshold("bom", self.bom)?;
        check_threshold("razoavel", self.razoavel)?;
        if self.perfeito < self.excelente || self.excelente < self.bom || self.bom < self.razoavel
        {
            return Err(ConfigError::TiersOutOfOrder);
        }
        Ok(self)
    }
}

/// Fixed scores for partial or missing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCredit {
    /// Score when either side of a criterion is missing.
    pub neutral: u8,
    /// Score for overlapping but different work regimes.
    pub regime_partial: u8,
    /// Score for the same state but a different city.
    pub same_state: u8,
    /// Points lost per education level below the requirement.
    pub education_step_penalty: u8,
    /// Lowest score below the education requirement.
    pub education_floor: u8,
}

impl Default for PartialCredit {
    fn default() -> Self {
        Self {
            neutral: NEUTRAL_SCORE,
            regime_partial: REGIME_PARTIAL_SCORE,
            same_state: SAME_STATE_SCORE,
            education_step_penalty: EDUCATION_STEP_PENALTY,
            education_floor: EDUCATION_FLOOR,
        }
    }
}

impl PartialCredit {
    fn validate(self) -> Result<Self, ConfigError> {
        check_threshold("neutral", self.neutral)?;
        check_threshold("regime partial", self.regime_partial)?;
        check_threshold("same state", self.same_state)?;
        check_threshold("education floor", self.education_floor)?;
        Ok(self)
    }
}

/// Smart Match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartMatchConfig {
    /// Weight per criterion.
    pub weights: CriterionWeights,
    /// Tier boundaries.
    pub tiers: TierThresholds,
    /// Partial-credit values.
    pub partial: PartialCredit,
    /// Minimum total for a compatible pair.
    pub compatible_threshold: u8,
    /// Criterion score at or above which a reason is emitted.
    pub strong_threshold: u8,
    /// Criterion score at or below which an alert is emitted.
    pub weak_threshold: u8,
    /// Maximum number of reasons.
    pub max_reasons: usize,
    /// Maximum number of alerts.
    pub max_alerts: usize,
}

impl Default for SmartMatchConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            tiers: TierThresholds::default(),
            partial: PartialCredit::default(),
            compatible_threshold: SMART_COMPATIBLE_THRESHOLD,
            strong_threshold: STRONG_THRESHOLD,
            weak_threshold: WEAK_THRESHOLD,
            max_reasons: MAX_REASONS,
            max_alerts: MAX_ALERTS,
        }
    }
}

impl SmartMatchConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the weights are unusable, a threshold
    /// exceeds 100, or tiers are out of order.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !weights_are_usable(&self.weights.as_array()) {
            return Err(ConfigError::InvalidWeights {
                context: "smart match",
            });
        }
        self.tiers.validate()?;
        self.partial.validate()?;
        check_threshold("smart compatible", self.compatible_threshold)?;
        check_threshold("strong", self.strong_threshold)?;
        check_threshold("weak", self.weak_threshold)?;
        Ok(self)
    }
}

fn weights_are_usable(weights: &[f64]) -> bool {
    let finite = weights.iter().all(|weight| weight.is_finite());
    let non_negative = weights.iter().all(|weight| *weight >= 0.0);
    let total: f64 = weights.iter().sum();
    finite && non_negative && total > 0.0
}

const fn check_threshold(name: &'static str, value: u8) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}
