//! Two-factor Basic Match calculator.
//!
//! `score_total = round(score_subtypes * 0.4 + score_accessibilities * 0.6)`
//! with the weights taken from [`BasicMatchConfig`]. Every caller that needs
//! a Basic Match score goes through [`BasicMatchCalculator::compute`].

use accessmatch_core::{BasicMatchResult, CandidateProfile, CatalogProvider, JobRequirements};

use crate::{
    BasicMatchConfig, ConfigError,
    coverage::{self, ratio_percent, round_percent},
};

/// Pure Basic Match scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BasicMatchCalculator {
    config: BasicMatchConfig,
}

impl BasicMatchCalculator {
    /// Build a calculator from a validated configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: BasicMatchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BasicMatchConfig {
        &self.config
    }

    /// Score `profile` against `requirements`.
    ///
    /// A candidate without subtypes scores 0 on the subtype factor. A
    /// candidate without barriers scores 100 on the accessibility factor.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_core::{
    ///     CandidateId, CandidateProfile, CatalogIndex, CatalogSnapshot, JobId, JobRequirements,
    /// };
    /// use accessmatch_scorer::BasicMatchCalculator;
    ///
    /// # fn main() -> Result<(), accessmatch_core::CatalogError> {
    /// let catalog = CatalogIndex::build(CatalogSnapshot::default())?;
    /// let profile = CandidateProfile {
    ///     candidate_id: CandidateId(1),
    ///     subtypes: Vec::new(),
    ///     education_level: None,
    ///     work_regime: None,
    ///     location: None,
    /// };
    /// let requirements = JobRequirements {
    ///     job_id: JobId(2),
    ///     accepted_subtype_ids: Default::default(),
    ///     offered_accessibility_ids: Default::default(),
    /// };
    ///
    /// let result = BasicMatchCalculator::default().compute(&catalog, &profile, &requirements);
    /// assert_eq!(result.score_subtypes, 0);
    /// assert_eq!(result.score_accessibilities, 100);
    /// assert_eq!(result.score_total, 60);
    /// assert!(!result.compatible);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn compute<C>(
        &self,
        catalog: &C,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
    ) -> BasicMatchResult
    where
        C: CatalogProvider + ?Sized,
    {
        let total_subtypes = profile.subtypes.len();
        let accepted_subtypes = profile
            .subtypes
            .iter()
            .filter(|subtype| requirements.accepted_subtype_ids.contains(&subtype.subtype_id))
            .count();
        let score_subtypes = ratio_percent(accepted_subtypes, total_subtypes);

        let report = coverage::assess(catalog, profile, requirements);
        let score_accessibilities = report.coverage.score();
        let score_total = self.weighted_total(score_subtypes, score_accessibilities);
        let compatible = accepted_subtypes > 0 && score_total >= self.config.compatible_threshold;

        log::debug!(
            "basic match {} / {}: subtypes {score_subtypes}, accessibilities \
             {score_accessibilities}, total {score_total}",
            profile.candidate_id,
            requirements.job_id
        );

        BasicMatchResult {
            candidate_id: profile.candidate_id,
            job_id: requirements.job_id,
            score_total,
            score_subtypes,
            score_accessibilities,
            accepted_subtypes,
            total_subtypes,
            resolved_count: report.coverage.resolved,
            total_count: report.coverage.total,
            breakdown: report.breakdown,
            compatible,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "weighted blend of two percentages"
    )]
    fn weighted_total(&self, score_subtypes: u8, score_accessibilities: u8) -> u8 {
        let BasicMatchConfig {
            subtype_weight,
            accessibility_weight,
            ..
        } = self.config;
        let total_weight = subtype_weight + accessibility_weight;
        if total_weight <= 0.0 {
            return 0;
        }
        let blended = f64::from(score_subtypes) * subtype_weight
            + f64::from(score_accessibilities) * accessibility_weight;
        round_percent(blended / total_weight)
    }
}
