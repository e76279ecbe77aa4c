//! Five-criterion Smart Match calculator.
//!
//! Each criterion is scored on `0..=100`, weighted by its normalised weight,
//! and summed into the total. The total is classified into a [`MatchTier`]
//! and explained by reasons (strong criteria) and alerts (weak criteria).

mod criteria;
mod narrative;

use accessmatch_core::{
    CandidateProfile, CatalogProvider, Criterion, CriterionScore, JobMetadata, JobRequirements,
    MatchTier, SmartMatchResult,
};

use crate::{
    ConfigError, SmartMatchConfig,
    coverage::{self, round_percent},
};
use criteria::Assessment;

/// Pure Smart Match scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmartMatchCalculator {
    config: SmartMatchConfig,
}

impl SmartMatchCalculator {
    /// Build a calculator from a validated configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: SmartMatchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SmartMatchConfig {
        &self.config
    }

    /// Score `profile` against a job's requirements and metadata.
    ///
    /// Missing education, regime, or location data on either side scores
    /// the neutral value for that criterion instead of failing.
    #[must_use]
    pub fn compute<C>(
        &self,
        catalog: &C,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
        metadata: &JobMetadata,
    ) -> SmartMatchResult
    where
        C: CatalogProvider + ?Sized,
    {
        let partial = &self.config.partial;
        let report = coverage::assess(catalog, profile, requirements);
        let assessments = [
            criteria::accessibility_coverage(&report),
            criteria::disability_type_alignment(catalog, profile, requirements),
            criteria::education_level(profile.education_level, metadata.education_level, partial),
            criteria::work_regime(profile.work_regime, metadata.work_regime, partial),
            criteria::location(profile.location.as_ref(), metadata, partial),
        ];

        let score_total = self.weighted_total(&assessments.each_ref().map(|a| a.score));
        let tier = self.config.tiers.classify(score_total);
        let coverage_score = report.coverage.score();
        let compatible = score_total >= self.config.compatible_threshold && coverage_score > 0;

        log::debug!(
            "smart match {} / {}: total {score_total} ({tier})",
            profile.candidate_id,
            requirements.job_id
        );

        SmartMatchResult {
            candidate_id: profile.candidate_id,
            job_id: requirements.job_id,
            job_title: metadata.title.clone(),
            score_total,
            tier,
            compatible,
            criteria: assessments
                .iter()
                .map(|assessment| self.criterion_score(assessment))
                .collect(),
            reasons: self.reasons(&assessments),
            alerts: self.alerts(&assessments),
        }
    }

    /// Weighted total of per-criterion scores given in [`Criterion::ALL`]
    /// order.
    ///
    /// # Examples
    /// ```
    /// use accessmatch_scorer::SmartMatchCalculator;
    ///
    /// let calculator = SmartMatchCalculator::default();
    /// assert_eq!(calculator.weighted_total(&[100; 5]), 100);
    /// assert_eq!(calculator.weighted_total(&[100, 100, 0, 0, 0]), 60);
    /// ```
    #[must_use]
    pub fn weighted_total(&self, scores: &[u8; 5]) -> u8 {
        let blended: f64 = Criterion::ALL
            .iter()
            .zip(scores)
            .map(|(criterion, score)| self.contribution(*criterion, *score))
            .sum();
        round_percent(blended)
    }

    /// Tier for a total under this calculator's thresholds.
    #[must_use]
    pub const fn classify(&self, total: u8) -> MatchTier {
        self.config.tiers.classify(total)
    }

    #[expect(clippy::float_arithmetic, reason = "score scaled by its weight")]
    fn contribution(&self, criterion: Criterion, score: u8) -> f64 {
        f64::from(score) * self.config.weights.normalised(criterion)
    }

    fn criterion_score(&self, assessment: &Assessment) -> CriterionScore {
        CriterionScore {
            criterion: assessment.criterion,
            score: assessment.score,
            weight: self.config.weights.normalised(assessment.criterion),
            weighted: self.contribution(assessment.criterion, assessment.score),
            detail: narrative::detail(assessment),
        }
    }

    fn reasons(&self, assessments: &[Assessment]) -> Vec<String> {
        let mut strong: Vec<&Assessment> = assessments
            .iter()
            .filter(|assessment| assessment.score >= self.config.strong_threshold)
            .collect();
        strong.sort_by(|a, b| b.score.cmp(&a.score));
        strong
            .into_iter()
            .take(self.config.max_reasons)
            .map(narrative::reason)
            .collect()
    }

    fn alerts(&self, assessments: &[Assessment]) -> Vec<String> {
        let mut weak: Vec<&Assessment> = assessments
            .iter()
            .filter(|assessment| assessment.score <= self.config.weak_threshold)
            .collect();
        weak.sort_by_key(|assessment| assessment.score);
        weak.into_iter()
            .take(self.config.max_alerts)
            .map(narrative::alert)
            .collect()
    }
}

#[cfg(test)]
mod tests;
