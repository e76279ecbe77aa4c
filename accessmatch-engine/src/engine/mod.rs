//! `MatchEngine` orchestration over the collaborator traits.
//!
//! Batch operations resolve the candidate once, list the active jobs, and
//! score each job on the rayon pool. A job that fails is recorded in the
//! report and the batch carries on; an unknown candidate aborts the batch.

use std::cmp::Reverse;

use accessmatch_core::{
    BasicMatchResult, CancellationToken, CandidateId, CandidateProfile, CandidateProfileProvider,
    CatalogProvider, Clock, JobId, JobProvider, JobScope, MatchError, MatchScoreRecord,
    ScoreCache, SmartMatchResult, SystemClock, resolve_candidate_profile, resolve_job,
};
use accessmatch_scorer::{BasicMatchCalculator, SmartMatchCalculator};
use rayon::prelude::*;

use crate::{BatchReport, EngineConfig, EngineError, SkippedJob};

/// Compatibility engine exposing the scoring operations.
///
/// The engine is generic over its boundaries: a candidate profile source, a
/// job source, the catalog, the score cache, and the clock used to stamp and
/// age cached records.
pub struct MatchEngine<P, J, C, S, K = SystemClock>
where
    P: CandidateProfileProvider,
    J: JobProvider,
    C: CatalogProvider,
    S: ScoreCache,
    K: Clock,
{
    candidates: P,
    jobs: J,
    catalog: C,
    cache: S,
    clock: K,
    basic: BasicMatchCalculator,
    smart: SmartMatchCalculator,
    config: EngineConfig,
    pool: Option<rayon::ThreadPool>,
}

/// Outcome of scoring one job inside a batch.
enum JobOutcome<T> {
    Scored(T),
    Skipped(SkippedJob),
    Cancelled,
}

impl<P, J, C, S> MatchEngine<P, J, C, S>
where
    P: CandidateProfileProvider,
    J: JobProvider,
    C: CatalogProvider,
    S: ScoreCache,
{
    /// Construct an engine with default configuration and the system clock.
    #[must_use]
    pub fn new(candidates: P, jobs: J, catalog: C, cache: S) -> Self {
        Self {
            candidates,
            jobs,
            catalog,
            cache,
            clock: SystemClock,
            basic: BasicMatchCalculator::default(),
            smart: SmartMatchCalculator::default(),
            config: EngineConfig::default(),
            pool: None,
        }
    }

    /// Construct an engine with explicit configuration.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] when a calculator configuration is
    /// invalid and [`EngineError::ThreadPool`] when the dedicated worker pool
    /// cannot start.
    pub fn with_config(
        candidates: P,
        jobs: J,
        catalog: C,
        cache: S,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let validated = config.validate()?;
        let pool = validated.worker_threads.map(build_pool).transpose()?;
        Ok(Self {
            candidates,
            jobs,
            catalog,
            cache,
            clock: SystemClock,
            basic: BasicMatchCalculator::new(validated.basic)?,
            smart: SmartMatchCalculator::new(validated.smart)?,
            config: validated,
            pool,
        })
    }
}

impl<P, J, C, S, K> MatchEngine<P, J, C, S, K>
where
    P: CandidateProfileProvider,
    J: JobProvider,
    C: CatalogProvider,
    S: ScoreCache,
    K: Clock,
{
    /// Replace the clock used to stamp and age cached records.
    #[must_use]
    pub fn with_clock<K2: Clock>(self, clock: K2) -> MatchEngine<P, J, C, S, K2> {
        MatchEngine {
            candidates: self.candidates,
            jobs: self.jobs,
            catalog: self.catalog,
            cache: self.cache,
            clock,
            basic: self.basic,
            smart: self.smart,
            config: self.config,
            pool: self.pool,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score cache the engine writes through.
    #[must_use]
    pub const fn cache(&self) -> &S {
        &self.cache
    }

    /// Compute the Basic Match for one pair and write it to the cache.
    ///
    /// The job is scored even when its posting is closed.
    ///
    /// # Errors
    /// Returns [`MatchError::NotFound`] for an unknown candidate or job and
    /// [`MatchError::Cache`] when the cache write fails.
    pub fn compute_basic_match(
        &self,
        candidate: CandidateId,
        job: JobId,
    ) -> Result<BasicMatchResult, MatchError> {
        let profile = self.profile(candidate)?;
        self.score_basic(&profile, job, JobScope::Explicit)
    }

    /// Recompute and cache the Basic Match for every active job.
    ///
    /// # Errors
    /// Returns [`MatchError::NotFound`] for an unknown candidate and
    /// propagates failures of the active-job listing. Per-job failures are
    /// reported in [`BatchReport::skipped`].
    pub fn recompute_all_for_candidate(
        &self,
        candidate: CandidateId,
    ) -> Result<BatchReport<BasicMatchResult>, MatchError> {
        self.recompute_all_for_candidate_with(candidate, &CancellationToken::new())
    }

    /// [`Self::recompute_all_for_candidate`] with cooperative cancellation.
    ///
    /// Records written before cancellation are kept.
    ///
    /// # Errors
    /// As [`Self::recompute_all_for_candidate`].
    pub fn recompute_all_for_candidate_with(
        &self,
        candidate: CandidateId,
        cancel: &CancellationToken,
    ) -> Result<BatchReport<BasicMatchResult>, MatchError> {
        self.run_batch(candidate, cancel, |profile, job| {
            self.score_basic(profile, job, JobScope::Listed)
        })
    }

    /// Cached records for `candidate`, best score first.
    ///
    /// When nothing is cached or any record is older than
    /// [`EngineConfig::max_cache_age`], every active job is recomputed first.
    /// Stale records the batch did not reach, such as closed jobs scored on
    /// direct request, are rescored one by one; records whose job no longer
    /// exists are removed from the cache.
    ///
    /// # Errors
    /// Returns [`MatchError::Cache`] when the cache fails and
    /// [`MatchError::NotFound`] when a refresh is needed for an unknown
    /// candidate.
    pub fn get_cached_matches(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, MatchError> {
        let cached = self.cache.records_for_candidate(candidate)?;
        let now = self.clock.now();
        let stale = cached
            .iter()
            .filter(|record| record.is_stale(now, self.config.max_cache_age))
            .count();
        let mut records = if cached.is_empty() || stale > 0 {
            log::debug!(
                "refreshing cached matches for {candidate}: {} cached, {stale} stale",
                cached.len()
            );
            let report = self.recompute_all_for_candidate(candidate)?;
            if !report.skipped.is_empty() {
                log::warn!(
                    "refresh for {candidate} skipped {} jobs",
                    report.skipped.len()
                );
            }
            self.refresh_stragglers(candidate)?
        } else {
            cached
        };
        records.sort_by_key(|record| (Reverse(record.score_total), record.job_id));
        Ok(records)
    }

    /// Compute the Smart Match for one pair. Smart Match is never cached.
    ///
    /// # Errors
    /// Returns [`MatchError::NotFound`] for an unknown candidate or job.
    pub fn compute_smart_match(
        &self,
        candidate: CandidateId,
        job: JobId,
    ) -> Result<SmartMatchResult, MatchError> {
        let profile = self.profile(candidate)?;
        self.score_smart(&profile, job, JobScope::Explicit)
    }

    /// Smart Match against every active job, best total first, truncated to
    /// `limit` items.
    ///
    /// # Errors
    /// As [`Self::recompute_all_for_candidate`].
    pub fn compute_smart_matches_for_candidate(
        &self,
        candidate: CandidateId,
        limit: usize,
    ) -> Result<BatchReport<SmartMatchResult>, MatchError> {
        self.compute_smart_matches_for_candidate_with(candidate, limit, &CancellationToken::new())
    }

    /// [`Self::compute_smart_matches_for_candidate`] with cooperative
    /// cancellation.
    ///
    /// # Errors
    /// As [`Self::recompute_all_for_candidate`].
    pub fn compute_smart_matches_for_candidate_with(
        &self,
        candidate: CandidateId,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<BatchReport<SmartMatchResult>, MatchError> {
        let mut report = self.run_batch(candidate, cancel, |profile, job| {
            self.score_smart(profile, job, JobScope::Listed)
        })?;
        report
            .items
            .sort_by_key(|result| (Reverse(result.score_total), result.job_id));
        report.items.truncate(limit);
        Ok(report)
    }

    fn profile(&self, candidate: CandidateId) -> Result<CandidateProfile, MatchError> {
        resolve_candidate_profile(&self.candidates, &self.catalog, candidate)
    }

    fn score_basic(
        &self,
        profile: &CandidateProfile,
        job: JobId,
        scope: JobScope,
    ) -> Result<BasicMatchResult, MatchError> {
        self.store_basic(profile, job, scope).map(|(result, _)| result)
    }

    fn store_basic(
        &self,
        profile: &CandidateProfile,
        job: JobId,
        scope: JobScope,
    ) -> Result<(BasicMatchResult, MatchScoreRecord), MatchError> {
        let (requirements, _) = resolve_job(&self.jobs, job, scope)?;
        let result = self.basic.compute(&self.catalog, profile, &requirements);
        let record = MatchScoreRecord::from_result(&result, self.clock.now());
        self.cache.upsert(record.clone())?;
        Ok((result, record))
    }

    /// Rescore records left stale after a batch refresh.
    fn refresh_stragglers(
        &self,
        candidate: CandidateId,
    ) -> Result<Vec<MatchScoreRecord>, MatchError> {
        let now = self.clock.now();
        let max_age = self.config.max_cache_age;
        let cached = self.cache.records_for_candidate(candidate)?;
        if !cached.iter().any(|record| record.is_stale(now, max_age)) {
            return Ok(cached);
        }

        let profile = self.profile(candidate)?;
        let mut refreshed = Vec::with_capacity(cached.len());
        for record in cached {
            if !record.is_stale(now, max_age) {
                refreshed.push(record);
                continue;
            }
            match self.store_basic(&profile, record.job_id, JobScope::Explicit) {
                Ok((_, fresh)) => refreshed.push(fresh),
                Err(error) if error.is_not_found() => {
                    log::info!("dropping cached score for {}: {error}", record.key());
                    self.cache.remove(record.key())?;
                }
                Err(error) => return Err(error),
            }
        }
        Ok(refreshed)
    }

    fn score_smart(
        &self,
        profile: &CandidateProfile,
        job: JobId,
        scope: JobScope,
    ) -> Result<SmartMatchResult, MatchError> {
        let (requirements, metadata) = resolve_job(&self.jobs, job, scope)?;
        Ok(self
            .smart
            .compute(&self.catalog, profile, &requirements, &metadata))
    }

    fn run_batch<T, F>(
        &self,
        candidate: CandidateId,
        cancel: &CancellationToken,
        score: F,
    ) -> Result<BatchReport<T>, MatchError>
    where
        T: Send,
        F: Fn(&CandidateProfile, JobId) -> Result<T, MatchError> + Sync,
    {
        let profile = self.profile(candidate)?;
        let jobs = self.jobs.active_jobs()?;
        log::info!("scoring {} active jobs for {candidate}", jobs.len());

        let outcomes: Vec<JobOutcome<T>> = self.install(|| {
            jobs.par_iter()
                .map(|&job| {
                    if cancel.is_cancelled() {
                        return JobOutcome::Cancelled;
                    }
                    match score(&profile, job) {
                        Ok(item) => JobOutcome::Scored(item),
                        Err(error) => {
                            log::warn!("skipping {job} for {candidate}: {error}");
                            JobOutcome::Skipped(SkippedJob { job_id: job, error })
                        }
                    }
                })
                .collect()
        });

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                JobOutcome::Scored(item) => report.items.push(item),
                JobOutcome::Skipped(skip) => report.skipped.push(skip),
                JobOutcome::Cancelled => report.cancelled = true,
            }
        }
        if report.cancelled {
            log::info!(
                "batch for {candidate} cancelled after {} of {} jobs",
                report.items.len() + report.skipped.len(),
                jobs.len()
            );
        }
        log::info!(
            "scored {} jobs for {candidate}, skipped {}",
            report.items.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn install<R, F>(&self, work: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}

fn build_pool(threads: std::num::NonZeroUsize) -> Result<rayon::ThreadPool, EngineError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(|index| format!("accessmatch-worker-{index}"))
        .build()
        .map_err(|source| EngineError::ThreadPool {
            threads: threads.get(),
            source,
        })
}
