//! Behavioural tests for `SqliteScoreCache` using rstest-bdd.

use std::{cell::RefCell, path::PathBuf, time::Duration};

use accessmatch_core::{
    CacheKey, CandidateId, JobId, MatchError, MatchScoreRecord, ScoreCache, SqliteScoreCache,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(86_400);

/// Shared state for score cache scenarios.
struct ScoreCacheWorld {
    temp_dir: TempDir,
    cache: RefCell<Option<SqliteScoreCache>>,
    fetched: RefCell<Option<Result<MatchScoreRecord, MatchError>>>,
}

impl ScoreCacheWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            cache: RefCell::new(None),
            fetched: RefCell::new(None),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("scores.db")
    }

    fn open(&self) {
        let cache = SqliteScoreCache::open(self.db_path()).expect("open score cache");
        self.cache.replace(Some(cache));
    }

    fn with_cache<T>(&self, action: impl FnOnce(&SqliteScoreCache) -> T) -> T {
        let borrowed = self.cache.borrow();
        let cache = borrowed
            .as_ref()
            .expect("cache should be opened before use");
        action(cache)
    }

    fn store(&self, candidate: u64, job: u64, score_total: u8) {
        let record = record(candidate, job, score_total);
        self.with_cache(|cache| cache.upsert(record))
            .expect("upsert record");
    }

    fn stored(&self, candidate: u64, job: u64) -> MatchScoreRecord {
        let key = CacheKey::new(CandidateId(candidate), JobId(job));
        self.with_cache(|cache| cache.fetch(key))
            .expect("record should be cached")
    }
}

fn computed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn record(candidate: u64, job: u64, score_total: u8) -> MatchScoreRecord {
    MatchScoreRecord {
        candidate_id: CandidateId(candidate),
        job_id: JobId(job),
        score_total,
        score_subtypes: 0,
        score_accessibilities: 50,
        resolved_count: 1,
        total_count: 2,
        breakdown: Vec::new(),
        compatible: false,
        computed_at: computed_at(),
    }
}

#[fixture]
fn world() -> ScoreCacheWorld {
    ScoreCacheWorld::new()
}

#[given("an empty SQLite score cache")]
fn given_empty_cache(world: &ScoreCacheWorld) {
    world.open();
}

#[when("a score of 30 is cached for candidate 1 and job 2")]
fn cache_low_score(world: &ScoreCacheWorld) {
    world.store(1, 2, 30);
}

#[when("a score of 80 is cached for candidate 1 and job 2")]
fn cache_high_score(world: &ScoreCacheWorld) {
    world.store(1, 2, 80);
}

#[when("the SQLite score cache is reopened")]
fn reopen_cache(world: &ScoreCacheWorld) {
    world.cache.replace(None);
    world.open();
}

#[when("the record for candidate 1 and job 3 is fetched")]
fn fetch_missing(world: &ScoreCacheWorld) {
    let key = CacheKey::new(CandidateId(1), JobId(3));
    let outcome = world.with_cache(|cache| cache.fetch(key));
    world.fetched.replace(Some(outcome));
}

#[then("candidate 1 has exactly one cached record")]
fn then_single_record(world: &ScoreCacheWorld) {
    let records = world
        .with_cache(|cache| cache.records_for_candidate(CandidateId(1)))
        .expect("list records");
    assert_eq!(records.len(), 1, "upsert should overwrite in place");
}

#[then("the cached score for candidate 1 and job 2 is 80")]
fn then_score_is_latest(world: &ScoreCacheWorld) {
    assert_eq!(world.stored(1, 2).score_total, 80);
}

#[then("the cached score for candidate 1 and job 2 is 30")]
fn then_score_survived(world: &ScoreCacheWorld) {
    assert_eq!(world.stored(1, 2).score_total, 30);
}

#[then("the cached record is fresh after 24 hours")]
fn then_fresh_after_a_day(world: &ScoreCacheWorld) {
    let stored = world.stored(1, 2);
    assert!(!stored.is_stale(computed_at() + TimeDelta::hours(24), DAY));
}

#[then("the cached record is stale after 25 hours")]
fn then_stale_after_a_day(world: &ScoreCacheWorld) {
    let stored = world.stored(1, 2);
    assert!(stored.is_stale(computed_at() + TimeDelta::hours(25), DAY));
}

#[then("the fetch fails because the match score was not found")]
fn then_fetch_not_found(world: &ScoreCacheWorld) {
    let binding = world.fetched.borrow();
    let outcome = binding.as_ref().expect("a fetch should be recorded");
    match outcome {
        Ok(found) => panic!("expected no record, found {found:?}"),
        Err(err) => assert!(err.is_not_found(), "unexpected error: {err}"),
    }
}

#[scenario(path = "tests/features/score_cache.feature", index = 0)]
fn recompute_overwrites(world: ScoreCacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/score_cache.feature", index = 1)]
fn stale_after_a_day(world: ScoreCacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/score_cache.feature", index = 2)]
fn missing_pair_not_found(world: ScoreCacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/score_cache.feature", index = 3)]
fn records_persist(world: ScoreCacheWorld) {
    let _ = world;
}
