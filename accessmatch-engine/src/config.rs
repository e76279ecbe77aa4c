//! Engine configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use accessmatch_core::DEFAULT_MAX_CACHE_AGE;
use accessmatch_scorer::{BasicMatchConfig, SmartMatchConfig};

use crate::EngineError;

/// Configuration for [`MatchEngine`](crate::MatchEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Age after which a cached record is recomputed.
    pub max_cache_age: Duration,
    /// Size of a dedicated worker pool. `None` uses the global rayon pool.
    pub worker_threads: Option<NonZeroUsize>,
    /// Basic Match weights and threshold.
    pub basic: BasicMatchConfig,
    /// Smart Match weights, tiers, and thresholds.
    pub smart: SmartMatchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cache_age: DEFAULT_MAX_CACHE_AGE,
            worker_threads: None,
            basic: BasicMatchConfig::default(),
            smart: SmartMatchConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate both calculator configurations.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] when either calculator configuration
    /// is rejected.
    pub fn validate(self) -> Result<Self, EngineError> {
        self.basic.validate()?;
        self.smart.validate()?;
        Ok(self)
    }
}
