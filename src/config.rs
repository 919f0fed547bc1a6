//! Batch configuration.
//!
//! Both option structs deserialize from partial documents: every missing field
//! takes its default. The processor can only be set to a named variant from a
//! file; custom processor functions are set in code.

use crate::error::{validate_score_cutoff, FuzzError, Result};
use crate::utils::Processor;
use serde::{Deserialize, Serialize};

/// Number of results `extract` returns unless told otherwise.
pub const DEFAULT_LIMIT: usize = 5;

/// Options for [`extract`](crate::process::extract) and friends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Maximum number of results; `None` returns every match.
    pub limit: Option<usize>,
    /// Inclusive lower bound on the score.
    pub score_cutoff: Option<f64>,
    /// Applied once to the query and once to every choice.
    pub processor: Option<Processor>,
    /// Size of a dedicated thread pool; `None` uses the global rayon pool.
    pub workers: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            score_cutoff: None,
            processor: None,
            workers: None,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_score_cutoff(mut self, score_cutoff: f64) -> Self {
        self.score_cutoff = Some(score_cutoff);
        self
    }

    #[must_use]
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = Some(processor);
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// # Errors
    ///
    /// [`FuzzError::InvalidScoreCutoff`] for a cutoff outside [0, 100] and
    /// [`FuzzError::InvalidInput`] for a zero-sized worker pool.
    pub fn validate(&self) -> Result<()> {
        validate_score_cutoff(self.score_cutoff)?;
        validate_workers(self.workers)
    }
}

/// Options for [`cdist`](crate::process::cdist).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CdistOptions {
    /// Cells scoring below this are written as `0.0`.
    pub score_cutoff: Option<f64>,
    pub processor: Option<Processor>,
    pub workers: Option<usize>,
}

impl CdistOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_score_cutoff(mut self, score_cutoff: f64) -> Self {
        self.score_cutoff = Some(score_cutoff);
        self
    }

    #[must_use]
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = Some(processor);
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// # Errors
    ///
    /// Same rules as [`ExtractOptions::validate`].
    pub fn validate(&self) -> Result<()> {
        validate_score_cutoff(self.score_cutoff)?;
        validate_workers(self.workers)
    }
}

fn validate_workers(workers: Option<usize>) -> Result<()> {
    match workers {
        Some(0) => Err(FuzzError::InvalidInput(
            "workers must be at least 1".to_string(),
        )),
        _ => Ok(()),
    }
}
