//! Error types shared by the kernels, scorers and the batch engine.

use thiserror::Error;

/// Errors reported by rapidfuzz operations.
///
/// Every computation is deterministic, so none of these are transient: retrying
/// the same call with the same arguments fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzError {
    /// The inputs cannot be compared by the requested kernel.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The cost model is negative or not supported by the kernel.
    #[error("Invalid cost model: {0}")]
    InvalidCostModel(String),

    /// Score cutoffs must be finite and within [0, 100].
    #[error("score_cutoff must be a finite number in range [0, 100], got {0}")]
    InvalidScoreCutoff(f64),

    #[error("Unknown scorer: '{0}'")]
    UnknownScorer(String),

    /// A dedicated worker pool could not be created.
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    /// The caller raised the cancellation flag while a batch was running.
    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, FuzzError>;

/// Check that a score cutoff is usable.
pub(crate) fn validate_score_cutoff(score_cutoff: Option<f64>) -> Result<()> {
    match score_cutoff {
        Some(value) if !value.is_finite() || !(0.0..=100.0).contains(&value) => {
            Err(FuzzError::InvalidScoreCutoff(value))
        }
        _ => Ok(()),
    }
}
