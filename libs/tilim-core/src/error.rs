//! Error types for tilim-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the core algorithms.
///
/// The scheduler and the evaluator are total for well-formed input; the only
/// failure is an out-of-range quality grade at the input boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("quality must be between 0 and 5, got {value}")]
    InvalidQuality { value: i64 },
}
