//! Stats error types.
//!
//! The numeric core has exactly one failure mode: a caller handed it input
//! over which the requested quantity is undefined. Every other edge case
//! (zero mean, single point, missing predictions) is a defined output.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StatsError::InvalidInput(reason.into())
    }
}

/// Result type alias for stats operations.
pub type StatsResult<T> = Result<T, StatsError>;
