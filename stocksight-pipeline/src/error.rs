//! Loader error types.
//!
//! Every way an input file can be unusable has a named variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
