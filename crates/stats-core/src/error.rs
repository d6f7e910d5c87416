//! Error types for stats-core

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stats-core
#[derive(Debug, Error)]
pub enum Error {
    /// A required pattern did not match, or its capture group was absent
    #[error("could not find match for '{pattern}' in '{line}'")]
    PatternNotFound { pattern: String, line: String },

    /// Table header column count differs from the declared layout
    #[error("table does not have the right amount of columns: '{actual}' instead of '{expected}'")]
    SchemaMismatch { expected: usize, actual: usize },

    /// A structural assumption about a page was violated
    #[error("could not parse page: {0}")]
    MalformedPage(String),

    /// Format identifier with the wrong number of segments
    #[error("not a valid format: '{line}', expecting between {min} and {max} sub-elements but got {actual}")]
    InvalidFormat {
        line: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Timeframe identifier with the wrong number of segments
    #[error("not a valid timeframe: '{line}', expecting between {min} and {max} sub-elements but got {actual}")]
    InvalidTimeframe {
        line: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
