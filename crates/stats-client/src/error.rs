//! Error types for stats-client

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching pages
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("error while fetching '{url}': HTTP {status}")]
    Status { url: String, status: u16 },

    /// Base URL or a built URL could not be parsed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector failed to parse
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Page body did not parse
    #[error(transparent)]
    Parse(#[from] stats_core::Error),
}
