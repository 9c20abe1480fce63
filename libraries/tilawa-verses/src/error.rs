//! Error types for verse fetching.

use thiserror::Error;

/// Errors that can occur while fetching verses.
#[derive(Error, Debug)]
pub enum VersesError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("Verse API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid verse key or other core validation failure
    #[error(transparent)]
    Core(#[from] tilawa_core::CoreError),
}

/// Result type for verse operations.
pub type Result<T> = std::result::Result<T, VersesError>;
