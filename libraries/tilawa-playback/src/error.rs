//! Error types for playback control

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing message for fractional repeat settings
pub const WHOLE_NUMBERS_ONLY: &str = "Please enter whole numbers only";

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Media element refused to play
    #[error("Media error: {0}")]
    Media(#[from] MediaError),
}

/// Failures reported by the media element
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaError {
    /// Autoplay blocked by the environment
    #[error("Playback was blocked before user interaction")]
    AutoplayBlocked,

    /// Source could not be decoded
    #[error("Failed to decode source: {0}")]
    Decode(String),

    /// Source could not be loaded
    #[error("Failed to load source: {0}")]
    Source(String),
}

/// Repeat configuration validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field holds a fractional or non-finite value
    #[error("{}", WHOLE_NUMBERS_ONLY)]
    NonInteger,

    /// A numeric field is outside its allowed range
    #[error("{field} must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        value: f64,
    },

    /// Range start is after range end
    #[error("Range start {start} is after range end {end}")]
    InvalidRange { start: u32, end: u32 },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
