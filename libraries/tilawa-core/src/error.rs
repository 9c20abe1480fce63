/// Core error types for Tilawa Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tilawa Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Verse key is not of the form `S:A`
    #[error("Invalid verse key: {0}")]
    InvalidVerseKey(String),

    /// Surah number outside 1..=114
    #[error("Surah out of range: {0}")]
    SurahOutOfRange(u32),

    /// Ayah number is zero
    #[error("Ayah out of range: {0}")]
    AyahOutOfRange(u32),

    /// Reciter path is empty
    #[error("Reciter path cannot be empty")]
    EmptyReciterPath,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create an invalid verse key error
    pub fn invalid_verse_key(key: impl Into<String>) -> Self {
        Self::InvalidVerseKey(key.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
