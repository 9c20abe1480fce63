/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid repeat settings: {0}")]
    Repeat(#[from] tilawa_playback::ConfigError),

    #[error("Playback error: {0}")]
    Playback(#[from] tilawa_playback::PlaybackError),

    #[error("Verse error: {0}")]
    Verses(#[from] tilawa_verses::VersesError),

    #[error(transparent)]
    Core(#[from] tilawa_core::CoreError),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
