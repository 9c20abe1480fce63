/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tilawa_core::DEFAULT_AUDIO_CDN;
use tilawa_playback::{settings, RepeatConfiguration, RepeatDraft, RepeatMode};
use tilawa_verses::DEFAULT_API_BASE;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tilawa.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_repeat")]
    pub repeat: RepeatDefaults,

    #[serde(default = "default_verses")]
    pub verses: VerseSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Reciter path on the audio CDN, or an absolute base URL
    #[serde(default = "default_reciter")]
    pub reciter: String,

    /// Reciter name shown as the track artist
    #[serde(default = "default_reciter_name")]
    pub reciter_name: String,

    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,

    /// How long to wait for the next verse to resolve before stopping
    #[serde(default = "default_advance_timeout_ms")]
    pub advance_timeout_ms: u64,

    /// Length of one simulated recitation
    #[serde(default = "default_verse_duration_ms")]
    pub verse_duration_ms: u64,
}

/// Repeat options applied at session start
///
/// Kept as raw numbers so they go through the same validation as
/// interactive input.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepeatDefaults {
    #[serde(default)]
    pub mode: RepeatMode,

    #[serde(default = "default_one")]
    pub start: f64,

    #[serde(default = "default_one")]
    pub end: f64,

    #[serde(default = "default_one")]
    pub play_count: f64,

    #[serde(default = "default_one")]
    pub repeat_each: f64,

    #[serde(default)]
    pub delay_ms: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerseSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Synthesize verses locally instead of calling the verse API
    #[serde(default)]
    pub offline: bool,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tilawa.toml` is read if
    /// present. Environment variables prefixed with `TILAWA_` override
    /// file values, with `__` between section and key
    /// (`TILAWA_PLAYBACK__RECITER`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TILAWA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Parse configuration from TOML text only
    pub fn from_toml(text: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.reciter.trim().is_empty() {
            return Err(CliError::Config(
                "Reciter is required (set TILAWA_PLAYBACK__RECITER)".to_string(),
            ));
        }

        if self.playback.advance_timeout_ms == 0 {
            return Err(CliError::Config(
                "advance_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.playback.verse_duration_ms == 0 {
            return Err(CliError::Config(
                "verse_duration_ms must be greater than 0".to_string(),
            ));
        }

        if self.verses.language.trim().is_empty() {
            return Err(CliError::Config("Language is required".to_string()));
        }

        self.repeat.validate()?;
        Ok(())
    }
}

impl PlaybackSettings {
    pub fn advance_timeout(&self) -> Duration {
        Duration::from_millis(self.advance_timeout_ms)
    }

    pub fn verse_duration(&self) -> Duration {
        Duration::from_millis(self.verse_duration_ms)
    }
}

impl RepeatDefaults {
    pub fn draft(&self) -> RepeatDraft {
        RepeatDraft {
            mode: self.mode,
            start: self.start,
            end: self.end,
            play_count: self.play_count,
            repeat_each: self.repeat_each,
            delay_ms: self.delay_ms,
        }
    }

    pub fn validate(&self) -> Result<RepeatConfiguration> {
        Ok(settings::validate(&self.draft())?)
    }
}

// Default values
fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        reciter: default_reciter(),
        reciter_name: default_reciter_name(),
        cdn_base: default_cdn_base(),
        advance_timeout_ms: default_advance_timeout_ms(),
        verse_duration_ms: default_verse_duration_ms(),
    }
}

fn default_reciter() -> String {
    "Alafasy_128kbps".to_string()
}

fn default_reciter_name() -> String {
    "Mishary Rashid Alafasy".to_string()
}

fn default_cdn_base() -> String {
    DEFAULT_AUDIO_CDN.to_string()
}

fn default_advance_timeout_ms() -> u64 {
    10_000
}

fn default_verse_duration_ms() -> u64 {
    4_000
}

fn default_repeat() -> RepeatDefaults {
    RepeatDefaults {
        mode: RepeatMode::default(),
        start: default_one(),
        end: default_one(),
        play_count: default_one(),
        repeat_each: default_one(),
        delay_ms: 0.0,
    }
}

fn default_one() -> f64 {
    1.0
}

fn default_verses() -> VerseSettings {
    VerseSettings {
        api_base: default_api_base(),
        language: default_language(),
        offline: false,
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            playback: default_playback(),
            repeat: default_repeat(),
            verses: default_verses(),
        }
    }
}
