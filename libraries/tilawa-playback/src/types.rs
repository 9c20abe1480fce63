//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Continuous recitation, stop at end of content
    #[default]
    Off,

    /// Repeat the current verse
    Single,

    /// Repeat a verse range
    Range,

    /// Repeat the whole surah
    Surah,
}

/// Validated repeat configuration
///
/// Only ever constructed through validation (see [`crate::settings`]) or
/// [`Default`], so the controller can rely on `start >= 1`, `end >= start`,
/// `play_count >= 1` and `repeat_each >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatConfiguration {
    /// Repeat mode
    pub mode: RepeatMode,

    /// First verse of the range (1-based)
    pub start: u32,

    /// Last verse of the range (inclusive)
    pub end: u32,

    /// Number of cycles over the repeat unit
    pub play_count: u32,

    /// Plays of each verse within a cycle
    pub repeat_each: u32,

    /// Pause before wrapping to the next cycle
    pub delay_ms: u32,
}

impl RepeatConfiguration {
    /// Delay between cycles
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_ms))
    }

    /// Whether changing from `self` to `other` must reset repeat progress
    pub fn resets_progress(&self, other: &Self) -> bool {
        self.mode != other.mode
            || self.repeat_each != other.repeat_each
            || self.play_count != other.play_count
    }
}

impl Default for RepeatConfiguration {
    fn default() -> Self {
        Self {
            mode: RepeatMode::Off,
            start: 1,
            end: 1,
            play_count: 1,
            repeat_each: 1,
            delay_ms: 0,
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Following verse
    Next,

    /// Preceding verse
    Prev,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing and nothing pending
    Idle,

    /// Track set, not playing
    Loaded,

    /// Currently playing
    Playing,

    /// Paused mid-track by the user
    Paused,

    /// Consulting the repeat policy after a track ended
    Deciding,

    /// Waiting out the delay before wrapping to the cycle start
    WrappingDelay,

    /// Navigation moved but the host has not produced the next track yet
    AwaitingTrack,

    /// End of content reached, final stop deferred by one tick
    Finalizing,
}
