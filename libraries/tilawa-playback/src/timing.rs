//! Playback timing and now-playing display
//!
//! Driven entirely by the media element's `timeupdate` / `loadedmetadata`
//! signals; every signal is reflected immediately.

use serde::{Deserialize, Serialize};
use tilawa_core::Track;

/// Fallback title when no track is loaded
pub const PLACEHOLDER_TITLE: &str = "No verse selected";

/// Fallback artist when no track is loaded
pub const PLACEHOLDER_ARTIST: &str = "Unknown reciter";

/// Fallback cover when no track is loaded or the track has none
pub const PLACEHOLDER_COVER: &str = "/images/cover-placeholder.png";

/// Format seconds as `m:ss`
///
/// Negative and non-finite input formats as `0:00`. Minutes are not capped,
/// so an hour renders as `60:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Transport timing as shown by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    pub elapsed_label: String,
    pub total_label: String,
    /// Transport controls are meaningful (track loaded with known duration)
    pub interactable: bool,
}

/// Position/duration tracker fed by media events
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingEngine {
    position_sec: f64,
    duration_sec: f64,
}

impl TimingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new track
    pub fn reset(&mut self, duration_sec: f64) {
        self.position_sec = 0.0;
        self.duration_sec = sanitize(duration_sec);
    }

    /// Forget everything (no track)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `loadedmetadata`: the media's own duration overrides the advertised one
    pub fn on_loaded_metadata(&mut self, duration_sec: f64) {
        self.duration_sec = sanitize(duration_sec);
        self.position_sec = self.clamp(self.position_sec);
    }

    /// `timeupdate`
    pub fn on_time_update(&mut self, position_sec: f64) {
        self.position_sec = self.clamp(sanitize(position_sec));
    }

    /// Clamp a seek target into the known duration
    pub fn clamp(&self, position_sec: f64) -> f64 {
        let position = sanitize(position_sec);
        if self.duration_sec > 0.0 {
            position.min(self.duration_sec)
        } else {
            position
        }
    }

    pub fn position_sec(&self) -> f64 {
        self.position_sec
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    /// Labels and interactability for the current state
    pub fn snapshot(&self, track_loaded: bool) -> TimingSnapshot {
        Self::current(self.position_sec, self.duration_sec, track_loaded)
    }

    /// Labels and interactability for an explicit position and duration
    pub fn current(position_sec: f64, duration_sec: f64, track_loaded: bool) -> TimingSnapshot {
        TimingSnapshot {
            elapsed_label: format_time(position_sec),
            total_label: format_time(duration_sec),
            interactable: track_loaded && duration_sec > 0.0,
        }
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Cover, title and artist of the current track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub cover: String,
    pub title: String,
    pub artist: String,
}

impl NowPlaying {
    /// Read-through from the track with placeholder fallbacks
    pub fn from_track(track: Option<&Track>) -> Self {
        match track {
            Some(track) => Self {
                cover: if track.cover_url.is_empty() {
                    PLACEHOLDER_COVER.to_string()
                } else {
                    track.cover_url.clone()
                },
                title: track.title.clone(),
                artist: track.artist.clone(),
            },
            None => Self {
                cover: PLACEHOLDER_COVER.to_string(),
                title: PLACEHOLDER_TITLE.to_string(),
                artist: PLACEHOLDER_ARTIST.to_string(),
            },
        }
    }
}
