//! Player Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the controller and drained by the UI layer:
//! - State changes
//! - Track changes
//! - Repeat decisions
//! - End of playback
//! - Recoverable errors

use crate::policy::RepeatAction;
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Why playback came to a stop on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Repeat counters ran out
    RepeatsExhausted,

    /// Navigation reported no further verse
    EndOfContent,

    /// Navigation failed while wrapping back to the cycle start
    WrapInterrupted,

    /// The host never produced the next track
    AdvanceTimedOut,
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track was loaded
    TrackChanged {
        /// ID of the new track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Repeat policy decided what follows the verse that ended
    RepeatDecided {
        /// ID of the verse that ended
        track_id: String,
        /// Chosen action
        action: RepeatAction,
    },

    /// Playback stopped by itself
    PlaybackFinished {
        /// Why it stopped
        reason: FinishReason,
    },

    /// Recoverable error (playback refused, seek without a track, ...)
    Error {
        /// Error message
        message: String,
    },
}
