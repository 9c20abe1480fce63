//! Platform-agnostic media element trait
//!
//! Abstracts the audio element the controller drives (an HTML audio
//! element in the browser, a decoder/output pair natively).

use crate::error::MediaError;
use serde::{Deserialize, Serialize};

/// Media element commands
///
/// The controller is the only component that issues these.
pub trait MediaElement {
    /// Load a new source; playback position returns to 0
    fn set_source(&mut self, src: &str);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback requested
    /// * `Err(_)` - Playback refused (autoplay blocked, decode error, ...)
    ///
    /// Refusals that surface later are reported as [`MediaEvent::PlayRejected`].
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pause playback
    fn pause(&mut self);

    /// Seek to `seconds` from the start of the source
    fn set_current_time(&mut self, seconds: f64);
}

/// Events delivered by the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Current source played to its end
    Ended,

    /// Source metadata is available
    LoadedMetadata { duration_sec: f64 },

    /// Periodic position update
    TimeUpdate { position_sec: f64 },

    /// A previously accepted `play()` request failed
    PlayRejected { error: MediaError },
}
