//! Navigation capability provided by the verse-navigation host
//!
//! The host owns the "current item". Moving it is synchronous from the
//! controller's point of view; the host may still need to fetch the verse
//! before it can produce the next [`Track`].

use tilawa_core::Track;

/// Host-side verse navigation
///
/// Both moves are optional capabilities: the defaults report that no move
/// happened. The controller never assumes a move succeeds.
pub trait NavigationHost {
    /// Current playable item, if resolved
    fn current_track(&self) -> Option<Track>;

    /// Move to the following verse; `false` at the boundary
    fn on_next(&mut self) -> bool {
        false
    }

    /// Move to the preceding verse; `false` at the boundary
    fn on_prev(&mut self) -> bool {
        false
    }
}

/// Host without navigation: plays whatever track it is handed
#[derive(Debug, Clone, Default)]
pub struct FixedTrack {
    track: Option<Track>,
}

impl FixedTrack {
    pub fn new(track: Option<Track>) -> Self {
        Self { track }
    }

    pub fn set(&mut self, track: Option<Track>) {
        self.track = track;
    }
}

impl NavigationHost for FixedTrack {
    fn current_track(&self) -> Option<Track> {
        self.track.clone()
    }
}
