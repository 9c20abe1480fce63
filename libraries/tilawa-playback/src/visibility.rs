//! Player visibility
//!
//! Closing the player is also the global stop: it halts audio and cancels
//! anything the controller still has scheduled.

use crate::controller::PlaybackController;
use crate::media::MediaElement;
use crate::navigation::NavigationHost;
use crate::scheduler::Scheduler;
use tracing::debug;

/// Whether the player surface is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerVisibility {
    visible: bool,
}

impl PlayerVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the player (idempotent)
    pub fn open_player(&mut self) {
        if !self.visible {
            debug!("Player opened");
            self.visible = true;
        }
    }

    /// Hide the player and stop playback
    ///
    /// Any wrap or hand-off still pending in the controller is cancelled, so
    /// no navigation happens after this returns.
    pub fn close_player<M, N, S>(&mut self, controller: &mut PlaybackController<M, N, S>)
    where
        M: MediaElement,
        N: NavigationHost,
        S: Scheduler,
    {
        debug!("Player closed");
        self.visible = false;
        controller.stop();
    }

    /// Hide without touching playback (playback already ended by itself)
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_idempotent() {
        let mut visibility = PlayerVisibility::new();
        assert!(!visibility.is_visible());

        visibility.open_player();
        visibility.open_player();
        assert!(visibility.is_visible());

        visibility.hide();
        assert!(!visibility.is_visible());
    }
}
