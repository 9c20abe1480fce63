//! Audio player context
//!
//! The surface the UI talks to: transport, validated repeat options,
//! player visibility and display data, on top of a [`PlaybackController`].

use crate::controller::PlaybackController;
use crate::error::{ConfigError, Result};
use crate::events::PlayerEvent;
use crate::media::{MediaElement, MediaEvent};
use crate::navigation::NavigationHost;
use crate::scheduler::{Scheduler, TimerTicket};
use crate::settings::{RepeatDraft, RepeatSettings};
use crate::timing::{NowPlaying, TimingSnapshot};
use crate::types::RepeatConfiguration;
use crate::visibility::PlayerVisibility;
use tilawa_core::Track;

/// Player context shared by the UI
pub struct AudioPlayer<M, N, S> {
    controller: PlaybackController<M, N, S>,
    settings: RepeatSettings,
    visibility: PlayerVisibility,
}

impl<M, N, S> AudioPlayer<M, N, S>
where
    M: MediaElement,
    N: NavigationHost,
    S: Scheduler,
{
    pub fn new(controller: PlaybackController<M, N, S>) -> Self {
        Self::with_settings(controller, RepeatSettings::default())
    }

    /// Start from previously applied repeat settings
    pub fn with_settings(
        mut controller: PlaybackController<M, N, S>,
        settings: RepeatSettings,
    ) -> Self {
        controller.set_configuration(*settings.current());
        Self {
            controller,
            settings,
            visibility: PlayerVisibility::new(),
        }
    }

    // ===== Transport =====

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        self.controller.toggle_play()
    }

    pub fn set_seek(&mut self, seconds: f64) -> Result<()> {
        self.controller.set_seek(seconds)
    }

    /// Play a verse chosen by the user, opening the player
    pub fn play_verse(&mut self, track: Track) -> Result<()> {
        self.visibility.open_player();
        let result = self.controller.play_verse(track);
        self.sync_visibility();
        result
    }

    // ===== Repeat options =====

    pub fn repeat_options(&self) -> &RepeatConfiguration {
        self.settings.current()
    }

    /// Apply the options produced by `updater`
    ///
    /// On rejection the previous options stay active and the error is kept
    /// for inline display until the next successful apply.
    pub fn set_repeat_options<F>(
        &mut self,
        updater: F,
    ) -> std::result::Result<RepeatConfiguration, ConfigError>
    where
        F: FnOnce(&RepeatConfiguration) -> RepeatDraft,
    {
        let config = self.settings.update(updater)?;
        self.controller.set_configuration(config);
        Ok(config)
    }

    pub fn repeat_error(&self) -> Option<&ConfigError> {
        self.settings.error()
    }

    /// Draft to prefill the repeat dialog with, range clamped to the surah
    pub fn open_repeat_dialog(&self, verse_count: Option<u32>) -> (RepeatDraft, bool) {
        self.settings.open_draft(verse_count)
    }

    // ===== Visibility =====

    pub fn is_player_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn open_player(&mut self) {
        self.visibility.open_player();
    }

    pub fn close_player(&mut self) {
        self.visibility.close_player(&mut self.controller);
    }

    // ===== Host callbacks =====

    pub fn set_track(&mut self, track: Option<Track>) {
        self.controller.set_track(track);
        self.sync_visibility();
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.controller.handle_media_event(event);
        self.sync_visibility();
    }

    pub fn on_timer(&mut self, ticket: TimerTicket) {
        self.controller.on_timer(ticket);
        self.sync_visibility();
    }

    // ===== Display =====

    pub fn timing(&self) -> TimingSnapshot {
        self.controller.timing()
    }

    pub fn now_playing(&self) -> NowPlaying {
        self.controller.now_playing()
    }

    pub fn controller(&self) -> &PlaybackController<M, N, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<M, N, S> {
        &mut self.controller
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.controller.drain_events()
    }

    /// Playback that ended by itself also hides the player
    fn sync_visibility(&mut self) {
        if self.controller.take_finished() {
            self.visibility.hide();
        }
    }
}
