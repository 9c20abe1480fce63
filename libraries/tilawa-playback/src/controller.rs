//! Playback controller - repeat/navigation orchestration
//!
//! Binds the media element's lifecycle events to repeat policy decisions,
//! issues play/pause/seek commands and calls into the navigation host.
//!
//! ```text
//! Idle -> Loaded -> Playing -> (ended) -> Deciding -> Playing        (replay / advance)
//!                                                  -> AwaitingTrack  (advance, track not resolved yet)
//!                                                  -> WrappingDelay  (wrap)
//!                                                  -> Finalizing     (navigation exhausted)
//!                                                  -> Idle           (stop)
//! WrappingDelay -> (timer) -> Playing | Idle
//! ```
//!
//! Single-threaded: every method runs to completion before the next event
//! is delivered. Deferred work goes through the [`Scheduler`]; at most one
//! operation is pending at a time and any reset invalidates it.

use crate::error::{MediaError, PlaybackError, Result};
use crate::events::{FinishReason, PlayerEvent};
use crate::media::{MediaElement, MediaEvent};
use crate::navigation::NavigationHost;
use crate::policy::{self, RepeatAction, RepeatProgress};
use crate::scheduler::{Scheduler, TimerKind, TimerTicket};
use crate::timing::{NowPlaying, TimingEngine, TimingSnapshot};
use crate::types::{Direction, PlaybackState, RepeatConfiguration, RepeatMode};
use std::time::Duration;
use tilawa_core::Track;
use tracing::{debug, info, warn};

/// Default bound on waiting for the host to resolve the next track
pub const DEFAULT_ADVANCE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Wrap { steps: u32 },
    Finalize { reason: FinishReason },
    AwaitTrack,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: TimerTicket,
    op: PendingOp,
}

/// Repeat-aware playback controller
///
/// Exclusively owns the media element. Reads the repeat configuration on
/// every decision, so settings changed mid-playback apply from the next
/// `Ended` event on.
pub struct PlaybackController<M, N, S> {
    media: M,
    navigation: N,
    scheduler: S,

    state: PlaybackState,
    track: Option<Track>,
    playing_id: Option<String>,
    loading_id: Option<String>,

    config: RepeatConfiguration,
    progress: RepeatProgress,
    timing: TimingEngine,

    // Deferred operation guard
    generation: u64,
    pending: Option<Pending>,
    advance_timeout: Duration,

    finished: bool,
    pending_events: Vec<PlayerEvent>,
}

impl<M, N, S> PlaybackController<M, N, S>
where
    M: MediaElement,
    N: NavigationHost,
    S: Scheduler,
{
    /// Create a controller in the `Idle` state
    pub fn new(media: M, navigation: N, scheduler: S) -> Self {
        let config = RepeatConfiguration::default();
        Self {
            media,
            navigation,
            scheduler,
            state: PlaybackState::Idle,
            track: None,
            playing_id: None,
            loading_id: None,
            config,
            progress: RepeatProgress::initial(&config),
            timing: TimingEngine::new(),
            generation: 0,
            pending: None,
            advance_timeout: DEFAULT_ADVANCE_TIMEOUT,
            finished: false,
            pending_events: Vec::new(),
        }
    }

    /// Override the bound on waiting for the next track
    pub fn with_advance_timeout(mut self, timeout: Duration) -> Self {
        self.advance_timeout = timeout;
        self
    }

    // ===== Configuration =====

    /// Replace the repeat configuration
    ///
    /// Progress restarts when the mode, `repeat_each` or `play_count` change.
    pub fn set_configuration(&mut self, config: RepeatConfiguration) {
        if self.config.resets_progress(&config) {
            self.progress = RepeatProgress::initial(&config);
            debug!(?config, "Repeat progress reset by configuration change");
        }
        self.config = config;
    }

    pub fn configuration(&self) -> &RepeatConfiguration {
        &self.config
    }

    pub fn progress(&self) -> RepeatProgress {
        self.progress
    }

    // ===== Track handling =====

    /// Host notification that its current item changed
    ///
    /// Resumes playback if the controller was playing or waiting for this
    /// track. `None` stops playback, except while waiting for the host to
    /// resolve a track (the advance timeout bounds that wait).
    pub fn set_track(&mut self, track: Option<Track>) {
        let Some(track) = track else {
            if self.state != PlaybackState::AwaitingTrack {
                self.stop();
            }
            return;
        };

        if self.track.as_ref().is_some_and(|t| t.id == track.id) {
            self.track = Some(track);
            return;
        }

        let was_active = matches!(
            self.state,
            PlaybackState::Playing | PlaybackState::AwaitingTrack
        );
        self.cancel_pending();
        self.load(track);
        if was_active {
            let _ = self.start_playback();
        }
    }

    /// User selected a verse to play
    ///
    /// Interrupts any repeat in progress: counters restart and pending
    /// wraps are cancelled.
    pub fn play_verse(&mut self, track: Track) -> Result<()> {
        info!(track_id = %track.id, "Playing verse");
        self.cancel_pending();
        self.progress = RepeatProgress::initial(&self.config);
        self.load(track);
        self.start_playback()
    }

    // ===== Transport =====

    /// Start or resume the current track
    pub fn play(&mut self) -> Result<()> {
        if self.track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.cancel_pending();
        self.start_playback()
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.media.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Play/pause toggle
    ///
    /// During a wrap delay or a pending hand-off the toggle interrupts the
    /// automation and leaves the player paused.
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Idle | PlaybackState::Loaded | PlaybackState::Paused => self.play(),
            PlaybackState::WrappingDelay
            | PlaybackState::AwaitingTrack
            | PlaybackState::Finalizing => {
                self.cancel_pending();
                self.media.pause();
                self.playing_id = None;
                let next = if self.track.is_some() {
                    PlaybackState::Paused
                } else {
                    PlaybackState::Idle
                };
                self.set_state(next);
                Ok(())
            }
            PlaybackState::Deciding => Ok(()),
        }
    }

    /// Seek within the current track (clamped to its duration)
    pub fn set_seek(&mut self, seconds: f64) -> Result<()> {
        if self.track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !seconds.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }

        let target = self.timing.clamp(seconds);
        self.media.set_current_time(target);
        self.timing.on_time_update(target);
        Ok(())
    }

    /// Stop playback and reset
    ///
    /// Pauses the media element, clears the playing, loading and active
    /// verse, and cancels any pending operation.
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.media.pause();
        self.playing_id = None;
        self.loading_id = None;
        self.track = None;
        self.timing.clear();
        self.progress = RepeatProgress::initial(&self.config);
        self.set_state(PlaybackState::Idle);
    }

    // ===== Media events =====

    /// Dispatch a media element event
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Ended => self.on_track_ended(),
            MediaEvent::LoadedMetadata { duration_sec } => {
                if self.track.is_some() {
                    self.timing.on_loaded_metadata(duration_sec);
                    self.loading_id = None;
                }
            }
            MediaEvent::TimeUpdate { position_sec } => {
                if self.track.is_some() {
                    self.timing.on_time_update(position_sec);
                }
            }
            MediaEvent::PlayRejected { error } => {
                if self.state == PlaybackState::Playing {
                    self.handle_play_failure(error);
                }
            }
        }
    }

    /// The current track finished playing
    ///
    /// Ignored while a wrap, final stop or track hand-off is pending so a
    /// late `Ended` can never double-advance.
    pub fn on_track_ended(&mut self) {
        if let Some(pending) = self.pending {
            debug!(op = ?pending.op, "Track ended while an operation is pending, ignoring");
            return;
        }
        if self.state != PlaybackState::Playing {
            debug!(state = ?self.state, "Track ended outside of playback, ignoring");
            return;
        }
        let Some(track_id) = self.track.as_ref().map(|t| t.id.clone()) else {
            return;
        };

        self.set_state(PlaybackState::Deciding);

        let position = self.current_position();
        let previous = self.progress;
        let decision = policy::decide(&self.config, self.progress, position);
        self.progress = decision.progress;

        debug!(
            track_id = %track_id,
            mode = ?self.config.mode,
            action = ?decision.action,
            progress = ?decision.progress,
            "Repeat decision"
        );
        self.emit(PlayerEvent::RepeatDecided {
            track_id: track_id.clone(),
            action: decision.action,
        });

        if self.execute(decision.action).is_err()
            && self.track.as_ref().map(|t| t.id.as_str()) == Some(track_id.as_str())
        {
            // The ended verse never restarted
            self.progress = previous;
        }
    }

    /// A scheduled ticket came due
    pub fn on_timer(&mut self, ticket: TimerTicket) {
        let Some(pending) = self.pending else {
            debug!(?ticket, "Stale timer ignored (nothing pending)");
            return;
        };
        if pending.ticket != ticket {
            debug!(?ticket, current = ?pending.ticket, "Stale timer ignored");
            return;
        }
        self.pending = None;

        match pending.op {
            PendingOp::Wrap { steps } => self.complete_wrap(steps),
            PendingOp::Finalize { reason } => self.finish(reason),
            PendingOp::AwaitTrack => {
                warn!(
                    timeout_ms = self.advance_timeout.as_millis() as u64,
                    "Next track never resolved, stopping"
                );
                self.finish(FinishReason::AdvanceTimedOut);
            }
        }
    }

    /// End playback because no further navigation is possible
    ///
    /// The stop is deferred by a zero-delay tick so that state updates the
    /// navigation attempt triggered settle before playback is cleared.
    pub fn finalize_playback(&mut self) {
        self.defer_finish(FinishReason::EndOfContent);
    }

    // ===== Observers =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// A wrap, final stop or track hand-off is scheduled
    pub fn has_pending_operation(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// ID of the verse currently playing
    pub fn playing_id(&self) -> Option<&str> {
        self.playing_id.as_deref()
    }

    /// ID of the verse whose metadata is still loading
    pub fn loading_id(&self) -> Option<&str> {
        self.loading_id.as_deref()
    }

    pub fn timing(&self) -> TimingSnapshot {
        self.timing.snapshot(self.track.is_some())
    }

    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying::from_track(self.track.as_ref())
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether playback stopped by itself since the last call
    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    /// Ayah number of the current track
    ///
    /// A track without a verse key cannot be placed in a range: treat it as
    /// the range end.
    fn current_position(&self) -> u32 {
        self.track
            .as_ref()
            .and_then(Track::verse_key)
            .map_or(self.config.end, |key| key.ayah())
    }

    /// Errors only when a `play()` was attempted and rejected
    fn execute(&mut self, action: RepeatAction) -> Result<()> {
        match action {
            RepeatAction::Replay => self.replay(),
            RepeatAction::Advance { direction } => self.advance(direction),
            RepeatAction::Wrap { steps, delay } => {
                self.begin_wrap(steps, delay);
                Ok(())
            }
            RepeatAction::Stop => {
                self.finish(FinishReason::RepeatsExhausted);
                Ok(())
            }
        }
    }

    fn replay(&mut self) -> Result<()> {
        self.media.set_current_time(0.0);
        self.timing.on_time_update(0.0);
        self.start_playback()
    }

    fn advance(&mut self, direction: Direction) -> Result<()> {
        let moved = match direction {
            Direction::Next => self.navigation.on_next(),
            Direction::Prev => self.navigation.on_prev(),
        };

        if !moved {
            debug!(?direction, "Navigation exhausted");
            if self.config.mode == RepeatMode::Surah && direction == Direction::Next {
                let decision = policy::handle_surah_boundary(
                    self.progress,
                    self.current_position(),
                    self.config.delay(),
                );
                self.progress = decision.progress;
                if let Some(track_id) = self.track.as_ref().map(|t| t.id.clone()) {
                    self.emit(PlayerEvent::RepeatDecided {
                        track_id,
                        action: decision.action,
                    });
                }
                match decision.action {
                    RepeatAction::Wrap { steps, delay } => self.begin_wrap(steps, delay),
                    _ => self.defer_finish(FinishReason::RepeatsExhausted),
                }
            } else {
                self.finalize_playback();
            }
            return Ok(());
        }

        self.resume_from_host(true)
    }

    fn begin_wrap(&mut self, steps: u32, delay: Duration) {
        info!(steps, delay_ms = delay.as_millis() as u64, "Wrapping to cycle start");
        self.set_state(PlaybackState::WrappingDelay);
        self.schedule(TimerKind::Wrap, PendingOp::Wrap { steps }, delay);
    }

    fn complete_wrap(&mut self, steps: u32) {
        for step in 0..steps {
            if !self.navigation.on_prev() {
                warn!(step, steps, "Navigation exhausted mid-wrap");
                self.finish(FinishReason::WrapInterrupted);
                return;
            }
        }
        let _ = self.resume_from_host(steps > 0);
    }

    /// Pick up the host's current track after a move
    ///
    /// With `require_change`, an unchanged current item means the host is
    /// still resolving the verse, so the controller waits (bounded).
    fn resume_from_host(&mut self, require_change: bool) -> Result<()> {
        let current_id = self.track.as_ref().map(|t| t.id.clone());

        match self.navigation.current_track() {
            Some(next) if current_id.as_deref() == Some(next.id.as_str()) && !require_change => {
                self.replay()
            }
            Some(next) if current_id.as_deref() != Some(next.id.as_str()) => {
                self.load(next);
                self.start_playback()
            }
            _ => {
                debug!("Waiting for host to resolve next track");
                self.set_state(PlaybackState::AwaitingTrack);
                self.schedule(
                    TimerKind::AdvanceTimeout,
                    PendingOp::AwaitTrack,
                    self.advance_timeout,
                );
                Ok(())
            }
        }
    }

    fn load(&mut self, track: Track) {
        let previous_track_id = self.track.as_ref().map(|t| t.id.clone());

        self.media.set_source(&track.src);
        self.timing.reset(track.duration_sec);
        self.loading_id = Some(track.id.clone());

        if previous_track_id.as_deref() != Some(track.id.as_str()) {
            self.emit(PlayerEvent::TrackChanged {
                track_id: track.id.clone(),
                previous_track_id,
            });
        }

        self.track = Some(track);
        self.set_state(PlaybackState::Loaded);
    }

    fn start_playback(&mut self) -> Result<()> {
        let Some(track_id) = self.track.as_ref().map(|t| t.id.clone()) else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        match self.media.play() {
            Ok(()) => {
                self.playing_id = Some(track_id);
                self.finished = false;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                self.handle_play_failure(e.clone());
                Err(e.into())
            }
        }
    }

    /// Non-fatal: no retry and no repeat counter changes
    fn handle_play_failure(&mut self, error: MediaError) {
        warn!(error = %error, "Playback failed");
        self.playing_id = None;
        self.set_state(PlaybackState::Loaded);
        self.emit(PlayerEvent::Error {
            message: error.to_string(),
        });
    }

    fn defer_finish(&mut self, reason: FinishReason) {
        self.set_state(PlaybackState::Finalizing);
        self.schedule(
            TimerKind::Finalize,
            PendingOp::Finalize { reason },
            Duration::ZERO,
        );
    }

    /// Playback ends by itself; the track stays selected for display
    ///
    /// Counters start over so a later `play()` runs a full session.
    fn finish(&mut self, reason: FinishReason) {
        info!(?reason, "Playback finished");
        self.cancel_pending();
        self.media.pause();
        self.playing_id = None;
        self.loading_id = None;
        self.progress = RepeatProgress::initial(&self.config);
        self.finished = true;
        self.set_state(PlaybackState::Idle);
        self.emit(PlayerEvent::PlaybackFinished { reason });
    }

    fn schedule(&mut self, kind: TimerKind, op: PendingOp, delay: Duration) {
        self.cancel_pending();
        let ticket = TimerTicket {
            generation: self.generation,
            kind,
        };
        self.pending = Some(Pending { ticket, op });
        self.scheduler.schedule(ticket, delay);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(op = ?pending.op, "Cancelling pending operation");
            self.scheduler.cancel(pending.ticket);
        }
        self.generation += 1;
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}
