//! Terminal repeat session
//!
//! Runs a [`PlaybackController`] on a tokio current-thread loop. Media
//! progress, timer firings and fetched verses all arrive on one channel and
//! are handed to the player one at a time, so the controller never sees two
//! events at once.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tilawa_core::{audio_url_with_base, Track, Verse, VerseKey};
use tilawa_playback::{
    AudioPlayer, FinishReason, MediaElement, MediaError, MediaEvent, NavigationHost,
    PlaybackController, PlaybackState, PlayerEvent, RepeatDraft, Scheduler, TimerTicket,
};
use tilawa_verses::{CacheKey, VerseCache, VerseClient};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Interval between simulated `TimeUpdate` events
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the session loop reacts to
#[derive(Debug)]
pub enum SessionEvent {
    /// Media progress, tagged with the source it belongs to
    Media { epoch: u64, event: MediaEvent },

    /// A scheduled controller ticket came due
    Timer(TimerTicket),

    /// Verse fetch finished
    VerseFetched {
        key: VerseKey,
        result: std::result::Result<Verse, String>,
    },
}

type EventSender = mpsc::UnboundedSender<SessionEvent>;

// ===== Media =====

/// Media element that "plays" a source by sleeping for its duration
pub struct SimulatedMedia {
    events: EventSender,
    duration: Duration,
    source: Option<String>,
    position: Duration,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    pub fn new(events: EventSender, duration: Duration) -> Self {
        Self {
            events,
            duration,
            source: None,
            position: Duration::ZERO,
            epoch: 0,
            task: None,
        }
    }

    /// Source generation; events from older sources are stale
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Record progress reported by the playback task
    pub fn note_position(&mut self, position_sec: f64) {
        self.position = Duration::from_secs_f64(position_sec.max(0.0));
    }

    fn halt(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, src: &str) {
        self.halt();
        self.epoch += 1;
        self.source = Some(src.to_string());
        self.position = Duration::ZERO;

        let _ = self.events.send(SessionEvent::Media {
            epoch: self.epoch,
            event: MediaEvent::LoadedMetadata {
                duration_sec: self.duration.as_secs_f64(),
            },
        });
    }

    fn play(&mut self) -> std::result::Result<(), MediaError> {
        let Some(source) = self.source.as_deref() else {
            return Err(MediaError::Source("no source loaded".to_string()));
        };
        if source.is_empty() {
            return Err(MediaError::Source("empty source URL".to_string()));
        }

        self.halt();
        let events = self.events.clone();
        let epoch = self.epoch;
        let duration = self.duration;
        let mut position = self.position.min(duration);

        self.task = Some(tokio::spawn(async move {
            while position < duration {
                let step = TIME_UPDATE_INTERVAL.min(duration - position);
                tokio::time::sleep(step).await;
                position += step;
                let update = MediaEvent::TimeUpdate {
                    position_sec: position.as_secs_f64(),
                };
                if events.send(SessionEvent::Media { epoch, event: update }).is_err() {
                    return;
                }
            }
            let _ = events.send(SessionEvent::Media {
                epoch,
                event: MediaEvent::Ended,
            });
        }));
        Ok(())
    }

    fn pause(&mut self) {
        self.halt();
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.halt();
        self.position = Duration::from_secs_f64(seconds.max(0.0)).min(self.duration);
    }
}

// ===== Scheduler =====

/// Scheduler backed by `tokio::time::sleep` tasks
pub struct TokioScheduler {
    events: EventSender,
    timers: HashMap<TimerTicket, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            timers: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        self.timers.retain(|_, handle| !handle.is_finished());

        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::Timer(ticket));
        });
        self.timers.insert(ticket, handle);
    }

    fn cancel(&mut self, ticket: TimerTicket) {
        if let Some(handle) = self.timers.remove(&ticket) {
            handle.abort();
        }
    }
}

// ===== Navigation =====

/// Verse source used by the host
pub enum VerseSource {
    /// Fetch from the verse API through the cache
    Remote(Arc<VerseClient>),

    /// Synthesize empty verses locally
    Offline,
}

/// Navigation host walking one surah
///
/// Moves are synchronous; the verse itself resolves from the cache, or
/// arrives later as [`SessionEvent::VerseFetched`].
pub struct SurahHost {
    surah: u32,
    verse_count: u32,
    current: u32,
    resolved: Option<Track>,

    cache: Arc<VerseCache>,
    source: VerseSource,
    language: String,

    reciter: String,
    reciter_name: String,
    cdn_base: String,

    events: EventSender,
}

impl SurahHost {
    pub fn new(
        config: &CliConfig,
        surah: u32,
        verse_count: u32,
        start_verse: u32,
        cache: Arc<VerseCache>,
        source: VerseSource,
        events: EventSender,
    ) -> Self {
        Self {
            surah,
            verse_count,
            current: start_verse.clamp(1, verse_count.max(1)),
            resolved: None,
            cache,
            source,
            language: config.verses.language.clone(),
            reciter: config.playback.reciter.clone(),
            reciter_name: config.playback.reciter_name.clone(),
            cdn_base: config.playback.cdn_base.clone(),
            events,
        }
    }

    pub fn current_key(&self) -> Result<VerseKey> {
        Ok(VerseKey::new(self.surah, self.current)?)
    }

    /// Resolve the current verse, waiting for the network if needed
    pub async fn resolve_now(&mut self) -> Result<Track> {
        let key = self.current_key()?;
        let verse = match &self.source {
            VerseSource::Remote(client) => {
                client
                    .fetch_verse_cached(&self.cache, key, &self.language)
                    .await?
            }
            VerseSource::Offline => self.offline_verse(key),
        };
        let track = self.track_for(&verse)?;
        self.resolved = Some(track.clone());
        Ok(track)
    }

    /// A fetch completed; returns the track if it is still the current verse
    pub fn accept(&mut self, key: VerseKey, verse: Verse) -> Option<Track> {
        if key.ayah() != self.current || key.surah() != self.surah {
            debug!(%key, "Fetched verse is no longer current");
            return None;
        }
        match self.track_for(&verse) {
            Ok(track) => {
                self.resolved = Some(track.clone());
                Some(track)
            }
            Err(e) => {
                warn!(%key, error = %e, "Cannot build track for verse");
                None
            }
        }
    }

    /// Cached text of the verse a track recites
    pub fn verse_text(&self, track: &Track) -> Option<String> {
        let key = track.verse_key()?;
        self.cache
            .get(CacheKey::for_verse(key, &self.language))
            .map(|verse| verse.text)
            .filter(|text| !text.is_empty())
    }

    fn resolve_in_background(&mut self) {
        self.resolved = None;
        let Ok(key) = VerseKey::new(self.surah, self.current) else {
            return;
        };

        if let Some(verse) = self.cache.get(CacheKey::for_verse(key, &self.language)) {
            debug!(%key, "Verse cache hit");
            self.resolved = self.track_for(&verse).ok();
            return;
        }

        match &self.source {
            VerseSource::Offline => {
                let verse = self.offline_verse(key);
                self.resolved = self.track_for(&verse).ok();
            }
            VerseSource::Remote(client) => {
                let client = Arc::clone(client);
                let cache = Arc::clone(&self.cache);
                let language = self.language.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = client
                        .fetch_verse_cached(&cache, key, &language)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = events.send(SessionEvent::VerseFetched { key, result });
                });
            }
        }
    }

    fn offline_verse(&self, key: VerseKey) -> Verse {
        let verse = Verse {
            id: 0,
            verse_key: key,
            verse_number: key.ayah(),
            text: String::new(),
            audio_url: None,
        };
        self.cache
            .insert(CacheKey::for_verse(key, &self.language), verse.clone());
        verse
    }

    fn track_for(&self, verse: &Verse) -> Result<Track> {
        let src = match &verse.audio_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => audio_url_with_base(&self.cdn_base, &verse.verse_key.to_string(), &self.reciter)?,
        };
        Ok(Track::for_verse(verse.verse_key, self.reciter_name.clone(), "", src))
    }
}

impl NavigationHost for SurahHost {
    fn current_track(&self) -> Option<Track> {
        self.resolved.clone()
    }

    fn on_next(&mut self) -> bool {
        if self.current >= self.verse_count {
            return false;
        }
        self.current += 1;
        self.resolve_in_background();
        true
    }

    fn on_prev(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        self.resolve_in_background();
        true
    }
}

// ===== Session =====

pub type SessionPlayer = AudioPlayer<SimulatedMedia, SurahHost, TokioScheduler>;

/// What to play
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub surah: u32,
    pub verse_count: u32,
    pub start_verse: u32,
    pub repeat: RepeatDraft,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub verses_played: usize,
    pub finish_reason: Option<FinishReason>,
}

/// Run one session until playback ends or the user interrupts it
pub async fn run(config: &CliConfig, request: PlayRequest) -> Result<SessionSummary> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let source = if config.verses.offline {
        VerseSource::Offline
    } else {
        VerseSource::Remote(Arc::new(VerseClient::new(&config.verses.api_base)?))
    };
    let cache = Arc::new(VerseCache::new());
    let mut host = SurahHost::new(
        config,
        request.surah,
        request.verse_count,
        request.start_verse,
        cache,
        source,
        tx.clone(),
    );
    let first = host.resolve_now().await?;

    let media = SimulatedMedia::new(tx.clone(), config.playback.verse_duration());
    let scheduler = TokioScheduler::new(tx);
    let controller = PlaybackController::new(media, host, scheduler)
        .with_advance_timeout(config.playback.advance_timeout());

    let mut player = AudioPlayer::new(controller);
    player.set_repeat_options(|_| request.repeat)?;
    info!(
        surah = request.surah,
        start_verse = request.start_verse,
        mode = ?player.repeat_options().mode,
        "Starting session"
    );

    let mut summary = SessionSummary {
        verses_played: 0,
        finish_reason: None,
    };

    player.play_verse(first)?;

    loop {
        report(&mut player, &mut summary);
        if !player.is_player_visible() {
            break;
        }

        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    return Err(CliError::Config("event channel closed".to_string()));
                };
                dispatch(&mut player, event);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, closing player");
                player.close_player();
            }
        }
    }

    report(&mut player, &mut summary);
    Ok(summary)
}

fn dispatch(player: &mut SessionPlayer, event: SessionEvent) {
    match event {
        SessionEvent::Media { epoch, event } => {
            if epoch != player.controller().media().epoch() {
                debug!(epoch, "Dropping event from previous source");
                return;
            }
            if let MediaEvent::TimeUpdate { position_sec } = event {
                player.controller_mut().media_mut().note_position(position_sec);
            }
            player.handle_media_event(event);
        }
        SessionEvent::Timer(ticket) => player.on_timer(ticket),
        SessionEvent::VerseFetched { key, result } => match result {
            Ok(verse) => {
                let track = player.controller_mut().navigation_mut().accept(key, verse);
                if let Some(track) = track {
                    player.set_track(Some(track));
                }
            }
            Err(message) => warn!(%key, error = %message, "Verse fetch failed"),
        },
    }
}

fn report(player: &mut SessionPlayer, summary: &mut SessionSummary) {
    for event in player.drain_events() {
        match event {
            PlayerEvent::StateChanged { state } => {
                if state == PlaybackState::Playing {
                    summary.verses_played += 1;
                    announce(player);
                }
            }
            PlayerEvent::RepeatDecided { track_id, action } => {
                debug!(%track_id, ?action, "Repeat decision");
            }
            PlayerEvent::PlaybackFinished { reason } => {
                info!(?reason, "Session finished");
                summary.finish_reason = Some(reason);
            }
            PlayerEvent::Error { message } => warn!(%message, "Playback error"),
            PlayerEvent::TrackChanged { .. } => {}
        }
    }
}

fn announce(player: &SessionPlayer) {
    let now_playing = player.now_playing();
    let timing = player.timing();
    println!(
        "> {} - {} [{}]",
        now_playing.title, now_playing.artist, timing.total_label
    );

    let text = player
        .controller()
        .current_track()
        .and_then(|track| player.controller().navigation().verse_text(track));
    if let Some(text) = text {
        println!("  {}", text);
    }
}
