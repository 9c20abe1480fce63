//! Test doubles shared by the playback integration tests
#![allow(dead_code)]

use std::time::Duration;
use tilawa_core::{Track, VerseKey};
use tilawa_playback::{
    MediaElement, MediaError, NavigationHost, PlaybackController, Scheduler, TimerKind,
    TimerTicket,
};

pub type TestController = PlaybackController<RecordingMedia, SurahNavigator, ManualScheduler>;

// ===== Test Helpers =====

pub fn create_test_track(surah: u32, ayah: u32) -> Track {
    let key = VerseKey::new(surah, ayah).unwrap();
    Track::for_verse(
        key,
        "Test Reciter",
        "",
        format!("https://cdn.test/{}.mp3", key.padded_stem()),
    )
    .with_duration(5.0)
}

pub fn create_controller(verse_count: u32, start_ayah: u32) -> TestController {
    PlaybackController::new(
        RecordingMedia::default(),
        SurahNavigator::new(1, verse_count, start_ayah),
        ManualScheduler::default(),
    )
}

/// Deliver `Ended` for the current track
pub fn end_track(controller: &mut TestController) {
    controller.handle_media_event(tilawa_playback::MediaEvent::Ended);
}

/// Fire the most recently scheduled ticket
pub fn fire_latest(controller: &mut TestController) -> TimerTicket {
    let ticket = controller
        .scheduler()
        .latest()
        .expect("nothing was scheduled");
    controller.on_timer(ticket);
    ticket
}

// ===== Media =====

/// Media element that records every command
#[derive(Debug, Default)]
pub struct RecordingMedia {
    pub sources: Vec<String>,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub fail_play: Option<MediaError>,
}

impl MediaElement for RecordingMedia {
    fn set_source(&mut self, src: &str) {
        self.sources.push(src.to_string());
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if let Some(error) = self.fail_play.clone() {
            return Err(error);
        }
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.seeks.push(seconds);
    }
}

// ===== Navigation =====

/// One surah of `verse_count` verses
///
/// In deferred mode a move only updates the position; the track stays
/// unresolved until [`SurahNavigator::resolve`] is called, like a host
/// that still has to fetch the verse.
#[derive(Debug)]
pub struct SurahNavigator {
    pub surah: u32,
    pub verse_count: u32,
    pub current: u32,
    pub next_calls: usize,
    pub prev_calls: usize,
    pub deferred: bool,
    resolved: bool,
}

impl SurahNavigator {
    pub fn new(surah: u32, verse_count: u32, current: u32) -> Self {
        Self {
            surah,
            verse_count,
            current,
            next_calls: 0,
            prev_calls: 0,
            deferred: false,
            resolved: true,
        }
    }

    pub fn resolve(&mut self) -> Track {
        self.resolved = true;
        create_test_track(self.surah, self.current)
    }

    pub fn nav_calls(&self) -> usize {
        self.next_calls + self.prev_calls
    }
}

impl NavigationHost for SurahNavigator {
    fn current_track(&self) -> Option<Track> {
        self.resolved
            .then(|| create_test_track(self.surah, self.current))
    }

    fn on_next(&mut self) -> bool {
        self.next_calls += 1;
        if self.current >= self.verse_count {
            return false;
        }
        self.current += 1;
        self.resolved = !self.deferred;
        true
    }

    fn on_prev(&mut self) -> bool {
        self.prev_calls += 1;
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        self.resolved = !self.deferred;
        true
    }
}

// ===== Scheduler =====

/// Scheduler the test drives by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub scheduled: Vec<(TimerTicket, Duration)>,
    pub cancelled: Vec<TimerTicket>,
}

impl ManualScheduler {
    pub fn latest(&self) -> Option<TimerTicket> {
        self.scheduled.last().map(|(ticket, _)| *ticket)
    }

    pub fn count(&self, kind: TimerKind) -> usize {
        self.scheduled
            .iter()
            .filter(|(ticket, _)| ticket.kind == kind)
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        self.scheduled.push((ticket, delay));
    }

    fn cancel(&mut self, ticket: TimerTicket) {
        self.cancelled.push(ticket);
    }
}
