//! Sessions against a mock verse API
//!
//! These run in real time: the mock server does real socket IO, so the
//! recitations are kept to a few milliseconds each.

use tilawa_cli::config::CliConfig;
use tilawa_cli::session::{self, PlayRequest};
use tilawa_cli::CliError;
use tilawa_playback::{FinishReason, RepeatDraft, RepeatMode};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ===== Test Helpers =====

fn remote_config(server: &MockServer) -> CliConfig {
    let mut config = CliConfig::default();
    config.verses.api_base = server.uri();
    config.verses.offline = false;
    config.playback.verse_duration_ms = 20;
    config.playback.advance_timeout_ms = 300;
    config
}

fn verse_body(surah: u32, ayah: u32) -> serde_json::Value {
    serde_json::json!({
        "verse": {
            "id": 6200 + ayah,
            "verse_key": format!("{}:{}", surah, ayah),
            "verse_number": ayah,
            "text_uthmani": "إِنَّآ أَعْطَيْنَـٰكَ ٱلْكَوْثَرَ"
        }
    })
}

async fn mount_verse(server: &MockServer, surah: u32, ayah: u32, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/verses/by_key/{}:{}", surah, ayah)))
        .respond_with(ResponseTemplate::new(200).set_body_json(verse_body(surah, ayah)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn request(mode: RepeatMode, play_count: f64) -> PlayRequest {
    PlayRequest {
        surah: 108,
        verse_count: 3,
        start_verse: 1,
        repeat: RepeatDraft {
            mode,
            start: 1.0,
            end: 1.0,
            play_count,
            repeat_each: 1.0,
            delay_ms: 0.0,
        },
    }
}

// ===== Sessions =====

#[tokio::test]
async fn fetched_verses_drive_continuous_play() {
    let server = MockServer::start().await;
    for ayah in 1..=3 {
        mount_verse(&server, 108, ayah, 1).await;
    }

    let summary = session::run(&remote_config(&server), request(RepeatMode::Off, 1.0))
        .await
        .unwrap();

    assert_eq!(summary.verses_played, 3);
    assert_eq!(summary.finish_reason, Some(FinishReason::EndOfContent));
}

#[tokio::test]
async fn surah_wrap_replays_from_cache() {
    let server = MockServer::start().await;
    // Each verse is fetched once; the second cycle is served by the cache
    for ayah in 1..=3 {
        mount_verse(&server, 108, ayah, 1).await;
    }

    let summary = session::run(&remote_config(&server), request(RepeatMode::Surah, 2.0))
        .await
        .unwrap();

    assert_eq!(summary.verses_played, 6);
    assert_eq!(summary.finish_reason, Some(FinishReason::RepeatsExhausted));
}

#[tokio::test]
async fn failed_fetch_times_out_the_advance() {
    let server = MockServer::start().await;
    mount_verse(&server, 108, 1, 1).await;
    Mock::given(method("GET"))
        .and(path("/verses/by_key/108:2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let summary = session::run(&remote_config(&server), request(RepeatMode::Off, 1.0))
        .await
        .unwrap();

    assert_eq!(summary.verses_played, 1);
    assert_eq!(summary.finish_reason, Some(FinishReason::AdvanceTimedOut));
}

#[tokio::test]
async fn unavailable_first_verse_fails_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verses/by_key/108:1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = session::run(&remote_config(&server), request(RepeatMode::Off, 1.0)).await;

    assert!(matches!(result, Err(CliError::Verses(_))));
}
