//! Property-based tests for repeat playback
//!
//! Uses proptest to verify play and navigation counts across random
//! repeat configurations.

mod common;

use common::*;
use proptest::prelude::*;
use tilawa_playback::policy::{decide, RepeatAction, RepeatProgress};
use tilawa_playback::{format_time, PlaybackState, RepeatConfiguration, RepeatMode};

// ===== Helpers =====

/// Drive the controller until playback ends by itself
fn run_to_completion(controller: &mut TestController) {
    for _ in 0..10_000 {
        match controller.state() {
            PlaybackState::Playing => end_track(controller),
            PlaybackState::WrappingDelay
            | PlaybackState::Finalizing
            | PlaybackState::AwaitingTrack => {
                fire_latest(controller);
            }
            _ => return,
        }
    }
    panic!("playback did not terminate");
}

fn arbitrary_mode() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::Off),
        Just(RepeatMode::Single),
        Just(RepeatMode::Range),
        Just(RepeatMode::Surah),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: single repeat plays the verse exactly repeat_each * play_count times
    #[test]
    fn single_repeat_total_plays(repeat_each in 1u32..8, play_count in 1u32..8) {
        let config = RepeatConfiguration {
            mode: RepeatMode::Single,
            repeat_each,
            play_count,
            ..RepeatConfiguration::default()
        };

        let mut progress = RepeatProgress::initial(&config);
        let mut plays = 1;
        loop {
            let decision = decide(&config, progress, 1);
            progress = decision.progress;
            match decision.action {
                RepeatAction::Replay => plays += 1,
                RepeatAction::Stop => break,
                other => prop_assert!(false, "unexpected action {:?}", other),
            }
        }

        prop_assert_eq!(plays, repeat_each * play_count);
    }

    /// Property: a full range session moves forward (end - start) times per cycle
    /// and wraps back between cycles
    #[test]
    fn range_navigation_counts(
        start in 1u32..6,
        span in 0u32..5,
        play_count in 1u32..4,
        repeat_each in 1u32..3,
    ) {
        let end = start + span;
        let mut controller = create_controller(20, start);
        controller.set_configuration(RepeatConfiguration {
            mode: RepeatMode::Range,
            start,
            end,
            play_count,
            repeat_each,
            delay_ms: 0,
        });
        controller.play_verse(create_test_track(1, start)).unwrap();

        run_to_completion(&mut controller);

        let nav = controller.navigation();
        prop_assert_eq!(nav.next_calls as u32, span * play_count);
        prop_assert_eq!(nav.prev_calls as u32, span * (play_count - 1));
        prop_assert_eq!(controller.media().plays as u32, (span + 1) * repeat_each * play_count);
    }

    /// Property: every session ends idle with nothing left scheduled
    #[test]
    fn sessions_always_terminate(
        mode in arbitrary_mode(),
        verse_count in 1u32..10,
        play_count in 1u32..4,
        repeat_each in 1u32..3,
    ) {
        let mut controller = create_controller(verse_count, 1);
        controller.set_configuration(RepeatConfiguration {
            mode,
            start: 1,
            end: verse_count,
            play_count,
            repeat_each,
            delay_ms: 0,
        });
        controller.play_verse(create_test_track(1, 1)).unwrap();

        run_to_completion(&mut controller);

        prop_assert_eq!(controller.state(), PlaybackState::Idle);
        prop_assert!(!controller.has_pending_operation());
    }

    /// Property: time labels are always m:ss
    #[test]
    fn format_time_shape(seconds in -100.0f64..100_000.0) {
        let label = format_time(seconds);
        let (minutes, secs) = label.split_once(':').unwrap();
        prop_assert!(minutes.parse::<u64>().is_ok());
        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u8>().unwrap() < 60);
    }
}
