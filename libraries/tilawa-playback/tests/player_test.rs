//! Integration tests for the audio player context

mod common;

use common::*;
use tilawa_playback::{
    AudioPlayer, ConfigError, MediaEvent, PlaybackState, RepeatConfiguration, RepeatDraft,
    RepeatMode, RepeatSettings, WHOLE_NUMBERS_ONLY,
};

type TestPlayer = AudioPlayer<RecordingMedia, SurahNavigator, ManualScheduler>;

fn create_player(verse_count: u32) -> TestPlayer {
    AudioPlayer::new(create_controller(verse_count, 1))
}

fn fire(player: &mut TestPlayer) {
    let ticket = player.controller().scheduler().latest().unwrap();
    player.on_timer(ticket);
}

mod visibility {
    use super::*;

    #[test]
    fn playing_a_verse_opens_the_player() {
        let mut player = create_player(7);
        assert!(!player.is_player_visible());

        player.play_verse(create_test_track(1, 1)).unwrap();
        assert!(player.is_player_visible());
        assert!(player.is_playing());
    }

    #[test]
    fn close_during_wrap_delay_stops_everything() {
        let mut player = create_player(7);
        player
            .set_repeat_options(|current| RepeatDraft {
                mode: RepeatMode::Range,
                start: 1.0,
                end: 3.0,
                play_count: 2.0,
                delay_ms: 3000.0,
                ..RepeatDraft::from(*current)
            })
            .unwrap();
        player.play_verse(create_test_track(1, 1)).unwrap();
        player.handle_media_event(MediaEvent::Ended);
        player.handle_media_event(MediaEvent::Ended);
        player.handle_media_event(MediaEvent::Ended);
        assert_eq!(player.controller().state(), PlaybackState::WrappingDelay);

        let calls = player.controller().navigation().nav_calls();
        let pauses = player.controller().media().pauses;

        player.close_player();
        fire(&mut player);

        assert!(!player.is_player_visible());
        assert!(!player.is_playing());
        assert_eq!(player.controller().navigation().nav_calls(), calls);
        assert_eq!(player.controller().media().pauses, pauses + 1);
        assert_eq!(player.now_playing().title, "No verse selected");
        assert!(!player.timing().interactable);
    }

    #[test]
    fn finished_playback_hides_the_player() {
        let mut player = create_player(2);
        player.play_verse(create_test_track(1, 1)).unwrap();

        player.handle_media_event(MediaEvent::Ended);
        player.handle_media_event(MediaEvent::Ended);
        assert!(player.is_player_visible());

        fire(&mut player);
        assert!(!player.is_player_visible());
    }
}

mod repeat_options {
    use super::*;

    #[test]
    fn fractional_input_is_rejected_with_message() {
        let mut player = create_player(7);

        let result = player.set_repeat_options(|current| RepeatDraft {
            repeat_each: 2.5,
            ..RepeatDraft::from(*current)
        });

        assert_eq!(result, Err(ConfigError::NonInteger));
        assert_eq!(
            player.repeat_error().map(ToString::to_string).as_deref(),
            Some(WHOLE_NUMBERS_ONLY)
        );
        assert_eq!(player.repeat_options(), &RepeatConfiguration::default());
    }

    #[test]
    fn applied_options_reach_the_controller() {
        let mut player = create_player(7);
        player
            .set_repeat_options(|current| RepeatDraft {
                mode: RepeatMode::Single,
                repeat_each: 3.0,
                ..RepeatDraft::from(*current)
            })
            .unwrap();

        assert!(player.repeat_error().is_none());
        assert_eq!(player.controller().configuration().mode, RepeatMode::Single);
        assert_eq!(player.controller().progress().verses_remaining_in_cycle, 3);
    }

    #[test]
    fn dialog_prefill_clamps_range_to_surah() {
        let settings = RepeatSettings::new(RepeatConfiguration {
            mode: RepeatMode::Range,
            start: 4,
            end: 300,
            ..RepeatConfiguration::default()
        });
        let player = AudioPlayer::with_settings(create_controller(7, 1), settings);

        let (draft, adjusted) = player.open_repeat_dialog(Some(7));
        assert!(adjusted);
        assert_eq!((draft.start, draft.end), (4.0, 7.0));
    }
}

mod transport {
    use super::*;

    #[test]
    fn toggle_pauses_and_resumes() {
        let mut player = create_player(7);
        player.play_verse(create_test_track(1, 1)).unwrap();

        player.toggle_play().unwrap();
        assert!(!player.is_playing());
        assert_eq!(player.controller().state(), PlaybackState::Paused);

        player.toggle_play().unwrap();
        assert!(player.is_playing());
    }

    #[test]
    fn timing_tracks_media_events() {
        let mut player = create_player(7);
        assert!(!player.timing().interactable);

        player.play_verse(create_test_track(1, 1)).unwrap();
        player.handle_media_event(MediaEvent::LoadedMetadata { duration_sec: 65.0 });
        player.handle_media_event(MediaEvent::TimeUpdate { position_sec: 7.9 });

        let timing = player.timing();
        assert_eq!(timing.elapsed_label, "0:07");
        assert_eq!(timing.total_label, "1:05");
        assert!(timing.interactable);

        player.set_seek(30.0).unwrap();
        assert_eq!(player.timing().elapsed_label, "0:30");
    }
}
