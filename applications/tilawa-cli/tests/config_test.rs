//! Configuration loading tests

use std::io::Write;
use tilawa_cli::config::CliConfig;
use tilawa_cli::CliError;
use tilawa_playback::RepeatMode;

#[test]
fn loads_explicit_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[playback]
reciter = "Husary_128kbps"
verse_duration_ms = 2500

[repeat]
mode = "surah"
play_count = 2

[verses]
language = "ar"
offline = true
"#
    )
    .unwrap();

    let config = CliConfig::load(Some(file.path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.playback.reciter, "Husary_128kbps");
    assert_eq!(config.playback.verse_duration_ms, 2500);
    assert_eq!(config.playback.advance_timeout_ms, 10_000);
    assert_eq!(config.repeat.mode, RepeatMode::Surah);
    assert_eq!(config.repeat.play_count, 2.0);
    assert_eq!(config.verses.language, "ar");
    assert!(config.verses.offline);
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let result = CliConfig::load(Some(std::path::Path::new("/nonexistent/tilawa.toml")));
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn empty_reciter_fails_validation() {
    let config = CliConfig::from_toml("[playback]\nreciter = \"\"\n").unwrap();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}
