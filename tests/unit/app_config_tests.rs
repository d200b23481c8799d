/*!
 * Tests for application configuration
 */

use subburn::app_config::{Config, LogLevel};
use crate::common;

#[test]
fn test_default_config_shouldUseSpanishSourceAndEnglishTarget() {
    let config = Config::default();
    assert_eq!(config.source_language, "es");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.work_dir, "workdir");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.transcription.poll_interval_secs, 3);
    assert_eq!(config.burn.font_size, 16);
    assert_eq!(config.burn.outline, 1);
    assert_eq!(config.burn.shadow, 1);
}

#[test]
fn test_default_config_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_withAutoTarget_shouldFail() {
    let mut config = Config::default();
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidSource_shouldFail() {
    let mut config = Config::default();
    config.source_language = "klingon".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "source_language": "en", "target_language": "fr" }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.work_dir, "workdir");
    assert_eq!(config.transcription.timeout_secs, 600);
    assert_eq!(config.translation.timeout_secs, 30);
}

#[test]
fn test_from_file_withNestedSections_shouldParseThem() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{
            "source_language": "es",
            "target_language": "en",
            "log_level": "debug",
            "transcription": { "api_key": "aai-key", "poll_interval_secs": 5 },
            "translation": { "api_key": "dl-key" },
            "burn": { "font_size": 24 }
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.transcription.api_key, "aai-key");
    assert_eq!(config.transcription.poll_interval_secs, 5);
    assert_eq!(config.translation.api_key, "dl-key");
    assert_eq!(config.burn.font_size, 24);
}

#[test]
fn test_from_file_withInvalidLanguage_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "source_language": "nope", "target_language": "en" }"#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_from_file_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_save_and_reload_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "de".to_string();
    config.burn.font_size = 20;
    config.save_to_file(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.target_language, "de");
    assert_eq!(reloaded.burn.font_size, 20);
}

#[test]
fn test_resolved_ffmpeg_bin_withExplicitValue_shouldUseIt() {
    let mut config = Config::default();
    config.burn.ffmpeg_bin = "/opt/ffmpeg/bin/ffmpeg".to_string();
    assert_eq!(config.burn.resolved_ffmpeg_bin(), "/opt/ffmpeg/bin/ffmpeg");
}
