/*!
 * Tests for provider helpers and the mock clients
 */

use std::path::Path;
use subburn::media_burner::{filter_ffmpeg_stderr, BurnStyle, MediaBurner};
use subburn::providers::deepl::{map_source_language, map_target_language};
use subburn::providers::mock::{MockTranscriber, MockTranslator};
use subburn::providers::{JobStatus, TranscriptionClient, TranslationClient};

#[test]
fn test_map_source_language_withSupportedCodes_shouldUppercase() {
    assert_eq!(map_source_language("es").as_deref(), Some("ES"));
    assert_eq!(map_source_language("EN").as_deref(), Some("EN"));
    assert_eq!(map_source_language("pt").as_deref(), Some("PT"));
    assert_eq!(map_source_language("xx"), None);
}

#[test]
fn test_map_target_language_withVariantLanguages_shouldUseRegionalCodes() {
    // DeepL requires regional variants for English and Portuguese targets
    assert_eq!(map_target_language("en").as_deref(), Some("EN-US"));
    assert_eq!(map_target_language("pt").as_deref(), Some("PT-BR"));
    assert_eq!(map_target_language("fr").as_deref(), Some("FR"));
    assert_eq!(map_target_language("auto"), None);
}

#[test]
fn test_job_status_terminal_states() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Error("boom".to_string()).is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
}

#[tokio::test]
async fn test_mock_translator_working_shouldTagTarget() {
    let translator = MockTranslator::working();
    let result = translator.translate("Hola", "es", "en").await.unwrap();
    assert_eq!(result, "[en] Hola");
    assert_eq!(translator.calls(), 1);
}

#[tokio::test]
async fn test_mock_translator_failing_on_shouldFailOnlyThatCall() {
    let translator = MockTranslator::failing_on(2);
    assert!(translator.translate("a", "es", "en").await.is_ok());
    assert!(translator.translate("b", "es", "en").await.is_err());
    assert!(translator.translate("c", "es", "en").await.is_ok());
}

#[tokio::test]
async fn test_mock_transcriber_shouldWalkJobToCompletion() {
    let transcriber = MockTranscriber::with_srt("1\n00:00:01,000 --> 00:00:02,000\nHi\n\n").with_polls(2);

    let url = transcriber.upload(Path::new("clip.mp4")).await.unwrap();
    assert!(url.starts_with("mock://"));
    let job = transcriber.submit(&url, Some("es")).await.unwrap();

    assert_eq!(transcriber.poll_status(&job).await.unwrap(), JobStatus::Processing);
    assert_eq!(transcriber.poll_status(&job).await.unwrap(), JobStatus::Processing);
    assert_eq!(transcriber.poll_status(&job).await.unwrap(), JobStatus::Completed);

    let srt = transcriber.fetch_srt(&job).await.unwrap();
    assert!(srt.contains("-->"));
}

#[tokio::test]
async fn test_mock_transcriber_failing_job_shouldReportError() {
    let transcriber = MockTranscriber::failing_job();
    let status = transcriber.poll_status("job").await.unwrap();
    assert!(matches!(status, JobStatus::Error(_)));
}

#[test]
fn test_subtitle_filter_shouldEscapePathAndApplyStyle() {
    let style = BurnStyle { font_size: 20, outline: 2, shadow: 1 };
    let filter = MediaBurner::subtitle_filter(Path::new("/tmp/clip_en.srt"), style);
    assert_eq!(
        filter,
        "subtitles='/tmp/clip_en.srt':force_style='Fontsize=20,Outline=2,Shadow=1'"
    );
}

#[test]
fn test_subtitle_filter_withWindowsPath_shouldUseForwardSlashesAndEscapeColon() {
    let style = BurnStyle::default();
    let filter = MediaBurner::subtitle_filter(Path::new(r"C:\videos\clip.srt"), style);
    assert!(filter.contains(r"C\:/videos/clip.srt"));
}

#[test]
fn test_filter_ffmpeg_stderr_shouldDropBannerNoise() {
    let stderr = "ffmpeg version 6.0\n  built with gcc\nInput #0, mov\n  Duration: 00:00:10.00\nError opening subtitle file\n";
    assert_eq!(filter_ffmpeg_stderr(stderr), "Error opening subtitle file");
}

#[test]
fn test_filter_ffmpeg_stderr_withOnlyNoise_shouldReportUnknownError() {
    let stderr = "ffmpeg version 6.0\n  built with gcc\n";
    assert!(filter_ffmpeg_stderr(stderr).contains("unknown ffmpeg error"));
}
