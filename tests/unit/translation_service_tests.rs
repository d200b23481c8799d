/*!
 * Tests for the structure-preserving translation pipeline
 */

use std::sync::Arc;
use subburn::errors::TranslationError;
use subburn::providers::mock::MockTranslator;
use subburn::subtitle_processor::{BlockEntry, SubtitleDocument};
use subburn::translation_service::TranslationService;
use crate::common::{MALFORMED_SRT, SAMPLE_SRT};

fn service_with(client: MockTranslator) -> TranslationService {
    TranslationService::new(Arc::new(client), "es")
}

/// Translation preserves entry count, indices and timestamps
#[tokio::test]
async fn test_translate_withWellFormedDocument_shouldPreserveStructure() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "en", "es").await.unwrap();

    assert_eq!(translated.entries.len(), doc.entries.len());
    assert_eq!(translated.source_language, "es");
    for (original, output) in doc.cues().zip(translated.cues()) {
        assert_eq!(output.index, original.index);
        assert_eq!(output.start, original.start);
        assert_eq!(output.end, original.end);
        assert_ne!(output.lines, original.lines);
    }
}

#[tokio::test]
async fn test_translate_withWorkingClient_shouldReplaceCueText() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "en", "fr").await.unwrap();
    let first = translated.cues().next().unwrap();
    assert_eq!(first.lines, vec!["[fr] This is a test subtitle."]);
}

/// Per-cue failure isolation: one failed call keeps that cue's original text
#[tokio::test]
async fn test_translate_withOneFailingCall_shouldKeepOnlyThatCueOriginal() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::failing_on(2));

    let translated = service.translate_document(&doc, "en", "de").await.unwrap();
    let cues: Vec<_> = translated.cues().collect();

    assert_eq!(cues[0].lines, vec!["[de] This is a test subtitle."]);
    assert_eq!(cues[1].lines, vec!["It contains multiple entries."]);
    assert_eq!(cues[2].lines, vec!["[de] For testing purposes."]);
}

#[tokio::test]
async fn test_translate_withAlwaysFailingClient_shouldKeepAllOriginalText() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::failing());

    let translated = service.translate_document(&doc, "en", "it").await.unwrap();
    let cues: Vec<_> = translated.cues().collect();
    assert_eq!(cues[0].lines, vec!["This is a test subtitle."]);
    assert_eq!(cues[1].lines, vec!["It contains multiple entries."]);
    assert_eq!(cues[2].lines, vec!["For testing purposes."]);
}

#[tokio::test]
async fn test_translate_withEmptyResponses_shouldKeepOriginalText() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::empty());

    let translated = service.translate_document(&doc, "en", "pt").await.unwrap();
    let first = translated.cues().next().unwrap();
    assert_eq!(first.lines, vec!["This is a test subtitle."]);
}

/// Multi-line cues collapse to one translated output line
#[tokio::test]
async fn test_translate_withMultiLineCue_shouldCollapseToSingleLine() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nHello\nworld\n\n";
    let doc = SubtitleDocument::parse(content, "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "en", "es").await.unwrap();
    let cue = translated.cues().next().unwrap();
    assert_eq!(cue.lines, vec!["[es] Hello world"]);
}

/// Raw blocks pass through untouched and untranslated
#[tokio::test]
async fn test_translate_withRawBlocks_shouldPassThemThroughUnchanged() {
    let doc = SubtitleDocument::parse(MALFORMED_SRT, "en");
    let client = MockTranslator::working();
    let calls_handle = Arc::new(client);
    let service = TranslationService::new(calls_handle.clone(), "es");

    let translated = service.translate_document(&doc, "en", "es").await.unwrap();

    assert_eq!(translated.entries.len(), 3);
    match (&doc.entries[1], &translated.entries[1]) {
        (BlockEntry::Raw(original), BlockEntry::Raw(output)) => {
            assert_eq!(output.lines, original.lines);
        }
        _ => panic!("expected raw blocks at position 1"),
    }
    // Only the two real cues were sent to the provider
    assert_eq!(calls_handle.calls(), 2);
}

/// Empty cues make no provider call at all
#[tokio::test]
async fn test_translate_withEmptyCue_shouldSkipProviderCall() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nText\n\n";
    let doc = SubtitleDocument::parse(content, "en");
    let client = Arc::new(MockTranslator::working());
    let service = TranslationService::new(client.clone(), "es");

    let translated = service.translate_document(&doc, "en", "fr").await.unwrap();

    assert_eq!(client.calls(), 1);
    let first = translated.cues().next().unwrap();
    assert!(first.lines.is_empty());
}

/// `auto` resolves to the document's declared language, not detection
#[tokio::test]
async fn test_translate_withAutoSource_shouldUseDocumentLanguage() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "auto", "es").await.unwrap();
    assert_eq!(translated.cue_count(), 3);
}

#[tokio::test]
async fn test_translate_withAutoSourceAndUnknownDocumentLanguage_shouldFallBackToDefault() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "und");
    let service = service_with(MockTranslator::working());

    // Falls back to the configured default ("es") rather than erroring
    let translated = service.translate_document(&doc, "auto", "en").await.unwrap();
    assert_eq!(translated.cue_count(), 3);
}

#[tokio::test]
async fn test_translate_withUnsupportedTarget_shouldFail() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::working());

    let result = service.translate_document(&doc, "en", "xx").await;
    assert!(matches!(result, Err(TranslationError::UnsupportedLanguage(_))));
}

#[tokio::test]
async fn test_translate_withAutoTarget_shouldFail() {
    let doc = SubtitleDocument::parse(SAMPLE_SRT, "en");
    let service = service_with(MockTranslator::working());

    let result = service.translate_document(&doc, "en", "auto").await;
    assert!(matches!(result, Err(TranslationError::UnsupportedLanguage(_))));
}

#[tokio::test]
async fn test_translate_withEmptyDocument_shouldYieldEmptyDocument() {
    let doc = SubtitleDocument::parse("", "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "en", "es").await.unwrap();
    assert!(translated.is_empty());
    assert_eq!(translated.to_srt_string(), "");
}

/// Serialized output of a translated document still round-trips
#[tokio::test]
async fn test_translate_thenSerialize_shouldReparseWithSameStructure() {
    let doc = SubtitleDocument::parse(MALFORMED_SRT, "en");
    let service = service_with(MockTranslator::working());

    let translated = service.translate_document(&doc, "en", "es").await.unwrap();
    let reparsed = SubtitleDocument::parse(&translated.to_srt_string(), "es");

    assert_eq!(reparsed.entries, translated.entries);
}
