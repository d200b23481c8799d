use std::sync::Arc;
use log::{info, warn};

use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::TranslationClient;
use crate::subtitle_processor::{BlockEntry, SubtitleCue, SubtitleDocument};

// @module: Structure-preserving translation of subtitle documents

/// Outcome counters for one translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Cues whose text was replaced with a translation
    pub translated: usize,
    /// Cues left in the source language after a failed or empty call
    pub kept_original: usize,
    /// Cues with no text at all (no call made)
    pub empty: usize,
    /// Raw blocks passed through untouched
    pub raw_blocks: usize,
}

/// Translates subtitle documents cue by cue while preserving structure.
///
/// The service never mutates the input document. The output document has the
/// same entries in the same order: identical index lines, identical
/// timestamps, raw blocks cloned verbatim. Only cue text changes, and a
/// cue whose translation call fails keeps its original text, so one bad
/// call never aborts the batch.
pub struct TranslationService {
    /// Injected translation capability
    client: Arc<dyn TranslationClient>,

    /// Source language used when a document declares none and the caller
    /// asked for `auto`
    default_source_language: String,
}

impl TranslationService {
    /// Create a new translation service around a provider client
    pub fn new(client: Arc<dyn TranslationClient>, default_source_language: impl Into<String>) -> Self {
        TranslationService {
            client,
            default_source_language: default_source_language.into(),
        }
    }

    /// Translate a document to the target language.
    ///
    /// Cues are translated one at a time in document order; output ordering
    /// is therefore deterministic and externally rate-limited providers are
    /// not hammered. Each cue's lines are joined into a single string before
    /// the call (block-level translation reads better than per-line
    /// fragments), and the result comes back as one output line, collapsing
    /// multi-line cues by design.
    pub async fn translate_document(
        &self,
        document: &SubtitleDocument,
        source_language: &str,
        target_language: &str,
    ) -> Result<SubtitleDocument, TranslationError> {
        let target = language_utils::validate_language_code(target_language)
            .map_err(|_| TranslationError::UnsupportedLanguage(target_language.to_string()))?;
        if target == language_utils::AUTO_LANGUAGE {
            return Err(TranslationError::UnsupportedLanguage(target_language.to_string()));
        }

        let source = self.resolve_source(document, source_language)?;
        info!(
            "Translating {} cues from {} to {}",
            document.cue_count(),
            source,
            target
        );

        let mut output = SubtitleDocument::new(target.clone());
        let mut stats = TranslationStats::default();

        for entry in &document.entries {
            match entry {
                BlockEntry::Raw(raw) => {
                    stats.raw_blocks += 1;
                    output.entries.push(BlockEntry::Raw(raw.clone()));
                }
                BlockEntry::Cue(cue) => {
                    let translated = self.translate_cue(cue, &source, &target, &mut stats).await;
                    output.entries.push(BlockEntry::Cue(translated));
                }
            }
        }

        info!(
            "Translation pass done: {} translated, {} kept original, {} empty, {} raw blocks",
            stats.translated, stats.kept_original, stats.empty, stats.raw_blocks
        );
        Ok(output)
    }

    /// Resolve the effective source language for a document.
    ///
    /// `auto` collapses to the document's declared language (or the
    /// configured default) instead of provider-side detection: detection is
    /// unreliable on short caption fragments, so this deliberately
    /// overrides the caller's stated intent.
    fn resolve_source(
        &self,
        document: &SubtitleDocument,
        source_language: &str,
    ) -> Result<String, TranslationError> {
        let fallback = if language_utils::is_supported_code(&document.source_language) {
            document.source_language.as_str()
        } else {
            self.default_source_language.as_str()
        };
        language_utils::resolve_source_language(source_language, fallback)
            .map_err(|_| TranslationError::UnsupportedLanguage(source_language.to_string()))
    }

    async fn translate_cue(
        &self,
        cue: &SubtitleCue,
        source: &str,
        target: &str,
        stats: &mut TranslationStats,
    ) -> SubtitleCue {
        let joined = cue.joined_text();

        // Empty cue: nothing to translate, nothing to call
        if joined.is_empty() {
            stats.empty += 1;
            return SubtitleCue::new(cue.index.clone(), cue.start, cue.end, Vec::new());
        }

        let lines = match self.client.translate(&joined, source, target).await {
            Ok(translated) if !translated.trim().is_empty() => {
                stats.translated += 1;
                vec![translated.trim().to_string()]
            }
            Ok(_) => {
                warn!("Empty translation for cue {}, keeping original text", cue.index);
                stats.kept_original += 1;
                vec![joined]
            }
            Err(e) => {
                warn!("Translation failed for cue {}: {}, keeping original text", cue.index, e);
                stats.kept_original += 1;
                vec![joined]
            }
        };

        SubtitleCue::new(cue.index.clone(), cue.start, cue.end, lines)
    }

    /// Test the underlying provider connection
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.client.test_connection().await.map_err(TranslationError::from)
    }
}
