//! Language utilities for the short ISO 639-1 codes the pipeline accepts.
//!
//! The transcription and translation providers both speak 2-letter codes,
//! so everything here stays in ISO 639-1 territory. `auto` is a sentinel
//! for "pick a sensible source", resolved by `resolve_source_language`.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Sentinel for automatic source-language selection
pub const AUTO_LANGUAGE: &str = "auto";

/// The short codes the pipeline supports end to end
pub const SUPPORTED_CODES: [&str; 6] = ["es", "en", "pt", "fr", "it", "de"];

/// Check whether a code is one of the supported short codes
pub fn is_supported_code(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    SUPPORTED_CODES.contains(&normalized.as_str())
}

/// Validate a language code: either `auto` or a supported ISO 639-1 code
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    if normalized == AUTO_LANGUAGE {
        return Ok(normalized);
    }
    if is_supported_code(&normalized) && Language::from_639_1(&normalized).is_some() {
        return Ok(normalized);
    }
    Err(anyhow!("Invalid or unsupported language code: {}", code))
}

/// Resolve a source language code, collapsing `auto` (or empty) to the
/// given default.
///
/// Automatic detection is unreliable for short caption fragments, so `auto`
/// never reaches a provider; the caller supplies the fallback it trusts.
pub fn resolve_source_language(code: &str, default: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    if normalized == AUTO_LANGUAGE || normalized.is_empty() {
        return validate_language_code(default);
    }
    validate_language_code(&normalized)
}

/// Get the English language name for a supported code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = validate_language_code(code)?;
    if normalized == AUTO_LANGUAGE {
        return Ok("Auto".to_string());
    }
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;
    Ok(lang.to_name().to_string())
}

/// Infer a language code from an SRT filename suffix.
///
/// Files named `movie_en.srt`, `movie_es.srt` and so on carry their language
/// in the stem; anything else falls back to the provided default.
pub fn language_from_srt_stem(stem: &str, default: &str) -> String {
    let lowered = stem.to_lowercase();
    match lowered.rsplit('_').next() {
        Some(last) if is_supported_code(last) => last.to_string(),
        _ => default.to_string(),
    }
}
