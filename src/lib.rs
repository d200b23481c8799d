/*!
 * # subburn - captions for short videos
 *
 * A Rust library and CLI for generating, translating and burning video
 * subtitles.
 *
 * ## Features
 *
 * - Transcribe a video to a timed SRT caption track (AssemblyAI)
 * - Translate SRT captions while preserving indices and timings (DeepL)
 * - Project an SRT to a plain-text transcript
 * - Burn captions into the video with ffmpeg
 * - Tolerant SRT parsing: malformed blocks pass through untouched
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: SRT parsing, serialization and text projection
 * - `translation_service`: structure-preserving cue translation
 * - `providers`: clients for the external services:
 *   - `providers::assemblyai`: speech-to-text API client
 *   - `providers::deepl`: translation API client
 *   - `providers::mock`: test doubles
 * - `media_burner`: ffmpeg subtitle burn-in
 * - `session`: per-run registry of produced SRT artifacts
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `language_utils`: short language code helpers
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media_burner;
pub mod providers;
pub mod session;
pub mod subtitle_processor;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use session::Session;
pub use subtitle_processor::{srt_to_plain_text, BlockEntry, RawBlock, SubtitleCue, SubtitleDocument, Timestamp};
pub use translation_service::TranslationService;
pub use errors::{AppError, BurnError, ProviderError, SubtitleError, TranslationError};
