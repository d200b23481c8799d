/*!
 * Provider implementations for the external services the pipeline depends on.
 *
 * This module contains client implementations for:
 * - AssemblyAI: speech-to-text transcription producing SRT
 * - DeepL: machine translation
 * - Mock: test doubles for both capabilities
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;

/// Status of a provider-side transcription job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Job accepted, not started yet
    Queued,
    /// Job is running
    Processing,
    /// Job finished, SRT can be fetched
    Completed,
    /// Job failed on the provider side
    Error(String),
}

impl JobStatus {
    /// Whether the job has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error(_))
    }
}

/// Speech-to-text capability producing a timed SRT caption track.
///
/// Failure modes (network error, job error status, timeout) are surfaced to
/// the caller as [`ProviderError`]; no retries happen at this layer.
#[async_trait]
pub trait TranscriptionClient: Send + Sync + Debug {
    /// Upload a local media file, returning a provider-hosted URL
    async fn upload(&self, path: &Path) -> Result<String, ProviderError>;

    /// Submit a transcription job for an uploaded media URL.
    ///
    /// # Arguments
    /// * `audio_url` - URL returned by [`upload`](Self::upload)
    /// * `language_hint` - optional ISO 639-1 source language hint
    ///
    /// # Returns
    /// * The provider-side job id
    async fn submit(&self, audio_url: &str, language_hint: Option<&str>) -> Result<String, ProviderError>;

    /// Poll the current status of a job
    async fn poll_status(&self, job_id: &str) -> Result<JobStatus, ProviderError>;

    /// Fetch the SRT text for a completed job
    async fn fetch_srt(&self, job_id: &str) -> Result<String, ProviderError>;
}

/// Machine-translation capability.
///
/// Every call is independently fallible; the translation pipeline treats a
/// failed call as "keep the original text for this cue" and moves on.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate a piece of text between two supported languages.
    ///
    /// # Arguments
    /// * `text` - the text to translate
    /// * `source` - ISO 639-1 source language code
    /// * `target` - ISO 639-1 target language code
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod assemblyai;
pub mod deepl;
pub mod mock;
