/*!
 * Error types for the subburn application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to external provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The transcription job finished in an error state
    #[error("Transcription job failed: {0}")]
    JobFailed(String),

    /// Polling for a transcription job exceeded the configured timeout
    #[error("Timed out waiting for job {job_id} after {timeout_secs}s")]
    JobTimeout {
        /// Provider-side job identifier
        job_id: String,
        /// How long we waited before giving up
        timeout_secs: u64,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error reading or writing a subtitle file
    #[error("Subtitle I/O error: {0}")]
    Io(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An unsupported language code was requested
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),
}

/// Errors that can occur while burning subtitles into a video
#[derive(Error, Debug)]
pub enum BurnError {
    /// ffmpeg could not be spawned at all
    #[error("Failed to run ffmpeg: {0}")]
    SpawnFailed(String),

    /// ffmpeg exited with a non-zero status
    #[error("ffmpeg failed: {0}")]
    FfmpegFailed(String),

    /// ffmpeg did not finish within the allowed time
    #[error("ffmpeg timed out after {0}s")]
    Timeout(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from subtitle burn-in
    #[error("Burn error: {0}")]
    Burn(#[from] BurnError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
