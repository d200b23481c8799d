/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock clients that simulate different behaviors:
 * - `MockTranslator::working()` - always succeeds with bracketed text
 * - `MockTranslator::failing()` - always fails with an error
 * - `MockTranslator::failing_on(n)` - fails only the nth call
 * - `MockTranscriber::with_srt(...)` - returns a canned SRT document
 */

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::{JobStatus, TranscriptionClient, TranslationClient};

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, wrapping the input as `[target] text`
    Working,
    /// Always fails with an error
    Failing,
    /// Fails only on the nth call (1-based)
    FailOn { call: usize },
    /// Succeeds but returns an empty string
    Empty,
}

/// Mock translation client for exercising the pipeline without a network
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls made
    call_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only the nth translate call (1-based)
    pub fn failing_on(call: usize) -> Self {
        Self::new(MockBehavior::FailOn { call })
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", target, text)),
            MockBehavior::Failing => Err(ProviderError::RequestFailed("mock translator always fails".to_string())),
            MockBehavior::FailOn { call: failing_call } => {
                if call == failing_call {
                    Err(ProviderError::RequestFailed(format!("mock translator failed call {}", call)))
                } else {
                    Ok(format!("[{}] {}", target, text))
                }
            }
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::AuthenticationError("mock auth failure".to_string())),
            _ => Ok(()),
        }
    }
}

/// Mock transcription client returning a canned SRT after a fixed number
/// of polls
#[derive(Debug)]
pub struct MockTranscriber {
    /// SRT text returned by fetch_srt
    srt: String,
    /// Number of polls before the job reports completed
    polls_until_done: usize,
    /// Whether the job should end in an error state
    fail_job: bool,
    /// Number of poll_status calls made
    poll_count: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a mock that completes immediately with the given SRT
    pub fn with_srt(srt: impl Into<String>) -> Self {
        Self {
            srt: srt.into(),
            polls_until_done: 0,
            fail_job: false,
            poll_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Require a number of processing polls before completion
    pub fn with_polls(mut self, polls: usize) -> Self {
        self.polls_until_done = polls;
        self
    }

    /// Make the job finish in an error state
    pub fn failing_job() -> Self {
        Self {
            srt: String::new(),
            polls_until_done: 0,
            fail_job: true,
            poll_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl TranscriptionClient for MockTranscriber {
    async fn upload(&self, path: &Path) -> Result<String, ProviderError> {
        Ok(format!("mock://upload/{}", path.display()))
    }

    async fn submit(&self, _audio_url: &str, _language_hint: Option<&str>) -> Result<String, ProviderError> {
        Ok("mock-job-1".to_string())
    }

    async fn poll_status(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        if self.fail_job {
            return Ok(JobStatus::Error("mock job failure".to_string()));
        }
        let polls = self.poll_count.fetch_add(1, Ordering::SeqCst);
        if polls < self.polls_until_done {
            Ok(JobStatus::Processing)
        } else {
            Ok(JobStatus::Completed)
        }
    }

    async fn fetch_srt(&self, _job_id: &str) -> Result<String, ProviderError> {
        Ok(self.srt.clone())
    }
}
