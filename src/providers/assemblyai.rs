use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Deserialize};
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::{JobStatus, TranscriptionClient};

/// Default public API endpoint
const DEFAULT_ENDPOINT: &str = "https://api.assemblyai.com";

/// AssemblyAI client for speech-to-text transcription.
///
/// Drives the v2 REST flow: raw-body upload, job submission, status polling
/// and SRT retrieval. The client does not retry; failures surface to the
/// caller verbatim.
#[derive(Debug)]
pub struct AssemblyAi {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Response from the upload endpoint
#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

/// Transcription job submission payload
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    audio_url: &'a str,
    speaker_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
}

/// Transcription job state as reported by the API
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    #[serde(default)]
    error: Option<String>,
}

impl AssemblyAi {
    /// Create a new AssemblyAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs.max(30)))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("AssemblyAI API error ({}): {}", status, message);
            if status.as_u16() == 401 {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError { status_code: status.as_u16(), message });
        }
        Ok(response)
    }
}

#[async_trait]
impl TranscriptionClient for AssemblyAi {
    async fn upload(&self, path: &Path) -> Result<String, ProviderError> {
        let bytes = tokio::fs::read(path).await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read media file {}: {}", path.display(), e)))?;
        debug!("Uploading {} bytes to AssemblyAI", bytes.len());

        let response = self.client.post(self.url("/v2/upload"))
            .header("authorization", &self.api_key)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Upload request failed: {}", e)))?;

        let response = Self::check_status(response).await?;
        let upload: UploadResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Invalid upload response: {}", e)))?;
        Ok(upload.upload_url)
    }

    async fn submit(&self, audio_url: &str, language_hint: Option<&str>) -> Result<String, ProviderError> {
        let request = SubmitRequest {
            audio_url,
            speaker_labels: true,
            language_code: language_hint,
        };

        let response = self.client.post(self.url("/v2/transcript"))
            .header("authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Submit request failed: {}", e)))?;

        let response = Self::check_status(response).await?;
        let transcript: TranscriptResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Invalid transcript response: {}", e)))?;
        debug!("Submitted transcription job {}", transcript.id);
        Ok(transcript.id)
    }

    async fn poll_status(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        let response = self.client.get(self.url(&format!("/v2/transcript/{}", job_id)))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Status request failed: {}", e)))?;

        let response = Self::check_status(response).await?;
        let transcript: TranscriptResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Invalid transcript response: {}", e)))?;

        let status = match transcript.status.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "error" => JobStatus::Error(
                transcript.error.unwrap_or_else(|| "unspecified transcription error".to_string()),
            ),
            other => JobStatus::Error(format!("unexpected job status: {}", other)),
        };
        Ok(status)
    }

    async fn fetch_srt(&self, job_id: &str) -> Result<String, ProviderError> {
        let response = self.client.get(self.url(&format!("/v2/transcript/{}/srt", job_id)))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("SRT request failed: {}", e)))?;

        let response = Self::check_status(response).await?;
        response.text().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read SRT body: {}", e)))
    }
}
