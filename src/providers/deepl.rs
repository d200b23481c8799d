use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use log::error;

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Default public API endpoint (free-tier keys use api-free.deepl.com)
const DEFAULT_ENDPOINT: &str = "https://api.deepl.com";

/// DeepL client for machine translation.
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Response from the translate endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

/// A single translated segment
#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Map a short source code to DeepL's source-language format
pub fn map_source_language(code: &str) -> Option<String> {
    match code.trim().to_lowercase().as_str() {
        "es" => Some("ES".to_string()),
        "en" => Some("EN".to_string()),
        "pt" => Some("PT".to_string()),
        "fr" => Some("FR".to_string()),
        "it" => Some("IT".to_string()),
        "de" => Some("DE".to_string()),
        _ => None,
    }
}

/// Map a short target code to DeepL's target-language format.
///
/// DeepL requires regional variants for English and Portuguese targets.
pub fn map_target_language(code: &str) -> Option<String> {
    match code.trim().to_lowercase().as_str() {
        "es" => Some("ES".to_string()),
        "en" => Some("EN-US".to_string()),
        "pt" => Some("PT-BR".to_string()),
        "fr" => Some("FR".to_string()),
        "it" => Some("IT".to_string()),
        "de" => Some("DE".to_string()),
        _ => None,
    }
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs.max(10)))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
        }
    }

    fn url(&self) -> String {
        format!("{}/v2/translate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslationClient for DeepL {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        let source_lang = map_source_language(source)
            .ok_or_else(|| ProviderError::RequestFailed(format!("Unsupported source language: {}", source)))?;
        let target_lang = map_target_language(target)
            .ok_or_else(|| ProviderError::RequestFailed(format!("Unsupported target language: {}", target)))?;

        let params = [
            ("text", text),
            ("source_lang", source_lang.as_str()),
            ("target_lang", target_lang.as_str()),
            // Let DeepL re-segment sentences inside the joined cue text
            ("split_sentences", "1"),
            ("formality", "default"),
        ];

        let response = self.client.post(self.url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Translate request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, message);
            if status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError { status_code: status.as_u16(), message });
        }

        let parsed: TranslateResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Invalid translate response: {}", e)))?;

        parsed.translations.into_iter().next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError("Empty translations array in response".to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "en", "es").await.map(|_| ())
    }
}
