/*!
 * Application configuration module
 *
 * This module handles the application configuration including loading,
 * validating and saving configuration settings.
 */

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::language_utils;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1 short code, or "auto")
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1 short code)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Working directory for generated SRT/MP4 artifacts
    #[serde(default = "default_work_dir")]
    pub work_dir: String,

    /// Transcription provider config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Translation provider config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Burn-in config
    #[serde(default)]
    pub burn: BurnConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

/// Transcription provider configuration (AssemblyAI)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// API key; falls back to ASSEMBLYAI_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty means the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Seconds between job status polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Overall timeout for a transcription job
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            poll_interval_secs: default_poll_interval_secs(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

impl TranscriptionConfig {
    /// API key from config, or from the environment when unset
    pub fn resolved_api_key(&self) -> String {
        if self.api_key.is_empty() {
            env::var("ASSEMBLYAI_API_KEY").unwrap_or_default()
        } else {
            self.api_key.clone()
        }
    }
}

/// Translation provider configuration (DeepL)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// API key; falls back to DEEPL_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty means the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_translation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_translation_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// API key from config, or from the environment when unset
    pub fn resolved_api_key(&self) -> String {
        if self.api_key.is_empty() {
            env::var("DEEPL_API_KEY").unwrap_or_default()
        } else {
            self.api_key.clone()
        }
    }
}

/// Subtitle burn-in configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BurnConfig {
    /// ffmpeg binary; falls back to FFMPEG_BIN, then plain "ffmpeg"
    #[serde(default = "String::new")]
    pub ffmpeg_bin: String,

    /// Subtitle font size passed to force_style
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Outline width passed to force_style
    #[serde(default = "default_outline")]
    pub outline: u32,

    /// Shadow depth passed to force_style
    #[serde(default = "default_shadow")]
    pub shadow: u32,

    /// Timeout for the ffmpeg run in seconds
    #[serde(default = "default_burn_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: String::new(),
            font_size: default_font_size(),
            outline: default_outline(),
            shadow: default_shadow(),
            timeout_secs: default_burn_timeout_secs(),
        }
    }
}

impl BurnConfig {
    /// ffmpeg binary path, resolved against the environment
    pub fn resolved_ffmpeg_bin(&self) -> String {
        if !self.ffmpeg_bin.is_empty() {
            return self.ffmpeg_bin.clone();
        }
        env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            work_dir: default_work_dir(),
            transcription: TranscriptionConfig::default(),
            translation: TranslationConfig::default(),
            burn: BurnConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the language codes in the configuration
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .with_context(|| format!("Invalid source language: {}", self.source_language))?;
        let target = language_utils::validate_language_code(&self.target_language)
            .with_context(|| format!("Invalid target language: {}", self.target_language))?;
        if target == language_utils::AUTO_LANGUAGE {
            anyhow::bail!("Target language cannot be 'auto'");
        }
        Ok(())
    }
}

fn default_source_language() -> String {
    // The demo flow pins Spanish as the source
    "es".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_work_dir() -> String {
    "workdir".to_string()
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_transcription_timeout_secs() -> u64 {
    600
}

fn default_translation_timeout_secs() -> u64 {
    30
}

fn default_font_size() -> u32 {
    16
}

fn default_outline() -> u32 {
    1
}

fn default_shadow() -> u32 {
    1
}

fn default_burn_timeout_secs() -> u64 {
    600
}
