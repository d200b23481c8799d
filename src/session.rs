use std::collections::HashMap;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

/// In-memory record of the SRT artifacts produced in one run.
///
/// Maps language codes to the SRT file generated for that language and
/// tracks which one is "active" (used for burn-in and exports). The core
/// never touches this; it belongs to the orchestration layer.
#[derive(Debug, Default, Clone)]
pub struct Session {
    /// Language code to SRT path
    documents: HashMap<String, PathBuf>,
    /// Currently active language, if any SRT exists
    active_language: Option<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an SRT for a language and make it the active one
    pub fn register(&mut self, language: impl Into<String>, srt_path: impl Into<PathBuf>) {
        let language = language.into();
        self.documents.insert(language.clone(), srt_path.into());
        self.active_language = Some(language);
    }

    /// Switch the active language to one that has a registered SRT
    pub fn set_active(&mut self, language: &str) -> Result<()> {
        if !self.documents.contains_key(language) {
            return Err(anyhow!("No subtitle registered for language: {}", language));
        }
        self.active_language = Some(language.to_string());
        Ok(())
    }

    /// The currently active language, if any
    pub fn active_language(&self) -> Option<&str> {
        self.active_language.as_deref()
    }

    /// Path of the active SRT, if any
    pub fn active_srt(&self) -> Option<&Path> {
        self.active_language
            .as_ref()
            .and_then(|lang| self.documents.get(lang))
            .map(|p| p.as_path())
    }

    /// Path of the SRT registered for a language, if any
    pub fn srt_for(&self, language: &str) -> Option<&Path> {
        self.documents.get(language).map(|p| p.as_path())
    }

    /// Registered languages, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.documents.keys().map(|k| k.as_str()).collect();
        langs.sort_unstable();
        langs
    }

    /// Whether any SRT has been registered
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Forget all registered SRTs
    pub fn clear(&mut self) {
        self.documents.clear();
        self.active_language = None;
    }
}
