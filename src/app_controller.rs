use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::media_burner::{BurnStyle, MediaBurner};
use crate::providers::assemblyai::AssemblyAi;
use crate::providers::deepl::DeepL;
use crate::providers::{JobStatus, TranscriptionClient, TranslationClient};
use crate::session::Session;
use crate::subtitle_processor::{srt_to_plain_text, SubtitleDocument};
use crate::translation_service::TranslationService;

// @module: Orchestration of the transcribe -> translate -> burn pipeline

/// Main application controller.
///
/// Wires configuration, provider clients, the translation service and the
/// burner together, and tracks produced SRT artifacts in a [`Session`].
/// Each step reports success or failure on its own; a failure downstream
/// (say a burn) never invalidates artifacts produced upstream.
pub struct Controller {
    /// Application configuration
    config: Config,
    /// Speech-to-text capability
    transcriber: Arc<dyn TranscriptionClient>,
    /// Structure-preserving translation pipeline
    translation_service: TranslationService,
    /// Subtitle burn-in capability
    burner: MediaBurner,
    /// Produced artifacts, per language
    session: Session,
}

impl Controller {
    /// Create a controller with the real provider clients from the config
    pub fn new_with_config(config: Config) -> Result<Self> {
        let transcriber: Arc<dyn TranscriptionClient> = Arc::new(AssemblyAi::new(
            config.transcription.resolved_api_key(),
            config.transcription.endpoint.clone(),
            config.transcription.timeout_secs,
        ));
        let translator: Arc<dyn TranslationClient> = Arc::new(DeepL::new(
            config.translation.resolved_api_key(),
            config.translation.endpoint.clone(),
            config.translation.timeout_secs,
        ));
        Ok(Self::with_clients(config, transcriber, translator))
    }

    /// Create a controller with injected clients (used by tests)
    pub fn with_clients(
        config: Config,
        transcriber: Arc<dyn TranscriptionClient>,
        translator: Arc<dyn TranslationClient>,
    ) -> Self {
        let translation_service =
            TranslationService::new(translator, config.source_language.clone());
        let burner = MediaBurner::new(
            config.burn.resolved_ffmpeg_bin(),
            config.burn.timeout_secs,
        );
        Controller {
            config,
            transcriber,
            translation_service,
            burner,
            session: Session::new(),
        }
    }

    /// The session tracking produced artifacts
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Transcribe a video to an SRT file in the work directory.
    ///
    /// Uploads the media, submits a transcription job, polls until the job
    /// reaches a terminal state, fetches the SRT and registers it in the
    /// session under the resolved source language.
    pub async fn transcribe(&mut self, video_path: &Path) -> Result<PathBuf> {
        if !FileManager::file_exists(video_path) {
            return Err(anyhow!("Video file does not exist: {}", video_path.display()));
        }
        FileManager::ensure_dir(&self.config.work_dir)?;

        let spinner = progress_spinner("Uploading media");
        let audio_url = self.transcriber.upload(video_path).await?;
        spinner.set_message("Transcribing");

        // Only pass a language hint for an explicit source language
        let hint = if self.config.source_language == language_utils::AUTO_LANGUAGE {
            None
        } else {
            Some(self.config.source_language.as_str())
        };
        let job_id = self.transcriber.submit(&audio_url, hint).await?;

        let srt_text = self.wait_for_transcript(&job_id).await?;
        spinner.finish_and_clear();

        let source_language =
            language_utils::resolve_source_language(&self.config.source_language, "es")?;

        let srt_path = FileManager::with_extension_in_dir(video_path, &self.config.work_dir, "srt");
        FileManager::write_to_file(&srt_path, &srt_text)?;

        let document = SubtitleDocument::parse(&srt_text, &source_language);
        info!(
            "Transcription produced {} cues -> {}",
            document.cue_count(),
            srt_path.display()
        );
        let unordered = document.unordered_cue_count();
        if unordered > 0 {
            warn!("{} cues have end time before start time", unordered);
        }

        self.session.register(source_language, &srt_path);
        Ok(srt_path)
    }

    /// Translate the active SRT to the target language.
    ///
    /// Produces `<stem>_<target>.srt` in the work directory, preserving
    /// indices, timestamps and raw blocks; only cue text changes. The new
    /// file becomes the active SRT.
    pub async fn translate(&mut self, target_language: &str) -> Result<PathBuf> {
        let active_path = self
            .session
            .active_srt()
            .ok_or_else(|| anyhow!("No subtitle available yet; transcribe first"))?
            .to_path_buf();
        let active_language = self
            .session
            .active_language()
            .unwrap_or(&self.config.source_language)
            .to_string();

        let document = SubtitleDocument::read_from_file(&active_path, &active_language)?;

        let spinner = progress_spinner(&format!("Translating to {}", target_language));
        let translated = self
            .translation_service
            .translate_document(&document, language_utils::AUTO_LANGUAGE, target_language)
            .await?;
        spinner.finish_and_clear();

        let base = base_stem(&active_path);
        let output_path = FileManager::generate_output_path(
            Path::new(&base),
            &self.config.work_dir,
            &translated.source_language,
            "srt",
        );
        translated.write_to_srt(&output_path)?;
        info!("Translated SRT written to {}", output_path.display());

        self.session.register(translated.source_language.clone(), &output_path);
        Ok(output_path)
    }

    /// Switch the active subtitle language
    pub fn activate(&mut self, language: &str) -> Result<()> {
        self.session.set_active(language)
    }

    /// Register an existing SRT file as the active subtitle.
    ///
    /// The language is inferred from a `_<lang>` stem suffix, falling back
    /// to the configured source language. Returns the inferred language.
    pub fn adopt_srt(&mut self, srt_path: &Path) -> Result<String> {
        if !FileManager::file_exists(srt_path) {
            return Err(anyhow!("Subtitle file does not exist: {}", srt_path.display()));
        }
        let stem = srt_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let fallback =
            language_utils::resolve_source_language(&self.config.source_language, "es")?;
        let language = language_utils::language_from_srt_stem(&stem, &fallback);
        self.session.register(language.clone(), srt_path);
        Ok(language)
    }

    /// Burn the active SRT into a video.
    ///
    /// Defaults to `<stem>_<lang>.mp4` in the work directory when no output
    /// path is given. A burn failure leaves all registered SRTs usable.
    pub async fn burn(&mut self, video_path: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        let srt_path = self
            .session
            .active_srt()
            .ok_or_else(|| anyhow!("No subtitle available yet; transcribe or translate first"))?
            .to_path_buf();
        let active_language = self.session.active_language().unwrap_or("es").to_string();

        // Guard against burning a file that does not match the chosen language
        if let Some(stem) = srt_path.file_stem().map(|s| s.to_string_lossy().to_string()) {
            let inferred = language_utils::language_from_srt_stem(&stem, &active_language);
            if inferred != active_language {
                warn!(
                    "Active SRT {} does not look like language {}",
                    srt_path.display(),
                    active_language
                );
            }
        }

        FileManager::ensure_dir(&self.config.work_dir)?;
        let output_path = output.unwrap_or_else(|| {
            FileManager::generate_output_path(
                video_path,
                &self.config.work_dir,
                &active_language,
                "mp4",
            )
        });

        let spinner = progress_spinner("Burning subtitles");
        let style = BurnStyle::from_config(&self.config.burn);
        let result = self
            .burner
            .burn(video_path, &srt_path, &output_path, style)
            .await;
        spinner.finish_and_clear();
        result?;

        info!("Subtitled video written to {}", output_path.display());
        Ok(output_path)
    }

    /// Export the active SRT as a plain-text transcript (`<stem>.txt`)
    pub fn export_text(&self) -> Result<PathBuf> {
        let srt_path = self
            .session
            .active_srt()
            .ok_or_else(|| anyhow!("No subtitle available yet; transcribe first"))?;

        let content = FileManager::read_to_string_lossy(srt_path)?;
        let text = srt_to_plain_text(&content);

        let output_path = FileManager::with_extension_in_dir(srt_path, &self.config.work_dir, "txt");
        FileManager::write_to_file(&output_path, &text)?;
        info!("Transcript written to {}", output_path.display());
        Ok(output_path)
    }

    /// Poll a transcription job to completion and fetch its SRT
    async fn wait_for_transcript(&self, job_id: &str) -> Result<String> {
        let deadline = Instant::now() + Duration::from_secs(self.config.transcription.timeout_secs);
        let interval = Duration::from_secs(self.config.transcription.poll_interval_secs.max(1));

        loop {
            let status = self.transcriber.poll_status(job_id).await?;
            match status {
                JobStatus::Completed => {
                    return Ok(self.transcriber.fetch_srt(job_id).await?);
                }
                JobStatus::Error(message) => {
                    return Err(ProviderError::JobFailed(message).into());
                }
                JobStatus::Queued | JobStatus::Processing => {
                    if Instant::now() >= deadline {
                        return Err(ProviderError::JobTimeout {
                            job_id: job_id.to_string(),
                            timeout_secs: self.config.transcription.timeout_secs,
                        }
                        .into());
                    }
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}

/// Strip a trailing `_<lang>` suffix from a file stem, so translated files
/// chain as `movie_en.srt`, `movie_fr.srt` rather than `movie_en_fr.srt`.
fn base_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if let Some((base, last)) = stem.rsplit_once('_') {
        if language_utils::is_supported_code(last) && !base.is_empty() {
            return base.to_string();
        }
    }
    stem
}

fn progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
