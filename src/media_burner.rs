use std::path::Path;
use std::time::Duration;
use log::{debug, error};
use tokio::process::Command;

use crate::app_config::BurnConfig;
use crate::errors::BurnError;

// @module: Subtitle burn-in via the ffmpeg subtitles filter

/// Style parameters forwarded to the ffmpeg subtitles filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnStyle {
    /// Subtitle font size
    pub font_size: u32,
    /// Outline width
    pub outline: u32,
    /// Shadow depth
    pub shadow: u32,
}

impl Default for BurnStyle {
    fn default() -> Self {
        Self { font_size: 16, outline: 1, shadow: 1 }
    }
}

impl BurnStyle {
    /// Build a style from the burn section of the config
    pub fn from_config(config: &BurnConfig) -> Self {
        Self {
            font_size: config.font_size,
            outline: config.outline,
            shadow: config.shadow,
        }
    }
}

/// Burns an SRT file into a video container by re-encoding with ffmpeg.
///
/// Audio is copied through untouched. Failures surface verbatim (filtered
/// stderr) and are never retried here; a failed burn leaves any previously
/// produced subtitle artifacts fully usable.
#[derive(Debug)]
pub struct MediaBurner {
    /// ffmpeg binary to invoke
    ffmpeg_bin: String,
    /// How long a single ffmpeg run may take
    timeout_secs: u64,
}

impl MediaBurner {
    /// Create a burner for a given ffmpeg binary
    pub fn new(ffmpeg_bin: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
            timeout_secs,
        }
    }

    /// Build the `-vf` filter argument for a subtitle path and style.
    ///
    /// The subtitles filter wants forward slashes and an escaped colon in
    /// the path, even on Windows.
    pub fn subtitle_filter(srt_path: &Path, style: BurnStyle) -> String {
        let escaped = srt_path
            .to_string_lossy()
            .replace('\\', "/")
            .replace(':', r"\:");
        format!(
            "subtitles='{}':force_style='Fontsize={},Outline={},Shadow={}'",
            escaped, style.font_size, style.outline, style.shadow
        )
    }

    /// Burn `srt_path` into `video_path`, writing `output_path`
    pub async fn burn(
        &self,
        video_path: &Path,
        srt_path: &Path,
        output_path: &Path,
        style: BurnStyle,
    ) -> Result<(), BurnError> {
        let filter = Self::subtitle_filter(srt_path, style);
        debug!("Running ffmpeg with filter: {}", filter);

        let ffmpeg_future = Command::new(&self.ffmpeg_bin)
            .args([
                "-y",
                "-i", video_path.to_str().unwrap_or_default(),
                "-vf", &filter,
                "-c:a", "copy",
                output_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout = Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| BurnError::SpawnFailed(e.to_string()))?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(BurnError::Timeout(self.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Subtitle burn-in failed: {}", filtered);
            return Err(BurnError::FfmpegFailed(filtered));
        }

        Ok(())
    }
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
