// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, LogLevel};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod media_burner;
mod providers;
mod session;
mod subtitle_processor;
mod translation_service;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe a video to a timed SRT caption track
    Transcribe {
        /// Input video file
        #[arg(value_name = "VIDEO")]
        video: PathBuf,

        /// Source language code ('auto' or es/en/pt/fr/it/de)
        #[arg(short, long)]
        source_language: Option<String>,
    },

    /// Translate an SRT file, preserving indices and timings
    Translate {
        /// Input SRT file
        #[arg(value_name = "SRT")]
        srt: PathBuf,

        /// Target language code (es/en/pt/fr/it/de)
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Burn an SRT file into a video with ffmpeg
    Burn {
        /// Input video file
        #[arg(value_name = "VIDEO")]
        video: PathBuf,

        /// SRT file to burn
        #[arg(value_name = "SRT")]
        srt: PathBuf,

        /// Output video path (defaults to <stem>_<lang>.mp4 in the work dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subtitle font size
        #[arg(long)]
        font_size: Option<u32>,
    },

    /// Export an SRT file as a plain-text transcript
    Text {
        /// Input SRT file
        #[arg(value_name = "SRT")]
        srt: PathBuf,
    },

    /// Transcribe, optionally translate, and burn in one pass
    Run {
        /// Input video file
        #[arg(value_name = "VIDEO")]
        video: PathBuf,

        /// Target language; omit to burn the untranslated captions
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Generate shell completions for subburn
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subburn - caption pipeline for short videos
///
/// Transcribes a video to SRT captions, optionally machine-translates them
/// while preserving timing, and burns them into the video with ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "subburn")]
#[command(version = "0.1.0")]
#[command(about = "Generate, translate and burn video subtitles")]
#[command(long_about = "subburn transcribes a video to a timed SRT caption track, optionally
machine-translates the captions to another language while preserving the
original indices and timings, and burns the captions into the video.

EXAMPLES:
    subburn transcribe clip.mp4                 # Generate clip.srt
    subburn translate workdir/clip.srt -t en    # Produce clip_en.srt
    subburn burn clip.mp4 workdir/clip_en.srt   # Produce clip_en.mp4
    subburn text workdir/clip.srt               # Plain transcript
    subburn run clip.mp4 -t en                  # Whole pipeline
    subburn completions bash > subburn.bash     # Shell completions

CONFIGURATION:
    Configuration is stored in conf.json by default. API keys can be left
    empty in the file and provided via ASSEMBLYAI_API_KEY and DEEPL_API_KEY.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level; the level is adjusted
    // after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subburn", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;

    // CLI log level wins over the config file
    if let Some(cmd_log_level) = &cli.log_level {
        config.log_level = cmd_log_level.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    match cli.command {
        Commands::Transcribe { video, source_language } => {
            if let Some(lang) = source_language {
                config.source_language = lang;
            }
            config.validate()?;
            let mut controller = Controller::new_with_config(config)?;
            let srt_path = controller.transcribe(&video).await?;
            info!("SRT generated: {}", srt_path.display());
        }
        Commands::Translate { srt, target_language } => {
            if let Some(lang) = target_language {
                config.target_language = lang;
            }
            config.validate()?;
            let target = config.target_language.clone();
            let mut controller = Controller::new_with_config(config)?;
            controller.adopt_srt(&srt)?;
            let output = controller.translate(&target).await?;
            info!("Translated SRT: {}", output.display());
        }
        Commands::Burn { video, srt, output, font_size } => {
            if let Some(size) = font_size {
                config.burn.font_size = size;
            }
            let mut controller = Controller::new_with_config(config)?;
            controller.adopt_srt(&srt)?;
            let output_path = controller.burn(&video, output).await?;
            info!("Subtitled video: {}", output_path.display());
        }
        Commands::Text { srt } => {
            let mut controller = Controller::new_with_config(config)?;
            controller.adopt_srt(&srt)?;
            let output = controller.export_text()?;
            info!("Transcript: {}", output.display());
        }
        Commands::Run { video, target_language } => {
            if let Some(lang) = &target_language {
                config.target_language = lang.clone();
            }
            config.validate()?;
            let mut controller = Controller::new_with_config(config)?;

            let srt_path = controller.transcribe(&video).await?;
            info!("SRT generated: {}", srt_path.display());

            if let Some(target) = target_language {
                let translated = controller.translate(&target).await?;
                info!("Translated SRT: {}", translated.display());
            }

            let output = controller.burn(&video, None).await?;
            info!("Subtitled video: {}", output.display());
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}

fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        info!("No config file at {}, using defaults", config_path);
        Ok(Config::default())
    }
}
