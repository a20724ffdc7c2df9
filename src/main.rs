// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::app_config::{ComputeType, Config, Device};
use crate::app_controller::Controller;
use crate::file_utils::FileManager;
use crate::watcher::DirectoryWatcher;

mod app_config;
mod app_controller;
mod audio_extractor;
mod errors;
mod file_utils;
mod subtitle_formatter;
mod transcribe;
mod watcher;

/// CLI Wrapper for Device to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDevice {
    Cpu,
    Cuda,
}

impl From<CliDevice> for Device {
    fn from(cli_device: CliDevice) -> Self {
        match cli_device {
            CliDevice::Cpu => Device::Cpu,
            CliDevice::Cuda => Device::Cuda,
        }
    }
}

/// CLI Wrapper for ComputeType to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliComputeType {
    Float16,
    Float32,
    Int8,
}

impl From<CliComputeType> for ComputeType {
    fn from(cli_compute_type: CliComputeType) -> Self {
        match cli_compute_type {
            CliComputeType::Float16 => ComputeType::Float16,
            CliComputeType::Float32 => ComputeType::Float32,
            CliComputeType::Int8 => ComputeType::Int8,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate subtitles for a media file or directory (default command)
    #[command(alias = "transcribe")]
    Generate(GenerateArgs),

    /// Watch a directory and subtitle new media files as they appear
    Watch(WatchArgs),

    /// Generate shell completions for autosub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input video/audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing subtitle files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Whisper model to use (tiny, base, small, medium, large)
    #[arg(short, long)]
    model: Option<String>,

    /// Device for model inference
    #[arg(short, long, value_enum)]
    device: Option<CliDevice>,

    /// Compute type for the transcription backend
    #[arg(long, value_enum)]
    compute_type: Option<CliComputeType>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Directory to watch (overrides the configured watch directory)
    #[arg(value_name = "WATCH_DIR")]
    directory: Option<PathBuf>,

    /// Seconds between directory scans
    #[arg(short, long)]
    poll_interval: Option<u64>,

    /// Force overwrite of existing subtitle files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Whisper model to use (tiny, base, small, medium, large)
    #[arg(short, long)]
    model: Option<String>,

    /// Device for model inference
    #[arg(short, long, value_enum)]
    device: Option<CliDevice>,

    /// Compute type for the transcription backend
    #[arg(long, value_enum)]
    compute_type: Option<CliComputeType>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autosub - Automatic subtitle generation
///
/// Extracts the audio track from video/audio files, feeds it to an external
/// speech-to-text and alignment command, and writes SRT and WebVTT subtitle
/// files next to the source media.
#[derive(Parser, Debug)]
#[command(name = "autosub")]
#[command(version = "1.0.0")]
#[command(about = "Automatic subtitle generation from video and audio files")]
#[command(long_about = "autosub extracts audio from media files, transcribes and aligns it with an
external whisper-style command, and writes .srt and .vtt subtitles next to
the source file.

EXAMPLES:
    autosub movie.mkv                        # Subtitle a single file
    autosub -f movie.mkv                     # Force overwrite existing subtitles
    autosub -m large -d cuda movie.mkv       # Use a specific model and device
    autosub /media/incoming/                 # Process an entire directory
    autosub watch /media/incoming/           # Watch a directory for new files
    autosub completions bash > autosub.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video/audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing subtitle files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Whisper model to use (tiny, base, small, medium, large)
    #[arg(short, long)]
    model: Option<String>,

    /// Device for model inference
    #[arg(short, long, value_enum)]
    device: Option<CliDevice>,

    /// Compute type for the transcription backend
    #[arg(long, value_enum)]
    compute_type: Option<CliComputeType>,

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

    // @returns: ANSI color for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autosub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Watch(args)) => run_watch(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let generate_args = GenerateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                model: cli.model,
                device: cli.device,
                compute_type: cli.compute_type,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

/// Load the config file (creating a default one when missing) and apply the
/// common CLI overrides on top of it.
fn load_config(
    config_path: &str,
    model: Option<String>,
    device: Option<CliDevice>,
    compute_type: Option<CliComputeType>,
    log_level: &Option<CliLogLevel>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(model) = model {
        config.transcription.model = model;
    }

    if let Some(device) = device {
        config.transcription.device = device.into();
    }

    if let Some(compute_type) = compute_type {
        config.transcription.compute_type = Some(compute_type.into());
    }

    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        options.model,
        options.device,
        options.compute_type,
        &options.log_level,
    )?;

    let media_extensions = config.watch.extensions.clone();
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        if !FileManager::is_media_file(&options.input_path, &media_extensions) {
            return Err(anyhow!(
                "Input file is not a supported media file: {:?}",
                options.input_path
            ));
        }
        controller.run(&options.input_path, options.force_overwrite).await
    } else if options.input_path.is_dir() {
        controller.run_folder(&options.input_path, options.force_overwrite).await
    } else {
        Err(anyhow!("Input path does not exist: {:?}", options.input_path))
    }
}

async fn run_watch(options: WatchArgs) -> Result<()> {
    let mut config = load_config(
        &options.config_path,
        options.model,
        options.device,
        options.compute_type,
        &options.log_level,
    )?;

    if let Some(directory) = options.directory {
        config.watch.directory = directory;
    }

    if let Some(poll_interval) = options.poll_interval {
        if poll_interval == 0 {
            return Err(anyhow!("Watch poll interval must be greater than zero"));
        }
        config.watch.poll_interval_secs = poll_interval;
    }

    let watch_config = config.watch.clone();
    let controller = Controller::with_config(config)?;
    let watcher = DirectoryWatcher::new(watch_config);

    watcher.run(&controller, options.force_overwrite).await
}
