use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Transcription command settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Audio extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Directory watch settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Inference device for the transcription command
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    // @device: CPU inference
    #[default]
    Cpu,
    // @device: CUDA GPU inference
    Cuda,
}

impl Device {
    // @returns: Lowercase device identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Cpu => "cpu".to_string(),
            Self::Cuda => "cuda".to_string(),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            _ => Err(anyhow!("Invalid device: {}", s)),
        }
    }
}

/// Numeric precision used by the transcription backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ComputeType {
    Float16,
    Float32,
    Int8,
}

impl ComputeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Int8 => "int8",
        }
    }
}

impl std::fmt::Display for ComputeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ComputeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "float16" | "fp16" => Ok(Self::Float16),
            "float32" | "fp32" => Ok(Self::Float32),
            "int8" => Ok(Self::Int8),
            _ => Err(anyhow!("Invalid compute type: {}", s)),
        }
    }
}

/// Transcription command configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Command used for transcription and alignment
    #[serde(default = "default_transcription_command")]
    pub command: String,

    /// Model name passed to the command (tiny, base, small, medium, large)
    #[serde(default = "default_model")]
    pub model: String,

    /// Inference device
    #[serde(default)]
    pub device: Device,

    /// Compute type override. When unset, cpu runs use float32 and
    /// everything else float16.
    #[serde(default)]
    pub compute_type: Option<ComputeType>,

    /// Command timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranscriptionConfig {
    /// Compute type after applying the device-based fallback
    pub fn effective_compute_type(&self) -> ComputeType {
        if let Some(compute_type) = &self.compute_type {
            return compute_type.clone();
        }

        match self.device {
            Device::Cpu => ComputeType::Float32,
            Device::Cuda => ComputeType::Float16,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            command: default_transcription_command(),
            model: default_model(),
            device: Device::default(),
            compute_type: None,
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Audio extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// ffmpeg binary to invoke
    #[serde(default = "default_ffmpeg_command")]
    pub command: String,

    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output channel count
    #[serde(default = "default_channels")]
    pub channels: u32,

    /// ffmpeg timeout in seconds
    #[serde(default = "default_extraction_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            command: default_ffmpeg_command(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            timeout_secs: default_extraction_timeout_secs(),
        }
    }
}

/// Directory watch configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// Directory to watch for new media files
    #[serde(default = "default_watch_directory")]
    pub directory: PathBuf,

    /// Seconds between scans of the watch directory
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Media file extensions that trigger the pipeline
    #[serde(default = "default_media_extensions")]
    pub extensions: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            directory: default_watch_directory(),
            poll_interval_secs: default_poll_interval_secs(),
            extensions: default_media_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_transcription_command() -> String {
    "whisperx".to_string()
}

fn default_model() -> String {
    "medium".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    3600
}

fn default_ffmpeg_command() -> String {
    "ffmpeg".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u32 {
    1
}

fn default_extraction_timeout_secs() -> u64 {
    300
}

fn default_watch_directory() -> PathBuf {
    PathBuf::from("incoming")
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_media_extensions() -> Vec<String> {
    ["mp4", "mkv", "wav", "mp3", "mov", "avi", "webm", "m4a", "flac", "ogg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.transcription.command.trim().is_empty() {
            return Err(anyhow!("Transcription command must not be empty"));
        }

        if self.transcription.model.trim().is_empty() {
            return Err(anyhow!("Transcription model must not be empty"));
        }

        if self.transcription.timeout_secs == 0 {
            return Err(anyhow!("Transcription timeout must be greater than zero"));
        }

        if self.extraction.sample_rate == 0 {
            return Err(anyhow!("Extraction sample rate must be greater than zero"));
        }

        if self.extraction.channels == 0 {
            return Err(anyhow!("Extraction channel count must be greater than zero"));
        }

        if self.watch.poll_interval_secs == 0 {
            return Err(anyhow!("Watch poll interval must be greater than zero"));
        }

        if self.watch.extensions.is_empty() {
            return Err(anyhow!("Watch extension list must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            transcription: TranscriptionConfig::default(),
            extraction: ExtractionConfig::default(),
            watch: WatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
