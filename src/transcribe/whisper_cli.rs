use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tokio::process::Command;

use crate::app_config::TranscriptionConfig;
use crate::errors::TranscriptionError;
use crate::subtitle_formatter::Segment;
use crate::transcribe::Transcriber;

// @module: External transcription command client

// @const: Timestamped stdout line, e.g. "[00:00:01.000 --> 00:00:02.500]  text"
static STDOUT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[(\d+):(\d{2}):(\d{2})[.,](\d{3}) --> (\d+):(\d{2}):(\d{2})[.,](\d{3})\]\s?(.*)$",
    )
    .unwrap()
});

/// Aligned transcription result as written by the external command
#[derive(Debug, Deserialize)]
struct TranscriptionResult {
    segments: Vec<Segment>,
}

/// Client for an external whisper-style transcription and alignment command.
///
/// The command is invoked as
/// `<command> --input <audio> --model <model> --device <device>
/// --compute-type <type> --output <result.json>` and is expected to write
/// `{"segments": [{"start": .., "end": .., "text": ..}, ..]}` to the result
/// path. Commands that only print timestamped lines to stdout are supported
/// as a fallback.
pub struct WhisperCliTranscriber {
    config: TranscriptionConfig,
}

impl WhisperCliTranscriber {
    /// Creates a new client with the given transcription settings
    pub fn new(config: TranscriptionConfig) -> Self {
        WhisperCliTranscriber { config }
    }

    /// Parse a JSON result file into segments.
    ///
    /// A segment missing `start` or `end` fails the whole parse with a
    /// missing-field indication; a missing `text` defaults to empty.
    pub fn parse_json_result(path: &Path, content: &str) -> Result<Vec<Segment>, TranscriptionError> {
        let result: TranscriptionResult =
            serde_json::from_str(content).map_err(|e| TranscriptionError::InvalidOutput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(result.segments)
    }

    /// Parse timestamped stdout lines into segments.
    ///
    /// Lines that do not match the `[HH:MM:SS.mmm --> HH:MM:SS.mmm] text`
    /// shape are ignored.
    pub fn parse_stdout(stdout: &str) -> Vec<Segment> {
        let mut segments = Vec::new();

        for line in stdout.lines() {
            if let Some(caps) = STDOUT_LINE_REGEX.captures(line.trim_end()) {
                let start = Self::captured_seconds(&caps, 1);
                let end = Self::captured_seconds(&caps, 5);
                let text = caps.get(9).map_or("", |m| m.as_str());

                segments.push(Segment::new(start, end, text));
            }
        }

        segments
    }

    fn captured_seconds(caps: &regex::Captures, start_idx: usize) -> f64 {
        let hours: f64 = caps.get(start_idx).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
        let minutes: f64 = caps.get(start_idx + 1).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
        let seconds: f64 = caps.get(start_idx + 2).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
        let millis: f64 = caps.get(start_idx + 3).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));

        hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>, TranscriptionError> {
        let result_path = audio_path.with_extension("json");
        let compute_type = self.config.effective_compute_type();

        debug!(
            "Running transcription: command='{}' model='{}' device='{}' compute_type='{}'",
            self.config.command, self.config.model, self.config.device, compute_type
        );

        let command_future = Command::new(&self.config.command)
            .args([
                "--input",
                audio_path.to_str().unwrap_or_default(),
                "--model",
                &self.config.model,
                "--device",
                &self.config.device.to_lowercase_string(),
                "--compute-type",
                compute_type.as_str(),
                "--output",
                result_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::select! {
            result = command_future => {
                result.map_err(|e| TranscriptionError::Launch {
                    command: self.config.command.clone(),
                    source: e,
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(TranscriptionError::TimedOut(self.config.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Transcription command failed: {}", stderr);
            return Err(TranscriptionError::Failed { stderr });
        }

        if result_path.exists() {
            let content = std::fs::read_to_string(&result_path).map_err(|e| {
                TranscriptionError::InvalidOutput {
                    path: result_path.clone(),
                    reason: e.to_string(),
                }
            })?;
            return Self::parse_json_result(&result_path, &content);
        }

        warn!(
            "No result file at {:?}, falling back to stdout parsing",
            result_path
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        let segments = Self::parse_stdout(&stdout);
        if segments.is_empty() {
            return Err(TranscriptionError::NoOutput);
        }

        Ok(segments)
    }
}
