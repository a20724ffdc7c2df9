use std::path::Path;
use std::time::Duration;
use log::{debug, error};
use tokio::process::Command;

use crate::app_config::ExtractionConfig;
use crate::errors::ExtractionError;

// @module: Audio track extraction via ffmpeg

/// Extract a mono, resampled audio track from a media file.
///
/// Runs `ffmpeg -y -i <input> -ac <channels> -ar <sample_rate> -vn <output>`
/// with a timeout so a wedged ffmpeg cannot stall the pipeline.
pub async fn extract_audio<P: AsRef<Path>>(
    input_path: P,
    output_path: P,
    config: &ExtractionConfig,
) -> Result<(), ExtractionError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    debug!("Extracting audio: {:?} -> {:?}", input_path, output_path);

    let ffmpeg_future = Command::new(&config.command)
        .args([
            "-y", // Overwrite existing file
            "-i",
            input_path.to_str().unwrap_or_default(),
            "-ac",
            &config.channels.to_string(),
            "-ar",
            &config.sample_rate.to_string(),
            "-vn", // Drop the video stream
            output_path.to_str().unwrap_or_default(),
        ])
        .output();

    let timeout_duration = Duration::from_secs(config.timeout_secs);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| ExtractionError::Launch {
                command: config.command.clone(),
                source: e,
            })?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(ExtractionError::TimedOut(config.timeout_secs));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Audio extraction failed: {}", filtered);
        return Err(ExtractionError::Failed { stderr: filtered });
    }

    debug!("Audio extraction OK: {:?}", output_path);
    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Chapter",
        "    Chapter",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "size=",
        "video:",
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
