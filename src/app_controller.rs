use anyhow::{Context, Result};
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use tempfile::TempDir;

use crate::app_config::Config;
use crate::audio_extractor;
use crate::file_utils::FileManager;
use crate::subtitle_formatter::{render_srt, render_vtt, Segment};
use crate::transcribe::{Transcriber, WhisperCliTranscriber};

// @module: Application controller for the subtitle generation pipeline

/// Main application controller driving extraction, transcription and rendering
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Transcription collaborator
    transcriber: Arc<dyn Transcriber>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let transcriber = Arc::new(WhisperCliTranscriber::new(config.transcription.clone()));
        Ok(Self {
            config,
            transcriber,
        })
    }

    /// Create a controller with an injected transcription backend - used by
    /// tests and library consumers
    #[allow(dead_code)]
    pub fn with_transcriber(config: Config, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber,
        }
    }

    /// Run the pipeline for a single media file.
    ///
    /// Extracts the audio track into a temporary directory, transcribes it,
    /// and writes `<stem>.srt` and `<stem>.vtt` next to the input file.
    pub async fn run(&self, input_file: &Path, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let (srt_path, vtt_path) = FileManager::subtitle_output_paths(input_file);
        if srt_path.exists() && vtt_path.exists() && !force_overwrite {
            warn!("Skipping file, subtitles already exist (use -f to force overwrite)");
            return Ok(());
        }

        info!("Generating subtitles for: {:?}", input_file);

        // Extract the audio track into a scratch directory that lives for
        // the duration of this run
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let audio_path = temp_dir.path().join("audio.wav");

        let extraction_start = std::time::Instant::now();
        audio_extractor::extract_audio(input_file, &audio_path, &self.config.extraction)
            .await
            .with_context(|| format!("Failed to extract audio from {:?}", input_file))?;
        let extraction_elapsed = extraction_start.elapsed();

        // Transcribe with a spinner, transcription dominates the runtime
        let spinner = Self::transcription_spinner();
        let transcription_start = std::time::Instant::now();
        let segments = self
            .transcriber
            .transcribe(&audio_path)
            .await
            .with_context(|| format!("Failed to transcribe {:?}", input_file))?;
        let transcription_elapsed = transcription_start.elapsed();
        spinner.finish_and_clear();

        info!("Transcription produced {} segment(s)", segments.len());

        self.write_subtitles(&segments, &srt_path, &vtt_path)?;

        let elapsed = start_time.elapsed();
        info!(
            "Done in {}. Extraction: {} - Transcription: {}",
            Self::format_duration(elapsed),
            Self::format_duration(extraction_elapsed),
            Self::format_duration(transcription_elapsed)
        );

        Ok(())
    }

    /// Run the pipeline for every media file in a directory.
    /// Files that already have both subtitle outputs will be skipped.
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let media_files = FileManager::find_media_files(input_dir, &self.config.watch.extensions)?;
        if media_files.is_empty() {
            return Err(anyhow::anyhow!("No media files found in directory: {:?}", input_dir));
        }

        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for media_file in media_files.iter() {
            let file_name = media_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let (srt_path, vtt_path) = FileManager::subtitle_output_paths(media_file);
            if srt_path.exists() && vtt_path.exists() && !force_overwrite {
                warn!("Skipping {}, subtitles already exist (use -f to force overwrite)", file_name);
                skip_count += 1;
                continue;
            }

            match self.run(media_file, force_overwrite).await {
                Ok(_) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }
        }

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            success_count,
            skip_count,
            error_count
        );

        Ok(())
    }

    /// Render segments and write both subtitle documents
    fn write_subtitles(&self, segments: &[Segment], srt_path: &Path, vtt_path: &Path) -> Result<()> {
        let srt_content = render_srt(segments).context("Failed to render SRT document")?;
        let vtt_content = render_vtt(segments).context("Failed to render WebVTT document")?;

        FileManager::write_to_file(srt_path, &srt_content)?;
        info!("Wrote {:?} ({} bytes)", srt_path, srt_content.len());

        FileManager::write_to_file(vtt_path, &vtt_content)?;
        info!("Wrote {:?} ({} bytes)", vtt_path, vtt_content.len());

        Ok(())
    }

    fn transcription_spinner() -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message("Transcribing, please wait…");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
