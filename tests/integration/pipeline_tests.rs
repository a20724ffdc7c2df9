/*!
 * End-to-end tests for the subtitle generation pipeline
 */

#![allow(non_snake_case)]

use std::path::Path;
use std::sync::Arc;
use anyhow::Result;
use autosub::app_config::Config;
use autosub::app_controller::Controller;
use autosub::file_utils::FileManager;
use autosub::subtitle_formatter::{render_srt, render_vtt, Segment};
use autosub::transcribe::MockTranscriber;
use crate::common;

/// Test that a missing input file is rejected
#[tokio::test]
async fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run(Path::new("does_not_exist.mkv"), false).await;

    assert!(result.is_err());
    Ok(())
}

/// Test that an already-subtitled file is skipped without transcription
#[tokio::test]
async fn test_run_withExistingOutputs_shouldSkipWithoutTranscribing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let media = common::create_test_file(temp_dir.path(), "clip.mp4", "fake media")?;
    common::create_test_file(temp_dir.path(), "clip.srt", "")?;
    common::create_test_file(temp_dir.path(), "clip.vtt", "WEBVTT\n\n")?;

    let mock = Arc::new(MockTranscriber::new(common::sample_segments()));
    let controller = Controller::with_transcriber(Config::default(), mock.clone());

    controller.run(&media, false).await?;

    assert_eq!(mock.call_count(), 0);
    Ok(())
}

/// Test that folder mode rejects a directory without media files
#[tokio::test]
async fn test_run_folder_withNoMediaFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.txt", "no media here")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run_folder(temp_dir.path(), false).await;

    assert!(result.is_err());
    Ok(())
}

/// Test that folder mode rejects a missing directory
#[tokio::test]
async fn test_run_folder_withMissingDirectory_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let result = controller.run_folder(Path::new("no_such_directory"), false).await;
    assert!(result.is_err());
    Ok(())
}

/// Test the render-and-write half of the pipeline end to end
#[test]
fn test_render_and_write_withSegments_shouldProduceAdjacentOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let media = temp_dir.path().join("episode.mkv");

    let segments = vec![
        Segment::new(1.0, 2.5, " Hello "),
        Segment::new(2.5, 4.0, "world"),
    ];

    let (srt_path, vtt_path) = FileManager::subtitle_output_paths(&media);
    FileManager::write_to_file(&srt_path, &render_srt(&segments)?)?;
    FileManager::write_to_file(&vtt_path, &render_vtt(&segments)?)?;

    assert_eq!(srt_path, temp_dir.path().join("episode.srt"));
    assert_eq!(vtt_path, temp_dir.path().join("episode.vtt"));

    let srt = std::fs::read_to_string(&srt_path)?;
    let vtt = std::fs::read_to_string(&vtt_path)?;

    assert!(srt.starts_with("1\n00:00:01,000 --> 00:00:02,500\nHello\n\n"));
    assert!(srt.contains("2\n00:00:02,500 --> 00:00:04,000\nworld\n\n"));
    assert!(vtt.starts_with("WEBVTT\n\n"));
    assert!(vtt.contains("00:00:01.000 --> 00:00:02.500\nHello\n\n"));
    assert!(!vtt.contains("\n1\n"), "WebVTT cues must not be numbered");
    Ok(())
}

/// Test that the same segment sequence always writes identical files
#[test]
fn test_render_withRepeatedRuns_shouldBeByteIdentical() -> Result<()> {
    let segments = common::sample_segments();

    let first_srt = render_srt(&segments)?;
    let first_vtt = render_vtt(&segments)?;
    let second_srt = render_srt(&segments)?;
    let second_vtt = render_vtt(&segments)?;

    assert_eq!(first_srt.as_bytes(), second_srt.as_bytes());
    assert_eq!(first_vtt.as_bytes(), second_vtt.as_bytes());
    Ok(())
}
