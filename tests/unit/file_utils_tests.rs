/*!
 * Tests for file utility functions
 */

#![allow(non_snake_case)]

use std::path::Path;
use anyhow::Result;
use autosub::file_utils::FileManager;
use crate::common;

fn media_extensions() -> Vec<String> {
    autosub::app_config::Config::default().watch.extensions
}

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "probe.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that subtitle output paths sit next to the input with its stem
#[test]
fn test_subtitle_output_paths_withVideoInput_shouldBeAdjacent() {
    let (srt, vtt) = FileManager::subtitle_output_paths(Path::new("/media/clips/episode.mkv"));

    assert_eq!(srt, Path::new("/media/clips/episode.srt"));
    assert_eq!(vtt, Path::new("/media/clips/episode.vtt"));
}

/// Test output paths for a bare filename without a parent directory
#[test]
fn test_subtitle_output_paths_withBareFilename_shouldUseCurrentDir() {
    let (srt, vtt) = FileManager::subtitle_output_paths(Path::new("clip.mp4"));

    assert_eq!(srt, Path::new("./clip.srt"));
    assert_eq!(vtt, Path::new("./clip.vtt"));
}

/// Test extension matching is case-insensitive
#[test]
fn test_has_media_extension_withUppercaseExtension_shouldMatch() {
    let extensions = media_extensions();

    assert!(FileManager::has_media_extension(Path::new("MOVIE.MKV"), &extensions));
    assert!(FileManager::has_media_extension(Path::new("song.Mp3"), &extensions));
    assert!(!FileManager::has_media_extension(Path::new("notes.txt"), &extensions));
    assert!(!FileManager::has_media_extension(Path::new("no_extension"), &extensions));
}

/// Test that media discovery only picks up configured extensions
#[test]
fn test_find_media_files_withMixedContent_shouldFilterByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.mp4", "x")?;
    common::create_test_file(temp_dir.path(), "b.wav", "x")?;
    common::create_test_file(temp_dir.path(), "c.txt", "x")?;

    let found = FileManager::find_media_files(temp_dir.path(), &media_extensions())?;
    let mut names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    names.sort();

    assert_eq!(names, vec!["a.mp4", "b.wav"]);
    Ok(())
}

/// Test writing a file into a directory that does not exist yet
#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("out.srt");

    FileManager::write_to_file(&nested, "1\n00:00:00,000 --> 00:00:01,000\nhi\n\n")?;

    assert!(nested.exists());
    let content = std::fs::read_to_string(&nested)?;
    assert!(content.starts_with("1\n"));
    Ok(())
}

/// Test ensure_dir is idempotent
#[test]
fn test_ensure_dir_withExistingDirectory_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    FileManager::ensure_dir(temp_dir.path())?;
    FileManager::ensure_dir(temp_dir.path())?;
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}
