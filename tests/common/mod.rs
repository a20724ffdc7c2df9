/*!
 * Common test utilities for the autosub test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use autosub::subtitle_formatter::Segment;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small segment sequence covering trimming and an empty-text entry
pub fn sample_segments() -> Vec<Segment> {
    vec![
        Segment::new(0.0, 1.25, "First line"),
        Segment::new(1.25, 3.5, "  padded text  "),
        Segment::new(3.5, 4.0, ""),
    ]
}
