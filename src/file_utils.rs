use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Subtitle output paths adjacent to the input media file
    // @returns: (<input-stem>.srt, <input-stem>.vtt)
    pub fn subtitle_output_paths<P: AsRef<Path>>(input_file: P) -> (PathBuf, PathBuf) {
        let input_file = input_file.as_ref();
        let parent = match input_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let stem = input_file.file_stem().unwrap_or_default();

        let mut srt_name = stem.to_string_lossy().to_string();
        let mut vtt_name = srt_name.clone();
        srt_name.push_str(".srt");
        vtt_name.push_str(".vtt");

        (parent.join(srt_name), parent.join(vtt_name))
    }

    /// Write a string to a file as UTF-8
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Check whether a file looks like a media file by extension
    pub fn has_media_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        let path = path.as_ref();

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            return extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext_str));
        }

        false
    }

    /// Detect if a file is a media file supported by ffmpeg.
    ///
    /// Extension check first, ffprobe as a fallback for files with unusual
    /// or missing extensions.
    pub fn is_media_file<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        let path = path.as_ref();

        if !path.is_file() {
            return false;
        }

        if Self::has_media_extension(path, extensions) {
            return true;
        }

        let output = Command::new("ffprobe")
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=format_name")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(path)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let format = String::from_utf8_lossy(&output.stdout).trim().to_lowercase();
                !format.is_empty()
            }
            _ => false,
        }
    }

    /// Find all media files under a directory
    pub fn find_media_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_media_extension(path, extensions) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }
}
