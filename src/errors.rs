/*!
 * Error types for the autosub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering timestamps and subtitle documents
#[derive(Error, Debug, PartialEq)]
pub enum FormatError {
    /// A segment carried a NaN or infinite timestamp
    #[error("non-finite timestamp: {0}")]
    NonFiniteTimestamp(f64),

    /// A segment carried a negative timestamp
    #[error("negative timestamp: {0}")]
    NegativeTimestamp(f64),
}

/// Errors that can occur while extracting audio with ffmpeg
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The ffmpeg binary could not be launched
    #[error("failed to launch {command}: {source}")]
    Launch {
        /// Binary that was invoked
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// ffmpeg exited with a non-zero status
    #[error("ffmpeg failed: {stderr}")]
    Failed {
        /// Filtered stderr output
        stderr: String,
    },

    /// ffmpeg did not finish within the configured timeout
    #[error("ffmpeg timed out after {0} seconds")]
    TimedOut(u64),
}

/// Errors that can occur while running the external transcription command
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The transcription binary could not be launched
    #[error("failed to launch {command}: {source}")]
    Launch {
        /// Binary that was invoked
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The transcription command exited with a non-zero status
    #[error("transcription command failed: {stderr}")]
    Failed {
        /// Stderr output of the command
        stderr: String,
    },

    /// The transcription command did not finish within the configured timeout
    #[error("transcription command timed out after {0} seconds")]
    TimedOut(u64),

    /// The result file could not be read or parsed
    #[error("invalid transcription output in {path}: {reason}")]
    InvalidOutput {
        /// Path of the result file
        path: PathBuf,
        /// What went wrong while parsing it
        reason: String,
    },

    /// Neither a result file nor parseable stdout was produced
    #[error("transcription command produced no usable output")]
    NoOutput,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle formatting
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from audio extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from transcription
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
