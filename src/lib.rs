/*!
 * # autosub - Automatic subtitle generation
 *
 * A Rust library for generating SRT and WebVTT subtitles from video and
 * audio files.
 *
 * ## Features
 *
 * - Extract a mono 16 kHz audio track from media files with ffmpeg
 * - Drive an external whisper-style transcription and alignment command
 * - Render the resulting timed segments as SRT and WebVTT documents
 * - Watch a directory and subtitle new media files as they appear
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_formatter`: Timestamp rendering and SRT/WebVTT serialization
 * - `audio_extractor`: Audio track extraction via ffmpeg
 * - `transcribe`: Transcription command clients:
 *   - `transcribe::whisper_cli`: External command client
 *   - `transcribe::mock`: Canned backend for tests
 * - `app_controller`: Main application controller
 * - `watcher`: Polling directory watch mode
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod audio_extractor;
pub mod errors;
pub mod file_utils;
pub mod subtitle_formatter;
pub mod transcribe;
pub mod watcher;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use subtitle_formatter::{format_timestamp, render_srt, render_vtt, Segment, TimestampFrame};
pub use transcribe::{MockTranscriber, Transcriber, WhisperCliTranscriber};
pub use errors::{AppError, ExtractionError, FormatError, TranscriptionError};
