/*!
 * Transcription backends.
 *
 * The speech-to-text and alignment work happens entirely inside an external
 * command; this module only defines the boundary contract and the client
 * that drives the command.
 */

use std::path::Path;
use async_trait::async_trait;

use crate::errors::TranscriptionError;
use crate::subtitle_formatter::Segment;

pub mod whisper_cli;
pub mod mock;

pub use whisper_cli::WhisperCliTranscriber;
pub use mock::MockTranscriber;

/// Boundary contract for the transcription/alignment collaborator
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into time-stamped segments
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>, TranscriptionError>;
}
