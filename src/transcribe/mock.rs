// @module: Mock transcriber for tests

// Allow dead code - only exercised from the test suite
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;

use crate::errors::TranscriptionError;
use crate::subtitle_formatter::Segment;
use crate::transcribe::Transcriber;

/// Transcriber that returns canned segments without running any command
pub struct MockTranscriber {
    segments: Vec<Segment>,
    fail_with: Option<String>,
    call_count: AtomicUsize,
}

impl MockTranscriber {
    /// Creates a mock that yields the given segments
    pub fn new(segments: Vec<Segment>) -> Self {
        MockTranscriber {
            segments,
            fail_with: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that always fails with the given stderr message
    pub fn failing(stderr: impl Into<String>) -> Self {
        MockTranscriber {
            segments: Vec::new(),
            fail_with: Some(stderr.into()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Number of times transcribe was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<Vec<Segment>, TranscriptionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(stderr) = &self.fail_with {
            return Err(TranscriptionError::Failed {
                stderr: stderr.clone(),
            });
        }

        Ok(self.segments.clone())
    }
}
