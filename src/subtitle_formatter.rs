use std::fmt;
use serde::{Deserialize, Serialize};

use crate::errors::FormatError;

// @module: Timestamp rendering and SRT/WebVTT serialization

/// A unit of transcribed speech produced by the transcription collaborator.
///
/// `start` and `end` are seconds from the beginning of the media. Both are
/// required on the wire; `text` is optional and defaults to empty. Segments
/// are immutable inputs to the renderer and are never reordered, merged or
/// dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Transcribed text, possibly with surrounding whitespace
    #[serde(default)]
    pub text: String,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Decimal separator framing for a rendered timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFrame {
    /// SRT framing, comma before the milliseconds
    Srt,
    /// WebVTT framing, dot before the milliseconds
    Vtt,
}

impl TimestampFrame {
    fn separator(self) -> char {
        match self {
            TimestampFrame::Srt => ',',
            TimestampFrame::Vtt => '.',
        }
    }
}

impl fmt::Display for TimestampFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFrame::Srt => write!(f, "srt"),
            TimestampFrame::Vtt => write!(f, "vtt"),
        }
    }
}

/// Format a second count as `HH:MM:SS,mmm` (SRT) or `HH:MM:SS.mmm` (WebVTT).
///
/// Whole seconds come from integer truncation of the total and milliseconds
/// from truncation of the fractional remainder. The conversion rounds at
/// microsecond precision first, so representation noise such as
/// `1.000000000001` or `2.8` stored as `2.7999999999999998` renders the same
/// millisecond on every platform. Hours are zero-padded to at least two
/// digits and widen as needed beyond 100 hours.
///
/// Negative and non-finite input is a caller error and is reported, not
/// clamped.
pub fn format_timestamp(seconds: f64, frame: TimestampFrame) -> Result<String, FormatError> {
    if !seconds.is_finite() {
        return Err(FormatError::NonFiniteTimestamp(seconds));
    }
    if seconds < 0.0 {
        return Err(FormatError::NegativeTimestamp(seconds));
    }

    let total_us = (seconds * 1_000_000.0).round() as u64;
    let total_ms = total_us / 1_000;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    Ok(format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        secs,
        frame.separator(),
        millis
    ))
}

/// Render segments as a complete SRT document.
///
/// Each entry carries a 1-based sequential index, a comma-framed time range
/// line and the trimmed text, followed by a blank separator line. An empty
/// segment sequence renders as the empty string. Segments with `end < start`
/// pass through verbatim.
pub fn render_srt(segments: &[Segment]) -> Result<String, FormatError> {
    let mut out = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let start = format_timestamp(segment.start, TimestampFrame::Srt)?;
        let end = format_timestamp(segment.end, TimestampFrame::Srt)?;

        out.push_str(&(i + 1).to_string());
        out.push('\n');
        out.push_str(&start);
        out.push_str(" --> ");
        out.push_str(&end);
        out.push('\n');
        out.push_str(segment.text.trim());
        out.push_str("\n\n");
    }

    Ok(out)
}

/// Render segments as a complete WebVTT document.
///
/// The document starts with the literal `WEBVTT` header and a blank line,
/// then one unnumbered cue per segment with dot-framed timestamps and the
/// trimmed text, each followed by a blank line. An empty segment sequence
/// renders as just the header block.
pub fn render_vtt(segments: &[Segment]) -> Result<String, FormatError> {
    let mut out = String::from("WEBVTT\n\n");

    for segment in segments {
        let start = format_timestamp(segment.start, TimestampFrame::Vtt)?;
        let end = format_timestamp(segment.end, TimestampFrame::Vtt)?;

        out.push_str(&start);
        out.push_str(" --> ");
        out.push_str(&end);
        out.push('\n');
        out.push_str(segment.text.trim());
        out.push_str("\n\n");
    }

    Ok(out)
}
