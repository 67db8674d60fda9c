//! Transcript data model and production
//!
//! This module provides:
//! - `Segment` and `Transcript`: the immutable output of one transcription run
//! - `TranscriptProducer`: wraps the speech-to-text collaborator and always
//!   returns a well-formed `Transcript`, even on failure
//! - `parse_rendered_text`: reconstructs a transcript from its rendered
//!   plain-text form

mod parse;
mod producer;

pub use parse::parse_rendered_text;
pub use producer::TranscriptProducer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attributed span of transcribed speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (>= start)
    pub end: f64,
    /// Speaker label. Derived from recognition-path heuristics, not voice
    /// identity; not guaranteed unique per person.
    pub speaker: String,
    /// Transcribed text; may be empty
    pub text: String,
    /// Confidence in [0, 1]; 0.0 marks a synthetic or error segment
    pub confidence: f32,
}

/// The output of transcribing one recording.
///
/// Segments are stored in production order. A failed transcription still
/// yields a valid `Transcript` with empty `segments` and `error` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Path of the source audio file
    pub file_path: String,
    /// Recording length in seconds
    pub duration: f64,
    /// When this transcript was produced
    pub timestamp: DateTime<Utc>,
    /// Transcribed segments, in production order
    pub segments: Vec<Segment>,
    /// Set when transcription failed before any segment could be produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Transcript {
    pub fn new(file_path: impl Into<String>, duration: f64) -> Self {
        Self {
            file_path: file_path.into(),
            duration,
            timestamp: Utc::now(),
            segments: Vec::new(),
            error: None,
        }
    }

    /// A transcript for a run that failed outright (unreadable file, etc.)
    pub fn failed(file_path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            duration: 0.0,
            timestamp: Utc::now(),
            segments: Vec::new(),
            error: Some(error.into()),
        }
    }
}
