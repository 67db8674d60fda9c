//! Speech-to-text collaborator boundary
//!
//! The recognition engine is external to this crate. It receives one whole
//! recording and either returns plain text or signals one of two failures:
//! the audio was unintelligible, or the service itself failed. Everything
//! past this boundary is the transcript producer's concern.

mod http;

pub use http::HttpRecognizer;

use crate::audio::AudioFile;
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of the recognition collaborator.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The engine could not make out any speech
    #[error("could not understand audio")]
    Unintelligible,
    /// The recognition service or the request to it failed
    #[error("{0}")]
    Service(String),
}

/// External speech recognition engine.
///
/// One call covers the entire recording; there is no streaming or
/// chunk-level segmentation at this boundary.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio: &AudioFile) -> Result<String, RecognitionError>;
}
