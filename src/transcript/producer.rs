use super::{Segment, Transcript};
use crate::audio::AudioFile;
use crate::stt::{RecognitionError, SpeechRecognizer};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Speaker label for recognized speech. A single synthetic label covers the
/// whole recording; labels are not voice identities.
pub const DEFAULT_SPEAKER: &str = "Speaker 1";

/// Fixed confidence assigned to recognized text. The collaborator reports no
/// per-utterance score, so this is an estimate, not a measurement.
const RECOGNIZED_CONFIDENCE: f32 = 0.8;

/// Used when the source audio does not report a usable length. An
/// approximation, not ground truth.
const FALLBACK_DURATION_SECS: f64 = 30.0;

/// Produces a `Transcript` from an audio file via the recognition
/// collaborator. Every outcome maps to a well-formed transcript; `produce`
/// never fails.
pub struct TranscriptProducer {
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl TranscriptProducer {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Transcribe the entire file in a single recognition call.
    ///
    /// The three collaborator outcomes each produce one segment spanning the
    /// whole recording; an unreadable file produces an empty transcript with
    /// `error` set.
    pub async fn produce(&self, audio_path: &Path) -> Transcript {
        let audio = match AudioFile::open(audio_path) {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Transcription failed: {:#}", e);
                return Transcript::failed(audio_path.display().to_string(), format!("{:#}", e));
            }
        };

        let mut duration = audio.duration_seconds;
        if !duration.is_finite() || duration <= 0.0 {
            duration = FALLBACK_DURATION_SECS;
        }

        let mut transcript = Transcript::new(audio.path.clone(), duration);

        let segment = match self.recognizer.recognize(&audio).await {
            Ok(text) => {
                info!("Recognized {} characters of speech", text.len());
                Segment {
                    start: 0.0,
                    end: duration,
                    speaker: DEFAULT_SPEAKER.to_string(),
                    text,
                    confidence: RECOGNIZED_CONFIDENCE,
                }
            }
            Err(RecognitionError::Unintelligible) => {
                warn!("Could not understand audio");
                Segment {
                    start: 0.0,
                    end: duration,
                    speaker: "Unknown".to_string(),
                    text: "[Inaudible]".to_string(),
                    confidence: 0.0,
                }
            }
            Err(RecognitionError::Service(detail)) => {
                warn!("Transcription service failed: {}", detail);
                Segment {
                    start: 0.0,
                    end: duration,
                    speaker: "Error".to_string(),
                    text: format!("[Transcription service error: {}]", detail),
                    confidence: 0.0,
                }
            }
        };

        transcript.segments.push(segment);
        transcript
    }
}
