use super::{RecognitionError, SpeechRecognizer};
use crate::audio::AudioFile;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Speech recognizer backed by an HTTP transcription service.
///
/// Posts the recorded WAV to the configured endpoint and expects a JSON
/// response carrying the recognized text:
///
/// ```json
/// { "text": "hello everyone" }
/// ```
///
/// A blank response means the service heard nothing it could transcribe;
/// transport and status failures are service errors.
pub struct HttpRecognizer {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    text: String,
}

impl HttpRecognizer {
    pub fn new(endpoint: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn recognize(&self, audio: &AudioFile) -> Result<String, RecognitionError> {
        let bytes = tokio::fs::read(&audio.path)
            .await
            .map_err(|e| RecognitionError::Service(format!("failed to read {}: {}", audio.path, e)))?;

        info!(
            "Sending {:.1}s of audio ({} bytes) to {}",
            audio.duration_seconds,
            bytes.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("lang", self.language.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(bytes)
            .send()
            .await
            .map_err(|e| RecognitionError::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RecognitionError::Service(format!(
                "transcription service returned {}",
                response.status()
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::Service(format!("invalid service response: {}", e)))?;

        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            return Err(RecognitionError::Unintelligible);
        }

        Ok(text)
    }
}
