//! The pipeline's public operations
//!
//! `Notetaker` is what front ends talk to: start/stop recording, transcribe,
//! summarize, save. It composes the recorder and the transcript producer and
//! performs no pipeline work of its own.

use crate::audio::{CaptureError, Recorder};
use crate::config::Config;
use crate::render::{self, OutputFormat};
use crate::stt::{HttpRecognizer, SpeechRecognizer};
use crate::transcript::{Transcript, TranscriptProducer};
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("audio file not found: {}", .0.display())]
    AudioNotFound(PathBuf),
}

/// Snapshot of the recording state.
#[derive(Debug, Clone, Serialize)]
pub struct RecorderStatus {
    pub is_recording: bool,
    pub current_file: Option<PathBuf>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_secs: f64,
    /// Recordings completed during this run
    pub recordings: Vec<PathBuf>,
}

pub struct Notetaker {
    config: Config,
    recorder: Recorder,
    producer: TranscriptProducer,
    recordings: Mutex<Vec<PathBuf>>,
}

impl Notetaker {
    /// Build the pipeline with the configured HTTP recognition service.
    pub fn new(config: Config) -> Self {
        let recognizer = Arc::new(HttpRecognizer::new(
            config.stt.endpoint.clone(),
            config.stt.language.clone(),
        ));
        Self::with_recognizer(config, recognizer)
    }

    /// Build the pipeline around a caller-provided recognition engine.
    pub fn with_recognizer(config: Config, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            recorder: Recorder::new(config.audio.capture_config()),
            producer: TranscriptProducer::new(recognizer),
            config,
            recordings: Mutex::new(Vec::new()),
        }
    }

    /// The configured default rendering format.
    pub fn default_format(&self) -> OutputFormat {
        OutputFormat::from_str(&self.config.output.format).unwrap_or_default()
    }

    /// Start recording. Returns the destination path; fails with
    /// `AlreadyRecording` if a session is live.
    pub async fn start_recording(
        &self,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf, CaptureError> {
        let path = output_path.unwrap_or_else(default_recording_path);
        self.recorder.start(Some(path.clone())).await?;
        Ok(path)
    }

    /// Stop recording. `Ok(None)` when idle or nothing was captured.
    pub async fn stop_recording(&self) -> Result<Option<PathBuf>, CaptureError> {
        let stopped = self.recorder.stop().await?;
        if let Some(path) = &stopped {
            self.recordings.lock().await.push(path.clone());
        }
        Ok(stopped)
    }

    /// Transcribe an audio file.
    ///
    /// The file must exist; all collaborator failures are absorbed into the
    /// returned `Transcript` rather than surfaced here.
    pub async fn transcribe_audio(&self, audio_path: &Path) -> Result<Transcript, AppError> {
        if !audio_path.exists() {
            return Err(AppError::AudioNotFound(audio_path.to_path_buf()));
        }
        info!("Starting transcription of {}", audio_path.display());
        Ok(self.producer.produce(audio_path).await)
    }

    pub fn summarize_transcript(&self, transcript: &Transcript, format: OutputFormat) -> String {
        render::summarize(transcript, format)
    }

    /// Render the transcript and write it, creating parent directories.
    pub fn save_transcript(
        &self,
        transcript: &Transcript,
        output_path: &Path,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let rendered = render::render_transcript(transcript, format);
        std::fs::write(output_path, rendered)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        info!("Transcript saved to {}", output_path.display());
        Ok(())
    }

    pub async fn status(&self) -> RecorderStatus {
        RecorderStatus {
            is_recording: self.recorder.is_recording().await,
            current_file: self.recorder.current_output().await,
            started_at: self.recorder.started_at().await,
            duration_secs: self.recorder.duration(),
            recordings: self.recordings.lock().await.clone(),
        }
    }
}

fn default_recording_path() -> PathBuf {
    PathBuf::from(format!(
        "recording_{}.wav",
        Utc::now().format("%Y%m%d_%H%M%S")
    ))
}
