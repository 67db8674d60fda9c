use super::backend::{AudioBackend, AudioBackendFactory, AudioFrame, CaptureConfig};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How long `stop` waits for the capture loop to exit before giving up.
const STOP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("recording already in progress")]
    AlreadyRecording,
    #[error("audio device error: {0}")]
    Device(String),
    #[error("failed to encode recording: {0}")]
    Encode(String),
}

/// Owns the recording lifecycle: `Idle -> Recording -> Idle`.
///
/// While recording, a dedicated capture-loop task is the only writer of the
/// frame buffer. `stop` cancels the loop, waits for it to fully exit, and
/// only then reads the buffer to encode the WAV output; the buffer is never
/// read concurrently with writing. Each `start`/`stop` pair is an
/// independent session with its own buffer and cancellation flag.
pub struct Recorder {
    config: CaptureConfig,
    session: Mutex<Option<ActiveSession>>,
    /// Chunks captured by the current (or most recent) session. Updated by
    /// the capture loop, readable at any time for `duration`.
    chunks_captured: Arc<AtomicUsize>,
}

struct ActiveSession {
    session_id: String,
    output_path: Option<PathBuf>,
    started_at: DateTime<Utc>,
    /// Cancellation token for the capture loop, checked once per chunk
    cancel: Arc<AtomicBool>,
    frames: Arc<Mutex<Vec<AudioFrame>>>,
    task: JoinHandle<()>,
    backend: Box<dyn AudioBackend>,
}

impl Recorder {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
            chunks_captured: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Start recording from the default input device.
    pub async fn start(&self, output_path: Option<PathBuf>) -> Result<(), CaptureError> {
        let backend = AudioBackendFactory::create(self.config.clone())
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        self.start_with_backend(backend, output_path).await
    }

    /// Start recording from the given backend.
    ///
    /// Fails with `AlreadyRecording` (state unchanged) if a session is live.
    pub async fn start_with_backend(
        &self,
        mut backend: Box<dyn AudioBackend>,
        output_path: Option<PathBuf>,
    ) -> Result<(), CaptureError> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let rx = backend
            .start()
            .await
            .map_err(|e| CaptureError::Device(e.to_string()))?;

        let session_id = format!("session-{}", uuid::Uuid::new_v4());
        info!("Recording started: {} ({})", session_id, backend.name());

        let cancel = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(Mutex::new(Vec::new()));
        self.chunks_captured.store(0, Ordering::SeqCst);

        let task = tokio::spawn(capture_loop(
            rx,
            Arc::clone(&cancel),
            Arc::clone(&frames),
            Arc::clone(&self.chunks_captured),
        ));

        *session = Some(ActiveSession {
            session_id,
            output_path,
            started_at: Utc::now(),
            cancel,
            frames,
            task,
            backend,
        });

        Ok(())
    }

    /// Stop recording.
    ///
    /// Returns `Ok(None)` when nothing was recording or nothing was
    /// captured, `Ok(Some(path))` once the WAV file is written, and
    /// `Err(Encode)` when a destination was given but writing it failed.
    pub async fn stop(&self) -> Result<Option<PathBuf>, CaptureError> {
        // Hold the state lock for the whole teardown so a racing `start`
        // cannot overlap a session that is still stopping.
        let mut guard = self.session.lock().await;
        let Some(mut session) = guard.take() else {
            return Ok(None);
        };

        info!("Stopping recording: {}", session.session_id);
        session.cancel.store(true, Ordering::SeqCst);

        // Tear down the device stream; this closes the frame channel and
        // lets the capture loop drain out.
        if let Err(e) = session.backend.stop().await {
            warn!("Failed to stop audio backend: {}", e);
        }

        match tokio::time::timeout(STOP_TIMEOUT, &mut session.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Capture loop task failed: {}", e),
            Err(_) => {
                warn!("Capture loop did not exit within {:?}", STOP_TIMEOUT);
                session.task.abort();
            }
        }

        // The loop has exited (or been aborted); the buffer now has exactly
        // one owner.
        let frames = std::mem::take(&mut *session.frames.lock().await);
        info!(
            "Recording stopped: {} chunk(s), {:.2}s",
            frames.len(),
            self.config.chunks_to_seconds(frames.len())
        );

        let Some(path) = session.output_path else {
            return Ok(None);
        };
        if frames.is_empty() {
            return Ok(None);
        }

        encode_wav(&path, &frames, &self.config)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        info!("Recording saved to {}", path.display());
        Ok(Some(path))
    }

    /// Seconds of audio captured so far: `chunks * chunk_size / sample_rate`.
    pub fn duration(&self) -> f64 {
        self.config
            .chunks_to_seconds(self.chunks_captured.load(Ordering::SeqCst))
    }

    pub async fn is_recording(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Destination of the live session, if one is recording to a file.
    pub async fn current_output(&self) -> Option<PathBuf> {
        self.session
            .lock()
            .await
            .as_ref()
            .and_then(|s| s.output_path.clone())
    }

    pub async fn started_at(&self) -> Option<DateTime<Utc>> {
        self.session.lock().await.as_ref().map(|s| s.started_at)
    }
}

/// The capture loop: sole writer of the frame buffer for its session.
///
/// A closed channel (device torn down, or the stream failed) ends the loop
/// early; whatever was captured up to that point remains encodable.
async fn capture_loop(
    mut rx: mpsc::Receiver<AudioFrame>,
    cancel: Arc<AtomicBool>,
    frames: Arc<Mutex<Vec<AudioFrame>>>,
    chunks_captured: Arc<AtomicUsize>,
) {
    while let Some(frame) = rx.recv().await {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        frames.lock().await.push(frame);
        chunks_captured.fetch_add(1, Ordering::SeqCst);
    }
    info!("Capture loop exited");
}

/// Encode captured chunks as a single 16-bit PCM WAV file.
fn encode_wav(path: &Path, frames: &[AudioFrame], config: &CaptureConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for frame in frames {
        for &sample in &frame.samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}
