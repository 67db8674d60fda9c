use anyhow::Result;
use tokio::sync::mpsc;

/// One fixed-size chunk of captured audio (16-bit PCM, interleaved).
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for audio capture.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Frames per chunk read from the device
    pub chunk_size: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            chunk_size: 1024,
        }
    }
}

impl CaptureConfig {
    /// Seconds of audio represented by `chunks` captured chunks.
    pub fn chunks_to_seconds(&self, chunks: usize) -> f64 {
        chunks as f64 * self.chunk_size as f64 / self.sample_rate as f64
    }
}

/// Audio capture backend.
///
/// `start` hands back the receiving end of a channel of `AudioFrame`s; the
/// backend owns whatever thread or callback feeds the sending end. `stop`
/// tears the stream down and closes the channel.
#[async_trait::async_trait]
pub trait AudioBackend: Send + Sync {
    /// Start capturing audio.
    ///
    /// Returns a channel receiver that will receive audio frames.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>>;

    /// Stop capturing audio.
    async fn stop(&mut self) -> Result<()>;

    /// Check if the backend is currently capturing.
    fn is_capturing(&self) -> bool;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Audio backend factory.
pub struct AudioBackendFactory;

impl AudioBackendFactory {
    /// Create the capture backend for the default input device.
    pub fn create(config: CaptureConfig) -> Result<Box<dyn AudioBackend>> {
        use super::microphone::MicrophoneBackend;
        Ok(Box::new(MicrophoneBackend::new(config)))
    }
}
