use super::backend::{AudioBackend, AudioFrame, CaptureConfig};
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Microphone capture backend built on cpal.
///
/// cpal streams are not `Send`, so the stream lives on a dedicated OS thread
/// for the whole capture session. The device callback slices incoming
/// samples into `chunk_size`-frame `AudioFrame`s and pushes them into the
/// channel with `try_send`; the audio callback must never block, so a full
/// channel drops the frame instead.
pub struct MicrophoneBackend {
    config: CaptureConfig,
    worker: Option<CaptureWorker>,
}

struct CaptureWorker {
    stop: Arc<AtomicBool>,
    handle: std::thread::JoinHandle<()>,
}

impl MicrophoneBackend {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            worker: None,
        }
    }

    fn select_device(config: &CaptureConfig) -> Result<(Device, StreamConfig, SampleFormat)> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow!("No default input device found"))?;

        let supported = device
            .supported_input_configs()
            .context("Failed to query input configurations")?
            .find(|range| {
                range.channels() == config.channels
                    && range.min_sample_rate().0 <= config.sample_rate
                    && range.max_sample_rate().0 >= config.sample_rate
            })
            .ok_or_else(|| {
                anyhow!(
                    "Input device does not support {} channel(s) at {} Hz",
                    config.channels,
                    config.sample_rate
                )
            })?;

        let sample_format = supported.sample_format();
        let stream_config = StreamConfig {
            channels: config.channels,
            sample_rate: SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((device, stream_config, sample_format))
    }
}

#[async_trait::async_trait]
impl AudioBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        if self.worker.is_some() {
            anyhow::bail!("Microphone backend already capturing");
        }

        let (device, stream_config, sample_format) = Self::select_device(&self.config)?;
        info!(
            "Capturing from {} at {} Hz, {} channel(s), {}-frame chunks",
            device.name().unwrap_or_else(|_| "unknown device".into()),
            self.config.sample_rate,
            self.config.channels,
            self.config.chunk_size
        );

        let (tx, rx) = mpsc::channel::<AudioFrame>(64);
        let stop = Arc::new(AtomicBool::new(false));

        let config = self.config.clone();
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            if let Err(e) = run_capture(device, stream_config, sample_format, config, tx, thread_stop)
            {
                error!("Capture thread failed: {}", e);
            }
        });

        self.worker = Some(CaptureWorker { stop, handle });
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::SeqCst);
            tokio::task::spawn_blocking(move || worker.handle.join())
                .await
                .context("Failed to join capture thread")?
                .map_err(|_| anyhow!("Capture thread panicked"))?;
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.worker.is_some()
    }

    fn name(&self) -> &str {
        "microphone"
    }
}

fn run_capture(
    device: Device,
    stream_config: StreamConfig,
    sample_format: SampleFormat,
    config: CaptureConfig,
    tx: mpsc::Sender<AudioFrame>,
    stop: Arc<AtomicBool>,
) -> Result<()> {
    let chunker = Chunker::new(config, tx);
    let err_fn = |e| error!("Input stream error: {}", e);

    let stream = match sample_format {
        SampleFormat::I16 => device.build_input_stream(
            &stream_config,
            {
                let mut chunker = chunker;
                move |data: &[i16], _: &cpal::InputCallbackInfo| chunker.push(data.iter().copied())
            },
            err_fn,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            &stream_config,
            {
                let mut chunker = chunker;
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    chunker.push(data.iter().map(|&s| (s as i32 - 32768) as i16))
                }
            },
            err_fn,
            None,
        )?,
        SampleFormat::F32 => device.build_input_stream(
            &stream_config,
            {
                let mut chunker = chunker;
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    chunker.push(data.iter().map(|&s| {
                        (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
                    }))
                }
            },
            err_fn,
            None,
        )?,
        other => anyhow::bail!("Unsupported input sample format: {:?}", other),
    };

    stream.play().context("Failed to start input stream")?;

    // Cooperative shutdown: the callback keeps feeding the channel until the
    // stream is dropped here.
    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(50));
    }

    drop(stream);
    Ok(())
}

/// Accumulates device samples and emits one frame per `chunk_size` frames.
struct Chunker {
    config: CaptureConfig,
    tx: mpsc::Sender<AudioFrame>,
    pending: Vec<i16>,
    chunks_emitted: u64,
    dropped: u64,
}

impl Chunker {
    fn new(config: CaptureConfig, tx: mpsc::Sender<AudioFrame>) -> Self {
        Self {
            config,
            tx,
            pending: Vec::new(),
            chunks_emitted: 0,
            dropped: 0,
        }
    }

    fn push(&mut self, samples: impl Iterator<Item = i16>) {
        self.pending.extend(samples);

        let chunk_samples = (self.config.chunk_size * self.config.channels as u32) as usize;
        while self.pending.len() >= chunk_samples {
            let rest = self.pending.split_off(chunk_samples);
            let samples = std::mem::replace(&mut self.pending, rest);

            let timestamp_ms = self.chunks_emitted * self.config.chunk_size as u64 * 1000
                / self.config.sample_rate as u64;

            let frame = AudioFrame {
                samples,
                sample_rate: self.config.sample_rate,
                channels: self.config.channels,
                timestamp_ms,
            };

            if self.tx.try_send(frame).is_err() {
                self.dropped += 1;
                if self.dropped % 100 == 1 {
                    warn!("Capture channel full, {} frame(s) dropped", self.dropped);
                }
            }
            self.chunks_emitted += 1;
        }
    }
}
