use crate::audio::CaptureConfig;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub audio: AudioSettings,
    pub stt: SttSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub sample_rate: u32,
    pub channels: u16,
    pub chunk_size: u32,
}

impl AudioSettings {
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            chunk_size: self.chunk_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SttSettings {
    /// Transcription service endpoint (receives the WAV, returns JSON text)
    pub endpoint: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Default rendering format: txt, md, or json
    pub format: String,
}

impl Config {
    /// Load configuration: built-in defaults, overridden by an optional
    /// file (`config/notetaker.*` unless a path is given).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = config::File::with_name(path.unwrap_or("config/notetaker"))
            .required(path.is_some());

        let settings = config::Config::builder()
            .set_default("audio.sample_rate", 44100i64)?
            .set_default("audio.channels", 1i64)?
            .set_default("audio.chunk_size", 1024i64)?
            .set_default("stt.endpoint", "http://127.0.0.1:8080/inference")?
            .set_default("stt.language", "en-US")?
            .set_default("output.format", "txt")?
            .add_source(file)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: AudioSettings {
                sample_rate: 44100,
                channels: 1,
                chunk_size: 1024,
            },
            stt: SttSettings {
                endpoint: "http://127.0.0.1:8080/inference".to_string(),
                language: "en-US".to_string(),
            },
            output: OutputSettings {
                format: "txt".to_string(),
            },
        }
    }
}
