pub mod app;
pub mod audio;
pub mod config;
pub mod render;
pub mod stt;
pub mod summary;
pub mod transcript;

pub use app::{AppError, Notetaker, RecorderStatus};
pub use audio::{
    AudioBackend, AudioBackendFactory, AudioFile, AudioFrame, CaptureConfig, CaptureError,
    Recorder,
};
pub use config::Config;
pub use render::OutputFormat;
pub use stt::{HttpRecognizer, RecognitionError, SpeechRecognizer};
pub use summary::SummaryData;
pub use transcript::{parse_rendered_text, Segment, Transcript, TranscriptProducer};
