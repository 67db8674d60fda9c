pub mod backend;
pub mod file;
pub mod microphone;
pub mod recorder;

pub use backend::{AudioBackend, AudioBackendFactory, AudioFrame, CaptureConfig};
pub use file::AudioFile;
pub use microphone::MicrophoneBackend;
pub use recorder::{CaptureError, Recorder};
