// Integration tests for transcript production
//
// The recognition collaborator is scripted so each of its three outcomes can
// be mapped against the segment construction contract.

use anyhow::Result;
use async_trait::async_trait;
use notetaker::audio::AudioFile;
use notetaker::stt::{RecognitionError, SpeechRecognizer};
use notetaker::{AppError, Config, Notetaker, TranscriptProducer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

enum Outcome {
    Text(&'static str),
    Unintelligible,
    ServiceFailure(&'static str),
}

struct ScriptedRecognizer(Outcome);

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, _audio: &AudioFile) -> Result<String, RecognitionError> {
        match &self.0 {
            Outcome::Text(text) => Ok(text.to_string()),
            Outcome::Unintelligible => Err(RecognitionError::Unintelligible),
            Outcome::ServiceFailure(detail) => Err(RecognitionError::Service(detail.to_string())),
        }
    }
}

fn producer(outcome: Outcome) -> TranscriptProducer {
    TranscriptProducer::new(Arc::new(ScriptedRecognizer(outcome)))
}

/// Write `seconds` of silence as a 44.1kHz mono WAV.
fn write_wav(dir: &Path, name: &str, seconds: f64) -> Result<PathBuf> {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)?;
    for _ in 0..(44100.0 * seconds) as usize {
        writer.write_sample(0i16)?;
    }
    writer.finalize()?;
    Ok(path)
}

#[tokio::test]
async fn test_recognized_text_segment() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "meeting.wav", 2.0)?;

    let transcript = producer(Outcome::Text("hello everyone"))
        .produce(&audio)
        .await;

    assert!(transcript.error.is_none());
    assert_eq!(transcript.segments.len(), 1);
    assert!((transcript.duration - 2.0).abs() < 0.01);

    let segment = &transcript.segments[0];
    assert_eq!(segment.speaker, "Speaker 1");
    assert_eq!(segment.text, "hello everyone");
    assert!((segment.confidence - 0.8).abs() < f32::EPSILON);
    assert_eq!(segment.start, 0.0);
    assert!((segment.end - transcript.duration).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_unintelligible_audio_segment() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "mumble.wav", 1.0)?;

    let transcript = producer(Outcome::Unintelligible).produce(&audio).await;

    assert_eq!(transcript.segments.len(), 1);
    let segment = &transcript.segments[0];
    assert_eq!(segment.speaker, "Unknown");
    assert_eq!(segment.text, "[Inaudible]");
    assert_eq!(segment.confidence, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_service_failure_segment() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "meeting.wav", 1.0)?;

    let transcript = producer(Outcome::ServiceFailure("connection refused"))
        .produce(&audio)
        .await;

    assert_eq!(transcript.segments.len(), 1);
    let segment = &transcript.segments[0];
    assert_eq!(segment.speaker, "Error");
    assert_eq!(
        segment.text,
        "[Transcription service error: connection refused]"
    );
    assert_eq!(segment.confidence, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_file_yields_error_transcript() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("not-audio.wav");
    std::fs::write(&path, b"this is not a wav file")?;

    let transcript = producer(Outcome::Text("unused")).produce(&path).await;

    assert!(transcript.error.is_some());
    assert!(transcript.segments.is_empty());
    assert_eq!(transcript.duration, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_missing_file_yields_error_transcript() -> Result<()> {
    let transcript = producer(Outcome::Text("unused"))
        .produce(Path::new("/nonexistent/audio.wav"))
        .await;

    assert!(transcript.error.is_some());
    assert!(transcript.segments.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_zero_length_audio_uses_fallback_duration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "empty.wav", 0.0)?;

    let transcript = producer(Outcome::Text("hi")).produce(&audio).await;

    // Duration is unavailable from the file, so the 30s estimate applies
    assert_eq!(transcript.duration, 30.0);
    assert_eq!(transcript.segments[0].end, 30.0);
    Ok(())
}

#[tokio::test]
async fn test_app_rejects_missing_audio() {
    let app = Notetaker::with_recognizer(
        Config::default(),
        Arc::new(ScriptedRecognizer(Outcome::Text("unused"))),
    );

    let result = app.transcribe_audio(Path::new("/nonexistent/audio.wav")).await;
    assert!(matches!(result, Err(AppError::AudioNotFound(_))));
}

#[tokio::test]
async fn test_app_transcribes_existing_audio() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "meeting.wav", 1.0)?;

    let app = Notetaker::with_recognizer(
        Config::default(),
        Arc::new(ScriptedRecognizer(Outcome::Text("quick sync"))),
    );

    let transcript = app.transcribe_audio(&audio).await?;
    assert_eq!(transcript.segments[0].text, "quick sync");
    assert_eq!(transcript.file_path, audio.display().to_string());
    Ok(())
}

#[tokio::test]
async fn test_save_transcript_creates_parent_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let audio = write_wav(temp_dir.path(), "meeting.wav", 1.0)?;

    let app = Notetaker::with_recognizer(
        Config::default(),
        Arc::new(ScriptedRecognizer(Outcome::Text("let us review the roadmap"))),
    );

    let transcript = app.transcribe_audio(&audio).await?;
    let output = temp_dir.path().join("notes").join("deep").join("meeting.txt");
    app.save_transcript(&transcript, &output, notetaker::OutputFormat::Text)?;

    let content = std::fs::read_to_string(&output)?;
    assert!(content.contains("[Speaker 1]: let us review the roadmap"));
    Ok(())
}
