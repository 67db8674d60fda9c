use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notetaker::{parse_rendered_text, Config, Notetaker, OutputFormat};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "Record, transcribe, and summarize meetings", version)]
struct Cli {
    /// Configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record from the default microphone
    Record {
        /// Output WAV path (default: recording_<timestamp>.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop automatically after this many seconds instead of waiting
        /// for Enter
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// Transcribe an audio file and save the transcript
    Transcribe {
        /// Audio file to transcribe
        audio: PathBuf,

        /// Transcript output path (default: <stem>_transcript.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: txt, md, or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also print a summary of the transcript
        #[arg(short, long)]
        summarize: bool,
    },

    /// Summarize a previously saved transcript
    Summarize {
        /// Rendered transcript file ([Speaker]: text lines)
        transcript: PathBuf,

        /// Output format: txt, md, or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write the summary here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recordings in a directory
    List {
        /// Directory to search
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let app = Notetaker::new(config);

    match cli.command {
        Command::Record { output, duration } => record(&app, output, duration).await,
        Command::Transcribe {
            audio,
            output,
            format,
            summarize,
        } => transcribe(&app, audio, output, format, summarize).await,
        Command::Summarize {
            transcript,
            format,
            output,
        } => summarize_file(&app, transcript, format, output),
        Command::List { dir } => list_recordings(&dir),
    }
}

async fn record(app: &Notetaker, output: Option<PathBuf>, duration: Option<u64>) -> Result<()> {
    let path = app.start_recording(output).await?;
    println!("Recording to {} ...", path.display());

    match duration {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => {
            println!("Press Enter to stop.");
            tokio::task::spawn_blocking(|| {
                let mut line = String::new();
                std::io::stdin().read_line(&mut line)
            })
            .await?
            .context("Failed to read from stdin")?;
        }
    }

    match app.stop_recording().await? {
        Some(path) => println!("Recording saved to: {}", path.display()),
        None => println!("Nothing was captured."),
    }
    Ok(())
}

async fn transcribe(
    app: &Notetaker,
    audio: PathBuf,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    summarize: bool,
) -> Result<()> {
    let format = format.unwrap_or_else(|| app.default_format());
    let transcript = app.transcribe_audio(&audio).await?;

    if let Some(error) = &transcript.error {
        println!("Transcription failed: {}", error);
        return Ok(());
    }

    let output = output.unwrap_or_else(|| {
        let stem = audio.file_stem().unwrap_or_default().to_string_lossy();
        audio.with_file_name(format!("{}_transcript.{}", stem, format.extension()))
    });

    app.save_transcript(&transcript, &output, format)?;
    println!("Transcript saved to: {}", output.display());

    if summarize {
        println!();
        println!("{}", app.summarize_transcript(&transcript, format));
    }
    Ok(())
}

fn summarize_file(
    app: &Notetaker,
    transcript_path: PathBuf,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let format = format.unwrap_or_else(|| app.default_format());
    let content = std::fs::read_to_string(&transcript_path)
        .with_context(|| format!("Failed to read {}", transcript_path.display()))?;

    let transcript = parse_rendered_text(&content);
    let summary = app.summarize_transcript(&transcript, format);

    match output {
        Some(path) => {
            std::fs::write(&path, summary)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Summary saved to: {}", path.display());
        }
        None => println!("{}", summary),
    }
    Ok(())
}

fn list_recordings(dir: &Path) -> Result<()> {
    let mut recordings: Vec<(String, u64)> = Vec::new();

    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("wav") {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            recordings.push((entry.file_name().to_string_lossy().into_owned(), size));
        }
    }

    if recordings.is_empty() {
        println!("No recordings found.");
        return Ok(());
    }

    recordings.sort();
    println!("Available recordings:");
    for (i, (name, size)) in recordings.iter().enumerate() {
        println!("  {}. {} ({:.1} MB)", i + 1, name, *size as f64 / (1024.0 * 1024.0));
    }
    Ok(())
}
