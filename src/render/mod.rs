//! Deterministic rendering of transcripts and summaries
//!
//! Three formats from one `SummaryData` (plus the source `Transcript` for
//! metadata), or from a `Transcript` alone for the plain dump. Sections with
//! empty content are omitted entirely; the only wall-clock-dependent output
//! is the date header.

use crate::summary::{self, SummaryData};
use crate::transcript::Transcript;
use chrono::Utc;
use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;

/// Returned for every format when there is nothing to summarize.
pub const NO_CONTENT_MESSAGE: &str = "No transcript content to summarize.";

/// Output format for rendered transcripts and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format: {}", other),
        }
    }
}

/// Summarize a transcript into formatted notes.
pub fn summarize(transcript: &Transcript, format: OutputFormat) -> String {
    if transcript.segments.is_empty() {
        return NO_CONTENT_MESSAGE.to_string();
    }
    let data = summary::extract(&transcript.segments);
    render_summary(&data, transcript, format)
}

/// Render already-extracted summary data.
pub fn render_summary(data: &SummaryData, transcript: &Transcript, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => summary_text(data, transcript),
        OutputFormat::Markdown => summary_markdown(data, transcript),
        OutputFormat::Json => summary_json(data, transcript),
    }
}

/// Render the transcript itself (no summarization).
pub fn render_transcript(transcript: &Transcript, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => transcript_text(transcript),
        OutputFormat::Markdown => transcript_markdown(transcript),
        OutputFormat::Json => {
            serde_json::to_string_pretty(transcript).unwrap_or_else(|_| String::new())
        }
    }
}

fn summary_text(data: &SummaryData, transcript: &Transcript) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MEETING SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "Date: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Duration: {} seconds", transcript.duration);
    let _ = writeln!(out);

    if !data.speakers.is_empty() {
        let _ = writeln!(out, "PARTICIPANTS:");
        for speaker in &data.speakers {
            let _ = writeln!(out, "  - {}", speaker);
        }
        let _ = writeln!(out);
    }

    if !data.summary_text.is_empty() {
        let _ = writeln!(out, "SUMMARY:");
        let _ = writeln!(out, "{}", data.summary_text);
        let _ = writeln!(out);
    }

    if !data.key_points.is_empty() {
        let _ = writeln!(out, "KEY POINTS:");
        for (i, point) in data.key_points.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, point);
        }
        let _ = writeln!(out);
    }

    if !data.action_items.is_empty() {
        let _ = writeln!(out, "ACTION ITEMS:");
        for (i, item) in data.action_items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, item);
        }
        let _ = writeln!(out);
    }

    if !data.keywords.is_empty() {
        let _ = writeln!(out, "TOPICS/KEYWORDS:");
        let _ = writeln!(out, "{}", data.keywords.join(", "));
    }

    out
}

fn summary_markdown(data: &SummaryData, transcript: &Transcript) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Meeting Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Date:** {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "**Duration:** {} seconds", transcript.duration);
    let _ = writeln!(out);

    if !data.speakers.is_empty() {
        let _ = writeln!(out, "## Participants");
        for speaker in &data.speakers {
            let _ = writeln!(out, "- {}", speaker);
        }
        let _ = writeln!(out);
    }

    if !data.summary_text.is_empty() {
        let _ = writeln!(out, "## Summary");
        let _ = writeln!(out, "{}", data.summary_text);
        let _ = writeln!(out);
    }

    if !data.key_points.is_empty() {
        let _ = writeln!(out, "## Key Points");
        for point in &data.key_points {
            let _ = writeln!(out, "- {}", point);
        }
        let _ = writeln!(out);
    }

    if !data.action_items.is_empty() {
        let _ = writeln!(out, "## Action Items");
        for item in &data.action_items {
            let _ = writeln!(out, "- {}", item);
        }
        let _ = writeln!(out);
    }

    if !data.keywords.is_empty() {
        let _ = writeln!(out, "## Topics/Keywords");
        let _ = writeln!(out, "{}", data.keywords.join(", "));
    }

    out
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    metadata: SummaryMetadata<'a>,
    participants: &'a [String],
    summary: &'a str,
    key_points: &'a [String],
    action_items: &'a [String],
    keywords: &'a [String],
}

#[derive(Serialize)]
struct SummaryMetadata<'a> {
    date: String,
    duration: f64,
    file_path: &'a str,
}

fn summary_json(data: &SummaryData, transcript: &Transcript) -> String {
    let document = SummaryDocument {
        metadata: SummaryMetadata {
            date: Utc::now().to_rfc3339(),
            duration: transcript.duration,
            file_path: &transcript.file_path,
        },
        participants: &data.speakers,
        summary: &data.summary_text,
        key_points: &data.key_points,
        action_items: &data.action_items,
        keywords: &data.keywords,
    };
    serde_json::to_string_pretty(&document).unwrap_or_else(|_| String::new())
}

/// One `[<speaker>]: <text>` line per non-empty segment; parseable back into
/// segments by `transcript::parse_rendered_text`.
fn transcript_text(transcript: &Transcript) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Meeting Transcript");
    let _ = writeln!(out, "Date: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    for segment in &transcript.segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{}]: {}", segment.speaker, text);
    }

    out
}

/// Consecutive same-speaker segments are grouped under one heading.
fn transcript_markdown(transcript: &Transcript) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Meeting Transcript");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Date:** {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let mut current_speaker: Option<&str> = None;
    for segment in &transcript.segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }
        if current_speaker != Some(segment.speaker.as_str()) {
            let _ = writeln!(out);
            let _ = writeln!(out, "## {}", segment.speaker);
            let _ = writeln!(out);
            current_speaker = Some(segment.speaker.as_str());
        }
        let _ = writeln!(out, "{}", text);
    }

    out
}
