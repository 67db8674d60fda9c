//! Extractive summarization over transcript segments
//!
//! `extract` is a pure function: the same segments always produce the same
//! `SummaryData`. Nothing is cached; callers recompute on every request.

use crate::transcript::Segment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Common function words excluded from keyword counting.
pub const STOP_WORDS: [&str; 36] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "shall",
];

/// A segment containing any of these (lowercase) substrings is treated as an
/// action item.
const ACTION_MARKERS: [&str; 5] = ["todo", "need to", "should", "will", "action"];

const MAX_KEY_POINTS: usize = 10;
const MAX_ACTION_ITEMS: usize = 5;
const MAX_KEYWORDS: usize = 15;
const MAX_SUMMARY_SENTENCES: usize = 3;
/// The summary draws from the first this-many substantial sentences.
const SUMMARY_CANDIDATES: usize = 5;
/// Sentences and keywords shorter than these are not substantial.
const MIN_SENTENCE_CHARS: usize = 20;
const MIN_KEYWORD_CHARS: usize = 3;

/// Condensed view of a transcript. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryData {
    /// Distinct speaker labels, in first-appearance order
    pub speakers: Vec<String>,
    /// Count of input segments, including empty-text ones
    pub total_segments: usize,
    /// Substantial sentences, in discovery order
    pub key_points: Vec<String>,
    /// `"<speaker>: <text>"` for segments matching the action heuristic
    pub action_items: Vec<String>,
    /// Lowercase tokens with corpus frequency > 1, by descending frequency
    pub keywords: Vec<String>,
    /// Up to three substantial sentences, in original order
    pub summary_text: String,
}

/// Extract summary data from transcript segments.
///
/// Segments with empty trimmed text contribute nothing beyond the
/// `total_segments` count.
pub fn extract(segments: &[Segment]) -> SummaryData {
    let mut speakers: Vec<String> = Vec::new();
    let mut texts: Vec<&str> = Vec::new();
    let mut key_points: Vec<String> = Vec::new();
    let mut action_items: Vec<String> = Vec::new();

    for segment in segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }

        texts.push(text);
        if !speakers.iter().any(|s| *s == segment.speaker) {
            speakers.push(segment.speaker.clone());
        }

        let lower = text.to_lowercase();
        if action_items.len() < MAX_ACTION_ITEMS
            && ACTION_MARKERS.iter().any(|marker| lower.contains(marker))
        {
            action_items.push(format!("{}: {}", segment.speaker, text));
        }

        for sentence in split_sentences(text) {
            if key_points.len() == MAX_KEY_POINTS {
                break;
            }
            if sentence.chars().count() > MIN_SENTENCE_CHARS {
                key_points.push(sentence.to_string());
            }
        }
    }

    let full_text = texts.join(" ");

    SummaryData {
        speakers,
        total_segments: segments.len(),
        key_points,
        action_items,
        keywords: extract_keywords(&full_text),
        summary_text: summary_text(&full_text),
    }
}

/// Split on runs of sentence terminators, yielding trimmed fragments.
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Lowercase word tokens (maximal alphanumeric runs).
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Repeated non-stop-word tokens, most frequent first.
///
/// Ties are broken by first occurrence in the corpus. The secondary key is
/// tracked explicitly so the ordering does not depend on map iteration
/// order.
fn extract_keywords(text: &str) -> Vec<String> {
    struct Tally {
        count: usize,
        first_seen: usize,
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    for (position, token) in tokenize(text).into_iter().enumerate() {
        if token.chars().count() <= MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        tallies
            .entry(token)
            .and_modify(|t| t.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: position,
            });
    }

    let mut keywords: Vec<(String, Tally)> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.count > 1)
        .collect();
    keywords.sort_by(|(_, a), (_, b)| {
        b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
    });
    keywords.truncate(MAX_KEYWORDS);

    keywords.into_iter().map(|(token, _)| token).collect()
}

/// Up to three of the first five substantial sentences, joined by spaces.
fn summary_text(full_text: &str) -> String {
    split_sentences(full_text)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(SUMMARY_CANDIDATES)
        .take(MAX_SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}
