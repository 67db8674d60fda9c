use super::{Segment, Transcript};

/// Seconds of estimated duration per reconstructed segment.
const ESTIMATED_SEGMENT_SECS: f64 = 10.0;

/// Reconstruct a transcript from its rendered plain-text form.
///
/// Content lines look like `[<speaker>]: <text>`; the speaker is everything
/// between the first `[` and the first following `]:`, the text is the
/// trimmed remainder. Lines of any other shape (headers, blanks) are
/// ignored. Reconstructed segments carry placeholder timings and a duration
/// estimated from the segment count.
pub fn parse_rendered_text(content: &str) -> Transcript {
    let mut segments = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        let Some(open) = line.find('[') else {
            continue;
        };
        let Some(close) = line[open..].find("]:").map(|i| open + i) else {
            continue;
        };

        let speaker = line[open + 1..close].trim().to_string();
        let text = line[close + 2..].trim().to_string();

        segments.push(Segment {
            start: 0.0,
            end: 0.0,
            speaker,
            text,
            confidence: 0.0,
        });
    }

    let mut transcript = Transcript::new("", ESTIMATED_SEGMENT_SECS * segments.len() as f64);
    transcript.segments = segments;
    transcript
}
