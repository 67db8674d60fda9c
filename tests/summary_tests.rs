// Integration tests for extractive summarization
//
// `extract` is a pure function over segments, so these tests build segment
// lists directly and assert on the derived `SummaryData`.

use notetaker::summary::{self, STOP_WORDS};
use notetaker::Segment;

fn seg(speaker: &str, text: &str) -> Segment {
    Segment {
        start: 0.0,
        end: 0.0,
        speaker: speaker.to_string(),
        text: text.to_string(),
        confidence: 0.8,
    }
}

fn meeting_segments() -> Vec<Segment> {
    vec![
        seg("Alice", "Hello everyone, let's start the meeting."),
        seg("Bob", "I think we should discuss the new project timeline."),
        seg("Alice", "Good idea. We need to finish by next Friday."),
    ]
}

#[test]
fn test_meeting_scenario() {
    let data = summary::extract(&meeting_segments());

    assert_eq!(data.speakers, vec!["Alice", "Bob"]);
    assert_eq!(data.total_segments, 3);

    // Bob's line matches "should", Alice's second line matches "need to"
    assert_eq!(
        data.action_items,
        vec![
            "Bob: I think we should discuss the new project timeline.",
            "Alice: Good idea. We need to finish by next Friday.",
        ]
    );

    // Substantial sentences only ("Good idea" is too short)
    assert_eq!(
        data.key_points,
        vec![
            "Hello everyone, let's start the meeting",
            "I think we should discuss the new project timeline",
            "We need to finish by next Friday",
        ]
    );

    // No token repeats often enough to become a keyword
    assert!(data.keywords.is_empty());

    assert_eq!(
        data.summary_text,
        "Hello everyone, let's start the meeting \
         I think we should discuss the new project timeline \
         We need to finish by next Friday"
    );
}

#[test]
fn test_extract_is_pure() {
    let segments = meeting_segments();
    assert_eq!(summary::extract(&segments), summary::extract(&segments));
}

#[test]
fn test_speakers_first_appearance_order_without_duplicates() {
    let segments = vec![
        seg("Carol", "first remark"),
        seg("Dave", "second remark"),
        seg("Carol", "third remark"),
        seg("Dave", "fourth remark"),
    ];
    let data = summary::extract(&segments);
    assert_eq!(data.speakers, vec!["Carol", "Dave"]);
}

#[test]
fn test_empty_text_segments_counted_but_excluded() {
    let segments = vec![
        seg("Alice", "We should kick off the planning phase now."),
        seg("Ghost", "   "),
        seg("Ghost", ""),
    ];
    let data = summary::extract(&segments);

    assert_eq!(data.total_segments, 3);
    assert_eq!(data.speakers, vec!["Alice"]);
}

#[test]
fn test_key_points_capped_at_ten() {
    let segments: Vec<Segment> = (0..14)
        .map(|i| {
            seg(
                "Alice",
                &format!("This is substantial discussion point number {i:02}."),
            )
        })
        .collect();
    let data = summary::extract(&segments);

    assert_eq!(data.key_points.len(), 10);
    // Discovery order is preserved
    assert!(data.key_points[0].contains("number 00"));
    assert!(data.key_points[9].contains("number 09"));
}

#[test]
fn test_action_items_capped_at_five_in_segment_order() {
    let segments: Vec<Segment> = (0..8)
        .map(|i| seg(&format!("S{i}"), &format!("We need to handle task {i}")))
        .collect();
    let data = summary::extract(&segments);

    assert_eq!(data.action_items.len(), 5);
    assert_eq!(data.action_items[0], "S0: We need to handle task 0");
    assert_eq!(data.action_items[4], "S4: We need to handle task 4");
}

#[test]
fn test_action_markers_are_case_insensitive() {
    let data = summary::extract(&[seg("Alice", "TODO: circulate the agenda")]);
    assert_eq!(data.action_items.len(), 1);
}

#[test]
fn test_keywords_capped_at_fifteen() {
    // 20 distinct tokens, each appearing twice
    let text: String = (0..20)
        .map(|i| format!("topic{i:02} topic{i:02}"))
        .collect::<Vec<_>>()
        .join(" ");
    let data = summary::extract(&[seg("Alice", &text)]);

    assert_eq!(data.keywords.len(), 15);
    // Equal frequencies fall back to first-occurrence order
    assert_eq!(data.keywords[0], "topic00");
    assert_eq!(data.keywords[14], "topic14");
}

#[test]
fn test_keywords_require_frequency_above_one() {
    let data = summary::extract(&[seg(
        "Alice",
        "budget budget budget roadmap roadmap singleton",
    )]);

    assert_eq!(data.keywords, vec!["budget", "roadmap"]);

    // Property: every keyword occurs more than once in the corpus
    for keyword in &data.keywords {
        let count = "budget budget budget roadmap roadmap singleton"
            .split_whitespace()
            .filter(|w| w == keyword)
            .count();
        assert!(count > 1, "keyword {keyword} occurs only {count} time(s)");
    }
}

#[test]
fn test_keywords_exclude_stop_words_and_short_tokens() {
    let data = summary::extract(&[seg(
        "Alice",
        "should should should the the cat cat plan plan",
    )]);

    // "should"/"the" are stop words, "cat"/"plan" are too short
    assert!(data.keywords.is_empty());
    assert!(STOP_WORDS.contains(&"should"));
}

#[test]
fn test_keywords_sorted_by_descending_frequency() {
    let data = summary::extract(&[seg(
        "Alice",
        "alpha1 beta2 alpha1 beta2 gamma3 gamma3 gamma3",
    )]);
    assert_eq!(data.keywords, vec!["gamma3", "alpha1", "beta2"]);
}

#[test]
fn test_summary_uses_at_most_three_sentences() {
    let segments: Vec<Segment> = (0..6)
        .map(|i| seg("Alice", &format!("Here is a fully substantial sentence {i}.")))
        .collect();
    let data = summary::extract(&segments);

    // Joined with single spaces, terminators stripped by the split
    let sentences: Vec<&str> = data.summary_text.split(". ").collect();
    assert_eq!(sentences.len(), 1); // no terminators survive the join
    assert!(data.summary_text.contains("sentence 0"));
    assert!(data.summary_text.contains("sentence 2"));
    assert!(!data.summary_text.contains("sentence 3"));
}

#[test]
fn test_empty_segments_produce_empty_summary() {
    let data = summary::extract(&[]);

    assert!(data.speakers.is_empty());
    assert_eq!(data.total_segments, 0);
    assert!(data.key_points.is_empty());
    assert!(data.action_items.is_empty());
    assert!(data.keywords.is_empty());
    assert!(data.summary_text.is_empty());
}
