//! Flat word-timing extraction across all segments.

use serde::Serialize;

use crate::segments::Segment;

/// Hard cap on extracted word timings per record.
///
/// Bounds worst-case memory on pathological inputs; entries past the cap are
/// silently dropped. Independent of the ASS event cap.
pub const WORD_TIMING_CAP: usize = 10_000;

/// One word with resolved timing, flattened out of its segment.
#[derive(Debug, Clone, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub probability: f64,

    /// The id of the segment this word belongs to.
    pub segment_id: i64,
}

/// Flatten every segment's words into one capped list.
///
/// Word-level start/end default to 0 when absent, matching the rest of the
/// numeric defaulting in the data model.
pub fn extract_word_timings(segments: &[Segment], cap: usize) -> Vec<WordTiming> {
    let mut timings = Vec::new();

    for segment in segments {
        for word in &segment.words {
            if timings.len() >= cap {
                tracing::warn!(cap, "word timing cap reached; dropping remaining words");
                return timings;
            }

            let start = word.start.unwrap_or(0.0);
            let end = word.end.unwrap_or(0.0);
            timings.push(WordTiming {
                word: word.word.trim().to_string(),
                start,
                end,
                duration: end - start,
                probability: word.probability,
                segment_id: segment.id,
            });
        }
    }

    timings
}
