//! Normalized segments derived from raw transcription segments.
//!
//! A `Segment` carries everything the encoders and analytics need, computed
//! once during normalization and never mutated afterward. Insertion order
//! matches input order, and a missing segment id defaults to the positional
//! index so every segment is addressable.

use serde::Serialize;

use crate::confidence::{self, FlaggedWord};
use crate::record::{RawSegment, RawWord};

/// One normalized transcript segment.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub id: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,

    /// Word-level timestamps carried through from the raw segment.
    pub words: Vec<RawWord>,

    pub avg_logprob: f64,
    pub no_speech_prob: f64,
    pub temperature: f64,
    pub compression_ratio: f64,

    /// `end - start`, which may be zero or negative for malformed input.
    pub duration: f64,

    pub word_count: usize,

    /// `word_count / duration`, with 1 substituted for degenerate durations.
    pub words_per_second: f64,

    /// Space-joined words with probability strictly above 0.8.
    pub high_confidence_words: String,

    /// Words with probability strictly below 0.5, kept for review.
    pub low_confidence_words: Vec<FlaggedWord>,
}

impl Segment {
    /// Derive a normalized segment from a raw one.
    ///
    /// `index` is the segment's position in the input sequence; it becomes
    /// the id when the raw segment carries none.
    pub fn from_raw(raw: RawSegment, index: usize) -> Self {
        let duration = raw.end - raw.start;
        let word_count = count_words(&raw);
        let report = confidence::analyze_words(&raw.words);

        Self {
            id: raw.id.unwrap_or(index as i64),
            start: raw.start,
            end: raw.end,
            duration,
            word_count,
            words_per_second: confidence::words_per_second(word_count, duration),
            high_confidence_words: report.high_confidence_words,
            low_confidence_words: report.low_confidence_words,
            text: raw.text,
            words: raw.words,
            avg_logprob: raw.avg_logprob,
            no_speech_prob: raw.no_speech_prob,
            temperature: raw.temperature,
            compression_ratio: raw.compression_ratio,
        }
    }
}

/// Normalize every raw segment, assigning positional ids where needed.
pub fn normalize_segments(raw: Vec<RawSegment>) -> Vec<Segment> {
    raw.into_iter()
        .enumerate()
        .map(|(index, segment)| Segment::from_raw(segment, index))
        .collect()
}

/// Count a segment's words.
///
/// Prefer the word-level list when present; fall back to whitespace tokens of
/// the text so transcripts without word timing still report a word count.
fn count_words(raw: &RawSegment) -> usize {
    if raw.words.is_empty() {
        raw.text.split_whitespace().count()
    } else {
        raw.words.len()
    }
}
