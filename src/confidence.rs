//! Per-segment confidence analysis over word-level probabilities.
//!
//! Words partition by two strict thresholds:
//! - probability > 0.8 → high confidence (kept as readable text)
//! - probability < 0.5 → low confidence (kept as structured records for review)
//! - everything in `[0.5, 0.8]` lands in neither bucket
//!
//! The thresholds are strict on purpose: a word at exactly 0.8 or 0.5 is
//! deliberately excluded from both lists.

use serde::Serialize;

use crate::record::RawWord;

/// Probability above which a word is considered reliable.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Probability below which a word is flagged for manual review.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// A low-confidence word preserved with its timing for manual review.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedWord {
    pub word: String,
    pub probability: f64,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

/// The two word buckets derived from one segment's word list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfidenceReport {
    /// Words with probability strictly above 0.8, trimmed and space-joined.
    pub high_confidence_words: String,

    /// Words with probability strictly below 0.5, kept structured.
    pub low_confidence_words: Vec<FlaggedWord>,
}

/// Partition a segment's words by the strict confidence thresholds.
pub fn analyze_words(words: &[RawWord]) -> ConfidenceReport {
    let mut high: Vec<&str> = Vec::new();
    let mut low: Vec<FlaggedWord> = Vec::new();

    for word in words {
        if word.probability > HIGH_CONFIDENCE_THRESHOLD {
            high.push(word.word.trim());
        } else if word.probability < LOW_CONFIDENCE_THRESHOLD {
            low.push(FlaggedWord {
                word: word.word.clone(),
                probability: word.probability,
                start: word.start,
                end: word.end,
            });
        }
    }

    ConfidenceReport {
        high_confidence_words: high.join(" "),
        low_confidence_words: low,
    }
}

/// Words-per-second rate with a safe denominator.
///
/// A zero or negative duration substitutes 1 so a degenerate segment still
/// yields a finite rate instead of dividing by zero.
pub fn words_per_second(word_count: usize, duration_seconds: f64) -> f64 {
    let denominator = if duration_seconds > 0.0 {
        duration_seconds
    } else {
        1.0
    };
    word_count as f64 / denominator
}
