//! Aggregate statistics and per-segment time markers.

use serde::Serialize;

use crate::segments::Segment;

/// `avg_logprob` below this marks a segment as low confidence.
const LOW_CONFIDENCE_LOGPROB: f64 = -0.5;

/// `no_speech_prob` above this marks a segment as likely non-speech.
const HIGH_NO_SPEECH_PROB: f64 = 0.1;

/// Maximum preview length (characters) in a time marker.
const PREVIEW_MAX_CHARS: usize = 50;

/// Scalar summary of one transcription record. Computed once, read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Largest segment end time, 0 when there are no segments.
    pub total_duration: f64,

    pub total_segments: usize,

    /// Sum of per-segment word counts.
    pub total_words: usize,

    /// Mean of `abs(avg_logprob)` across segments, 0 when there are none.
    pub average_confidence: f64,

    /// Detected language, defaulting to `"unknown"`.
    pub language_detected: String,

    /// Segments with `avg_logprob < -0.5`.
    pub low_confidence_segments: usize,

    /// Segments with `no_speech_prob > 0.1`.
    pub high_no_speech_segments: usize,
}

/// A navigation marker: where a segment starts and what it roughly says.
#[derive(Debug, Clone, Serialize)]
pub struct TimeMarker {
    pub id: i64,
    pub start: f64,

    /// Segment text truncated to 50 characters, `...`-suffixed when cut.
    pub preview: String,

    /// `abs(avg_logprob)` as a rough confidence proxy.
    pub confidence: f64,
}

/// Compute the statistics block for a record's segments.
pub fn compute_statistics(segments: &[Segment], language: Option<&str>) -> Statistics {
    let total_duration = segments.iter().map(|s| s.end).fold(0.0, f64::max);
    let total_words = segments.iter().map(|s| s.word_count).sum();

    let average_confidence = if segments.is_empty() {
        0.0
    } else {
        let sum: f64 = segments.iter().map(|s| s.avg_logprob.abs()).sum();
        sum / segments.len() as f64
    };

    Statistics {
        total_duration,
        total_segments: segments.len(),
        total_words,
        average_confidence,
        language_detected: language.unwrap_or("unknown").to_string(),
        low_confidence_segments: segments
            .iter()
            .filter(|s| s.avg_logprob < LOW_CONFIDENCE_LOGPROB)
            .count(),
        high_no_speech_segments: segments
            .iter()
            .filter(|s| s.no_speech_prob > HIGH_NO_SPEECH_PROB)
            .count(),
    }
}

/// Build one time marker per segment.
pub fn time_markers(segments: &[Segment]) -> Vec<TimeMarker> {
    segments
        .iter()
        .map(|s| TimeMarker {
            id: s.id,
            start: s.start,
            preview: preview(&s.text),
            confidence: s.avg_logprob.abs(),
        })
        .collect()
}

/// Truncate text to the preview length on a character boundary.
fn preview(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(PREVIEW_MAX_CHARS) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
