//! Paragraph segmentation from inter-segment timing gaps.
//!
//! Speech pauses are the only structural signal a transcript carries, so a
//! paragraph boundary falls wherever the silence between two segments exceeds
//! the gap threshold. The function is pure: same segments in, same paragraphs
//! out, no state in between.

use crate::segments::Segment;

/// A pause longer than this (seconds) starts a new paragraph.
pub const PARAGRAPH_GAP_SECONDS: f64 = 2.0;

/// Group consecutive segment texts into paragraphs.
///
/// Each segment's trimmed text is accumulated; the accumulator flushes when
/// the next segment starts more than `gap_seconds` after the current one
/// ends, or at the end of input. Zero segments yield zero paragraphs.
pub fn split_paragraphs(segments: &[Segment], gap_seconds: f64) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        current.push(segment.text.trim());

        let flush = match segments.get(i + 1) {
            Some(next) => next.start - segment.end > gap_seconds,
            None => true,
        };

        if flush {
            paragraphs.push(current.join(" ").trim().to_string());
            current.clear();
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawSegment;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment::from_raw(
            RawSegment {
                start,
                end,
                text: text.to_string(),
                ..RawSegment::default()
            },
            0,
        )
    }

    #[test]
    fn contiguous_segments_form_one_paragraph() {
        let segments = vec![
            seg(0.0, 1.0, " Hello "),
            seg(1.5, 2.5, "there,"),
            seg(4.5, 5.0, "friend."),
        ];
        // Largest gap is exactly 2.0s, which does not exceed the threshold.
        let paragraphs = split_paragraphs(&segments, PARAGRAPH_GAP_SECONDS);
        assert_eq!(paragraphs, vec!["Hello there, friend."]);
    }

    #[test]
    fn a_gap_over_two_seconds_splits_paragraphs() {
        let segments = vec![seg(0.0, 1.0, "Hello"), seg(4.0, 5.0, "world")];
        let paragraphs = split_paragraphs(&segments, PARAGRAPH_GAP_SECONDS);
        assert_eq!(paragraphs, vec!["Hello", "world"]);
    }

    #[test]
    fn no_segments_yield_no_paragraphs() {
        assert!(split_paragraphs(&[], PARAGRAPH_GAP_SECONDS).is_empty());
    }

    #[test]
    fn single_segment_is_a_single_trimmed_paragraph() {
        let paragraphs = split_paragraphs(&[seg(0.0, 1.0, "  just this  ")], 2.0);
        assert_eq!(paragraphs, vec!["just this"]);
    }

    #[test]
    fn threshold_is_configurable() {
        let segments = vec![seg(0.0, 1.0, "a"), seg(2.5, 3.0, "b")];
        assert_eq!(split_paragraphs(&segments, 2.0).len(), 1);
        assert_eq!(split_paragraphs(&segments, 1.0).len(), 2);
    }
}
