//! High-level API for normalizing one transcription record.
//!
//! We expose a single entry point (`normalize`) that wraps the lower-level
//! segmentation, analysis, and encoding logic.
//!
//! The intent is:
//! - One raw record in, one fully-derived `Transcript` out.
//! - Everything is computed once and never mutated afterward.
//! - Callers tune behavior via `NormalizeOpts`.
//!
//! This module is deliberately "high level": it wires up decoding → analysis →
//! encoders, while keeping the lower-level pieces testable in their own modules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::ass_encoder::AssEncoder;
use crate::opts::NormalizeOpts;
use crate::paragraphs::split_paragraphs;
use crate::record::TranscriptionRecord;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::{Segment, normalize_segments};
use crate::srt_encoder::SrtEncoder;
use crate::stats::{Statistics, TimeMarker, compute_statistics, time_markers};
use crate::timings::{WordTiming, extract_word_timings};
use crate::vtt_encoder::VttEncoder;

/// Above this many bytes of text, filler removal is skipped entirely and only
/// whitespace collapsing runs. A performance guard, not a semantic limit.
const FILLER_SCAN_MAX_LEN: usize = 100_000;

/// Filler tokens removed from the cleaned text, matched as whole words,
/// case-insensitively. English-specific and deliberately not configurable.
static FILLER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:um|uh|er|ah)\b").expect("filler pattern is valid"));

/// Every rendered output for one record, derived once and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ExportBundle {
    pub srt: String,
    pub vtt: String,
    pub ass: String,

    /// The cleaned transcript text.
    pub plain_text: String,

    /// Flat word timings across all segments, capped.
    pub word_timings: Vec<WordTiming>,
}

/// The fully-normalized result for one transcription record.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    /// The original transcript text, untouched.
    pub text: String,

    /// The raw `language` field, passed through as-is (possibly absent).
    pub language: Option<String>,

    /// Whitespace-collapsed, filler-stripped text.
    pub clean_text: String,

    pub paragraphs: Vec<String>,
    pub segments: Vec<Segment>,
    pub statistics: Statistics,
    pub time_markers: Vec<TimeMarker>,
    pub export: ExportBundle,
}

/// Normalize one raw transcription record into a `Transcript`.
pub fn normalize(record: TranscriptionRecord, opts: &NormalizeOpts) -> Result<Transcript> {
    let segments = normalize_segments(record.segments);
    let clean_text = clean(&record.text);

    let export = ExportBundle {
        srt: render_srt(&segments)?,
        vtt: render_vtt(&segments)?,
        ass: render_ass(&segments, opts.ass_event_cap)?,
        plain_text: clean_text.clone(),
        word_timings: extract_word_timings(&segments, opts.word_timing_cap),
    };

    Ok(Transcript {
        clean_text,
        paragraphs: split_paragraphs(&segments, opts.paragraph_gap_seconds),
        statistics: compute_statistics(&segments, record.language.as_deref()),
        time_markers: time_markers(&segments),
        text: record.text,
        language: record.language,
        segments,
        export,
    })
}

/// Collapse whitespace runs and strip filler words.
///
/// Oversized text skips the filler pass and only collapses whitespace.
fn clean(text: &str) -> String {
    if text.len() > FILLER_SCAN_MAX_LEN {
        tracing::debug!(
            len = text.len(),
            "text exceeds filler scan limit; collapsing whitespace only"
        );
        return collapse_whitespace(text);
    }

    collapse_whitespace(&FILLER_WORDS.replace_all(text, ""))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_srt(segments: &[Segment]) -> Result<String> {
    let mut buf = Vec::new();
    let mut encoder = SrtEncoder::new(&mut buf);
    write_all(&mut encoder, segments)?;
    into_string(buf)
}

fn render_vtt(segments: &[Segment]) -> Result<String> {
    let mut buf = Vec::new();
    let mut encoder = VttEncoder::new(&mut buf);
    write_all(&mut encoder, segments)?;
    into_string(buf)
}

fn render_ass(segments: &[Segment], event_cap: usize) -> Result<String> {
    let mut buf = Vec::new();
    let mut encoder = AssEncoder::with_event_cap(&mut buf, event_cap);
    write_all(&mut encoder, segments)?;
    into_string(buf)
}

fn write_all<E: SegmentEncoder>(encoder: &mut E, segments: &[Segment]) -> Result<()> {
    for segment in segments {
        encoder.write_segment(segment)?;
    }
    encoder.close()
}

fn into_string(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|err| crate::Error::msg(err.to_string()))
}
