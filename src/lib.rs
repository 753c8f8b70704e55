//! `captify` — a small, focused subtitle-generation library for
//! Whisper-style transcription output.
//!
//! This crate provides:
//! - Lenient decoding of transcription records (missing/malformed fields default)
//! - Segment normalization and confidence analysis
//! - Paragraph segmentation from timing gaps
//! - Pluggable output encoders (SRT, WebVTT, ASS karaoke, JSON)
//! - Aggregate statistics, time markers, and word-timing extraction
//!
//! The library is designed to be used by both CLI tools and automation hosts
//! that process batches of records, with an emphasis on clarity, streaming
//! output, and minimal surprises. It never performs speech recognition or
//! audio I/O: the input is already-transcribed text with timing metadata.

// High-level API (most consumers should start here).
pub mod batch;
pub mod opts;
pub mod transcript;

// Input data model and segment normalization.
pub mod record;
pub mod segments;

// Derived analytics.
pub mod confidence;
pub mod paragraphs;
pub mod stats;
pub mod timings;

// Timestamp formatting shared by the subtitle encoders.
pub mod timecode;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize segments into various formats.
pub mod ass_encoder;
pub mod json_array_encoder;
pub mod srt_encoder;
pub mod vtt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
