/// The supported output formats for encoded transcription segments.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - With the `cli` feature, `ValueEnum` allows this enum to be used directly
///   as a CLI flag with `clap`.
/// - Each variant maps to a concrete `SegmentEncoder` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output segments in SubRip (SRT) subtitle format.
    Srt,

    /// Output segments in WebVTT subtitle format.
    Vtt,

    /// Output per-word karaoke events in ASS subtitle format.
    Ass,

    /// Output normalized segments as a JSON array.
    Json,
}
