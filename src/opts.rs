use crate::ass_encoder::ASS_EVENT_CAP;
use crate::paragraphs::PARAGRAPH_GAP_SECONDS;
use crate::timings::WORD_TIMING_CAP;

/// Options that control how a transcription record is normalized.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// Callers map user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
///
/// The defaults match the engine's documented constants. The two caps are
/// deliberately independent tunables; they bound different resources and are
/// never unified.
#[derive(Debug, Clone)]
pub struct NormalizeOpts {
    /// A pause longer than this (seconds) starts a new paragraph.
    pub paragraph_gap_seconds: f64,

    /// Hard cap on ASS dialogue events per record.
    pub ass_event_cap: usize,

    /// Hard cap on flat word-timing entries per record.
    pub word_timing_cap: usize,
}

impl Default for NormalizeOpts {
    fn default() -> Self {
        Self {
            paragraph_gap_seconds: PARAGRAPH_GAP_SECONDS,
            ass_event_cap: ASS_EVENT_CAP,
            word_timing_cap: WORD_TIMING_CAP,
        }
    }
}
