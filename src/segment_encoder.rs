use crate::Result;
use crate::segments::Segment;

/// A streaming consumer of normalized segments.
///
/// Encoders write each segment as it arrives and finalize their output on
/// `close()`. Implementations must make `close()` idempotent and reject
/// writes after close with [`crate::Error::EncoderClosed`].
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
