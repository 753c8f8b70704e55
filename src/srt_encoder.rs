use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timecode::format_srt;

/// A `SegmentEncoder` that writes segments in SubRip (SRT) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Blocks are separated by a blank line *between* them, not after every
///   block, so a single-segment render carries no trailing blank line.
/// - The 1-based block index is encoder state, incremented per segment.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// The index of the next block (SRT indices are 1-based).
    next_index: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single block in SRT format.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::EncoderClosed);
        }

        // A blank line separates this block from the previous one.
        if self.next_index > 1 {
            writeln!(&mut self.w)?;
        }

        let start = format_srt(seg.start);
        let end = format_srt(seg.end);

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", seg.text.trim())?;
        self.next_index += 1;

        // Flush so streaming consumers (stdout, pipes, sockets) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
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
    fn single_segment_renders_one_block() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_segment(&seg(0.0, 2.0, "Hi"))?;
        enc.close()?;
        assert_eq!(
            std::str::from_utf8(&out)?,
            "1\n00:00:00,000 --> 00:00:02,000\nHi\n"
        );
        Ok(())
    }

    #[test]
    fn blocks_are_separated_by_a_blank_line() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_segment(&seg(0.0, 1.0, "first"))?;
        enc.write_segment(&seg(1.0, 2.5, "second"))?;
        enc.close()?;
        assert_eq!(
            std::str::from_utf8(&out)?,
            "1\n00:00:00,000 --> 00:00:01,000\nfirst\n\
             \n2\n00:00:01,000 --> 00:00:02,500\nsecond\n"
        );
        Ok(())
    }

    #[test]
    fn close_without_segments_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
