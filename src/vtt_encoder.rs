use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timecode::format_vtt;

/// A `SegmentEncoder` that writes segments in WebVTT format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - We write the WebVTT header lazily on the first segment so that:
///   - callers can construct the encoder without immediately writing output
///   - even "no segments" runs still behave predictably (close just flushes)
/// - Cues are separated by a blank line between them; the header's trailing
///   blank line doubles as the separator before the first cue.
pub struct VttEncoder<W: Write> {
    /// The underlying writer we stream VTT into.
    w: W,

    /// Whether we've written the `WEBVTT` header.
    started: bool,

    /// Whether the next cue will be the first cue.
    first: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    /// Create a new VTT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the WebVTT header if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            // WebVTT files begin with a mandatory header line followed by a blank line.
            self.w.write_all(b"WEBVTT\n")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for VttEncoder<W> {
    /// Write a single cue in WebVTT format.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::EncoderClosed);
        }

        self.start_if_needed()?;

        // The blank line before each cue (after the header, between cues).
        writeln!(&mut self.w)?;
        self.first = false;

        // WebVTT timestamps use `HH:MM:SS.mmm`.
        let start = format_vtt(seg.start);
        let end = format_vtt(seg.end);

        // Cue timing line, then the cue text.
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", seg.text.trim())?;

        // Flush so streaming consumers (stdout, pipes, sockets) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Even a cue-less render is a valid VTT file as long as the header exists.
        self.start_if_needed()?;
        if self.first {
            writeln!(&mut self.w)?;
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
    fn close_without_segments_emits_bare_header() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "WEBVTT\n\n");
        Ok(())
    }

    #[test]
    fn writes_header_once_and_formats_cues() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);

        enc.write_segment(&seg(0.0, 1.2345, "hello"))?;
        enc.write_segment(&seg(61.2, 62.0, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.starts_with("WEBVTT\n\n"));
        assert!(s.contains("00:00:00.000 --> 00:00:01.234\nhello\n"));
        assert!(s.contains("\n00:01:01.200 --> 00:01:02.000\nworld\n"));
        assert_eq!(s.matches("WEBVTT").count(), 1);
        Ok(())
    }

    #[test]
    fn cue_timestamps_truncate_toward_zero() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.write_segment(&seg(0.0009, 1.9995, "x"))?;
        enc.close()?;
        let s = std::str::from_utf8(&out)?;
        assert!(s.contains("00:00:00.000 --> 00:00:01.999"));
        Ok(())
    }

    #[test]
    fn write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
