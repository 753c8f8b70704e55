use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timecode::format_ass;

/// Hard cap on emitted dialogue events.
///
/// Pathological inputs (hours of audio with dense word timestamps) could
/// otherwise produce an unbounded event list; anything past the cap is
/// silently dropped. This is a safety bound, not an error condition.
pub const ASS_EVENT_CAP: usize = 5000;

/// A `SegmentEncoder` that writes an ASS (Advanced SubStation Alpha) script
/// with one karaoke dialogue event per word.
///
/// Design:
/// - We stream output directly to a `Write` implementation, writing the
///   script header lazily on the first segment (or at close, so even an
///   empty render is a playable script).
/// - Word events come from word-level timing when the segment carries it;
///   otherwise the segment duration is divided evenly across its
///   whitespace-split tokens.
/// - Two placeholder events cover the degenerate cases: no input segments at
///   all, and segments that produced no events.
pub struct AssEncoder<W: Write> {
    /// The underlying writer we stream the script into.
    w: W,

    /// Whether we've written the script header.
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,

    /// Whether any segment was written, even one producing no events.
    saw_segment: bool,

    /// How many dialogue events have been emitted so far.
    events_written: usize,

    /// The event cap in force (defaults to [`ASS_EVENT_CAP`]).
    event_cap: usize,

    /// Whether we've already logged hitting the cap.
    cap_logged: bool,
}

impl<W: Write> AssEncoder<W> {
    /// Create a new ASS encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self::with_event_cap(w, ASS_EVENT_CAP)
    }

    /// Create an ASS encoder with a custom event cap.
    pub fn with_event_cap(w: W, event_cap: usize) -> Self {
        Self {
            w,
            started: false,
            closed: false,
            saw_segment: false,
            events_written: 0,
            event_cap,
            cap_logged: false,
        }
    }

    /// Write the script header if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(SCRIPT_HEADER.as_bytes())?;
            self.started = true;
        }
        Ok(())
    }

    /// Emit one karaoke dialogue event, honoring the event cap.
    fn write_event(&mut self, start: f64, end: f64, text: &str) -> Result<()> {
        if self.events_written >= self.event_cap {
            if !self.cap_logged {
                tracing::warn!(
                    cap = self.event_cap,
                    "dialogue event cap reached; dropping remaining words"
                );
                self.cap_logged = true;
            }
            return Ok(());
        }

        // ASS text is single-line; embedded newlines become the literal `\N` escape.
        let text = text.replace('\n', "\\N");
        writeln!(
            &mut self.w,
            "Dialogue: 0,{},{},Karaoke,,0,0,0,,{}",
            format_ass(start),
            format_ass(end),
            text
        )?;
        self.events_written += 1;

        Ok(())
    }

    /// Emit events from the segment's own word-level timing.
    fn write_timed_words(&mut self, seg: &Segment) -> Result<()> {
        for word in &seg.words {
            let text = word.word.trim();
            if text.is_empty() {
                // Whitespace-only tokens carry nothing to display and do not
                // count toward the cap.
                continue;
            }
            let start = word.start.unwrap_or(seg.start);
            let end = word.end.unwrap_or(seg.end);
            self.write_event(start, end, text)?;
        }
        Ok(())
    }

    /// Emit events by dividing the segment duration evenly across its tokens.
    fn write_synthesized_words(&mut self, seg: &Segment) -> Result<()> {
        let tokens: Vec<&str> = seg.text.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(());
        }

        let slice = (seg.end - seg.start) / tokens.len() as f64;
        for (i, token) in tokens.iter().enumerate() {
            let start = seg.start + slice * i as f64;
            self.write_event(start, start + slice, token)?;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for AssEncoder<W> {
    /// Write one dialogue event per word of the segment.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::EncoderClosed);
        }

        self.start_if_needed()?;
        self.saw_segment = true;

        if seg.words.is_empty() {
            self.write_synthesized_words(seg)?;
        } else {
            self.write_timed_words(seg)?;
        }

        self.w.flush()?;
        Ok(())
    }

    /// Finalize the script, emitting a placeholder event when nothing was
    /// generated. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;

        if self.events_written == 0 {
            // A script with zero events confuses some players; emit a single
            // readable placeholder instead.
            let message = if self.saw_segment {
                "Processing error - no dialogue generated"
            } else {
                "No data available"
            };
            writeln!(
                &mut self.w,
                "Dialogue: 0,{},{},Default,,0,0,0,,{}",
                format_ass(0.0),
                format_ass(1.0),
                message
            )?;
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Fixed script metadata and styles preceding the event list.
const SCRIPT_HEADER: &str = "\
[Script Info]
Title: Transcription Karaoke
ScriptType: v4.00+
Collisions: Normal
PlayResX: 1280
PlayResY: 720
Timer: 100.0000

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,48,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,1,2,10,10,10,1
Style: Karaoke,Arial,48,&H00FFFFFF,&H0000FFFF,&H00000000,&H80000000,-1,0,0,0,100,100,0,0,1,2,1,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawSegment, RawWord};

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

    fn word(text: &str, start: Option<f64>, end: Option<f64>) -> RawWord {
        RawWord {
            word: text.to_string(),
            start,
            end,
            probability: 0.9,
        }
    }

    fn render(segments: &[Segment]) -> String {
        render_with_cap(segments, ASS_EVENT_CAP)
    }

    fn render_with_cap(segments: &[Segment], cap: usize) -> String {
        let mut out = Vec::new();
        let mut enc = AssEncoder::with_event_cap(&mut out, cap);
        for s in segments {
            enc.write_segment(s).unwrap();
        }
        enc.close().unwrap();
        String::from_utf8(out).unwrap()
    }

    fn dialogue_count(script: &str) -> usize {
        script.matches("Dialogue:").count()
    }

    #[test]
    fn empty_input_renders_header_and_placeholder() {
        let script = render(&[]);
        assert!(script.starts_with("[Script Info]"));
        assert!(script.contains("[V4+ Styles]"));
        assert!(script.contains("[Events]"));
        assert_eq!(dialogue_count(&script), 1);
        assert!(script.contains("Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,No data available"));
    }

    #[test]
    fn segments_without_events_render_error_placeholder() {
        // A segment whose only word is whitespace produces zero events.
        let mut s = seg(0.0, 1.0, "");
        s.words = vec![word("   ", Some(0.0), Some(1.0))];
        let script = render(&[s]);
        assert_eq!(dialogue_count(&script), 1);
        assert!(script.contains("Processing error - no dialogue generated"));
    }

    #[test]
    fn timed_words_use_their_own_timing() {
        let mut s = seg(10.0, 12.0, "hello world");
        s.words = vec![
            word("hello", Some(10.0), Some(10.5)),
            word("world", Some(10.5), Some(12.0)),
        ];
        let script = render(&[s]);
        assert!(script.contains("Dialogue: 0,0:00:10.00,0:00:10.50,Karaoke,,0,0,0,,hello"));
        assert!(script.contains("Dialogue: 0,0:00:10.50,0:00:12.00,Karaoke,,0,0,0,,world"));
    }

    #[test]
    fn words_missing_timing_fall_back_to_segment_bounds() {
        let mut s = seg(5.0, 6.0, "hi");
        s.words = vec![word("hi", None, None)];
        let script = render(&[s]);
        assert!(script.contains("Dialogue: 0,0:00:05.00,0:00:06.00,Karaoke,,0,0,0,,hi"));
    }

    #[test]
    fn untimed_segments_divide_duration_evenly() {
        let script = render(&[seg(0.0, 2.0, "one two")]);
        assert!(script.contains("Dialogue: 0,0:00:00.00,0:00:01.00,Karaoke,,0,0,0,,one"));
        assert!(script.contains("Dialogue: 0,0:00:01.00,0:00:02.00,Karaoke,,0,0,0,,two"));
    }

    #[test]
    fn newlines_become_the_ass_line_break_escape() {
        let mut s = seg(0.0, 1.0, "");
        s.words = vec![word("line\nbreak", Some(0.0), Some(1.0))];
        let script = render(&[s]);
        assert!(script.contains(",,line\\Nbreak\n"));
    }

    #[test]
    fn event_count_never_exceeds_the_cap() {
        // 20,000 timed words across 20 segments.
        let segments: Vec<Segment> = (0..20)
            .map(|i| {
                let base = i as f64 * 100.0;
                let mut s = seg(base, base + 100.0, "");
                s.words = (0..1000)
                    .map(|j| {
                        let t = base + j as f64 * 0.1;
                        word("w", Some(t), Some(t + 0.1))
                    })
                    .collect();
                s
            })
            .collect();
        let script = render(&segments);
        assert_eq!(dialogue_count(&script), ASS_EVENT_CAP);
    }

    #[test]
    fn whitespace_tokens_do_not_count_toward_the_cap() {
        let mut s = seg(0.0, 1.0, "");
        s.words = vec![
            word(" ", Some(0.0), Some(0.2)),
            word("a", Some(0.2), Some(0.4)),
            word("b", Some(0.4), Some(0.6)),
        ];
        let script = render_with_cap(&[s], 2);
        assert_eq!(dialogue_count(&script), 2);
        assert!(script.contains(",,a\n"));
        assert!(script.contains(",,b\n"));
    }

    #[test]
    fn write_after_close_errors() {
        let mut out = Vec::new();
        let mut enc = AssEncoder::new(&mut out);
        enc.close().unwrap();
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
    }
}
