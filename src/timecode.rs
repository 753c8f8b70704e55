//! Timestamp formatting for the subtitle encoders.
//!
//! Each subtitle format has its own timestamp convention:
//! - SRT: `HH:MM:SS,mmm` (comma before milliseconds)
//! - WebVTT: `HH:MM:SS.mmm` (period before milliseconds)
//! - ASS: `H:MM:SS.cc` (unpadded hours, centiseconds)
//!
//! Truncation policy:
//! - All components truncate toward zero, never round up. Rounding would push
//!   a cue that ends exactly at an integer second into the next frame, so the
//!   sub-second part is floored instead.
//! - Hours are not capped at 24; very long recordings keep counting up.

/// Clamp non-finite or negative input to zero.
///
/// Upstream fields default to 0 when missing, so a negative or NaN timestamp
/// is treated the same way rather than rejected.
fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Split seconds into `(hours, minutes, seconds, subsecond fraction)`.
fn split(seconds: f64) -> (u64, u64, u64, f64) {
    let seconds = sanitize(seconds);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    (hours, minutes, secs, seconds.fract())
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_srt(seconds: f64) -> String {
    let (h, m, s, fract) = split(seconds);
    let ms = (fract * 1000.0).floor() as u64;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format seconds as a WebVTT timestamp (`HH:MM:SS.mmm`).
pub fn format_vtt(seconds: f64) -> String {
    let (h, m, s, fract) = split(seconds);
    let ms = (fract * 1000.0).floor() as u64;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Format seconds as an ASS timestamp (`H:MM:SS.cc`).
///
/// ASS uses centisecond precision and leaves the hour component unpadded.
pub fn format_ass(seconds: f64) -> String {
    let (h, m, s, fract) = split(seconds);
    let cs = (fract * 100.0).floor() as u64;
    format!("{h}:{m:02}:{s:02}.{cs:02}")
}
