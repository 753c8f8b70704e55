//! The input data model: Whisper-style transcription records.
//!
//! Upstream producers are inconsistent about which fields they populate, and
//! occasionally emit the wrong type entirely (a string where a number belongs,
//! `null` instead of omission). Rather than scattering fallback logic across
//! the engine, every default lives here in the deserializers:
//!
//! - numeric fields decode to `0.0` when absent, `null`, or non-numeric
//! - `text` decodes to the empty string under the same conditions
//! - missing sequences decode to empty vectors
//!
//! Downstream code can therefore treat a decoded record as fully populated.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One transcription result as produced by a Whisper-style engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    /// The full transcript text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,

    /// Detected language code, passed through untouched (possibly absent).
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub language: Option<String>,

    /// Time-aligned transcript segments.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub segments: Vec<RawSegment>,
}

/// One raw time-aligned segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSegment {
    /// Segment id. When absent, normalization assigns the positional index.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub start: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub end: f64,

    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,

    /// Word-level timestamps, when the engine produced them.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub words: Vec<RawWord>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_logprob: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub no_speech_prob: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub compression_ratio: f64,
}

/// One word with optional timing and confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,

    /// Word start time. `None` falls back to the owning segment's start.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub start: Option<f64>,

    /// Word end time. `None` falls back to the owning segment's end.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub end: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub probability: f64,
}

/// Decode any JSON value to `f64`, defaulting to `0.0` for non-numbers.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

/// Decode any JSON value to `Option<f64>`, mapping non-numbers to `None`.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Decode any JSON value to `Option<i64>`, mapping non-integers to `None`.
fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}

/// Decode any JSON value to a vector, dropping entries that are not objects
/// of the expected shape and mapping non-arrays to the empty vector.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode any JSON value to `String`, defaulting non-strings to empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Decode any JSON value to `Option<String>`, mapping non-strings to `None`.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}
