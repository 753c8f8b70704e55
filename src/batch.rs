//! The host-facing record interface.
//!
//! Automation hosts hand us loosely-shaped records: the transcription object
//! itself, an object with a nested `data` field, an array whose first element
//! holds the object, or an attached binary payload carrying the JSON as UTF-8
//! bytes. This module unwraps all of those, normalizes each record
//! independently, and reports per-record outcomes.
//!
//! Failure isolation is the contract: one malformed record becomes a
//! `success: false` result with a message; its siblings are unaffected and the
//! batch never aborts. Normalization is pure and deterministic, so there are
//! no retries — re-running the same input cannot change the outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::Error;
use crate::opts::NormalizeOpts;
use crate::record::TranscriptionRecord;
use crate::transcript::{Transcript, normalize};

/// Input-type tag for successfully processed records.
const INPUT_TYPE_TRANSCRIPTION: &str = "whisper-transcription";

/// Input-type tag for failed records.
const INPUT_TYPE_ERROR: &str = "error";

/// One record as received from the host.
#[derive(Debug, Clone)]
pub struct InputRecord {
    /// The record's JSON payload.
    pub json: Value,

    /// An optional embedded binary payload. When present and decodable as
    /// UTF-8 JSON it takes precedence over the JSON payload.
    pub binary: Option<Vec<u8>>,
}

impl InputRecord {
    pub fn from_json(json: Value) -> Self {
        Self { json, binary: None }
    }

    pub fn with_binary(json: Value, binary: Vec<u8>) -> Self {
        Self {
            json,
            binary: Some(binary),
        }
    }
}

/// Bookkeeping attached to every result, success or failure.
#[derive(Debug, Clone, Serialize)]
pub struct RecordMetadata {
    /// When this record was processed.
    pub processed_at: DateTime<Utc>,

    /// `"whisper-transcription"` on success, `"error"` on failure.
    pub input_type: &'static str,

    /// The record's position within its batch.
    pub batch_index: usize,
}

/// The per-record outcome returned to the host.
///
/// On failure the original payload is deliberately not retained; carrying
/// large failed inputs through the result array would defeat the memory
/// bounds elsewhere in the engine.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<Transcript>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub metadata: RecordMetadata,
}

/// Process one host record.
pub fn process_record(record: InputRecord, batch_index: usize, opts: &NormalizeOpts) -> ResultRecord {
    let payload = unwrap_payload(record);

    match normalize_payload(payload, opts) {
        Ok(transcript) => ResultRecord {
            success: true,
            processed: Some(transcript),
            error: None,
            metadata: metadata(INPUT_TYPE_TRANSCRIPTION, batch_index),
        },
        Err(err) => {
            tracing::debug!(batch_index, error = %err, "record failed to normalize");
            ResultRecord {
                success: false,
                processed: None,
                error: Some(err.to_string()),
                metadata: metadata(INPUT_TYPE_ERROR, batch_index),
            }
        }
    }
}

/// Process a batch of host records sequentially.
///
/// Each record is independent; a failure produces a failure result in place
/// and processing continues with the next record.
pub fn process_batch(records: Vec<InputRecord>, opts: &NormalizeOpts) -> Vec<ResultRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| process_record(record, index, opts))
        .collect()
}

/// Resolve the transcription payload from whichever wrapping the host used.
///
/// Order of preference:
/// 1. a binary attachment that decodes as UTF-8 JSON
/// 2. the JSON payload, unwrapped one array level (first element) and one
///    `data` field level when present
fn unwrap_payload(record: InputRecord) -> Value {
    if let Some(bytes) = record.binary {
        match std::str::from_utf8(&bytes).map(serde_json::from_str::<Value>) {
            Ok(Ok(parsed)) => return unwrap_json(parsed),
            _ => {
                // Undecodable binary falls back to the plain JSON path.
                tracing::debug!("binary payload was not UTF-8 JSON; using JSON payload");
            }
        }
    }

    unwrap_json(record.json)
}

fn unwrap_json(value: Value) -> Value {
    let value = match value {
        Value::Array(mut items) => {
            if items.is_empty() {
                Value::Null
            } else {
                items.swap_remove(0)
            }
        }
        other => other,
    };

    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn normalize_payload(payload: Value, opts: &NormalizeOpts) -> crate::Result<Transcript> {
    let record: TranscriptionRecord = serde_json::from_value(payload)
        .map_err(|err| Error::Payload(err.to_string()))?;
    normalize(record, opts)
}

fn metadata(input_type: &'static str, batch_index: usize) -> RecordMetadata {
    RecordMetadata {
        processed_at: Utc::now(),
        input_type,
        batch_index,
    }
}
