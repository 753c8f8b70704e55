use thiserror::Error;

/// Captify's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Captify's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// A segment was written to an encoder after `close()`.
    #[error("cannot write segment: encoder is already closed")]
    EncoderClosed,

    /// A host record could not be decoded into a transcription object.
    #[error("invalid transcription payload: {0}")]
    Payload(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}
