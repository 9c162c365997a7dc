//! Error types for ssvlog-core.
//!
//! None of these ever end the stream: every per-record failure is absorbed by
//! the dispatcher, which renders the record through the fallback instead.

use thiserror::Error;

/// The payload column could not be decoded into a JSON object.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is JSON but not an object")]
    NotAnObject,
}

/// A rule matched but could not render the record.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("record has no column {0}")]
    MissingColumn(usize),
    #[error("payload has no field {0:?}")]
    MissingField(String),
    #[error("payload field {field:?} is malformed: {reason}")]
    Malformed { field: String, reason: &'static str },
}

impl FormatError {
    pub fn malformed(field: &str, reason: &'static str) -> Self {
        FormatError::Malformed {
            field: field.to_string(),
            reason,
        }
    }
}
