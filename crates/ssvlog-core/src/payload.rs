//! Payload decoder: the JSON object in a record's payload column.
//!
//! Field reads are explicit about whether the field is required: the
//! `required` family returns [`FormatError::MissingField`], which sends the
//! record to the fallback, while the `optional` family returns `None`.

use serde_json::{Map, Value};

use crate::error::{DecodeError, FormatError};

/// A decoded payload. Keys keep the order in which the node wrote them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Decode a payload column. Anything but a JSON object is an error.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(DecodeError::NotAnObject),
        }
    }

    /// The payload of a rule that does not read one.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn required(&self, key: &str) -> Result<&Value, FormatError> {
        self.fields
            .get(key)
            .ok_or_else(|| FormatError::MissingField(key.to_string()))
    }

    /// Required field rendered as text (see [`display_value`]).
    pub fn required_text(&self, key: &str) -> Result<String, FormatError> {
        self.required(key).map(display_value)
    }

    pub fn optional(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.optional(key).map(display_value)
    }

    /// All fields, in the order the node wrote them.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The first of `keys` that is present, rendered as text.
    pub fn first_text(&self, keys: &[&str]) -> Result<String, FormatError> {
        keys.iter()
            .find_map(|key| self.optional_text(key))
            .ok_or_else(|| FormatError::MissingField(keys.join("|")))
    }
}

/// Text form of a payload value: strings without quotes, everything else as
/// compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
