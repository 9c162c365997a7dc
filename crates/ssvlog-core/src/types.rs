//! Core types for ssvlog-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! tokenized [`RawRecord`], the structured [`LogEntry`] built from it, and the
//! [`Severity`] classification.

/// One input line split into its delimited fields.
///
/// A record always has at least two fields (timestamp and severity); the
/// tokenizer refuses to build shorter ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    /// Wrap already-split fields. Returns `None` when fewer than two fields
    /// are present.
    pub fn new(fields: Vec<String>) -> Option<Self> {
        (fields.len() >= 2).then_some(Self { fields })
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

/// Log severity as printed by the node.
///
/// The classification only drives colour selection and spam filtering;
/// anything the node prints that is not one of the known levels is carried
/// verbatim in [`Severity::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Other(String),
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "DEBUG" => Severity::Debug,
            "INFO" => Severity::Info,
            "WARN" => Severity::Warn,
            "ERROR" => Severity::Error,
            "FATAL" => Severity::Fatal,
            other => Severity::Other(other.to_string()),
        }
    }

    /// `true` for the severities the fallback renders as errors.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Info => write!(f, "INFO"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
            Severity::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// A structured log entry derived from a [`RawRecord`].
///
/// The fields after timestamp and severity keep their original order. For
/// `component<TAB>event<TAB>payload` records the component is field 0; for
/// message-only records field 0 is the message itself and the payload follows
/// at field 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Normalised timestamp (`YYYY-MM-DD hh:mm:ss`, no sub-second part).
    pub timestamp: String,
    pub severity: Severity,
    /// Every field after the severity, in input order.
    pub fields: Vec<String>,
}

impl LogEntry {
    /// Dotted component path such as `Controller.Validator`, or the message
    /// of a component-less record.
    pub fn component(&self) -> Option<&str> {
        self.field(0)
    }

    /// Free-text event description of a component record.
    pub fn event(&self) -> Option<&str> {
        self.field(1)
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// The field most likely to carry the JSON payload: the one after the
    /// event when there is one, otherwise the one after the component.
    pub fn payload_candidate(&self) -> Option<&str> {
        self.field(2).or_else(|| self.field(1))
    }

    /// Fields from `start` on, joined with the eight-space separator the node
    /// uses between columns.
    pub fn joined_from(&self, start: usize) -> String {
        self.fields
            .get(start..)
            .map(|rest| rest.join(FIELD_SEPARATOR))
            .unwrap_or_default()
    }
}

/// Separator used when remaining fields are printed verbatim.
pub const FIELD_SEPARATOR: &str = "        ";
