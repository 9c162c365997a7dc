//! Semantic styling tags and the [`Paint`] capability.
//!
//! Formatters never name terminal colours. They tag the parts of a line that
//! deserve emphasis and the painter decides what that looks like; [`Plain`]
//! leaves the text untouched and [`crate::theme::Theme`] renders ANSI colours.

use crate::types::Severity;

/// What a piece of text means, independent of how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The record timestamp prefix.
    Timestamp,
    LevelDebug,
    LevelWarn,
    LevelError,
    LevelFatal,
    /// Counts, slots, addresses: the value the line is about.
    Highlight,
    /// Totals and identities of the local node.
    Accent,
    /// Something completed.
    Success,
    /// Names of handlers, statuses and fork epochs.
    Label,
    /// A validator or event that is being dropped or failed.
    Danger,
    /// Error text quoted from the node.
    Alert,
    Notice,
    Link,
}

impl Tag {
    /// The tag used for a severity column, or `None` for levels printed as-is.
    pub fn for_severity(severity: &Severity) -> Option<Tag> {
        match severity {
            Severity::Debug => Some(Tag::LevelDebug),
            Severity::Warn => Some(Tag::LevelWarn),
            Severity::Error => Some(Tag::LevelError),
            Severity::Fatal => Some(Tag::LevelFatal),
            Severity::Info | Severity::Other(_) => None,
        }
    }
}

/// Decorates text according to its [`Tag`].
pub trait Paint {
    fn paint(&self, tag: Tag, text: &str) -> String;
}

/// A painter that returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Paint for Plain {
    fn paint(&self, _tag: Tag, text: &str) -> String {
        text.to_string()
    }
}
