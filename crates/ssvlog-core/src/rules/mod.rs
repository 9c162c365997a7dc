//! Rule table: ordered (matcher, formatter) pairs.
//!
//! Rules are tried in declaration order and only the first match runs, so a
//! specific component/event pair must be declared before a broader one that
//! would also match it (`P2PNetwork.ConnHandler` before `P2PNetwork`, the
//! exact `DutyScheduler` events before the substring ones, …).
//!
//! Event text is matched literally. The node prefixes some events with emoji
//! (`✅ successfully submitted attestations`); those are part of the literal.

use std::fmt;

use crate::config::Options;
use crate::dispatch::FormatResult;
use crate::error::FormatError;
use crate::payload::Payload;
use crate::style::{Paint, Tag};
use crate::types::LogEntry;

mod duties;
mod network;
mod node;
mod validators;

/// Column holding the payload of a `component<TAB>event<TAB>payload` record.
pub const COMPONENT_PAYLOAD: usize = 2;
/// Column holding the payload of a `message<TAB>payload` record.
pub const MESSAGE_PAYLOAD: usize = 1;

/// Everything a formatter may consult besides the record itself.
pub struct RenderContext<'a> {
    pub options: &'a Options,
    painter: &'a dyn Paint,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a Options, painter: &'a dyn Paint) -> Self {
        Self { options, painter }
    }

    pub fn paint(&self, tag: Tag, text: impl AsRef<str>) -> String {
        self.painter.paint(tag, text.as_ref())
    }
}

/// What a formatter returns.
pub type Rendered = Result<FormatResult, FormatError>;

/// A formatter: pure function of the record, its payload and the options.
pub type Render = fn(&RenderContext<'_>, &LogEntry, &Payload) -> Rendered;

/// How a rule compares event (or message) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMatch {
    Exact(&'static str),
    AnyOf(&'static [&'static str]),
    Contains(&'static str),
    Prefix(&'static str),
}

impl EventMatch {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EventMatch::Exact(expected) => text == *expected,
            EventMatch::AnyOf(options) => options.contains(&text),
            EventMatch::Contains(needle) => text.contains(needle),
            EventMatch::Prefix(prefix) => text.starts_with(prefix),
        }
    }
}

impl fmt::Display for EventMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventMatch::Exact(s) => write!(f, "= {s:?}"),
            EventMatch::AnyOf(options) => write!(f, "in {options:?}"),
            EventMatch::Contains(s) => write!(f, "contains {s:?}"),
            EventMatch::Prefix(s) => write!(f, "starts with {s:?}"),
        }
    }
}

/// Which records a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Component (field 0) is one of `components` and the event (field 1)
    /// satisfies `event`.
    Component {
        components: &'static [&'static str],
        event: EventMatch,
    },
    /// A component-less record whose message (field 0) satisfies the match.
    Message(EventMatch),
    /// Field 0 or field 1 equals the text, whichever layout the node used.
    EitherField(&'static str),
}

impl Matcher {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            Matcher::Component { components, event } => {
                match (entry.component(), entry.event()) {
                    (Some(component), Some(text)) => {
                        components.contains(&component) && event.matches(text)
                    }
                    _ => false,
                }
            }
            Matcher::Message(message) => entry.field(0).is_some_and(|m| message.matches(m)),
            Matcher::EitherField(text) => {
                entry.field(0) == Some(*text) || entry.field(1) == Some(*text)
            }
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Component { components, event } => {
                write!(f, "{} / event {event}", components.join(" | "))
            }
            Matcher::Message(message) => write!(f, "message {message}"),
            Matcher::EitherField(text) => write!(f, "field 0 or 1 = {text:?}"),
        }
    }
}

/// One entry of the dispatch table.
#[derive(Clone)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    /// Column to decode as the payload, or `None` when the formatter does not
    /// read one.
    pub payload: Option<usize>,
    /// Suppressed entirely when `no_spam` is set.
    pub spam: bool,
    render: Render,
}

impl Rule {
    /// Rule over `component<TAB>event<TAB>payload` records.
    pub fn component(
        name: &'static str,
        components: &'static [&'static str],
        event: EventMatch,
        render: Render,
    ) -> Self {
        Self {
            name,
            matcher: Matcher::Component { components, event },
            payload: Some(COMPONENT_PAYLOAD),
            spam: false,
            render,
        }
    }

    /// Rule over `message<TAB>payload` records.
    pub fn message(name: &'static str, message: EventMatch, render: Render) -> Self {
        Self {
            name,
            matcher: Matcher::Message(message),
            payload: Some(MESSAGE_PAYLOAD),
            spam: false,
            render,
        }
    }

    /// Rule matching the text in either of the first two fields. Reads no
    /// payload.
    pub fn either_field(name: &'static str, text: &'static str, render: Render) -> Self {
        Self {
            name,
            matcher: Matcher::EitherField(text),
            payload: None,
            spam: false,
            render,
        }
    }

    pub fn without_payload(mut self) -> Self {
        self.payload = None;
        self
    }

    pub fn spam(mut self) -> Self {
        self.spam = true;
        self
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.matcher.matches(entry)
    }

    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        entry: &LogEntry,
        payload: &Payload,
    ) -> Result<FormatResult, FormatError> {
        (self.render)(ctx, entry, payload)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .field("payload", &self.payload)
            .field("spam", &self.spam)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<40} {}", self.name, self.matcher)?;
        if self.spam {
            write!(f, " [spam]")?;
        }
        Ok(())
    }
}

/// The ordered rule list.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Every rule ssvlog knows about, in precedence order.
    pub fn standard() -> Self {
        let mut rules = Vec::new();
        rules.extend(network::rules());
        rules.extend(duties::scheduler());
        rules.extend(network::consensus());
        rules.extend(validators::rules());
        rules.extend(duties::committee_duties());
        rules.extend(node::rules());
        Self::new(rules)
    }

    /// The first rule that matches `entry`.
    pub fn find(&self, entry: &LogEntry) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Formatter for events that are never shown.
pub(crate) fn silence(
    _ctx: &RenderContext<'_>,
    _entry: &LogEntry,
    _payload: &Payload,
) -> Result<FormatResult, FormatError> {
    Ok(FormatResult::suppressed())
}

/// Text of the event column, for formatters that quote part of it.
pub(crate) fn event_text(entry: &LogEntry) -> Result<&str, FormatError> {
    entry.event().ok_or(FormatError::MissingColumn(1))
}
