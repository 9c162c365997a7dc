//! Dispatcher: runs the first matching rule, or the fallback.
//!
//! Per-record failures never escape: a payload that does not decode, a
//! missing column or a missing payload field all send the record to the
//! fallback formatter exactly as if no rule had matched.

use crate::config::Options;
use crate::error::FormatError;
use crate::fallback;
use crate::payload::Payload;
use crate::rules::{RenderContext, Rule, RuleTable};
use crate::style::Paint;
use crate::types::{LogEntry, Severity};

/// Output of formatting one record.
///
/// Supplementary lines belong to this record only; they are printed right
/// after the primary line and dropped with the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatResult {
    pub primary: Option<String>,
    /// The record produces no output at all.
    pub suppressed: bool,
    pub supplementary: Vec<String>,
}

impl FormatResult {
    pub fn line(primary: impl Into<String>) -> Self {
        Self {
            primary: Some(primary.into()),
            suppressed: false,
            supplementary: Vec::new(),
        }
    }

    pub fn suppressed() -> Self {
        Self {
            primary: None,
            suppressed: true,
            supplementary: Vec::new(),
        }
    }

    pub fn with_supplementary(mut self, line: impl Into<String>) -> Self {
        self.supplementary.push(line.into());
        self
    }

    /// Every line to print, primary first. Empty when suppressed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let visible = !self.suppressed;
        self.primary
            .iter()
            .chain(self.supplementary.iter())
            .filter(move |_| visible)
            .map(String::as_str)
    }
}

/// Matches entries against a [`RuleTable`] under fixed [`Options`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rules: RuleTable,
    options: Options,
}

impl Dispatcher {
    pub fn new(rules: RuleTable, options: Options) -> Self {
        Self { rules, options }
    }

    /// Dispatcher over the standard rule table.
    pub fn standard(options: Options) -> Self {
        Self::new(RuleTable::standard(), options)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Format one entry. Never fails.
    pub fn dispatch(&self, entry: &LogEntry, painter: &dyn Paint) -> FormatResult {
        if self.options.no_spam && entry.severity == Severity::Debug {
            return FormatResult::suppressed();
        }

        let ctx = RenderContext::new(&self.options, painter);
        let Some(rule) = self.rules.find(entry) else {
            tracing::trace!(fields = ?entry.fields, "no rule matched");
            return fallback::render(&ctx, entry);
        };

        match self.try_rule(rule, &ctx, entry) {
            Ok(result) => {
                tracing::trace!(rule = rule.name, "rule rendered record");
                result
            }
            Err(err) => {
                tracing::debug!(rule = rule.name, error = %err, "rule could not render record; using fallback");
                fallback::render(&ctx, entry)
            }
        }
    }

    /// Run one rule: spam check, payload decoding, then the formatter.
    pub fn try_rule(
        &self,
        rule: &Rule,
        ctx: &RenderContext<'_>,
        entry: &LogEntry,
    ) -> Result<FormatResult, FormatError> {
        if rule.spam && self.options.no_spam {
            return Ok(FormatResult::suppressed());
        }
        let payload = match rule.payload {
            Some(column) => {
                let raw = entry.field(column).ok_or(FormatError::MissingColumn(column))?;
                Payload::decode(raw)?
            }
            None => Payload::empty(),
        };
        rule.render(ctx, entry, &payload)
    }
}
