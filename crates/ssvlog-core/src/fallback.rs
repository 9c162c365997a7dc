//! Rendering for records no rule could handle.

use crate::dispatch::FormatResult;
use crate::format::unescape_traceback;
use crate::payload::{display_value, Payload};
use crate::rules::RenderContext;
use crate::types::LogEntry;

/// Render `entry` without a rule. Never fails.
///
/// Errors are condensed to `component - error` when the payload carries an
/// `error` field, or to `component - <next field>` when it does not. Other
/// severities are printed as their fields joined by the column separator.
pub fn render(ctx: &RenderContext<'_>, entry: &LogEntry) -> FormatResult {
    if !entry.severity.is_error() {
        return FormatResult::line(entry.joined_from(0));
    }

    let Some(component) = entry.component() else {
        return FormatResult::line(String::new());
    };
    let Some(candidate) = entry.payload_candidate() else {
        return FormatResult::line(component);
    };

    // Without a usable payload only the field after the component is shown.
    let raw = || {
        FormatResult::line(format!("{component} - {}", entry.field(1).unwrap_or_default()))
    };
    let payload = match Payload::decode(candidate) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::trace!(error = %err, "error record has no decodable payload");
            return raw();
        }
    };
    let Some(error) = payload.optional("error") else {
        return raw();
    };

    let mut line = format!("{component} - {}", display_value(error));
    if ctx.options.full_errors {
        if let Some(verbose) = payload.optional_text("errorVerbose") {
            line.push_str("\nFull Traceback:\n");
            line.push_str(&unescape_traceback(&verbose));
        }
    }
    FormatResult::line(line)
}
