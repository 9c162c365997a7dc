//! Record tokenizer: turns one raw input line into a [`LogEntry`].
//!
//! The node writes tab-separated columns; some log shippers expand tabs into
//! runs of eight spaces, so those runs are folded back into tabs first.
//! Anything that is not a node record (host init-system chatter, blank or
//! single-column lines) is reported as `None` and silently dropped upstream.

use crate::types::{LogEntry, RawRecord, Severity};

const EXPANDED_TAB: &str = "        ";

/// Lines containing this marker come from the host init system, not the node.
const INIT_SYSTEM_MARKER: &str = "systemd[1]";

/// Separator between the journal prefix (`host unit[pid]`) and the message.
const JOURNAL_PREFIX_END: &str = ": ";

/// Split a trimmed line into a [`RawRecord`].
pub fn split(line: &str) -> Option<RawRecord> {
    if line.contains(INIT_SYSTEM_MARKER) {
        return None;
    }
    let fields = line
        .trim()
        .replace(EXPANDED_TAB, "\t")
        .split('\t')
        .map(str::to_string)
        .collect();
    RawRecord::new(fields)
}

/// Tokenize one raw line.
///
/// `docker_mode` selects where the timestamp comes from: in docker mode the
/// first column is the timestamp, otherwise (journal mode) the first column
/// carries a `host unit[pid]: ` prefix that is stripped. A journal line with
/// no such prefix is not a node record.
pub fn tokenize(line: &str, docker_mode: bool) -> Option<LogEntry> {
    let mut fields = split(line)?.into_fields().into_iter();
    let first = fields.next()?;
    let severity = fields.next()?;

    let timestamp = if docker_mode {
        first.as_str()
    } else {
        match first.split_once(JOURNAL_PREFIX_END) {
            Some((_, ts)) => ts,
            None => {
                tracing::trace!(line, "journal line without prefix separator");
                return None;
            }
        }
    };

    Some(LogEntry {
        timestamp: normalize_timestamp(timestamp),
        severity: Severity::parse(&severity),
        fields: fields.collect(),
    })
}

/// `2024-05-01T10:00:00.123456Z` → `2024-05-01 10:00:00`.
pub fn normalize_timestamp(raw: &str) -> String {
    let spaced = raw.replace('T', " ");
    match spaced.split_once('.') {
        Some((whole, _)) => whole.to_string(),
        None => spaced,
    }
}
