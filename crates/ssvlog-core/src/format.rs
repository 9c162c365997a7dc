//! Text helpers shared by the rule formatters and the fallback.

use phf::phf_map;
use serde_json::Value;

use crate::payload::display_value;

/// Human labels for the node's duty-runner role codes.
static ROLE_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "AGGREGATOR_RUNNER" => "Aggregator / Attester",
    "VALIDATOR_REGISTRATION_RUNNER" => "Validator registration",
    "VALIDATOR_REGISTRATION" => "Validator registration",
    "AGGREGATOR" => "Aggregator",
    "ATTESTER" => "Attester",
    "PROPOSER" => "Proposer",
    "SYNC_COMMITTEE" => "Sync committee",
    "CLUSTER" => "Cluster",
    "VOLUNTARY_EXIT" => "Voluntary exit",
    "COMMITTEE_RUNNER" => "Committee",
};

/// Translate a role code; unknown codes are returned unchanged.
pub fn role_label(code: &str) -> &str {
    ROLE_LABELS.get(code).copied().unwrap_or(code)
}

/// The first `n` characters of `s` (all of `s` when it is shorter).
pub fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// The first `n` characters of `s` followed by `...`.
pub fn abbreviate(s: &str, n: usize) -> String {
    format!("{}...", prefix(s, n))
}

/// `s` without its first `n` characters.
pub fn skip(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}

/// Render a duration given in seconds. Below 1.5 s the value is shown in
/// milliseconds, otherwise in seconds, both with two decimals. Text that is
/// not a number is shown as-is with an `s` suffix.
pub fn seconds(value: &Value) -> String {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(secs) if secs < 1.5 => format!("{:.2} ms", secs * 1000.0),
        Some(secs) => format!("{secs:.2} s"),
        None => format!("{}s", display_value(value)),
    }
}

/// `""` when `count` is the number one, `"s"` otherwise.
pub fn plural(count: &Value) -> &'static str {
    match count.as_f64() {
        Some(n) if n == 1.0 => "",
        _ => "s",
    }
}

/// Number of elements in an array or object, or characters in a string.
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

/// Escape sequences the node leaves in quoted error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escapes {
    /// `\"` only.
    Quotes,
    /// `\"` and `\n`.
    QuotesAndNewlines,
    /// `\"`, `\n`, `\r` and `\t`.
    All,
}

impl Escapes {
    fn translate(self, c: char) -> Option<char> {
        match (self, c) {
            (_, '"') => Some('"'),
            (Escapes::QuotesAndNewlines | Escapes::All, 'n') => Some('\n'),
            (Escapes::All, 'r') => Some('\r'),
            (Escapes::All, 't') => Some('\t'),
            _ => None,
        }
    }
}

/// Replace literal escape sequences with the characters they stand for, in a
/// single left-to-right pass. A backslash not followed by a recognised
/// character is kept.
pub fn unescape(s: &str, escapes: Escapes) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(real) = chars.peek().and_then(|&next| escapes.translate(next)) {
                out.push(real);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Unescape an `errorVerbose` traceback.
pub fn unescape_traceback(s: &str) -> String {
    unescape(s, Escapes::All)
}
