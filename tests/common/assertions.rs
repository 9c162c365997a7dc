//! Domain-specific assertion macros for ssvlog harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that show the raw
//! input line next to what was rendered.

// ---------------------------------------------------------------------------
// Rendering assertions
// ---------------------------------------------------------------------------

/// Assert that one raw line renders to exactly one output line, given without
/// its `<ts> <sev>: ` prefix.
///
/// ```rust
/// assert_renders!(line, "INFO", "Started Duty Scheduler");
/// assert_renders!(quiet(), line, "INFO", "Started Duty Scheduler");
/// ```
#[macro_export]
macro_rules! assert_renders {
    ($line:expr, $severity:expr, $expected:expr) => {
        $crate::assert_renders!(ssvlog_core::Options::default(), $line, $severity, $expected)
    };
    ($options:expr, $line:expr, $severity:expr, $expected:expr) => {{
        let line: &str = &$line;
        let rendered = $crate::common::render_all($options, &[line]);
        let expected = format!("{} {}: {}\n", $crate::common::TS, $severity, $expected);
        if rendered != expected {
            panic!(
                "assert_renders! failed:\n  input:    {:?}\n  expected: {:?}\n  actual:   {:?}",
                line, expected, rendered
            );
        }
    }};
}

/// Assert that a raw line produces no output at all.
#[macro_export]
macro_rules! assert_silent {
    ($options:expr, $line:expr) => {{
        let line: &str = &$line;
        let rendered = $crate::common::render_all($options, &[line]);
        if !rendered.is_empty() {
            panic!(
                "assert_silent! failed:\n  input:    {:?}\n  rendered: {:?}",
                line, rendered
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Output shape helpers
// ---------------------------------------------------------------------------

/// Output lines with their `<ts> <sev>: ` prefix removed.
pub fn bodies(rendered: &str) -> Vec<&str> {
    rendered
        .lines()
        .map(|line| line.split_once(": ").map_or(line, |(_, body)| body))
        .collect()
}

/// Assert that every output line starts with a timestamp and severity prefix.
pub fn assert_prefixed(rendered: &str) {
    for line in rendered.lines() {
        let (prefix, _) = line
            .split_once(": ")
            .unwrap_or_else(|| panic!("output line without prefix: {line:?}"));
        let (ts, severity) = prefix
            .rsplit_once(' ')
            .unwrap_or_else(|| panic!("prefix without severity: {line:?}"));
        pretty_assertions::assert_eq!(ts.len(), 19, "timestamp not normalised in {line:?}");
        assert!(!severity.is_empty(), "empty severity in {line:?}");
    }
}
