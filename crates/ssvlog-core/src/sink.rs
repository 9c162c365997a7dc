//! Output sink: writes a record's lines behind its timestamp and severity.

use std::io::{self, Write};

use crate::dispatch::FormatResult;
use crate::style::{Paint, Tag};
use crate::types::LogEntry;

/// Line writer over any [`Write`]. Each record is flushed before
/// [`OutputSink::emit`] returns so output keeps pace with a live stream.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    out: W,
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the lines of `result` for `entry`. Returns how many lines were
    /// written; suppressed results write nothing.
    pub fn emit(
        &mut self,
        entry: &LogEntry,
        result: &FormatResult,
        painter: &dyn Paint,
    ) -> io::Result<usize> {
        if result.suppressed {
            return Ok(0);
        }
        let prefix = prefix(entry, painter);
        let mut written = 0;
        for line in result.lines() {
            writeln!(self.out, "{prefix}{line}")?;
            written += 1;
        }
        self.out.flush()?;
        Ok(written)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `"<ts> <sev>: "` with the timestamp and severity painted.
fn prefix(entry: &LogEntry, painter: &dyn Paint) -> String {
    let timestamp = painter.paint(Tag::Timestamp, &entry.timestamp);
    let severity = entry.severity.to_string();
    let severity = match Tag::for_severity(&entry.severity) {
        Some(tag) => painter.paint(tag, &severity),
        None => severity,
    };
    format!("{timestamp} {severity}: ")
}
