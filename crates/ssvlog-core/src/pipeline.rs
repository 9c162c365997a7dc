//! One input line in, zero or more output lines out.

use std::io::{self, Write};

use crate::dispatch::{Dispatcher, FormatResult};
use crate::sink::OutputSink;
use crate::style::Paint;
use crate::tokenizer;
use crate::types::LogEntry;

/// Tokenizer, dispatcher and painter bundled for the read loop.
pub struct Pipeline {
    dispatcher: Dispatcher,
    painter: Box<dyn Paint + Send + Sync>,
}

impl Pipeline {
    pub fn new(dispatcher: Dispatcher, painter: Box<dyn Paint + Send + Sync>) -> Self {
        Self { dispatcher, painter }
    }

    pub fn painter(&self) -> &dyn Paint {
        self.painter.as_ref()
    }

    /// Tokenize and format one raw line. `None` when the line is not a record.
    pub fn process(&self, line: &str) -> Option<(LogEntry, FormatResult)> {
        let Some(entry) = tokenizer::tokenize(line, self.dispatcher.options().docker_mode) else {
            tracing::trace!(line, "not a record");
            return None;
        };
        let result = self.dispatcher.dispatch(&entry, self.painter());
        Some((entry, result))
    }

    /// Process `line` and write whatever it renders to `sink`.
    pub fn render_line<W: Write>(&self, line: &str, sink: &mut OutputSink<W>) -> io::Result<usize> {
        match self.process(line) {
            Some((entry, result)) => sink.emit(&entry, &result, self.painter()),
            None => Ok(0),
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
