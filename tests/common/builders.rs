//! Test builders: raw node lines and pipelines ready to render them.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use ssvlog_core::{Dispatcher, Options, OutputSink, Pipeline, Plain};

/// Timestamp every built line carries, before normalisation.
pub const RAW_TS: &str = "2024-05-01T10:00:00.123456Z";
/// [`RAW_TS`] as it appears in rendered output.
pub const TS: &str = "2024-05-01 10:00:00";

// ---------------------------------------------------------------------------
// LineBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw node log lines.
///
/// # Example
///
/// ```rust
/// let line = LineBuilder::new("Controller", "setup validators done")
///     .severity("INFO")
///     .payload(r#"{"shares":3,"started":3,"failures":0}"#)
///     .build();
/// ```
pub struct LineBuilder {
    severity: String,
    fields: Vec<String>,
    journal: bool,
}

impl LineBuilder {
    pub fn new(component: &str, event: &str) -> Self {
        Self::message(component).field(event)
    }

    /// A component-less record: the message is the first field.
    pub fn message(message: &str) -> Self {
        Self {
            severity: "INFO".to_string(),
            fields: vec![message.to_string()],
            journal: false,
        }
    }

    pub fn severity(mut self, severity: &str) -> Self {
        self.severity = severity.to_string();
        self
    }

    pub fn field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }

    pub fn payload(self, json: &str) -> Self {
        self.field(json)
    }

    /// Prefix the line the way `journalctl` does.
    pub fn journal(mut self) -> Self {
        self.journal = true;
        self
    }

    pub fn build(self) -> String {
        let prefix = if self.journal {
            "May 01 10:00:00 node-1 ssv[812]: "
        } else {
            ""
        };
        format!(
            "{prefix}{RAW_TS}\t{}\t{}",
            self.severity,
            self.fields.join("\t")
        )
    }
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

pub fn quiet() -> Options {
    Options {
        no_spam: true,
        ..Options::default()
    }
}

pub fn verbose_errors() -> Options {
    Options {
        full_errors: true,
        ..Options::default()
    }
}

pub fn journal() -> Options {
    Options {
        docker_mode: false,
        ..Options::default()
    }
}

pub fn plain_pipeline(options: Options) -> Pipeline {
    Pipeline::new(Dispatcher::standard(options), Box::new(Plain))
}

/// Render `lines` in order and return everything written.
pub fn render_all<S: AsRef<str>>(options: Options, lines: &[S]) -> String {
    let pipeline = plain_pipeline(options);
    let mut sink = OutputSink::new(Vec::new());
    for line in lines {
        pipeline
            .render_line(line.as_ref(), &mut sink)
            .expect("writing to a Vec cannot fail");
    }
    String::from_utf8(sink.into_inner()).expect("rendered output is UTF-8")
}

/// Render a single line with default options.
pub fn render_one(line: &str) -> String {
    render_all(Options::default(), &[line])
}
