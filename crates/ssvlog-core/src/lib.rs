//! ssvlog-core: turns SSV node log records into readable lines.
//!
//! # Architecture
//!
//! ```text
//! line ──► tokenizer ──► Dispatcher ──► OutputSink
//!                           │   ▲
//!                           ▼   │
//!                        RuleTable ──(no match / bad payload)──► fallback
//! ```
//!
//! Every record is handled on its own: nothing a formatter produces outlives
//! the [`FormatResult`] it returns.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod format;
pub mod payload;
pub mod pipeline;
pub mod rules;
pub mod sink;
pub mod style;
pub mod theme;
pub mod tokenizer;
pub mod types;

pub use config::{Config, Options};
pub use dispatch::{Dispatcher, FormatResult};
pub use error::{DecodeError, FormatError};
pub use payload::Payload;
pub use pipeline::Pipeline;
pub use rules::{Rule, RuleTable};
pub use sink::OutputSink;
pub use style::{Paint, Plain, Tag};
pub use theme::{Theme, ThemeError};
pub use types::{LogEntry, RawRecord, Severity};
