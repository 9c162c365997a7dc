//! ssvlog: readable, coloured SSV node logs.
//!
//! The binary is a thin shell over this crate: it loads configuration, builds
//! a [`Pipeline`] and hands it to [`run`], which reads one line at a time until
//! the input ends or the user interrupts.
//!
//! ```text
//! LineFeed ──► Pipeline (tokenize ► dispatch ► fallback) ──► OutputSink
//! ```

use std::future::Future;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use ssvlog_core::{OutputSink, Paint, Pipeline, Plain, RuleTable, Theme, ThemeError};
use ssvlog_feeds::LineFeed;

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The input ended.
    Eof,
    /// `shutdown` completed first.
    Interrupted,
}

/// Read, format and write lines until the feed ends or `shutdown` completes.
///
/// Lines are handled strictly one after another; the only suspension point is
/// the read of the next line, which is where an interrupt is observed.
pub async fn run<W, S>(
    feed: &mut LineFeed,
    pipeline: &Pipeline,
    sink: &mut OutputSink<W>,
    shutdown: S,
) -> anyhow::Result<Outcome>
where
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = 0u64;

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!(lines, "interrupted");
                return Ok(Outcome::Interrupted);
            }

            line = feed.next_line() => {
                let Some(line) = line? else {
                    tracing::info!(lines, feed = %feed.kind(), "input ended");
                    return Ok(Outcome::Eof);
                };
                lines += 1;
                pipeline
                    .render_line(&line, sink)
                    .context("could not write output")?;
            }
        }
    }
}

/// Completes on Ctrl-C. If the signal handler cannot be installed the future
/// never completes and the input's end is the only way out.
pub async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// The painter for this run: [`Plain`] without colour, otherwise the theme
/// file (layered over the built-in theme) or the built-in theme itself.
pub fn painter(color: bool, theme: Option<&Path>) -> Result<Box<dyn Paint + Send + Sync>, ThemeError> {
    if !color {
        return Ok(Box::new(Plain));
    }
    let theme = match theme {
        Some(path) => Theme::from_file(path)?,
        None => Theme::load_default(),
    };
    Ok(Box::new(theme))
}

/// Print every rule in precedence order.
pub fn list_rules(rules: &RuleTable, out: &mut impl Write) -> std::io::Result<()> {
    for (position, rule) in rules.iter().enumerate() {
        writeln!(out, "{:>3}  {rule}", position + 1)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ssvlog_core::{Dispatcher, Options};
    use ssvlog_feeds::FeedKind;

    fn pipeline() -> Pipeline {
        Pipeline::new(Dispatcher::standard(Options::default()), Box::new(Plain))
    }

    #[tokio::test]
    async fn runs_until_input_ends() {
        let input = b"2024-05-01T10:00:00Z\tINFO\tDutyScheduler\tduty scheduler started\nnoise\n";
        let mut feed = LineFeed::from_reader(FeedKind::Stdin, &input[..]);
        let mut sink = OutputSink::new(Vec::new());
        let outcome = run(&mut feed, &pipeline(), &mut sink, std::future::pending())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Eof);
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "2024-05-01 10:00:00 INFO: Started Duty Scheduler\n"
        );
    }

    #[tokio::test]
    async fn shutdown_wins_over_pending_input() {
        let mut feed = LineFeed::from_reader(FeedKind::Stdin, &b"a\tINFO\tb\n"[..]);
        let mut sink = OutputSink::new(Vec::new());
        let outcome = run(&mut feed, &pipeline(), &mut sink, std::future::ready(()))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Interrupted);
        assert!(sink.get_ref().is_empty());
    }

    #[test]
    fn listing_is_numbered_in_precedence_order() {
        let mut out = Vec::new();
        list_rules(&RuleTable::standard(), &mut out).unwrap();
        let listing = String::from_utf8(out).unwrap();
        let first = listing.lines().next().unwrap();
        assert!(first.starts_with("  1  p2p.conn_handler.handshake"), "{first}");
        assert_eq!(listing.lines().count(), RuleTable::standard().len());
    }

    #[test]
    fn plain_painter_without_colour() {
        let painter = painter(false, Some(Path::new("/does/not/matter.toml"))).unwrap();
        assert_eq!(painter.paint(ssvlog_core::Tag::Danger, "x"), "x");
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(painter(true, Some(&dir.path().join("absent.toml"))).is_err());
    }
}
