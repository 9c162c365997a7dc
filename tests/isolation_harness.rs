#![allow(unused)]
//! Record isolation harness.
//!
//! # What this covers
//!
//! - **Supplementary lines**: lines added by one record are printed with that
//!   record only and never reappear after a later record.
//! - **Order**: output follows input order.
//! - **Property: never panics**: arbitrary input lines never panic, and a
//!   node record with a garbage payload is still printed rather than lost.
//!
//! # Running
//!
//! ```sh
//! cargo test --test isolation_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ssvlog_core::Options;

fn setup_done(failures: u32) -> String {
    LineBuilder::new("Controller", "setup validators done")
        .payload(&format!(r#"{{"shares":5,"started":{},"failures":{failures}}}"#, 5 - failures))
        .build()
}

// ---------------------------------------------------------------------------
// Supplementary lines
// ---------------------------------------------------------------------------

#[test]
fn supplementary_lines_do_not_leak_into_the_next_record() {
    let plain = LineBuilder::new("DutyScheduler", "duty scheduler started").build();
    let rendered = render_all(Options::default(), &[setup_done(2), plain.clone(), plain]);
    assert_eq!(
        bodies(&rendered),
        vec![
            "Completed configuration for 5 validators.",
            "Successfully configured and started 3 validators",
            "Failed to configure 2 validators",
            "Started Duty Scheduler",
            "Started Duty Scheduler",
        ]
    );
}

#[test]
fn suppressed_record_between_multi_line_records_prints_nothing() {
    let spam = LineBuilder::new("P2PNetwork", "proposed discovered peers")
        .payload(r#"{"count":1}"#)
        .build();
    let rendered = render_all(quiet(), &[setup_done(0), spam, setup_done(1)]);
    assert_eq!(rendered.lines().count(), 6);
    assert_eq!(bodies(&rendered)[3], "Completed configuration for 5 validators.");
}

#[test]
fn fallback_after_multi_line_record_is_a_single_line() {
    let unknown = LineBuilder::new("Unknown", "event").build();
    let rendered = render_all(Options::default(), &[setup_done(0), unknown]);
    assert_eq!(bodies(&rendered).last(), Some(&"Unknown        event"));
    assert_eq!(rendered.lines().count(), 4);
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

#[test]
fn output_follows_input_order() {
    let lines = corpus_mixed(200);
    let rendered = render_all(Options::default(), &lines);
    assert_prefixed(&rendered);
    let expected: Vec<String> = lines
        .iter()
        .flat_map(|line| {
            render_all(Options::default(), &[line])
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn arbitrary_lines_never_panic(line in "\\PC*") {
        let rendered = render_all(Options::default(), &[&line]);
        let _ = render_all(quiet(), &[&line]);
        let _ = render_all(journal(), &[&line]);
        if let Some(first) = rendered.lines().next() {
            prop_assert!(first.contains(": "), "unprefixed output {first:?}");
        }
    }

    #[test]
    fn garbage_payloads_never_panic(
        component in prop::sample::select(vec![
            "P2PNetwork", "P2PNetwork.ConnHandler", "Controller", "Controller.Validator",
            "DutyScheduler", "Operator.DutyScheduler", "consensus_client", "EventHandler",
        ]),
        event in "[a-z .:]{0,40}",
        payload in "\\PC{0,60}",
        severity in prop::sample::select(vec!["INFO", "ERROR", "FATAL", "DEBUG"]),
    ) {
        let line = LineBuilder::new(component, &event)
            .severity(severity)
            .payload(&payload)
            .build();
        let rendered = render_all(verbose_errors(), &[&line]);
        prop_assert!(!rendered.is_empty(), "{line:?} rendered nothing");
    }
}
