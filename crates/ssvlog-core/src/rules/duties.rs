//! Duty scheduling, both the legacy `DutyScheduler` component and the
//! committee-based `Operator.DutyScheduler`.

use super::{event_text, EventMatch::*, RenderContext, Rendered, Rule};
use crate::dispatch::FormatResult;
use crate::error::FormatError;
use crate::format::{abbreviate, prefix, role_label, seconds, unescape, Escapes};
use crate::payload::Payload;
use crate::style::Tag;
use crate::types::LogEntry;

const SCHEDULER: &[&str] = &["DutyScheduler"];
const OPERATOR: &[&str] = &["Operator.DutyScheduler"];
const ANY_SCHEDULER: &[&str] = &["DutyScheduler", "Operator.DutyScheduler"];

pub(super) fn scheduler() -> Vec<Rule> {
    vec![
        Rule::component("duties.started", SCHEDULER, Exact("duty scheduler started"), started)
            .without_payload(),
        Rule::component("duties.handler_started", SCHEDULER, Exact("starting duty handler"), handler_started),
        Rule::component(
            "duties.subscription_failed",
            SCHEDULER,
            Exact("failed to submit beacon committee subscription"),
            subscription_failed,
        ),
        Rule::component(
            "duties.validator_missing",
            SCHEDULER,
            Exact("could not find validator"),
            validator_missing,
        ),
        Rule::component("duties.malformed_event", SCHEDULER, Prefix("malformed event"), malformed_event),
        Rule::component(
            "duties.indices_change",
            SCHEDULER,
            Contains("indices change received"),
            indices_change,
        )
        .spam(),
        Rule::component(
            "duties.attestations_submitted",
            ANY_SCHEDULER,
            Contains("✅ successfully submitted attestations"),
            attestations_submitted,
        ),
        Rule::component(
            "duties.processing",
            SCHEDULER,
            Contains("starting duty processing"),
            processing,
        ),
        Rule::component(
            "duties.no_committee_runner",
            SCHEDULER,
            Contains("❗no committee runner found for slot"),
            no_committee_runner,
        ),
        Rule::component("operator.head_event", OPERATOR, Contains("received head event."), head_event),
    ]
}

/// Committee-based scheduler rules, checked after the validator controller.
pub(super) fn committee_duties() -> Vec<Rule> {
    vec![
        Rule::component(
            "operator.processing",
            OPERATOR,
            Exact("ℹ️ starting duty processing"),
            committee_processing,
        ),
        Rule::component(
            "operator.subscription_failed",
            OPERATOR,
            Exact("failed to submit beacon committee subscription"),
            committee_subscription_failed,
        ),
        Rule::component(
            "operator.indices_change",
            OPERATOR,
            Exact("🔁 indices change received"),
            committee_indices_change,
        )
        .spam(),
        Rule::component(
            "operator.duty_failed",
            OPERATOR,
            Exact("could not execute committee duty"),
            committee_duty_failed,
        ),
        Rule::component(
            "operator.handler_started",
            OPERATOR,
            Exact("starting duty handler"),
            committee_handler_started,
        ),
    ]
}

fn started(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Started Duty Scheduler"))
}

fn handler_started(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?.replace('_', " ").to_lowercase();
    Ok(FormatResult::line(format!(
        "Started {} duty scheduler",
        ctx.paint(Tag::Success, handler)
    )))
}

fn subscription_failed(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    let error = unescape(&p.required_text("error")?, Escapes::Quotes);
    Ok(FormatResult::line(format!(
        "Failed to submit {} job.\nError: {error}",
        ctx.paint(Tag::Label, handler)
    )))
}

fn validator_missing(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    let pubkey = prefix(&p.required_text("pubkey")?, 8);
    Ok(FormatResult::line(format!(
        "Failed to submit {} job for validator {pubkey} due to non-existant validator.",
        ctx.paint(Tag::Label, handler)
    )))
}

/// `malformed event: <reason>: ...` → `Malformed Event: <reason>. Transaction hash: ...`
pub(super) fn malformed_event(_ctx: &RenderContext<'_>, entry: &LogEntry, p: &Payload) -> Rendered {
    let reason = event_text(entry)?
        .split(':')
        .nth(1)
        .ok_or_else(|| FormatError::malformed("event", "expected a ':' separated reason"))?
        .trim();
    let tx_hash = p.required_text("tx_hash")?;
    Ok(FormatResult::line(format!(
        "Malformed Event: {reason}. Transaction hash: {tx_hash}"
    )))
}

fn indices_change(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Received indices change {}",
        p.required_text("handler")?
    )))
}

fn committee(p: &Payload) -> Result<String, FormatError> {
    Ok(abbreviate(&p.required_text("committee_id")?, 12))
}

fn attestations_submitted(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let slot = p.required_text("slot")?;
    let committee = committee(p)?;
    let took = seconds(p.required("consensus_time")?);
    Ok(FormatResult::line(format!(
        "{} for slot {} for committee {} in {took}",
        ctx.paint(Tag::Success, "Successfully submitted attestations"),
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, committee),
    )))
}

fn processing(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let slot = p.required_text("slot")?;
    let committee = committee(p)?;
    Ok(FormatResult::line(format!(
        "Running duty for slot {} for committee {}",
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, committee),
    )))
}

fn no_committee_runner(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let slot = p.required_text("slot")?;
    let committee = committee(p)?;
    Ok(FormatResult::line(format!(
        "No committee runner found for slot {} for committee {}",
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, committee),
    )))
}

fn head_event(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Processesing new block {}",
        ctx.paint(Tag::Highlight, p.required_text("slot")?)
    )))
}

fn committee_processing(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let role = p.required_text("role")?;
    let slot = p.required_text("slot")?;
    let committee = committee(p)?;
    Ok(FormatResult::line(format!(
        "Running {} duty for slot {} in committee {}",
        role_label(&role),
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, committee),
    )))
}

fn committee_subscription_failed(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    let error = unescape(&p.required_text("error")?, Escapes::QuotesAndNewlines);
    Ok(FormatResult::line(format!(
        "Failed to submit beacon commitee subscribtion for role {}. Error: {}",
        role_label(&handler),
        ctx.paint(Tag::Alert, error)
    )))
}

fn committee_indices_change(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    Ok(FormatResult::line(format!(
        "Received indices change for {} duty",
        ctx.paint(Tag::Highlight, role_label(&handler))
    )))
}

fn committee_duty_failed(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    let slot = p.required_text("slot")?;
    let error = unescape(&p.required_text("error")?, Escapes::QuotesAndNewlines);
    Ok(FormatResult::line(format!(
        "Failed to execute committee duty for {} duty at {}.Error {}",
        role_label(&handler),
        ctx.paint(Tag::Label, format!("slot {slot}")),
        ctx.paint(Tag::Alert, error)
    )))
}

fn committee_handler_started(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let handler = p.required_text("handler")?;
    Ok(FormatResult::line(format!(
        "Starting {} duty handler",
        role_label(&handler)
    )))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::config::Options;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn handler_names_are_humanised() {
        assert_eq!(
            primary(&["DutyScheduler", "starting duty handler", r#"{"handler":"SYNC_COMMITTEE"}"#]),
            "Started sync committee duty scheduler"
        );
    }

    #[test]
    fn subscription_failure_keeps_error_on_its_own_line() {
        assert_eq!(
            primary(&[
                "DutyScheduler",
                "failed to submit beacon committee subscription",
                r#"{"handler":"ATTESTER","error":"post \\\"beacon\\\" failed"}"#,
            ]),
            "Failed to submit ATTESTER job.\nError: post \"beacon\" failed"
        );
    }

    #[test]
    fn missing_validator_shows_pubkey_prefix() {
        assert_eq!(
            primary(&[
                "DutyScheduler",
                "could not find validator",
                r#"{"handler":"PROPOSER","pubkey":"a1b2c3d4e5f6a7b8"}"#,
            ]),
            "Failed to submit PROPOSER job for validator a1b2c3d4 due to non-existant validator."
        );
    }

    #[rstest]
    #[case::scheduler("DutyScheduler", "malformed event: bad owner: details")]
    #[case::event_handler("EventHandler", "malformed event: bad owner: details")]
    fn malformed_event_quotes_the_reason(#[case] component: &str, #[case] event: &str) {
        assert_eq!(
            primary(&[component, event, r#"{"tx_hash":"0xabc"}"#]),
            "Malformed Event: bad owner. Transaction hash: 0xabc"
        );
    }

    #[test]
    fn malformed_event_without_reason_is_an_error() {
        let result = render(&["DutyScheduler", "malformed event", r#"{"tx_hash":"0xabc"}"#]);
        assert!(matches!(result, Err(FormatError::Malformed { .. })));
    }

    #[rstest]
    #[case::scheduler("DutyScheduler")]
    #[case::operator("Operator.DutyScheduler")]
    fn submitted_attestations(#[case] component: &str) {
        assert_eq!(
            primary(&[
                component,
                "✅ successfully submitted attestations",
                r#"{"slot":9000123,"committee_id":"d1e2f3a4b5c6d7e8f9","consensus_time":0.25}"#,
            ]),
            "Successfully submitted attestations for slot 9000123 for committee d1e2f3a4b5c6... in 250.00 ms"
        );
    }

    #[test]
    fn head_event() {
        assert_eq!(
            primary(&["Operator.DutyScheduler", "📡 received head event. processing...", r#"{"slot":42}"#]),
            "Processesing new block 42"
        );
    }

    #[test]
    fn committee_processing_translates_role() {
        assert_eq!(
            primary(&[
                "Operator.DutyScheduler",
                "ℹ️ starting duty processing",
                r#"{"role":"COMMITTEE_RUNNER","slot":7,"committee_id":"0123456789abcdef"}"#,
            ]),
            "Running Committee duty for slot 7 in committee 0123456789ab..."
        );
    }

    #[test]
    fn committee_failures_unescape_newlines() {
        assert_eq!(
            primary(&[
                "Operator.DutyScheduler",
                "could not execute committee duty",
                r#"{"handler":"CLUSTER","slot":12,"error":"timeout\\nretrying"}"#,
            ]),
            "Failed to execute committee duty for Cluster duty at slot 12.Error timeout\nretrying"
        );
        assert_eq!(
            primary(&[
                "Operator.DutyScheduler",
                "failed to submit beacon committee subscription",
                r#"{"handler":"SOMETHING_NEW","error":"\\\"x\\\""}"#,
            ]),
            "Failed to submit beacon commitee subscribtion for role SOMETHING_NEW. Error: \"x\""
        );
    }

    #[test]
    fn indices_change_is_spam_in_both_schedulers() {
        let quiet = Options {
            no_spam: true,
            ..Options::default()
        };
        for fields in [
            ["DutyScheduler", "🔁 indices change received", "{}"],
            ["Operator.DutyScheduler", "🔁 indices change received", "{}"],
        ] {
            assert!(render_with(quiet, &fields).unwrap().suppressed, "{fields:?}");
        }
        assert_eq!(
            primary(&["Operator.DutyScheduler", "🔁 indices change received", r#"{"handler":"PROPOSER"}"#]),
            "Received indices change for Proposer duty"
        );
    }

    #[test]
    fn handler_started_for_committee_scheduler() {
        assert_eq!(
            primary(&["Operator.DutyScheduler", "starting duty handler", r#"{"handler":"VOLUNTARY_EXIT"}"#]),
            "Starting Voluntary exit duty handler"
        );
    }
}
