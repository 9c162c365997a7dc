//! Validator lifecycle (`Controller.*`) and registry contract events
//! (`EventHandler`).

use super::duties::malformed_event;
use super::{EventMatch::*, RenderContext, Rendered, Rule};
use crate::dispatch::FormatResult;
use crate::format::{abbreviate, plural, prefix, role_label};
use crate::payload::{display_value, Payload};
use crate::style::Tag;
use crate::types::LogEntry;

const VALIDATOR: &[&str] = &["Controller.Validator"];
const TASK_EXECUTOR: &[&str] = &["Controller.TaskExecutor"];
const CONTROLLER: &[&str] = &["Controller"];
const EVENT_HANDLER: &[&str] = &["EventHandler"];

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule::component(
            "validator.duty_processing",
            VALIDATOR,
            Contains("starting duty processing"),
            duty_processing,
        ),
        Rule::component(
            "validator.attestation_submitted",
            VALIDATOR,
            Contains("successfully submitted attestation"),
            attestation_submitted,
        ),
        Rule::component(
            "validator.sync_committee_submitted",
            VALIDATOR,
            Contains("successfully submitted sync committee"),
            sync_committee_submitted,
        ),
        Rule::component(
            "validator.block_proposal",
            VALIDATOR,
            Contains("got beacon block proposal"),
            block_proposal,
        ),
        Rule::component("validator.removed", TASK_EXECUTOR, Contains("removed validator"), removed),
        Rule::component(
            "controller.setup_starting",
            CONTROLLER,
            Exact("starting validators setup..."),
            setup_starting,
        ),
        Rule::component(
            "controller.inactive_skipped",
            CONTROLLER,
            Exact("skipping validator until it becomes active"),
            inactive_skipped,
        ),
        Rule::component("controller.status", CONTROLLER, Exact("recording validator status"), status),
        Rule::component("controller.setup_done", CONTROLLER, Exact("setup validators done"), setup_done),
        Rule::component("controller.init_done", CONTROLLER, Exact("init validators done"), init_done),
        Rule::component(
            "controller.metadata_failed",
            CONTROLLER,
            Exact("failed to update validators metadata"),
            metadata_failed,
        ),
        Rule::component(
            "controller.queue_full",
            CONTROLLER,
            Contains("dropping message because the queue is full"),
            queue_full,
        ),
        Rule::component(
            "controller.validator_started",
            CONTROLLER,
            Contains("starting new validator"),
            validator_started,
        ),
        Rule::component("events.unknown", EVENT_HANDLER, Exact("unknown event name"), unknown_event),
        Rule::component("events.malformed", EVENT_HANDLER, Contains("malformed event: "), malformed_event),
        Rule::component("events.unparsable", EVENT_HANDLER, Contains("could not parse event"), unparsable),
    ]
}

fn short_pubkey(p: &Payload) -> Result<String, crate::error::FormatError> {
    Ok(abbreviate(&p.required_text("pubkey")?, 6))
}

fn duty_processing(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let role = p.first_text(&["beacon_role", "role"])?;
    let slot = p.required_text("slot")?;
    let validator = short_pubkey(p)?;
    Ok(FormatResult::line(format!(
        "Processing {} duty at slot {} for validator {}",
        ctx.paint(Tag::Highlight, role_label(&role)),
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, validator),
    )))
}

fn attestation_submitted(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let slot = p.required_text("slot")?;
    let validator = short_pubkey(p)?;
    Ok(FormatResult::line(format!(
        "Sucessfully submitted attestation at slot {} for validator {}",
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, validator),
    )))
}

fn sync_committee_submitted(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Sucessfully submitted sync committee message for validator {}",
        ctx.paint(Tag::Highlight, short_pubkey(p)?)
    )))
}

fn block_proposal(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let role = p.first_text(&["beacon_role", "role"])?;
    let slot = p.required_text("slot")?;
    let validator = short_pubkey(p)?;
    Ok(FormatResult::line(format!(
        "Processing {} duty at slot {} for validator {}",
        ctx.paint(Tag::Highlight, role),
        ctx.paint(Tag::Highlight, slot),
        ctx.paint(Tag::Highlight, validator),
    )))
}

fn removed(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Removing validator {}",
        ctx.paint(Tag::Danger, prefix(&p.required_text("pubkey")?, 8))
    )))
}

fn setup_starting(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Configuring {} validators.",
        ctx.paint(Tag::Notice, p.required_text("shares count")?)
    )))
}

fn inactive_skipped(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Skipping setup for validator {} until it becomes active on beacon chain.",
        ctx.paint(Tag::Danger, prefix(&p.required_text("pubkey")?, 8))
    )))
}

fn status(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let status = p.required_text("status")?;
    let count = p.required_text("count")?;
    Ok(FormatResult::line(format!(
        "Validators currently {}: {}",
        ctx.paint(Tag::Label, status),
        ctx.paint(Tag::Highlight, count)
    )))
}

fn setup_done(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let shares = p.required_text("shares")?;
    let started = p.required_text("started")?;
    let failures = p.required("failures")?;
    Ok(FormatResult::line(format!(
        "Completed configuration for {} validators.",
        ctx.paint(Tag::Accent, shares)
    ))
    .with_supplementary(format!(
        "Successfully configured and started {} validators",
        ctx.paint(Tag::Success, started)
    ))
    .with_supplementary(format!(
        "Failed to configure {} validator{}",
        ctx.paint(Tag::Danger, display_value(failures)),
        plural(failures)
    )))
}

fn init_done(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let shares = p.required_text("shares")?;
    let missing = p.required("missing_metadata")?;
    let failures = p.required("failures")?;
    Ok(FormatResult::line(format!(
        "Completed initialization for {} validators.",
        ctx.paint(Tag::Accent, shares)
    ))
    .with_supplementary(format!(
        "Unable to initialize {} validator{} due to missing metadata or non-active status on beacon chain.",
        ctx.paint(Tag::Danger, display_value(missing)),
        plural(missing)
    ))
    .with_supplementary(format!(
        "Failed to initialize {} validator{}",
        ctx.paint(Tag::Danger, display_value(failures)),
        plural(failures)
    )))
}

fn metadata_failed(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Failed to update validator metadata"))
}

fn queue_full(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Dropping {} message because the queue is full.",
        p.required_text("msg_type")?
    )))
}

fn validator_started(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let pubkey = prefix(&p.required_text("pubkey")?, 8);
    Ok(FormatResult::line(format!(
        "Starting new validator {}",
        ctx.paint(Tag::Accent, format!("0x{pubkey}"))
    )))
}

fn unknown_event(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Ignoring unknown event {}",
        ctx.paint(Tag::Danger, p.required_text("name")?)
    )))
}

fn unparsable(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Failed to parse event {}",
        p.required_text("event")?
    )))
}
