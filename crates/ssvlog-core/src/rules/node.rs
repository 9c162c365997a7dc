//! Node lifecycle messages, mostly logged without a component: startup, key
//! setup, migrations, client health and registry statistics, plus the metrics
//! endpoint announcement.

use super::{EventMatch::*, RenderContext, Rendered, Rule};
use crate::dispatch::FormatResult;
use crate::format::{skip, unescape, unescape_traceback, Escapes};
use crate::payload::Payload;
use crate::style::Tag;
use crate::types::LogEntry;

const METRICS: &[&str] = &["MetricsHandler"];

pub const OPERATOR_READY: &str =
    "All required services are ready. OPERATOR SUCCESSFULLY CONFIGURED AND NOW RUNNING!";

const BANNER: [&str; 3] = [
    "╔═╗╔╦╗╔═╗╦═╗╔╦╗╦ ╦╔═╗  ╔═╗╦ ╦╔═╗╔═╗╔═╗╔═╗╔═╗",
    "╚═╗ ║ ╠═╣╠╦╝ ║ ║ ║╠═╝  ╚═╗║ ║║  ║  ║╣ ╚═╗╚═╗",
    "╚═╝ ╩ ╩ ╩╩╚═ ╩ ╚═╝╩    ╚═╝╚═╝╚═╝╚═╝╚═╝╚═╝╚═╝",
];

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule::message(
            "node.max_peers",
            Exact("increasing MaxPeers to match the operator's subscribed subnets"),
            max_peers,
        ),
        Rule::message("node.network", Exact("setting ssv network"), network),
        Rule::message("node.migrations", Exact("applying migrations"), migrations),
        Rule::message("node.migrations_done", Exact("applied migrations successfully"), migrations_done)
            .without_payload(),
        Rule::message("node.keys_setup", Exact("successfully setup operator keys"), keys_setup),
        Rule::message("node.keys_loaded", Exact("successfully loaded operator keys"), keys_loaded),
        Rule::message("node.consensus_connecting", Exact("consensus client: connecting"), consensus_connecting),
        Rule::message("node.consensus_connected", Exact("consensus client connected"), consensus_connected),
        Rule::message("node.waiting_healthy", Exact("waiting until nodes are healthy"), waiting_healthy)
            .without_payload(),
        Rule::message("node.healthy", Exact("ethereum node(s) are healthy"), healthy).without_payload(),
        Rule::message("node.registry_stats", Exact("historical registry sync stats"), registry_stats),
        Rule::either_field("node.operator_ready", OPERATOR_READY, operator_ready),
        Rule::message(
            "node.registrations_planned",
            Exact("going to submit batch validator registrations"),
            registrations_planned,
        ),
        Rule::message(
            "node.registrations_submitted",
            Exact("submitted batched validator registrations"),
            registrations_submitted,
        ),
        Rule::message(
            "node.proposal_preparation_failed",
            Exact("could not submit proposal preparation batch"),
            proposal_preparation_failed,
        ),
        Rule::component("metrics.setup", METRICS, Exact("setup collection"), metrics_setup),
        Rule::message("node.unhealthy", Contains("node is not healthy"), unhealthy),
    ]
}

fn max_peers(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let new = p.required_text("new_max_peers")?;
    let old = p.required_text("old_max_peers")?;
    Ok(FormatResult::line(format!(
        "Increasing MaxPeers to {} to match the operator's subscribed subnets (from {}).",
        ctx.paint(Tag::Accent, new),
        ctx.paint(Tag::Accent, old)
    )))
}

fn network(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Configuring SSV node for running on {}",
        ctx.paint(Tag::Accent, p.required_text("network")?)
    )))
}

fn migrations(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Applying {} migrations",
        ctx.paint(Tag::Link, p.required_text("count")?)
    )))
}

fn migrations_done(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Applied migrations sucessfully"))
}

fn keys_setup(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Set up operator key ({})",
        ctx.paint(Tag::Accent, skip(&p.required_text("pubkey")?, 16))
    )))
}

fn keys_loaded(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Loaded operator key ({})",
        ctx.paint(Tag::Accent, skip(&p.required_text("pubkey")?, 16))
    )))
}

fn consensus_connecting(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Connecting to consensus client at {}",
        ctx.paint(Tag::Accent, p.required_text("address")?)
    )))
}

fn consensus_connected(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Connecting to consensus client at {}",
        ctx.paint(Tag::Accent, p.required_text("version")?)
    )))
}

fn waiting_healthy(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Waiting until all clients are synced and healthy"))
}

fn healthy(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("All clients are synced and healthy"))
}

fn registry_stats(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let rows = [
        ("Operator ID", "my_operator_id"),
        ("Operators on network", "operators"),
        ("Validators on network", "validators"),
        ("Liquidated Validators", "liquidated_validators"),
        ("Validators managed", "my_validators"),
    ];
    let mut result = FormatResult::line("Network statistics: ");
    for (label, key) in rows {
        result = result.with_supplementary(format!("{label:<22}: {}", p.required_text(key)?));
    }
    Ok(result)
}

fn operator_ready(ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(BANNER
        .iter()
        .fold(FormatResult::line("Operator configured sucessfully"), |result, row| {
            result.with_supplementary(ctx.paint(Tag::Success, row))
        }))
}

fn registrations_planned(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Planning to submit {} validator registrations",
        ctx.paint(Tag::Accent, p.required_text("count")?)
    )))
}

fn registrations_submitted(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Submitted {} validator registrations",
        ctx.paint(Tag::Accent, p.required_text("count")?)
    )))
}

fn proposal_preparation_failed(_ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let error = unescape(&p.required_text("error")?, Escapes::Quotes);
    Ok(FormatResult::line(format!(
        "Failed to submit proposal preparation batch.\nError: {error}"
    )))
}

fn unhealthy(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let node = p.required_text("node")?;
    let error = unescape(&p.required_text("error")?, Escapes::Quotes);
    let mut line = format!("Issue with {node}. {error}");
    if ctx.options.full_errors {
        if let Some(verbose) = p.optional_text("errorVerbose") {
            line.push_str("\nFull Traceback:\n");
            line.push_str(&unescape_traceback(&verbose));
        }
    }
    Ok(FormatResult::line(line))
}

fn metrics_setup(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Setting up metrics collection on address {}",
        ctx.paint(Tag::Link, p.required_text("address")?)
    )))
}
