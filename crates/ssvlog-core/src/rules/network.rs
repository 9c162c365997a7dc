//! Networking and client connectivity: P2P, execution client, registry event
//! sync and consensus client.

use std::fmt::Write as _;

use super::{silence, EventMatch::*, RenderContext, Rendered, Rule};
use crate::dispatch::FormatResult;
use crate::error::FormatError;
use crate::format::{abbreviate, length, skip};
use crate::payload::{display_value, Payload};
use crate::style::Tag;
use crate::types::LogEntry;

const P2P: &[&str] = &["P2PNetwork"];
const CONN_HANDLER: &[&str] = &["P2PNetwork.ConnHandler"];
const EXECUTION: &[&str] = &["execution_client"];
const EVENT_SYNCER: &[&str] = &["EventSyncer"];
const CONSENSUS: &[&str] = &["consensus_client"];

pub(super) fn rules() -> Vec<Rule> {
    vec![
        // P2P network
        Rule::component(
            "p2p.conn_handler.handshake",
            CONN_HANDLER,
            Exact("Verified handshake nodeinfo"),
            handshake,
        )
        .spam(),
        Rule::component("p2p.handshake", P2P, Exact("Verified handshake nodeinfo"), silence)
            .without_payload(),
        Rule::component("p2p.starting", P2P, AnyOf(&["starting", "starting p2p"]), starting)
            .without_payload(),
        Rule::component("p2p.configuring", P2P, Exact("configuring"), configuring)
            .without_payload(),
        Rule::component("p2p.configured", P2P, Exact("services configured"), configured),
        Rule::component("p2p.discv5", P2P, Exact("discovery: using discv5"), discv5),
        Rule::component("p2p.discovered_peers", P2P, Exact("proposed discovered peers"), discovered)
            .spam(),
        // Execution client
        Rule::component(
            "execution.registry_events",
            EXECUTION,
            Exact("fetched registry events"),
            registry_events,
        )
        .spam(),
        Rule::component(
            "execution.connected",
            EXECUTION,
            Exact("connected to execution client"),
            execution_connected,
        ),
        Rule::component("execution.reconnecting", EXECUTION, Exact("reconnecting"), reconnecting),
        Rule::component(
            "execution.reconnect_failed",
            EXECUTION,
            Exact("could not reconnect, still trying"),
            reconnect_failed,
        ),
        // Registry event sync
        Rule::component(
            "event_syncer.subscribing",
            EVENT_SYNCER,
            Exact("subscribing to ongoing registry events"),
            subscribing,
        ),
        Rule::component(
            "event_syncer.historical_done",
            EVENT_SYNCER,
            Exact("finished syncing historical events"),
            historical_done,
        ),
    ]
}

/// Consensus client rules. They rank after the duty scheduler ones.
pub(super) fn consensus() -> Vec<Rule> {
    vec![
        Rule::component(
            "consensus.slot_cache",
            CONSENSUS,
            Contains("block root to slot cache updated"),
            slot_cache,
        )
        .spam(),
        Rule::component(
            "consensus.event_broadcast",
            CONSENSUS,
            Contains("event broadcasted"),
            event_broadcast,
        )
        .spam(),
        Rule::component("consensus.synced", CONSENSUS, Contains("consensus client synced"), synced),
        Rule::component(
            "consensus.connected",
            CONSENSUS,
            Contains("consensus client connected"),
            consensus_connected,
        ),
        Rule::component("consensus.fork_epochs", CONSENSUS, Contains("retrieved fork epochs"), fork_epochs),
        Rule::component(
            "consensus.registrations_submitted",
            CONSENSUS,
            Contains("submitted batched validator registrations"),
            registrations_submitted,
        ),
        Rule::component(
            "consensus.registrations_planned",
            CONSENSUS,
            Contains("going to submit batch validator registrations"),
            registrations_planned,
        ),
    ]
}

// ---------------------------------------------------------------------------
// P2P
// ---------------------------------------------------------------------------

fn handshake(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let direction = p.required_text("conn_dir")?;
    let endpoint = endpoint(&p.required_text("remote_addr")?)
        .ok_or_else(|| FormatError::malformed("remote_addr", "expected /proto/host/transport/port"))?;
    let peer = abbreviate(&p.required_text("peer_id")?, 16);
    Ok(FormatResult::line(format!(
        "Processing {} connection from {}",
        ctx.paint(Tag::Highlight, direction),
        ctx.paint(Tag::Success, format!("{peer}@{endpoint}")),
    )))
}

/// `/ip4/10.0.0.1/tcp/13001` → `10.0.0.1:13001`.
fn endpoint(multiaddr: &str) -> Option<String> {
    let trimmed = skip(multiaddr, 1);
    let parts: Vec<&str> = trimmed.split('/').collect();
    Some(format!("{}:{}", parts.get(1)?, parts.get(3)?))
}

fn starting(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Starting P2P networking"))
}

fn configuring(_ctx: &RenderContext<'_>, _entry: &LogEntry, _p: &Payload) -> Rendered {
    Ok(FormatResult::line("Configuring P2P networking"))
}

fn configured(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let node_id = abbreviate(&p.required_text("selfPeer")?, 16);
    Ok(FormatResult::line(format!(
        "Configured P2P networking. Node id: {}",
        ctx.paint(Tag::Highlight, node_id)
    )))
}

fn discv5(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let bootnodes = length(p.required("bootnodes")?)
        .ok_or_else(|| FormatError::malformed("bootnodes", "expected a list"))?;
    Ok(FormatResult::line(format!(
        "Using discv5 for discovery. Using {} bootnodes.",
        ctx.paint(Tag::Highlight, bootnodes.to_string())
    )))
}

fn discovered(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Discovered {} new nodes.",
        ctx.paint(Tag::Highlight, p.required_text("count")?)
    )))
}

// ---------------------------------------------------------------------------
// Execution client and registry sync
// ---------------------------------------------------------------------------

fn registry_events(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let events = p.required_text("events")?;
    let progress = p.required_text("progress")?;
    Ok(FormatResult::line(format!(
        "Processed {}registry events ({progress} complete)",
        ctx.paint(Tag::Highlight, format!("{events} "))
    )))
}

fn execution_connected(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let address = p.required_text("address")?;
    let took = p.required_text("took")?;
    Ok(FormatResult::line(format!(
        "Connected to execution client at {} in {took}",
        ctx.paint(Tag::Highlight, address)
    )))
}

fn reconnecting(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Reconnecting to execution client at {}",
        ctx.paint(Tag::Highlight, p.required_text("address")?)
    )))
}

fn reconnect_failed(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let address = p.required_text("address")?;
    let error = p.required_text("error")?;
    Ok(FormatResult::line(format!(
        "Reconnecting to execution client at {} ({error})",
        ctx.paint(Tag::Highlight, address)
    )))
}

fn subscribing(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Subscribing to registry contract events after block {}",
        ctx.paint(Tag::Highlight, p.required_text("from_block")?)
    )))
}

fn historical_done(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let from = p.required_text("from_block")?;
    let to = p.required_text("last_processed_block")?;
    Ok(FormatResult::line(format!(
        "Processing registry events from block {} to {}",
        ctx.paint(Tag::Highlight, from),
        ctx.paint(Tag::Highlight, to)
    )))
}

// ---------------------------------------------------------------------------
// Consensus client
// ---------------------------------------------------------------------------

fn slot_cache(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Updated slot cache to block root {}",
        ctx.paint(Tag::Highlight, p.required_text("block_root")?)
    )))
}

fn event_broadcast(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let topic = p.required_text("topic")?;
    let subscriber = p.required_text("subscriber_identifier")?;
    Ok(FormatResult::line(format!(
        "Sent new event to conensus client topic: {} identifier: {}",
        ctx.paint(Tag::Highlight, topic),
        ctx.paint(Tag::Highlight, subscriber)
    )))
}

fn synced(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    Ok(FormatResult::line(format!(
        "Consensus client synced at {}",
        ctx.paint(Tag::Highlight, p.required_text("address")?)
    )))
}

fn consensus_connected(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let address = p.required_text("address")?;
    let version = p.required_text("version")?;
    Ok(FormatResult::line(format!(
        "Consensus client connected at {}",
        ctx.paint(Tag::Highlight, format!("{address} ({version})"))
    )))
}

fn fork_epochs(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let mut line = String::from("Retrieved fork epochs from consensus client. ");
    for (key, value) in p.iter() {
        if matches!(key, "node_addr" | "current_data_version") {
            continue;
        }
        let _ = write!(line, "{key}: {} ", ctx.paint(Tag::Label, display_value(value)));
    }
    Ok(FormatResult::line(line))
}

fn registrations_submitted(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let count = p.required_text("count")?;
    let slot = p.required_text("slot")?;
    Ok(FormatResult::line(format!(
        "Submitted {} validator registrations at slot {}",
        ctx.paint(Tag::Highlight, count),
        ctx.paint(Tag::Label, slot)
    )))
}

fn registrations_planned(ctx: &RenderContext<'_>, _entry: &LogEntry, p: &Payload) -> Rendered {
    let count = p.required_text("count")?;
    let slot = p.required_text("slot")?;
    Ok(FormatResult::line(format!(
        "Going to submit {} validator registrations at slot {}",
        ctx.paint(Tag::Highlight, count),
        ctx.paint(Tag::Label, slot)
    )))
}
