//! Inspection and decoding tools for captured ticksync buffers.
//!
//! A capture is the raw bytes of one received buffer: any number of
//! concatenated messages.
//!
//! - Summarize every message with its tag, offset and size
//! - Decode messages into structured JSON or a readable listing
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see where the bytes go.

use std::fmt::Write as _;

use serde::Serialize;
use wire::{Direction, Message, MessageCodec, MessageTag, WireResult};

/// Size breakdown of one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub total_bytes: usize,
    pub messages: Vec<MessageSummary>,
}

/// One message of an inspected buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    pub offset: usize,
    pub byte_len: usize,
    pub tag: MessageTag,
    pub direction: Direction,
    pub detail: String,
}

impl InspectReport {
    /// Bytes taken by messages with `tag`.
    #[must_use]
    pub fn bytes_for(&self, tag: MessageTag) -> usize {
        self.messages
            .iter()
            .filter(|summary| summary.tag == tag)
            .map(|summary| summary.byte_len)
            .sum()
    }
}

/// Decodes `bytes` and summarizes each message.
pub fn inspect_buffer(bytes: &[u8], codec: &MessageCodec) -> WireResult<InspectReport> {
    let messages = codec
        .decode_spans(bytes)?
        .into_iter()
        .map(|decoded| MessageSummary {
            offset: decoded.span.start,
            byte_len: decoded.span.len(),
            tag: decoded.message.tag(),
            direction: decoded.message.direction(),
            detail: describe(&decoded.message),
        })
        .collect();
    Ok(InspectReport {
        total_bytes: bytes.len(),
        messages,
    })
}

/// Decodes `bytes` into the JSON form of its messages.
pub fn decode_buffer_json(bytes: &[u8], codec: &MessageCodec) -> anyhow::Result<serde_json::Value> {
    let messages = codec.decode_many(bytes)?;
    Ok(serde_json::to_value(messages)?)
}

/// One line per message, indented details for checkouts and ticks.
#[must_use]
pub fn format_decode_pretty(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let _ = writeln!(out, "{:?}: {}", message.tag(), describe(message));
        match message {
            Message::InitialCheckout(checkout) => {
                for component in &checkout.components {
                    let _ = writeln!(
                        out,
                        "  component {}: values {:?} deltas {:?}",
                        component.id.raw(),
                        component.values,
                        component.deltas
                    );
                }
                for state in &checkout.states {
                    let present = state.values.iter().filter(|value| value.is_some()).count();
                    let _ = writeln!(
                        out,
                        "  state {}: {present}/{} present",
                        state.id.raw(),
                        state.values.len()
                    );
                }
            }
            Message::Tick(tick) => {
                for component in &tick.components {
                    let _ = writeln!(
                        out,
                        "  component {}: delta-deltas {:?}",
                        component.id.raw(),
                        component.delta_deltas
                    );
                }
                for state in &tick.states {
                    let indices: Vec<u32> = state.updates.iter().map(|update| update.index).collect();
                    let _ = writeln!(out, "  state {}: updated {indices:?}", state.id.raw());
                }
            }
            _ => {}
        }
    }
    out
}

fn describe(message: &Message) -> String {
    match message {
        Message::ConnectUser(connect) => format!(
            "token {} bytes, observer {}, {} components, {} states",
            connect.token.len(),
            connect.observer,
            connect.components.len(),
            connect.states.len()
        ),
        Message::SetUserComponents(update) => format!(
            "{} components, {} states",
            update.components.len(),
            update.states.len()
        ),
        Message::Pong { sequence } | Message::Ping { sequence } => format!("sequence {sequence}"),
        Message::ClientCustom(custom)
        | Message::ServerCustom(custom)
        | Message::ServerBroadcast(custom) => {
            format!("kind {}, {} bytes", custom.kind, custom.payload.len())
        }
        Message::InitialCheckout(checkout) => format!(
            "time {}, {} indices, {} components, {} states",
            checkout.server_time,
            checkout.indices_count,
            checkout.components.len(),
            checkout.states.len()
        ),
        Message::UserIndex { index } => format!("index {index}"),
        Message::Tick(tick) => {
            let updates: usize = tick.states.iter().map(|state| state.updates.len()).sum();
            format!(
                "time {}, {} indices, {} removed, {} components, {updates} state updates",
                tick.server_time,
                tick.indices_count,
                tick.removed_indices.len(),
                tick.components.len()
            )
        }
        Message::Warning(warning) => format!("{:?}", warning.message),
        Message::Error(error) => format!("{:?}, retryable {}", error.message, error.retryable),
    }
}
