use std::collections::HashMap;

use actx_types::{Format, Message, PublicURL};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Everything the assembler needs to package one egress call's result.
///
/// `items` is the already-produced converter payload (an unwrapped
/// `serde_json::Value`) — the assembler does not invoke a converter
/// itself, it only packages what the caller already converted, alongside
/// the source messages those items were derived from.
pub struct AssembleInput<'a> {
    pub messages: &'a [Message],
    pub items: Value,
    pub format: Format,
    pub this_time_tokens: u64,
    pub edit_at_message_id: Option<Uuid>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
    pub public_urls: Option<HashMap<String, PublicURL>>,
}

/// The structured result of §4.5: converter output plus pagination and
/// per-message metadata, ready to hand back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledOutput {
    pub items: Value,
    pub ids: Vec<Uuid>,
    pub metas: Vec<Map<String, Value>>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
    pub this_time_tokens: u64,
    pub edit_at_message_id: Option<Uuid>,
    pub public_urls: Option<HashMap<String, PublicURL>>,
}

/// Packages one egress call's result. `ids`/`metas` always track the
/// source `messages` one-to-one (in order) regardless of how the
/// converter reshaped `items` — for the non-merging converters (provider
/// A, provider C, canonical-echo) that also means `ids`/`metas` line up
/// index-for-index with `items`; provider B's adjacent-same-role merge is
/// the one documented exception where `items` can be shorter.
///
/// `public_urls` is forced to `None` unless `format` is `Canonical`,
/// enforcing the canonical-only suppression rule here even if a caller
/// passed one in by mistake.
pub fn assemble(input: AssembleInput<'_>) -> AssembledOutput {
    let ids = input.messages.iter().map(|m| m.id).collect();
    let metas = input.messages.iter().map(|m| m.meta.user_meta.clone()).collect();
    let public_urls = if input.format == Format::Canonical { input.public_urls } else { None };

    AssembledOutput {
        items: input.items,
        ids,
        metas,
        has_more: input.has_more,
        next_cursor: input.next_cursor,
        this_time_tokens: input.this_time_tokens,
        edit_at_message_id: input.edit_at_message_id,
        public_urls,
    }
}
