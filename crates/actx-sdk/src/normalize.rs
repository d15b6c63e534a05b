use actx_providers::normalizer_for;
use actx_types::{validate, Error, Format, Message, MessageMeta, Part, Role, TaskStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Input to the normalize operation (§6.3): a source format identifier, the
/// provider payload's own role string, and its content-block array.
pub struct NormalizeRequest {
    pub source_format: Format,
    pub role: String,
    pub parts: Vec<Value>,
}

/// Runs the §6.3 normalize operation: provider-shaped role/parts in,
/// canonical role/parts out.
///
/// `Format::Canonical` has no normalizer registered (ingress already in
/// canonical shape needs no transform) — in that case the role string is
/// parsed directly against the canonical role vocabulary and each part
/// value is deserialized as a canonical [`Part`] rather than run through a
/// provider-specific reshaping pass.
pub fn normalize(request: NormalizeRequest) -> Result<(Role, Vec<Part>), Error> {
    match normalizer_for(request.source_format)? {
        Some(normalizer) => normalizer.normalize(&request.role, request.parts),
        None => {
            let role = match request.role.as_str() {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                "system" => Role::System,
                other => return Err(Error::invalid_role(other, "canonical")),
            };
            let parts = request
                .parts
                .into_iter()
                .map(|v| {
                    serde_json::from_value::<Part>(v)
                        .map_err(|e| Error::invalid_shape(format!("not a canonical part: {e}"), None))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((role, parts))
        }
    }
}

/// Everything needed to turn a normalized (role, parts) pair into a
/// complete, validated canonical [`Message`] ready for `MessageStore::append`.
pub struct IngestRequest {
    pub source_format: Format,
    pub session_id: String,
    pub parent_id: Option<Uuid>,
    /// Supplied by the caller when the provider payload already carries a
    /// stable id; left `None` to synthesize one deterministically.
    pub id: Option<Uuid>,
    pub role: String,
    pub parts: Vec<Value>,
    pub user_meta: serde_json::Map<String, Value>,
}

/// Normalizes a provider-shaped ingress payload and assembles the full
/// canonical [`Message`] the session writer appends to the store: runs
/// [`normalize`], synthesizes an id when the caller supplied none (folding
/// in the current timestamp, the same technique the teacher uses to
/// derive deterministic event ids — this makes the synthesized id
/// well-formed, not idempotent; a caller that needs retries to collapse
/// onto the same message must supply an explicit `id`), stamps
/// `source_format` immutably, and validates the result against §3.3 before
/// handing it back.
pub fn ingest(request: IngestRequest) -> Result<Message, Error> {
    let (role, parts) = normalize(NormalizeRequest {
        source_format: request.source_format,
        role: request.role,
        parts: request.parts,
    })?;

    let now: DateTime<Utc> = Utc::now();
    let id = request
        .id
        .unwrap_or_else(|| actx_providers::deterministic_id(&request.session_id, &format!("{now}")));

    let mut meta = MessageMeta::new(Some(request.source_format));
    meta.user_meta = request.user_meta;

    let message = Message {
        id,
        parent_id: request.parent_id,
        session_id: request.session_id,
        role,
        parts,
        created_at: now,
        updated_at: now,
        status: TaskStatus::Success,
        meta,
    };
    validate(&message)?;
    Ok(message)
}
