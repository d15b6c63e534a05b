//! The persisted canonical layout (§6.4): a `Message` serializes to a
//! JSON-like object with an ordered `parts` array and no embedded binary
//! payloads — only the asset reference. `Message`/`Part` already derive
//! `serde::{Serialize, Deserialize}` in `actx-types`, so these helpers are
//! thin wrappers; they exist so a `MessageStore` implementation has one
//! documented entry point rather than reaching for `serde_json` directly
//! and risking a field-by-field reimplementation that drifts from the
//! canonical shape.
//!
//! Storage stability requirement: additive evolution only. Unknown
//! message-level meta keys land in [`actx_types::MessageMeta`]'s reserved
//! bucket and unknown part-level meta keys stay in [`actx_types::Meta`]'s
//! open map — both are preserved verbatim and ignored, never rejected, by
//! [`from_persisted_json`].

use actx_types::{Error, Message};
use serde_json::Value;

/// Serializes a canonical `Message` to its persisted JSON shape.
pub fn to_persisted_json(message: &Message) -> Result<Value, Error> {
    serde_json::to_value(message)
        .map_err(|e| Error::internal("persisted_serialize", format!("failed to serialize message: {e}")))
}

/// Deserializes a persisted JSON object back into a canonical `Message`.
/// A reader ignores unknown meta keys rather than failing per the additive-
/// evolution requirement (handled by `MessageMeta`/`Meta`'s own
/// `Deserialize` impls); this function only reports a failure when the
/// required fields (`id`, `role`, `parts`, ...) are themselves malformed.
pub fn from_persisted_json(value: Value) -> Result<Message, Error> {
    serde_json::from_value(value)
        .map_err(|e| Error::internal("persisted_deserialize", format!("failed to deserialize message: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actx_types::{Format, Meta, MessageMeta, Part, Role, TaskStatus};
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_message() -> Message {
        let now = Utc::now();
        Message {
            id: Uuid::new_v4(),
            parent_id: None,
            session_id: "s1".into(),
            role: Role::User,
            parts: vec![Part::Text { text: "hi".into(), meta: Meta::new() }],
            created_at: now,
            updated_at: now,
            status: TaskStatus::Success,
            meta: MessageMeta::new(Some(Format::OpenAI)),
        }
    }

    #[test]
    fn round_trips_through_persisted_json() {
        let message = sample_message();
        let json = to_persisted_json(&message).unwrap();
        let back = from_persisted_json(json).unwrap();
        assert_eq!(message, back);
    }

    #[test]
    fn unknown_top_level_meta_keys_do_not_fail_deserialization() {
        let message = sample_message();
        let mut json = to_persisted_json(&message).unwrap();
        json["meta"]["a_key_from_a_future_version"] = json!("kept");
        let back = from_persisted_json(json).unwrap();
        assert_eq!(back.meta.reserved_get("a_key_from_a_future_version").unwrap(), "kept");
    }
}
