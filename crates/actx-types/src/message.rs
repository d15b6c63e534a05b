use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::Error;
use crate::format::Format;
use crate::part::Part;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Lifecycle state of a message, as distinct from the content it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Success,
    Failed,
}

/// Message-level metadata.
///
/// `source_format` is set once at normalization time and never mutated
/// afterward — it records which provider wire format this message was
/// normalized from (or `Canonical` if it was constructed directly) so a
/// later re-convert can make source-aware decisions. `user_meta` is an
/// arbitrary, caller-owned bag exposed verbatim to consumers. Everything
/// else that arrives under message-level `meta` on ingress but isn't one
/// of those two fields is kept in an opaque reserved bucket: preserved on
/// round-trip, never interpreted, never exposed through the public
/// accessors. The hand-written (de)serializer below is what makes that
/// split possible without a dedicated wire field for the reserved bucket.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageMeta {
    pub source_format: Option<Format>,
    pub user_meta: Map<String, Value>,
    reserved: Map<String, Value>,
}

impl MessageMeta {
    pub fn new(source_format: Option<Format>) -> Self {
        MessageMeta { source_format, user_meta: Map::new(), reserved: Map::new() }
    }

    pub fn reserved_get(&self, key: &str) -> Option<&Value> {
        self.reserved.get(key)
    }

    pub fn reserved_set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.reserved.insert(key.into(), value.into());
    }
}

const SOURCE_FORMAT_KEY: &str = "source_format";
const USER_META_KEY: &str = "user_meta";

impl Serialize for MessageMeta {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(fmt) = &self.source_format {
            map.serialize_entry(SOURCE_FORMAT_KEY, fmt.as_str())?;
        }
        if !self.user_meta.is_empty() {
            map.serialize_entry(USER_META_KEY, &self.user_meta)?;
        }
        for (k, v) in &self.reserved {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MessageMeta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MessageMetaVisitor;

        impl<'de> Visitor<'de> for MessageMetaVisitor {
            type Value = MessageMeta;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a message meta object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = MessageMeta::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        SOURCE_FORMAT_KEY => {
                            let raw: String = map.next_value()?;
                            out.source_format = raw.parse::<crate::format::Format>().ok();
                        }
                        USER_META_KEY => {
                            out.user_meta = map.next_value()?;
                        }
                        other => {
                            let v: Value = map.next_value()?;
                            out.reserved.insert(other.to_string(), v);
                        }
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(MessageMetaVisitor)
    }
}

/// A single turn in a conversation, holding an ordered sequence of parts.
///
/// `parent_id` threads messages into a tree (branching edits, retried
/// turns); linear history is the common case where each message's parent
/// is the previous one. Validity of `parts` against `role` is enforced by
/// [`validate`], not by the constructor — callers that build a `Message`
/// directly (e.g. a normalizer assembling one field at a time) are
/// expected to call `validate` once construction is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub session_id: String,
    pub role: Role,
    pub parts: Vec<Part>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(default)]
    pub meta: MessageMeta,
}

/// Enforces the shape invariants closed over by the part-type vocabulary:
/// tool-call parts only ever appear on assistant messages, tool-result
/// parts only ever appear on user messages, and every tool-result part
/// must carry a `tool_call_id` pairing it to the call it answers.
pub fn validate(message: &Message) -> Result<(), Error> {
    for part in &message.parts {
        if part.is_tool_call() && message.role != Role::Assistant {
            return Err(Error::invalid_shape(
                "tool_call part found on a non-assistant message",
                Some(message.id),
            ));
        }
        if part.is_tool_result() {
            if message.role != Role::User {
                return Err(Error::invalid_shape(
                    "tool_result part found on a non-user message",
                    Some(message.id),
                ));
            }
            if part.tool_call_id().is_none() {
                return Err(Error::missing_tool_call_id(Some(message.id)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Meta;

    fn base_message(role: Role, parts: Vec<Part>) -> Message {
        let now = Utc::now();
        Message {
            id: Uuid::new_v4(),
            parent_id: None,
            session_id: "s1".into(),
            role,
            parts,
            created_at: now,
            updated_at: now,
            status: TaskStatus::Success,
            meta: MessageMeta::new(Some(Format::Canonical)),
        }
    }

    #[test]
    fn message_meta_round_trips_source_format_and_user_meta_and_reserved() {
        let mut meta = MessageMeta::new(Some(Format::OpenAI));
        meta.user_meta.insert("trace_id".into(), Value::String("abc".into()));
        meta.reserved_set("some_future_key", "kept");

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["source_format"], "openai");
        assert_eq!(json["user_meta"]["trace_id"], "abc");
        assert_eq!(json["some_future_key"], "kept");

        let back: MessageMeta = serde_json::from_value(json).unwrap();
        assert_eq!(back.source_format, Some(Format::OpenAI));
        assert_eq!(back.user_meta.get("trace_id").unwrap(), "abc");
        assert_eq!(back.reserved_get("some_future_key").unwrap(), "kept");
    }

    #[test]
    fn tool_call_on_user_message_is_invalid_shape() {
        let msg = base_message(
            Role::User,
            vec![Part::ToolCall { text: None, meta: Meta::new() }],
        );
        let err = validate(&msg).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidShape);
    }

    #[test]
    fn tool_result_without_tool_call_id_is_missing_tool_call_id() {
        let msg = base_message(
            Role::User,
            vec![Part::ToolResult { text: Some("ok".into()), meta: Meta::new() }],
        );
        let err = validate(&msg).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MissingToolCallID);
    }

    #[test]
    fn paired_tool_result_on_user_message_is_valid() {
        let msg = base_message(
            Role::User,
            vec![Part::ToolResult {
                text: Some("ok".into()),
                meta: Meta::new().with("tool_call_id", "call_1"),
            }],
        );
        assert!(validate(&msg).is_ok());
    }
}
