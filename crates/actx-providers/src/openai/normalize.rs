//! Provider-A (OpenAI Chat Completions-style) ingress normalization.
//!
//! The caller flattens a provider-A message into a list of tagged content
//! blocks before calling [`OpenAINormalizer::normalize`]:
//!
//! - `{"type":"text","text":"..."}`
//! - `{"type":"image_url","image_url":{"url":"..."}}`
//! - `{"type":"tool_call","id":"...","name":"...","arguments":<string|object>}`
//!   (one block per entry of the original `tool_calls` array)
//! - `{"type":"tool_response","tool_call_id":"...","content":"..."}`
//!   (the content of a `role:"tool"` message)
//!
//! This keeps the flattening (message-level `tool_calls`/`tool_call_id`
//! folded into the part stream) out of the normalizer itself, which only
//! needs to reshape blocks it's already been handed one at a time.

use actx_types::{Error, Meta, Part, Role};
use serde_json::Value;

use crate::support::arguments_to_canonical_string;
use crate::traits::Normalizer;

pub struct OpenAINormalizer;

impl Normalizer for OpenAINormalizer {
    fn format(&self) -> actx_types::Format {
        actx_types::Format::OpenAI
    }

    fn normalize(&self, role: &str, parts: Vec<Value>) -> Result<(Role, Vec<Part>), Error> {
        let (canonical_role, source_type) = match role {
            "user" => (Role::User, None),
            "assistant" => (Role::Assistant, None),
            "system" => (Role::System, None),
            "tool" => (Role::User, Some("tool")),
            "function" => (Role::User, Some("function")),
            other => return Err(Error::invalid_role(other, "openai")),
        };

        let mut text_parts = Vec::new();
        let mut tool_call_parts = Vec::new();
        let mut other_parts = Vec::new();

        for block in parts {
            let block_type = block.get("type").and_then(Value::as_str).unwrap_or_default();
            match block_type {
                "text" => {
                    let text = block.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
                    let mut meta = Meta::new();
                    if let Some(source) = source_type {
                        meta.set("source_type", source);
                    }
                    text_parts.push(Part::Text { text, meta });
                }
                "image_url" => {
                    let url = block
                        .get("image_url")
                        .and_then(|v| v.get("url"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let mut meta = Meta::new();
                    meta.set("url", url).set("source_type", "image_url");
                    other_parts.push(Part::Image { asset: None, meta });
                }
                "tool_call" => {
                    let id = block.get("id").and_then(Value::as_str).unwrap_or_default();
                    let name = block.get("name").and_then(Value::as_str).unwrap_or_default();
                    let arguments = block
                        .get("arguments")
                        .map(arguments_to_canonical_string)
                        .unwrap_or_else(|| "{}".to_string());
                    let mut meta = Meta::new();
                    meta.set("id", id).set("name", name).set("arguments", arguments).set("source_type", "function");
                    tool_call_parts.push(Part::ToolCall { text: None, meta });
                }
                "tool_response" => {
                    let tool_call_id =
                        block.get("tool_call_id").and_then(Value::as_str).unwrap_or_default();
                    let content = block.get("content").and_then(Value::as_str).map(str::to_string);
                    let mut meta = Meta::new();
                    meta.set("tool_call_id", tool_call_id);
                    other_parts.push(Part::ToolResult { text: content, meta });
                }
                other => {
                    return Err(Error::invalid_shape(
                        format!("unrecognized provider-A content block type {other:?}"),
                        None,
                    ))
                }
            }
        }

        // Text content precedes tool-call Parts in canonical order (§4.2.a);
        // any other-kind parts (image, tool-result) keep their relative
        // position after both, since the ingress blocks for those never
        // co-occur with tool_calls on a single message in practice.
        let mut canonical_parts = text_parts;
        canonical_parts.extend(other_parts);
        canonical_parts.extend(tool_call_parts);

        Ok((canonical_role, canonical_parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_text_normalizes_directly() {
        let n = OpenAINormalizer;
        let (role, parts) = n.normalize("user", vec![json!({"type":"text","text":"hi"})]).unwrap();
        assert_eq!(role, Role::User);
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Part::Text { text, .. } => assert_eq!(text, "hi"),
            _ => panic!("expected text part"),
        }
    }

    #[test]
    fn tool_and_function_roles_collapse_to_user_with_source_type() {
        let n = OpenAINormalizer;
        let (role, parts) = n
            .normalize(
                "tool",
                vec![json!({"type":"tool_response","tool_call_id":"call_1","content":"sunny"})],
            )
            .unwrap();
        assert_eq!(role, Role::User);
        match &parts[0] {
            Part::ToolResult { text, meta } => {
                assert_eq!(text.as_deref(), Some("sunny"));
                assert_eq!(meta.tool_call_id(), Some("call_1"));
            }
            _ => panic!("expected tool-result part"),
        }
    }

    #[test]
    fn text_precedes_tool_calls_when_both_present() {
        let n = OpenAINormalizer;
        let (_, parts) = n
            .normalize(
                "assistant",
                vec![
                    json!({"type":"tool_call","id":"call_1","name":"get_weather","arguments":{"city":"SF"}}),
                    json!({"type":"text","text":"checking..."}),
                ],
            )
            .unwrap();
        assert!(matches!(parts[0], Part::Text { .. }));
        assert!(matches!(parts[1], Part::ToolCall { .. }));
    }

    #[test]
    fn tool_call_arguments_are_serialized_from_object() {
        let n = OpenAINormalizer;
        let (_, parts) = n
            .normalize(
                "assistant",
                vec![json!({"type":"tool_call","id":"call_1","name":"get_weather","arguments":{"city":"SF"}})],
            )
            .unwrap();
        match &parts[0] {
            Part::ToolCall { meta, .. } => {
                assert_eq!(meta.arguments().unwrap().as_str().unwrap(), r#"{"city":"SF"}"#);
            }
            _ => panic!("expected tool-call part"),
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let n = OpenAINormalizer;
        let err = n.normalize("developer", vec![]).unwrap_err();
        assert_eq!(err.kind(), actx_types::ErrorKind::InvalidRole);
    }
}
