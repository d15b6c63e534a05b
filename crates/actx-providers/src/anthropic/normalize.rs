//! Provider-B (Anthropic Messages-style) ingress normalization.

use actx_types::{Asset, Error, Meta, Part, Role};
use serde_json::Value;

use crate::support::arguments_to_canonical_string;
use crate::traits::Normalizer;

pub struct AnthropicNormalizer;

impl Normalizer for AnthropicNormalizer {
    fn format(&self) -> actx_types::Format {
        actx_types::Format::Anthropic
    }

    fn normalize(&self, role: &str, parts: Vec<Value>) -> Result<(Role, Vec<Part>), Error> {
        let canonical_role = match role {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            other => return Err(Error::invalid_role(other, "anthropic")),
        };

        let mut canonical_parts = Vec::with_capacity(parts.len());
        for block in parts {
            canonical_parts.push(normalize_block(&block)?);
        }
        Ok((canonical_role, canonical_parts))
    }
}

fn normalize_block(block: &Value) -> Result<Part, Error> {
    let block_type = block.get("type").and_then(Value::as_str).unwrap_or_default();
    match block_type {
        "text" => {
            let text = block.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
            let mut meta = Meta::new();
            if let Some(cc) = block.get("cache_control") {
                meta.set("cache_control", cc.clone());
            }
            Ok(Part::Text { text, meta })
        }
        "thinking" => {
            let text = block.get("thinking").and_then(Value::as_str).unwrap_or_default().to_string();
            let mut meta = Meta::new();
            if let Some(sig) = block.get("signature").and_then(Value::as_str) {
                meta.set("signature", sig);
            }
            Ok(Part::Thinking { text, meta })
        }
        "image" => {
            let (asset, mut meta) = source_to_asset_and_meta(block.get("source"));
            meta.set("source_type", "base64");
            Ok(Part::Image { asset, meta })
        }
        "document" => {
            let (asset, mut meta) = source_to_asset_and_meta(block.get("source"));
            meta.set("source_type", "base64");
            Ok(Part::File { asset, meta })
        }
        "tool_use" => {
            let id = block.get("id").and_then(Value::as_str).unwrap_or_default();
            let name = block.get("name").and_then(Value::as_str).unwrap_or_default();
            let arguments = block
                .get("input")
                .map(arguments_to_canonical_string)
                .unwrap_or_else(|| "{}".to_string());
            let mut meta = Meta::new();
            meta.set("id", id).set("name", name).set("arguments", arguments);
            Ok(Part::ToolCall { text: None, meta })
        }
        "tool_result" => {
            let tool_use_id = block.get("tool_use_id").and_then(Value::as_str).unwrap_or_default();
            let is_error = block.get("is_error").and_then(Value::as_bool).unwrap_or(false);
            let text = tool_result_content_to_text(block.get("content"));
            let mut meta = Meta::new();
            meta.set("tool_call_id", tool_use_id);
            if is_error {
                meta.set("is_error", true);
            }
            Ok(Part::ToolResult { text, meta })
        }
        other => Err(Error::invalid_shape(format!("unrecognized provider-B block type {other:?}"), None)),
    }
}

fn tool_result_content_to_text(content: Option<&Value>) -> Option<String> {
    match content {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}

fn source_to_asset_and_meta(source: Option<&Value>) -> (Option<Asset>, Meta) {
    let mut meta = Meta::new();
    let Some(source) = source else {
        return (None, meta);
    };
    match source.get("type").and_then(Value::as_str) {
        Some("base64") => {
            let media_type = source.get("media_type").and_then(Value::as_str).unwrap_or_default();
            let data = source.get("data").and_then(Value::as_str).unwrap_or_default();
            meta.set("media_type", media_type).set("data", data);
            (None, meta)
        }
        Some("url") => {
            let url = source.get("url").and_then(Value::as_str).unwrap_or_default();
            meta.set("url", url);
            (None, meta)
        }
        _ => (None, meta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_system_role() {
        let n = AnthropicNormalizer;
        let err = n.normalize("system", vec![]).unwrap_err();
        assert_eq!(err.kind(), actx_types::ErrorKind::InvalidRole);
    }

    #[test]
    fn thinking_signature_preserved_verbatim() {
        let n = AnthropicNormalizer;
        let (_, parts) = n
            .normalize(
                "assistant",
                vec![json!({"type":"thinking","thinking":"reasoning","signature":"sig_abc"})],
            )
            .unwrap();
        match &parts[0] {
            Part::Thinking { text, meta } => {
                assert_eq!(text, "reasoning");
                assert_eq!(meta.signature(), Some("sig_abc"));
            }
            _ => panic!("expected thinking part"),
        }
    }

    #[test]
    fn tool_use_maps_input_object_to_argument_string() {
        let n = AnthropicNormalizer;
        let (_, parts) = n
            .normalize(
                "assistant",
                vec![json!({"type":"tool_use","id":"call_123","name":"get_weather","input":{"city":"SF"}})],
            )
            .unwrap();
        match &parts[0] {
            Part::ToolCall { meta, .. } => {
                assert_eq!(meta.id(), Some("call_123"));
                assert_eq!(meta.arguments().unwrap().as_str().unwrap(), r#"{"city":"SF"}"#);
            }
            _ => panic!("expected tool-call part"),
        }
    }

    #[test]
    fn cache_control_preserved_on_text_block() {
        let n = AnthropicNormalizer;
        let (_, parts) = n
            .normalize(
                "user",
                vec![json!({"type":"text","text":"hi","cache_control":{"type":"ephemeral"}})],
            )
            .unwrap();
        match &parts[0] {
            Part::Text { meta, .. } => {
                assert_eq!(meta.cache_control().unwrap()["type"], "ephemeral");
            }
            _ => panic!("expected text part"),
        }
    }
}
