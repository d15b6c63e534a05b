//! Provider-C (Gemini Contents-style) ingress normalization.

use actx_types::{Asset, Error, Meta, Part, Role};
use serde_json::Value;

use crate::support::arguments_to_canonical_string;
use crate::traits::Normalizer;

pub struct GeminiNormalizer;

impl Normalizer for GeminiNormalizer {
    fn format(&self) -> actx_types::Format {
        actx_types::Format::Gemini
    }

    fn normalize(&self, role: &str, parts: Vec<Value>) -> Result<(Role, Vec<Part>), Error> {
        let canonical_role = match role {
            "user" => Role::User,
            "model" => Role::Assistant,
            other => return Err(Error::invalid_role(other, "gemini")),
        };

        let mut canonical_parts = Vec::with_capacity(parts.len());
        for block in parts {
            canonical_parts.push(normalize_block(&block)?);
        }
        Ok((canonical_role, canonical_parts))
    }
}

fn normalize_block(block: &Value) -> Result<Part, Error> {
    if block.get("thought").and_then(Value::as_bool) == Some(true) {
        let text = block.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
        let mut meta = Meta::new();
        if let Some(sig) = block.get("thoughtSignature").and_then(Value::as_str) {
            meta.set("signature", sig);
        }
        meta.set("source_type", "gemini");
        return Ok(Part::Thinking { text, meta });
    }

    if let Some(text) = block.get("text").and_then(Value::as_str) {
        return Ok(Part::Text { text: text.to_string(), meta: Meta::new() });
    }

    if let Some(inline) = block.get("inlineData") {
        let mime_type = inline.get("mimeType").and_then(Value::as_str).unwrap_or_default();
        let data = inline.get("data").and_then(Value::as_str).unwrap_or_default();
        let mut meta = Meta::new();
        meta.set("media_type", mime_type).set("data", data).set("source_type", "inline_data");
        let asset: Option<Asset> = None;
        return if mime_type.starts_with("image/") {
            Ok(Part::Image { asset, meta })
        } else {
            Ok(Part::File { asset, meta })
        };
    }

    if let Some(call) = block.get("functionCall") {
        let name = call.get("name").and_then(Value::as_str).unwrap_or_default();
        let id = call.get("id").and_then(Value::as_str).unwrap_or_default();
        let arguments = call.get("args").map(arguments_to_canonical_string).unwrap_or_else(|| "{}".to_string());
        let mut meta = Meta::new();
        meta.set("name", name).set("arguments", arguments);
        if !id.is_empty() {
            meta.set("id", id);
        }
        return Ok(Part::ToolCall { text: None, meta });
    }

    if let Some(response) = block.get("functionResponse") {
        let name = response.get("name").and_then(Value::as_str).unwrap_or_default();
        let id = response.get("id").and_then(Value::as_str);
        let text = response.get("response").map(|v| v.to_string());
        let mut meta = Meta::new();
        meta.set("name", name);
        if let Some(id) = id {
            meta.set("tool_call_id", id);
        }
        return Ok(Part::ToolResult { text, meta });
    }

    Err(Error::invalid_shape("unrecognized provider-C content part", None))
}
