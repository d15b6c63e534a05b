//! Provider-A (OpenAI Chat Completions-style) egress conversion.

use actx_core::build_data_url;
use actx_types::{Error, Format, Message, Part, Role};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::support::arguments_to_canonical_string;
use crate::traits::{ConvertContext, Converter, ConvertedPayload};

pub struct OpenAIConverter;

fn role_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Renders a single content Part into the provider-A typed content-part
/// shape used inside a multi-part `content` array.
fn render_content_block(part: &Part) -> Option<Value> {
    match part {
        Part::Text { text, .. } => Some(json!({"type": "text", "text": text})),
        // Thinking downgrades to plain text; provider A has no reasoning
        // block and no signature to carry.
        Part::Thinking { text, .. } => Some(json!({"type": "text", "text": text})),
        Part::Image { asset, meta } => {
            // §3.3 preference order: asset -> data -> url.
            let url = asset
                .as_ref()
                .map(|a| a.key.clone())
                .or_else(|| meta.media_type().zip(meta.data()).map(|(mt, d)| build_data_url(mt, d)))
                .or_else(|| meta.url().map(str::to_string))
                .unwrap_or_default();
            Some(json!({"type": "image_url", "image_url": {"url": url}}))
        }
        Part::ToolResult { text, meta } => {
            let content = text.clone().unwrap_or_else(|| {
                meta.get("result").map(|v| v.to_string()).unwrap_or_default()
            });
            Some(json!({"type": "text", "text": content}))
        }
        Part::File { .. } | Part::ToolCall { .. } => None,
    }
}

fn render_tool_calls(parts: &[Part]) -> Vec<Value> {
    parts
        .iter()
        .filter_map(|p| match p {
            Part::ToolCall { meta, .. } => {
                let arguments = meta
                    .arguments()
                    .map(arguments_to_canonical_string)
                    .unwrap_or_else(|| "{}".to_string());
                Some(json!({
                    "id": meta.id().unwrap_or_default(),
                    "type": "function",
                    "function": {
                        "name": meta.name().unwrap_or_default(),
                        "arguments": arguments,
                    }
                }))
            }
            _ => None,
        })
        .collect()
}

fn render_message(message: &Message) -> Vec<Value> {
    let all_tool_results = !message.parts.is_empty()
        && message.parts.iter().all(|p| p.is_tool_result())
        && message.role == Role::User;

    if all_tool_results {
        return message
            .parts
            .iter()
            .map(|p| {
                let (tool_call_id, content) = match p {
                    Part::ToolResult { text, meta } => {
                        let content = text.clone().unwrap_or_else(|| {
                            meta.get("result").map(|v| v.to_string()).unwrap_or_default()
                        });
                        (meta.tool_call_id().unwrap_or_default().to_string(), content)
                    }
                    _ => unreachable!("filtered to tool-result parts above"),
                };
                json!({"role": "tool", "tool_call_id": tool_call_id, "content": content})
            })
            .collect();
    }

    let content_parts: Vec<Part> = message.parts.iter().filter(|p| !p.is_tool_call()).cloned().collect();
    let tool_calls = render_tool_calls(&message.parts);

    let mut out = serde_json::Map::new();
    out.insert("role".to_string(), json!(role_str(message.role)));

    match content_parts.as_slice() {
        [] => {
            out.insert("content".to_string(), Value::Null);
        }
        [Part::Text { text, .. }] if tool_calls.is_empty() => {
            out.insert("content".to_string(), json!(text));
        }
        _ => {
            let blocks: Vec<Value> = content_parts.iter().filter_map(render_content_block).collect();
            out.insert("content".to_string(), json!(blocks));
        }
    }

    if !tool_calls.is_empty() {
        out.insert("tool_calls".to_string(), json!(tool_calls));
    }

    vec![Value::Object(out)]
}

#[async_trait]
impl Converter for OpenAIConverter {
    fn format(&self) -> Format {
        Format::OpenAI
    }

    async fn convert(&self, messages: &[Message], ctx: &ConvertContext<'_>) -> Result<ConvertedPayload, Error> {
        let mut out = Vec::new();
        for message in messages {
            ctx.cancellation.check()?;
            out.extend(render_message(message));
        }
        Ok(ConvertedPayload(Value::Array(out)))
    }
}
