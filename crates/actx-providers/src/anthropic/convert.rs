//! Provider-B (Anthropic Messages-style) egress conversion.

use actx_core::try_inline_asset;
use actx_types::{Error, Format, Message, Part, Role};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::support::arguments_from_canonical_string;
use crate::traits::{ConvertContext, Converter, ConvertedPayload};

pub struct AnthropicConverter;

fn role_str(role: Role) -> Option<&'static str> {
    match role {
        Role::User => Some("user"),
        Role::Assistant => Some("assistant"),
        // Provider B expects the system prompt through a separate channel;
        // canonical system messages are dropped here.
        Role::System => None,
    }
}

async fn render_image_or_file_block(
    block_kind: &str,
    part: &Part,
    message_id: uuid::Uuid,
    ctx: &ConvertContext<'_>,
) -> Result<Value, Error> {
    let (asset, meta) = match part {
        Part::Image { asset, meta } | Part::File { asset, meta } => (asset, meta),
        _ => unreachable!("only called for image/file parts"),
    };

    if let Some(asset) = asset {
        if let Some(inlined) = try_inline_asset(asset, ctx.resolver, &ctx.http_client, &ctx.cancellation).await {
            return Ok(json!({
                "type": block_kind,
                "source": {"type": "base64", "media_type": inlined.media_type, "data": inlined.data_base64}
            }));
        }
    }
    if let (Some(media_type), Some(data)) = (meta.media_type(), meta.data()) {
        return Ok(json!({
            "type": block_kind,
            "source": {"type": "base64", "media_type": media_type, "data": data}
        }));
    }
    if let Some(url) = meta.url() {
        return Ok(json!({"type": block_kind, "source": {"type": "url", "url": url}}));
    }
    Err(Error::asset_unresolved(Some(message_id)))
}

async fn render_part(part: &Part, message_id: uuid::Uuid, ctx: &ConvertContext<'_>) -> Result<Value, Error> {
    match part {
        Part::Text { text, meta } => {
            let mut block = json!({"type": "text", "text": text});
            if let Some(cc) = meta.cache_control() {
                block["cache_control"] = cc.clone();
            }
            Ok(block)
        }
        Part::Thinking { text, meta } => {
            let signature = meta.signature().ok_or_else(|| {
                Error::invalid_shape("thinking part has no signature for provider-B egress", Some(message_id))
            })?;
            Ok(json!({"type": "thinking", "thinking": text, "signature": signature}))
        }
        Part::Image { .. } => render_image_or_file_block("image", part, message_id, ctx).await,
        Part::File { .. } => render_image_or_file_block("document", part, message_id, ctx).await,
        Part::ToolCall { meta, .. } => {
            let arguments = meta.arguments().and_then(Value::as_str).unwrap_or("{}");
            let input = arguments_from_canonical_string(arguments, Some(message_id))?;
            Ok(json!({
                "type": "tool_use",
                "id": meta.id().unwrap_or_default(),
                "name": meta.name().unwrap_or_default(),
                "input": input,
            }))
        }
        Part::ToolResult { text, meta } => {
            let mut block = json!({
                "type": "tool_result",
                "tool_use_id": meta.tool_call_id().unwrap_or_default(),
                "content": text.clone().unwrap_or_default(),
            });
            if meta.is_error() {
                block["is_error"] = json!(true);
            }
            Ok(block)
        }
    }
}

#[async_trait]
impl Converter for AnthropicConverter {
    fn format(&self) -> Format {
        Format::Anthropic
    }

    async fn convert(&self, messages: &[Message], ctx: &ConvertContext<'_>) -> Result<ConvertedPayload, Error> {
        let mut out: Vec<Value> = Vec::new();
        let mut out_role: Vec<Role> = Vec::new();

        for message in messages {
            ctx.cancellation.check()?;
            let Some(role_name) = role_str(message.role) else { continue };

            let mut blocks = Vec::with_capacity(message.parts.len());
            for part in &message.parts {
                ctx.cancellation.check()?;
                blocks.push(render_part(part, message.id, ctx).await?);
            }

            if out_role.last() == Some(&message.role) {
                if let Some(Value::Object(prev)) = out.last_mut() {
                    if let Some(Value::Array(prev_content)) = prev.get_mut("content") {
                        prev_content.extend(blocks);
                        continue;
                    }
                }
            }

            out.push(json!({"role": role_name, "content": blocks}));
            out_role.push(message.role);
        }

        Ok(ConvertedPayload(Value::Array(out)))
    }
}
