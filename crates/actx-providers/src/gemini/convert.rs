//! Provider-C (Gemini Contents-style) egress conversion.

use std::collections::HashMap;

use actx_core::{decode_base64, encode_base64, try_inline_asset};
use actx_types::{Error, Format, Message, Part, Role};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::support::arguments_from_canonical_string;
use crate::traits::{ConvertContext, Converter, ConvertedPayload};

pub struct GeminiConverter;

fn role_str(role: Role) -> Option<&'static str> {
    match role {
        Role::User => Some("user"),
        Role::Assistant => Some("model"),
        Role::System => None,
    }
}

/// Builds the tool-call id → name lookup table used to fill in
/// `functionResponse.name` when a tool-result Part carries only the id.
fn build_name_lookup(messages: &[Message]) -> HashMap<String, String> {
    let mut lookup = HashMap::new();
    for message in messages {
        for part in &message.parts {
            if let Part::ToolCall { meta, .. } = part {
                if let (Some(id), Some(name)) = (meta.id(), meta.name()) {
                    lookup.insert(id.to_string(), name.to_string());
                }
            }
        }
    }
    lookup
}

fn render_thinking_native(text: &str, meta: &actx_types::Meta) -> Option<Value> {
    if meta.source_type() != Some("gemini") {
        return None;
    }
    let signature = meta.signature()?;
    let bytes = decode_base64(signature).ok()?;
    Some(json!({"thought": true, "text": text, "thoughtSignature": encode_base64(&bytes)}))
}

async fn render_media_part(
    part: &Part,
    message_id: uuid::Uuid,
    ctx: &ConvertContext<'_>,
) -> Result<Value, Error> {
    let (asset, meta) = match part {
        Part::Image { asset, meta } | Part::File { asset, meta } => (asset, meta),
        _ => unreachable!("only called for image/file parts"),
    };

    // §3.3 preference order: asset -> data -> url.
    if let Some(asset) = asset {
        if let Some(inlined) = try_inline_asset(asset, ctx.resolver, &ctx.http_client, &ctx.cancellation).await {
            return Ok(json!({"inlineData": {"mimeType": inlined.media_type, "data": inlined.data_base64}}));
        }
    }
    if let (Some(media_type), Some(data)) = (meta.media_type(), meta.data()) {
        return Ok(json!({"inlineData": {"mimeType": media_type, "data": data}}));
    }
    if let Some(url) = meta.url() {
        let mime_type = asset.as_ref().map(|a| a.mime_type.clone()).unwrap_or_default();
        return Ok(json!({"fileData": {"mimeType": mime_type, "fileUri": url}}));
    }
    Err(Error::asset_unresolved(Some(message_id)))
}

async fn render_part(
    part: &Part,
    message_id: uuid::Uuid,
    name_lookup: &HashMap<String, String>,
    ctx: &ConvertContext<'_>,
) -> Result<Value, Error> {
    match part {
        Part::Text { text, .. } => Ok(json!({"text": text})),
        Part::Thinking { text, meta } => {
            Ok(render_thinking_native(text, meta).unwrap_or_else(|| json!({"text": text})))
        }
        Part::Image { .. } | Part::File { .. } => render_media_part(part, message_id, ctx).await,
        Part::ToolCall { meta, .. } => {
            let arguments = meta.arguments().and_then(Value::as_str).unwrap_or("{}");
            let args = arguments_from_canonical_string(arguments, Some(message_id))?;
            let mut call = serde_json::Map::new();
            call.insert("name".to_string(), json!(meta.name().unwrap_or_default()));
            call.insert("args".to_string(), args);
            if let Some(id) = meta.id() {
                call.insert("id".to_string(), json!(id));
            }
            Ok(json!({"functionCall": Value::Object(call)}))
        }
        Part::ToolResult { text, meta } => {
            let name = meta
                .name()
                .map(str::to_string)
                .or_else(|| meta.tool_call_id().and_then(|id| name_lookup.get(id).cloned()))
                .unwrap_or_default();
            let response = text
                .as_deref()
                .and_then(|t| serde_json::from_str::<Value>(t).ok())
                .unwrap_or_else(|| json!({"output": text.clone().unwrap_or_default()}));
            let mut fr = serde_json::Map::new();
            fr.insert("name".to_string(), json!(name));
            fr.insert("response".to_string(), response);
            if let Some(id) = meta.tool_call_id() {
                fr.insert("id".to_string(), json!(id));
            }
            Ok(json!({"functionResponse": Value::Object(fr)}))
        }
    }
}

#[async_trait]
impl Converter for GeminiConverter {
    fn format(&self) -> Format {
        Format::Gemini
    }

    async fn convert(&self, messages: &[Message], ctx: &ConvertContext<'_>) -> Result<ConvertedPayload, Error> {
        let name_lookup = build_name_lookup(messages);
        let mut out = Vec::new();
        for message in messages {
            ctx.cancellation.check()?;
            let Some(role_name) = role_str(message.role) else { continue };
            let mut parts = Vec::with_capacity(message.parts.len());
            for part in &message.parts {
                ctx.cancellation.check()?;
                parts.push(render_part(part, message.id, &name_lookup, ctx).await?);
            }
            out.push(json!({"role": role_name, "parts": parts}));
        }
        Ok(ConvertedPayload(Value::Array(out)))
    }
}
