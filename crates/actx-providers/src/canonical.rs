//! The degenerate canonical-echo converter (§4.4.d): returns the canonical
//! Messages themselves, augmented with a `public_url` meta key on every
//! Part that carries an asset.

use actx_types::{Error, Format, Message, Part};
use async_trait::async_trait;
use serde_json::Value;

use crate::traits::{ConvertContext, Converter, ConvertedPayload};

pub struct CanonicalConverter;

#[async_trait]
impl Converter for CanonicalConverter {
    fn format(&self) -> Format {
        Format::Canonical
    }

    async fn convert(&self, messages: &[Message], ctx: &ConvertContext<'_>) -> Result<ConvertedPayload, Error> {
        let mut echoed = Vec::with_capacity(messages.len());
        for message in messages {
            ctx.cancellation.check()?;
            let mut message = message.clone();
            for part in &mut message.parts {
                let asset = match part {
                    Part::Image { asset, .. } | Part::File { asset, .. } => asset.clone(),
                    _ => None,
                };
                if let Some(asset) = asset {
                    let resolved = ctx.resolver.resolve(&asset.key).await?;
                    part.meta_mut().set("public_url", resolved.url);
                }
            }
            echoed.push(serde_json::to_value(&message).map_err(|e| {
                Error::internal("canonical_echo_serialize", format!("failed to serialize message: {e}"))
            })?);
        }
        Ok(ConvertedPayload(Value::Array(echoed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actx_core::NullResolver;
    use actx_types::{Meta, MessageMeta, Role, TaskStatus};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn echoes_messages_without_assets_unchanged() {
        let resolver = NullResolver;
        let ctx = ConvertContext::new(&resolver);
        let now = Utc::now();
        let message = Message {
            id: Uuid::new_v4(),
            parent_id: None,
            session_id: "s1".into(),
            role: Role::User,
            parts: vec![Part::Text { text: "hi".into(), meta: Meta::new() }],
            created_at: now,
            updated_at: now,
            status: TaskStatus::Success,
            meta: MessageMeta::new(Some(Format::Canonical)),
        };
        let out = CanonicalConverter.convert(&[message], &ctx).await.unwrap();
        let v = out.as_value();
        assert_eq!(v[0]["parts"][0]["text"], "hi");
    }
}
