use std::collections::HashMap;

use actx_core::{CancellationToken, PublicURLResolver};
use actx_engine::{apply_strategies, assemble, AssembleInput, AssembledOutput, CharsDiv4Estimator, TokenEstimator};
use actx_providers::{converter_for, ConvertContext};
use actx_types::{EditStrategy, Error, Format, Message, Part, PublicURL};

/// Input to the convert operation (§6.2): a message sequence, a target
/// format, the resolver and cancellation signal the converter may need,
/// any edit strategies to run first, and pagination echoes to forward
/// into the assembled result untouched.
pub struct ConvertRequest<'a> {
    pub messages: Vec<Message>,
    pub target_format: Format,
    pub resolver: &'a dyn PublicURLResolver,
    pub edit_strategies: Vec<EditStrategy>,
    pub cancellation: CancellationToken,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<'a> ConvertRequest<'a> {
    pub fn new(messages: Vec<Message>, target_format: Format, resolver: &'a dyn PublicURLResolver) -> Self {
        ConvertRequest {
            messages,
            target_format,
            resolver,
            edit_strategies: Vec::new(),
            cancellation: CancellationToken::new(),
            has_more: false,
            next_cursor: None,
        }
    }
}

/// Runs the edit-strategy chain (if any), converts the surviving sequence
/// to `target_format`, and packages the result per §4.5 using a default
/// chars/4 token estimator. Use [`convert_with_estimator`] to plug in a
/// different one (e.g. `ModelAwareEstimator`).
pub async fn convert(request: ConvertRequest<'_>) -> Result<AssembledOutput, Error> {
    convert_with_estimator(request, &CharsDiv4Estimator).await
}

pub async fn convert_with_estimator(
    request: ConvertRequest<'_>,
    estimator: &dyn TokenEstimator,
) -> Result<AssembledOutput, Error> {
    request.cancellation.check()?;

    let outcome = apply_strategies(request.messages, &request.edit_strategies, estimator, &request.cancellation)?;

    let ctx = ConvertContext::new(request.resolver).with_cancellation(request.cancellation.clone());
    let converter = converter_for(request.target_format);
    let converted = converter.convert(&outcome.messages, &ctx).await?;

    let public_urls = if request.target_format == Format::Canonical {
        Some(collect_public_urls(&outcome.messages, request.resolver).await?)
    } else {
        None
    };

    Ok(assemble(AssembleInput {
        messages: &outcome.messages,
        items: converted.into_value(),
        format: request.target_format,
        this_time_tokens: outcome.this_time_tokens,
        edit_at_message_id: outcome.edit_at_message_id,
        has_more: request.has_more,
        next_cursor: request.next_cursor,
        public_urls,
    }))
}

async fn collect_public_urls(
    messages: &[Message],
    resolver: &dyn PublicURLResolver,
) -> Result<HashMap<String, PublicURL>, Error> {
    let mut urls = HashMap::new();
    for message in messages {
        for part in &message.parts {
            let asset = match part {
                Part::Image { asset, .. } | Part::File { asset, .. } => asset.as_ref(),
                _ => None,
            };
            if let Some(asset) = asset {
                if !urls.contains_key(&asset.key) {
                    let resolved = resolver.resolve(&asset.key).await?;
                    urls.insert(asset.key.clone(), resolved);
                }
            }
        }
    }
    Ok(urls)
}
