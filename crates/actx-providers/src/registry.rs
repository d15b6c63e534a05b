//! Resolves the closed four-format identifier set (§6.1) to concrete
//! normalizer/converter implementations, mirroring the teacher's
//! `get_all_providers`/`create_adapter` provider lookup.

use actx_types::{Error, Format};

use crate::anthropic::{AnthropicConverter, AnthropicNormalizer};
use crate::canonical::CanonicalConverter;
use crate::gemini::{GeminiConverter, GeminiNormalizer};
use crate::openai::{OpenAIConverter, OpenAINormalizer};
use crate::traits::{Converter, Normalizer};

/// The four case-sensitive format identifiers recognized at the boundary.
/// The empty string and anything else yields `UnsupportedFormat`.
pub fn format_names() -> &'static [&'static str] {
    &["canonical", "openai", "anthropic", "gemini"]
}

/// Looks up the normalizer for a format. `canonical` has no normalizer —
/// ingress in canonical form needs no transform — so it returns `None` for
/// that one format and an error only for a genuinely unsupported string.
pub fn normalizer_for(format: Format) -> Result<Option<Box<dyn Normalizer>>, Error> {
    Ok(match format {
        Format::Canonical => None,
        Format::OpenAI => Some(Box::new(OpenAINormalizer)),
        Format::Anthropic => Some(Box::new(AnthropicNormalizer)),
        Format::Gemini => Some(Box::new(GeminiNormalizer)),
    })
}

pub fn converter_for(format: Format) -> Box<dyn Converter> {
    match format {
        Format::Canonical => Box::new(CanonicalConverter),
        Format::OpenAI => Box::new(OpenAIConverter),
        Format::Anthropic => Box::new(AnthropicConverter),
        Format::Gemini => Box::new(GeminiConverter),
    }
}
