//! Normalizers (provider wire format → canonical) and converters
//! (canonical → provider wire format) for the three supported providers,
//! plus the degenerate canonical-echo converter. Not intended for direct
//! use outside the facade crate.

mod anthropic;
mod canonical;
mod gemini;
mod openai;
mod registry;
mod support;
mod traits;

pub use anthropic::{AnthropicConverter, AnthropicNormalizer};
pub use canonical::CanonicalConverter;
pub use gemini::{GeminiConverter, GeminiNormalizer};
pub use openai::{OpenAIConverter, OpenAINormalizer};
pub use registry::{converter_for, format_names, normalizer_for};
pub use support::{arguments_from_canonical_string, arguments_to_canonical_string, deterministic_id};
pub use traits::{ConvertContext, Converter, ConvertedPayload, Normalizer};
