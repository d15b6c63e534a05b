use actx_types::{Message, Part};

/// Estimates the token cost of a canonical Message. Injected as a
/// `Box<dyn TokenEstimator>` so `token_limit` never hardcodes a tokenizer
/// — the spec leaves the exact estimator as an implementation choice,
/// documented, monotone, and deterministic.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, message: &Message) -> u64;
}

fn text_len(message: &Message) -> u64 {
    message
        .parts
        .iter()
        .map(|p| match p {
            Part::Text { text, .. }
            | Part::Thinking { text, .. }
            | Part::ToolCall { text: Some(text), .. }
            | Part::ToolResult { text: Some(text), .. } => text.len() as u64,
            Part::ToolCall { meta, .. } => meta.arguments().map(|v| v.to_string().len()).unwrap_or(0) as u64,
            _ => 0,
        })
        .sum()
}

/// The default, documented heuristic: character count over four. Crude
/// but monotone and deterministic, which is all §4.3/§9 require of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharsDiv4Estimator;

impl TokenEstimator for CharsDiv4Estimator {
    fn estimate(&self, message: &Message) -> u64 {
        text_len(message) / 4
    }
}

/// A known model's context window, matched by longest registered prefix —
/// the same "distributed definition, centralized resolution" shape the
/// teacher uses for its own model-limit table, so a caller who knows the
/// target model can clamp a `token_limit` strategy's `limit_tokens` to
/// what the model actually allows instead of picking a number out of thin
/// air.
struct ModelSpec {
    prefix: &'static str,
    context_window: u64,
}

const MODEL_SPECS: &[ModelSpec] = &[
    ModelSpec { prefix: "gpt-4o", context_window: 128_000 },
    ModelSpec { prefix: "gpt-4", context_window: 8_192 },
    ModelSpec { prefix: "gpt-3.5", context_window: 16_385 },
    ModelSpec { prefix: "claude-3-5", context_window: 200_000 },
    ModelSpec { prefix: "claude-3", context_window: 200_000 },
    ModelSpec { prefix: "gemini-1.5", context_window: 1_000_000 },
    ModelSpec { prefix: "gemini", context_window: 32_768 },
];

/// Longest-prefix match over the known model table; `None` for an
/// unrecognized model name rather than a guessed default.
pub fn resolve_model_context_window(model: &str) -> Option<u64> {
    MODEL_SPECS
        .iter()
        .filter(|spec| model.starts_with(spec.prefix))
        .max_by_key(|spec| spec.prefix.len())
        .map(|spec| spec.context_window)
}

/// Same chars/4 estimate as the default, plus a `context_window` lookup a
/// caller can use to size `limit_tokens` for a specific target model. This
/// is additive convenience, not a different estimation algorithm.
#[derive(Debug, Clone)]
pub struct ModelAwareEstimator {
    model: String,
}

impl ModelAwareEstimator {
    pub fn new(model: impl Into<String>) -> Self {
        ModelAwareEstimator { model: model.into() }
    }

    pub fn context_window(&self) -> Option<u64> {
        resolve_model_context_window(&self.model)
    }
}

impl TokenEstimator for ModelAwareEstimator {
    fn estimate(&self, message: &Message) -> u64 {
        text_len(message) / 4
    }
}
