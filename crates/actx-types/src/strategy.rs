use serde::{Deserialize, Serialize};

/// A pure, composable transform over a canonical message sequence.
///
/// Strategies are provider-agnostic: they operate purely on canonical
/// `Message`/`Part` shapes and never see provider wire payloads. Applying
/// one never mutates tool-call/tool-result pairing into an invalid state —
/// the engine that interprets these enforces the pairing-safety invariant,
/// not the variants themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditStrategy {
    /// Drop tool-result parts (and their paired tool-call parts), keeping
    /// only the `keep_recent_n_tool_results` most recent pairs.
    RemoveToolResult { keep_recent_n_tool_results: usize },
    /// Drop the oldest messages until the estimated token count of what
    /// remains is at or under `limit_tokens`.
    TokenLimit { limit_tokens: u64 },
    /// Keep only the `n` most recent messages, dropping older ones whole.
    KeepRecentN { n: usize },
}

impl EditStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            EditStrategy::RemoveToolResult { .. } => "remove_tool_result",
            EditStrategy::TokenLimit { .. } => "token_limit",
            EditStrategy::KeepRecentN { .. } => "keep_recent_n",
        }
    }
}
