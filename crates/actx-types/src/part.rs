use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::asset::Asset;

/// An open bag of part-level metadata, closed over a fixed vocabulary of
/// well-known keys but tolerant of anything else.
///
/// Accessors never panic: a missing or mistyped key yields `None` (or the
/// documented default) rather than an error. Unknown keys are preserved
/// verbatim across normalize/convert round-trips even though nothing here
/// reads them — this is what lets newer provider fields survive a hop
/// through the canonical form without this crate needing to know about
/// them yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(pub Map<String, Value>);

impl Meta {
    pub fn new() -> Self {
        Meta(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn arguments(&self) -> Option<&Value> {
        self.0.get("arguments")
    }

    pub fn tool_call_id(&self) -> Option<&str> {
        self.str_field("tool_call_id")
    }

    /// Defaults to `false` when absent or not a bool, per the closed
    /// vocabulary's zero-value contract.
    pub fn is_error(&self) -> bool {
        self.0.get("is_error").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn source_type(&self) -> Option<&str> {
        self.str_field("source_type")
    }

    pub fn signature(&self) -> Option<&str> {
        self.str_field("signature")
    }

    pub fn media_type(&self) -> Option<&str> {
        self.str_field("media_type")
    }

    pub fn data(&self) -> Option<&str> {
        self.str_field("data")
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn cache_control(&self) -> Option<&Value> {
        self.0.get("cache_control")
    }
}

/// A single unit of content within a [`crate::Message`].
///
/// The variant tag is the closed part-type vocabulary; within each variant
/// `meta` carries the closed key vocabulary documented on [`Meta`] plus
/// whatever else a provider attached, preserved opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    Thinking {
        text: String,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        asset: Option<Asset>,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        asset: Option<Asset>,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    ToolCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    ToolResult {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
}

impl Meta {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Part {
    pub fn kind(&self) -> &'static str {
        match self {
            Part::Text { .. } => "text",
            Part::Thinking { .. } => "thinking",
            Part::Image { .. } => "image",
            Part::File { .. } => "file",
            Part::ToolCall { .. } => "tool_call",
            Part::ToolResult { .. } => "tool_result",
        }
    }

    pub fn meta(&self) -> &Meta {
        match self {
            Part::Text { meta, .. }
            | Part::Thinking { meta, .. }
            | Part::Image { meta, .. }
            | Part::File { meta, .. }
            | Part::ToolCall { meta, .. }
            | Part::ToolResult { meta, .. } => meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        match self {
            Part::Text { meta, .. }
            | Part::Thinking { meta, .. }
            | Part::Image { meta, .. }
            | Part::File { meta, .. }
            | Part::ToolCall { meta, .. }
            | Part::ToolResult { meta, .. } => meta,
        }
    }

    pub fn is_tool_call(&self) -> bool {
        matches!(self, Part::ToolCall { .. })
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, Part::ToolResult { .. })
    }

    pub fn tool_call_id(&self) -> Option<&str> {
        self.meta().tool_call_id()
    }
}
