use actx_core::{CancellationToken, PublicURLResolver};
use actx_types::{Error, Format, Message, Part, Role};
use async_trait::async_trait;
use serde_json::Value;

/// Ingress transform from a provider-shaped message into canonical form.
///
/// Called once, synchronously, per ingress message — normalization never
/// suspends, since it does no I/O (it only reshapes a payload already in
/// hand).
pub trait Normalizer {
    fn format(&self) -> Format;

    /// `role` and `parts` are the provider payload's own role string and
    /// content-block array. Returns the canonical role plus the ordered
    /// canonical Part sequence, or an error if the ingress shape is
    /// rejected outright (`InvalidRole`, `InvalidShape`, ...).
    fn normalize(&self, role: &str, parts: Vec<Value>) -> Result<(Role, Vec<Part>), Error>;
}

/// Everything a `Converter` needs beyond the message sequence itself: the
/// asset resolver, the cancellation signal, and an HTTP client reused
/// across calls for best-effort image inlining.
pub struct ConvertContext<'a> {
    pub resolver: &'a dyn PublicURLResolver,
    pub cancellation: CancellationToken,
    pub http_client: reqwest::Client,
}

impl<'a> ConvertContext<'a> {
    pub fn new(resolver: &'a dyn PublicURLResolver) -> Self {
        ConvertContext {
            resolver,
            cancellation: CancellationToken::new(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// The converter's output payload. Each target format's shape differs
/// structurally (an array of chat messages for provider A/B, an array of
/// `contents` for provider C, an array of canonical Message objects for
/// the canonical-echo converter) so this is an untyped JSON tree; the thin
/// wrapper exists so the output assembler can ask about flat-sequence
/// length (for the ordering property) without every caller re-deriving
/// that from raw `Value` matching.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedPayload(pub Value);

impl ConvertedPayload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `Some(len)` when the payload is a flat JSON array (true of every
    /// converter this core ships); `None` otherwise.
    pub fn flat_len(&self) -> Option<usize> {
        self.0.as_array().map(|a| a.len())
    }
}

/// Egress transform from canonical form into a provider-shaped payload.
///
/// `convert` is async because provider-B's image inlining may suspend on
/// an HTTP fetch; providers that never suspend still implement the async
/// signature so the three are interchangeable behind `Box<dyn Converter>`.
#[async_trait]
pub trait Converter {
    fn format(&self) -> Format;

    async fn convert(&self, messages: &[Message], ctx: &ConvertContext<'_>) -> Result<ConvertedPayload, Error>;
}
