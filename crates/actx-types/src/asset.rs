use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to binary content (image or file) held by a caller-owned
/// store, addressed by opaque key rather than embedded inline.
///
/// `size_bytes` and `filename` are advisory metadata carried through
/// round-trips; nothing in this crate reads their contents except to copy
/// them forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub key: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Asset {
    pub fn new(key: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Asset {
            key: key.into(),
            mime_type: mime_type.into(),
            size_bytes: None,
            filename: None,
        }
    }
}

/// A time-bounded, publicly fetchable URL resolved for an [`Asset`] on
/// output. Present in the output payload only for the `canonical` format
/// (see the output assembler), since provider wire formats either carry
/// inline bytes or their own URL fields directly on the part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicURL {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
