//! actx-sdk: the public facade over the agent-context message format
//! translation core.
//!
//! # Overview
//!
//! A session writer normalizes provider-shaped ingress into the canonical
//! `Message`/`Part` shape once, at append time; a retrieval path runs zero
//! or more edit strategies over a stored sequence and converts the result
//! into whichever wire format the caller asked for. This crate wires those
//! two directions (ingress via [`normalize`]/[`ingest`], egress via
//! [`convert`]) behind the three operation clusters of the spec this crate
//! implements (§6): convert, normalize, and the persisted canonical layout.
//!
//! This facade carries no logic of its own beyond that wiring:
//! - `actx-types`: the canonical `Message`/`Part`/`Asset` model.
//! - `actx-core`: the `MessageStore`/`PublicURLResolver` traits, pagination
//!   echoes, cancellation, and best-effort image-inlining helpers.
//! - `actx-providers`: the three normalizers and four converters (including
//!   canonical-echo).
//! - `actx-engine`: the edit-strategy engine and output assembler.
//!
//! # Example
//!
//! ```
//! use actx_core::NullResolver;
//! use actx_sdk::{convert, ingest, ConvertRequest, IngestRequest};
//! use actx_types::Format;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let message = ingest(IngestRequest {
//!     source_format: Format::OpenAI,
//!     session_id: "session-1".to_string(),
//!     parent_id: None,
//!     id: None,
//!     role: "user".to_string(),
//!     parts: vec![json!({"type": "text", "text": "hi"})],
//!     user_meta: Default::default(),
//! })?;
//!
//! let resolver = NullResolver;
//! let out = convert(ConvertRequest::new(vec![message], Format::OpenAI, &resolver)).await?;
//! assert_eq!(out.items, json!([{"role": "user", "content": "hi"}]));
//! # Ok(())
//! # }
//! ```

mod convert;
mod normalize;
mod persisted;

pub use actx_core::{CancellationToken, MessageStore, PageRequest, PageResult, PublicURLResolver};
pub use actx_engine::{CharsDiv4Estimator, ModelAwareEstimator, TokenEstimator};
pub use actx_providers::format_names;
pub use actx_types::{Error, ErrorKind, EditStrategy, Format, Message, Part, Result, Role};

pub use convert::{convert, convert_with_estimator, ConvertRequest};
pub use normalize::{ingest, normalize, IngestRequest, NormalizeRequest};
pub use persisted::{from_persisted_json, to_persisted_json};
