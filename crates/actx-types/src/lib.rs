//! Canonical message/part data model shared by every crate in the
//! agent-context conversion core.
//!
//! This crate has no I/O and no provider-specific knowledge: it defines
//! the shape conversions normalize into and convert out of, plus the
//! closed vocabularies (part types, meta keys, error kinds) that keep
//! every other crate honest.

mod asset;
mod error;
mod format;
mod message;
mod part;
mod strategy;

pub use asset::{Asset, PublicURL};
pub use error::{Error, ErrorKind, Result};
pub use format::Format;
pub use message::{validate, Message, MessageMeta, Role, TaskStatus};
pub use part::{Meta, Part};
pub use strategy::EditStrategy;
