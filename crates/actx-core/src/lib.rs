//! Shared interfaces and media helpers consumed by the normalize/convert
//! layer: the `MessageStore`/`PublicURLResolver` boundaries this core
//! talks to but never implements, pagination echoes, cooperative
//! cancellation, and the data-URL/base64 plumbing used by best-effort
//! image inlining.

mod cancellation;
mod media;
mod pagination;
mod resolver;
mod store;

pub use cancellation::CancellationToken;
pub use media::{
    build_data_url, decode_base64, encode_base64, parse_data_url, try_inline_asset, InlinedImage,
    IMAGE_FETCH_TIMEOUT,
};
pub use pagination::{PageRequest, PageResult};
pub use resolver::{NullResolver, PublicURLResolver};
pub use store::MessageStore;

pub use actx_types::{Error, Result};
