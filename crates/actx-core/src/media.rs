use std::time::Duration;

use actx_types::Asset;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::cancellation::CancellationToken;
use crate::resolver::PublicURLResolver;

/// Per-fetch deadline for best-effort image inlining. On timeout the
/// caller falls back to a URL-reference representation; the overall
/// conversion is never failed by a slow or dead blob store.
pub const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// The result of successfully inlining a remote asset's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedImage {
    pub media_type: String,
    pub data_base64: String,
}

/// Parses a `data:<mime>;base64,<payload>` URL, the shape an already-
/// inlined provider payload uses. Returns `None` for anything else —
/// callers fall back to treating the string as an opaque URL.
pub fn parse_data_url(url: &str) -> Option<(String, String)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    if mime.is_empty() {
        return None;
    }
    Some((mime.to_string(), payload.to_string()))
}

pub fn build_data_url(media_type: &str, data_base64: &str) -> String {
    format!("data:{media_type};base64,{data_base64}")
}

pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(data)
}

/// Best-effort: resolve `asset` to a public URL and fetch its bytes,
/// producing an inlined (media_type, base64) pair. Returns `None` on any
/// failure — resolver error, HTTP error, or timeout — never an `Err`,
/// since image inlining failures must not poison the overall conversion.
///
/// Checks `token` once before the resolver call and once before the HTTP
/// fetch, per the conversion model's cancellation checkpoints; a
/// cancellation here surfaces as `None` too, since the caller (the
/// provider-B converter) is responsible for checking cancellation itself
/// at the message-iteration level and failing the whole call there.
pub async fn try_inline_asset(
    asset: &Asset,
    resolver: &dyn PublicURLResolver,
    client: &reqwest::Client,
    token: &CancellationToken,
) -> Option<InlinedImage> {
    if token.is_cancelled() {
        return None;
    }
    let public_url = resolver.resolve(&asset.key).await.ok()?;

    if token.is_cancelled() {
        return None;
    }
    let fetch = client.get(&public_url.url).send();
    let response = tokio::time::timeout(IMAGE_FETCH_TIMEOUT, fetch).await.ok()?.ok()?;
    let bytes = tokio::time::timeout(IMAGE_FETCH_TIMEOUT, response.bytes()).await.ok()?.ok()?;

    Some(InlinedImage {
        media_type: asset.mime_type.clone(),
        data_base64: encode_base64(&bytes),
    })
}
