use actx_types::{Error, PublicURL};
use async_trait::async_trait;

/// Maps an asset storage key to a time-bounded, publicly fetchable URL.
///
/// Implementations may perform I/O (a blob-store HEAD/sign call) and must
/// be safe to share across concurrent conversions — this core never
/// caches the result itself, per the "never cached inside the core"
/// requirement on `PublicURL`.
#[async_trait]
pub trait PublicURLResolver: Send + Sync {
    async fn resolve(&self, asset_key: &str) -> Result<PublicURL, Error>;
}

/// A resolver that always fails to resolve. Useful in tests and as a
/// placeholder where no blob store is wired up.
pub struct NullResolver;

#[async_trait]
impl PublicURLResolver for NullResolver {
    async fn resolve(&self, _asset_key: &str) -> Result<PublicURL, Error> {
        Err(Error::asset_unresolved(None))
    }
}
