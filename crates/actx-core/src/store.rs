use actx_types::{Error, Message};
use async_trait::async_trait;

use crate::pagination::{PageRequest, PageResult};

/// The opaque persistence boundary this core reads from and writes to.
///
/// No implementation lives in this crate: the core only consumes this
/// trait. A concrete `MessageStore` owns ordering, cursor encoding, and
/// durable storage — all explicitly out of scope here.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, message: Message) -> Result<(), Error>;
    async fn page(&self, session_id: &str, request: PageRequest) -> Result<PageResult<Message>, Error>;
    async fn delete_session(&self, session_id: &str) -> Result<(), Error>;
}
