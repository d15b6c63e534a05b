use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actx_types::Error;

/// A cooperative cancellation signal, checked at the boundaries spec'd for
/// conversion: before each outer Message iteration, before each remote
/// image fetch, and before each edit-strategy step.
///
/// Cloning shares the same underlying flag — every clone observes a
/// `cancel()` call made through any other clone. `Default` yields a token
/// that never cancels.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns `Err(Error::cancelled())` if this token has been cancelled,
    /// `Ok(())` otherwise. Call at every checkpoint named in the
    /// concurrency model rather than only once per operation.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::cancelled())
        } else {
            Ok(())
        }
    }
}
