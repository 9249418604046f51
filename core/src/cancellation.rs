use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Error;

/// A cooperative cancellation flag, polled at well-defined checkpoints
/// inside hot loops (noder outer iterations, STR-tree bulk-build levels,
/// overlay graph walks).
///
/// Cloning shares the same underlying flag; setting it from any clone (e.g.
/// from a signal handler or a supervisory thread) is visible to every
/// holder on their next checkpoint poll. This is the re-entrant-safe
/// callback mechanism the concurrency model calls for: `cancel()` is just
/// an atomic store, safe to call from anywhere, any number of times.
#[derive(Clone, Debug, Default)]
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

    /// Checkpoint: returns `Err(Error::Interrupted)` if cancellation has
    /// been requested since the token was created or last checked.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancel_is_visible_to_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(token.check().is_ok());
        clone.cancel();
        assert!(matches!(token.check(), Err(Error::Interrupted)));
    }
}
