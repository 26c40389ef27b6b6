//! Shared cooperative cancellation for long-running engines.
//!
//! The placer, router and extractor all run iterative loops that can take
//! an unbounded amount of wall-clock time on a large netlist; a caller (the
//! CLI's signal handler, a test harness with a deadline) needs a way to ask
//! one to stop early without tearing down the thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag an engine polls between iterations and a caller sets from another
/// thread to request early termination.
///
/// Cloning shares the same underlying flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, unset token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Requests cancellation. Safe to call from any thread, any number of
    /// times.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clone() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
