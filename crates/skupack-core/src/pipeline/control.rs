//! Cooperative cancellation for a pipeline run.
//!
//! The caller keeps a clone of the token (e.g. a Ctrl-C handler) and sets it;
//! the run loop polls it at item and sub-step boundaries and unwinds to idle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Cleared at the start of every run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
