//! Cooperative cancellation for long-running comparisons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{CompareError, CompareResult};

/// A cloneable flag checked between walked entries and compared files.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `Err(CompareError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> CompareResult<()> {
        if self.is_cancelled() {
            Err(CompareError::Cancelled)
        } else {
            Ok(())
        }
    }
}
