use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled between tiles to abandon a frame early.
pub trait CancellationChecker: Clone + Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// For offline renders that always run to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancellationChecker for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancels once the shared flag is raised, e.g. by a resize handler.
#[derive(Clone, Debug, Default)]
pub struct AtomicBoolChecker {
    flag: Arc<AtomicBool>,
}

impl AtomicBoolChecker {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Raise the flag for every clone of this checker.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Lower the flag so the checker can be reused for the next frame.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

impl CancellationChecker for AtomicBoolChecker {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
