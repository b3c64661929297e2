//! Cooperative cancellation
//!
//! Multi-step fetch sequences poll a [`CancellationSignal`] between remote
//! calls and stop early once it reports `true`.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;

/// Caller-pollable cancellation check.
pub trait CancellationSignal: Send + Sync {
    fn should_cancel(&self) -> bool;
}

/// Signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSignal for NeverCancel {
    fn should_cancel(&self) -> bool {
        false
    }
}

impl CancellationSignal for CancellationToken {
    fn should_cancel(&self) -> bool {
        self.is_cancelled()
    }
}

impl CancellationSignal for AtomicBool {
    fn should_cancel(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}
