//! Cooperative cancellation for long searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::TraceError;

/// A shared flag that solvers poll between frontier pops.
///
/// Clones share the same flag: keep one clone on the calling thread and
/// hand another to the tracer. Once cancelled, a token stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// `Err(TraceError::Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> Result<(), TraceError> {
        if self.is_cancelled() {
            Err(TraceError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Poll an optional token.
pub fn check_cancel(token: Option<&CancelToken>) -> Result<(), TraceError> {
    token.map_or(Ok(()), CancelToken::check)
}
