//! Cooperative cancellation shared by the driver, the work units, and collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

/// Cooperative cancellation token.
///
/// Besides the atomic flag, the token owns a channel whose sender is dropped on
/// cancellation. Waiters can therefore block on [`CancellationToken::signal`]
/// inside a `crossbeam_channel::select!` and wake up the moment cancellation
/// fires, instead of polling the flag.
///
/// # Example
/// ```
/// use decisionbench_core::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
    signal: Receiver<()>,
}

struct Inner {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(trigger)),
            }),
            signal,
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            // Dropping the only sender disconnects every receiver clone.
            self.inner.trigger.lock().take();
        }
    }

    /// Channel that becomes ready (disconnected) once the token is cancelled.
    ///
    /// Nothing is ever sent on it; use it as a `select!` arm.
    #[must_use]
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }

    /// Block for at most `timeout`, returning `true` if cancellation fired.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.signal.recv_timeout(timeout) {
            Err(RecvTimeoutError::Disconnected) => true,
            Ok(()) | Err(RecvTimeoutError::Timeout) => self.is_cancelled(),
        }
    }

    /// Block until the token is cancelled.
    pub fn wait(&self) {
        let _ = self.signal.recv();
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
