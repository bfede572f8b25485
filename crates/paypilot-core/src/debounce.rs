//! Cancellable single-slot timer for debounced search

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs a callback once input has been quiet for `window`.
///
/// Holds at most one live timer. Scheduling replaces the pending timer,
/// and dropping the debouncer cancels it.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the timer; `callback` runs after a full quiet window.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            callback.await;
        }));
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is armed and has not yet fired
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
