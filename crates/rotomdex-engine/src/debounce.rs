//! Quiet-period coalescing for rapid input events.

use std::time::Duration;

use tokio::task::JoinHandle;

/// How long search input must stay quiet before a recomputation fires.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(180);

/// One pending delayed action; re-triggering aborts and re-arms it.
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Arm (or re-arm) the timer; `action` runs once the quiet period
    /// elapses without another trigger.
    pub fn trigger<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action();
        }));
    }

    /// Drop any pending action without running it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_QUIET)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
