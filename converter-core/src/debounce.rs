//! Debounced, cancellable job scheduling for interactive callers.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces rapid-fire submissions: each new job cancels the previously
/// scheduled (or still-running) one, waits `delay`, then runs.
///
/// This is the edit-amount-then-convert flow of an interactive caller:
/// only the most recent request's result is ever applied. Cancellation is
/// cooperative at await points, so an aborted conversion never gets far
/// enough to publish its result or touch the rate cache.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(None),
        }
    }

    /// Schedules `job`, cancelling whatever was scheduled before it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut current = self.current.lock().unwrap();
        if let Some(previous) = current.take() {
            previous.abort();
        }
        *current = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        }));
    }

    /// Cancels the pending job, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.current.lock().unwrap().take() {
            handle.abort();
        }
    }
}
