//! Debounced autosave timer.
//!
//! Every state mutation schedules a trailing-edge save; a new mutation
//! inside the window resets the timer, so a burst of edits coalesces into a
//! single write. The save closure reads its snapshot fresh at fire time,
//! which makes the next successful cycle an implicit retry after a generic
//! persistence failure.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default trailing-edge delay between the last mutation and the save.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

type SaveFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Trailing-edge debounce timer around a save closure.
pub struct Autosaver {
    delay: Duration,
    save: SaveFn,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Autosaver {
    pub fn new(
        delay: Duration,
        save: impl Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            delay,
            save: Arc::new(save),
            pending: Mutex::new(None),
        }
    }

    /// Schedules a save after the debounce delay, resetting any timer that
    /// is already running.
    pub fn schedule(&self) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let save = self.save.clone();
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            save().await;
        }));
    }

    /// Runs a pending save immediately instead of waiting out the delay.
    /// No-op when nothing is scheduled.
    pub async fn flush(&self) {
        let had_pending = {
            let mut pending = self.pending.lock().unwrap();
            match pending.take() {
                Some(handle) => {
                    handle.abort();
                    true
                }
                None => false,
            }
        };
        if had_pending {
            (self.save)().await;
        }
    }

    /// Drops any pending save without running it.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.cancel();
    }
}
