//! Polling Reconciliation Loop
//!
//! Recurring background re-fetch keeping a store's cache approximately fresh
//! without server push. Failures are transient: the cache is left untouched,
//! a separate polling error is recorded, and the loop keeps running. Each
//! refresh is awaited inline and the interval skips missed ticks, so a
//! still-pending refresh can never overlap the next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::utils::error::StoreResult;

/// A store the polling loop can drive.
#[async_trait]
pub trait Pollable: Send + Sync {
    /// Authoritative fetch merging server state into the cache. Must not
    /// touch the store's action-level `loading`/`error` fields; reconciliation
    /// reports on its own channel.
    async fn poll_refresh(&mut self) -> StoreResult<()>;

    /// Record a transient reconciliation failure without discarding cached
    /// data.
    fn record_poll_failure(&mut self, message: String);
}

/// Background reconciliation driver. Stopped or running; dropping the loop
/// stops it.
#[derive(Debug, Default)]
pub struct PollingLoop {
    handle: Option<JoinHandle<()>>,
    is_polling: Arc<AtomicBool>,
}

impl PollingLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_polling(&self) -> bool {
        self.is_polling.load(Ordering::SeqCst)
    }

    /// Arm the recurring timer. An already-running loop is restarted with the
    /// new store and period.
    pub fn start<S>(&mut self, store: Arc<RwLock<S>>, period: Duration)
    where
        S: Pollable + 'static,
    {
        self.stop();
        self.is_polling.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.is_polling);

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A refresh still in flight when the next tick is due means that
            // tick is skipped, never queued behind it.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick of a tokio interval fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let mut store = store.write().await;
                match store.poll_refresh().await {
                    Ok(()) => tracing::debug!("polling reconciliation tick applied"),
                    Err(err) => {
                        tracing::warn!("polling reconciliation failed: {err}");
                        store.record_poll_failure(err.to_string());
                    }
                }
            }
        }));
    }

    /// Disarm the timer. Idempotent.
    pub fn stop(&mut self) {
        self.is_polling.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PollingLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
