//! Persistence scheduler: flushes the store on a fixed interval until the
//! session is cancelled.

use crate::store::TallyStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default time between periodic flushes.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Intervals below this are raised to it; a zero period would spin.
const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(10);

/// Counters returned when the scheduler task finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub flushes: u64,
    pub failures: u64,
}

pub struct PersistenceScheduler {
    store: Arc<TallyStore>,
    path: PathBuf,
    interval: Duration,
}

impl PersistenceScheduler {
    pub fn new(store: Arc<TallyStore>, path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            store,
            path: path.into(),
            interval: interval.max(MIN_FLUSH_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run [`run`](Self::run) on a new tokio task.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<SchedulerReport> {
        tokio::spawn(self.run(token))
    }

    /// Flush every interval until `token` is cancelled.
    ///
    /// The first flush happens one full interval after the call. Cancellation
    /// is checked before each flush; a flush that has already started runs to
    /// completion before this future resolves.
    pub async fn run(self, token: CancellationToken) -> SchedulerReport {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = SchedulerReport::default();

        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "persistence scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if token.is_cancelled() {
                break;
            }

            let store = Arc::clone(&self.store);
            let path = self.path.clone();
            match tokio::task::spawn_blocking(move || store.flush(&path)).await {
                Ok(Ok(flushed)) => {
                    report.flushes += 1;
                    tracing::debug!(keys = flushed.keys, total = flushed.total, "periodic flush");
                }
                Ok(Err(e)) => {
                    report.failures += 1;
                    tracing::warn!(error = %e, "periodic flush failed, retrying next interval");
                }
                Err(e) => {
                    report.failures += 1;
                    tracing::error!(error = %e, "periodic flush task did not complete");
                }
            }
        }

        tracing::debug!(flushes = report.flushes, failures = report.failures, "persistence scheduler stopped");
        report
    }
}
