//! Session: wires the intake loop, persistence scheduler and shutdown
//! coordinator around one shared [`TallyStore`].
//!
//! ```text
//! KeySource ──► IntakeLoop ──► TallyStore ◄── PersistenceScheduler
//!                                   ▲
//!        signals ──► ShutdownCoordinator ──► final flush
//! ```
//!
//! Shutdown order: stop flag → scheduler joined (an in-flight flush finishes)
//! → intake joined (bounded wait) → final flush. The final flush is therefore
//! the last write, and it takes the store lock after every increment that
//! happened before the stop.

use crate::error::StoreError;
use crate::intake::{IntakeLoop, IntakeReport, DEFAULT_POLL_TIMEOUT};
use crate::scheduler::{PersistenceScheduler, SchedulerReport, DEFAULT_FLUSH_INTERVAL};
use crate::shutdown::{ShutdownCoordinator, ShutdownReason};
use crate::source::KeySource;
use crate::store::{FlushReport, TallyStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Tunables for one tracking session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub data_file: PathBuf,
    pub flush_interval: Duration,
    pub poll_timeout: Duration,
    /// Upper bound on waiting for the intake thread after a stop request.
    pub intake_join_timeout: Duration,
}

impl SessionSettings {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            intake_join_timeout: Duration::from_secs(1),
        }
    }

    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

/// What happened during a session.
#[derive(Debug)]
pub struct SessionSummary {
    pub reason: Option<ShutdownReason>,
    /// `None` if the intake thread panicked or did not stop in time.
    pub intake: Option<IntakeReport>,
    pub scheduler: SchedulerReport,
    pub final_flush: Result<FlushReport, StoreError>,
}

pub struct Session {
    store: Arc<TallyStore>,
    coordinator: Arc<ShutdownCoordinator>,
    settings: SessionSettings,
}

impl Session {
    pub fn new(store: Arc<TallyStore>, settings: SessionSettings) -> Self {
        Self {
            store,
            coordinator: Arc::new(ShutdownCoordinator::new()),
            settings,
        }
    }

    pub fn store(&self) -> Arc<TallyStore> {
        Arc::clone(&self.store)
    }

    /// Handle for anything that may stop the session (signal listeners, tests).
    pub fn coordinator(&self) -> Arc<ShutdownCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Track `source` until the coordinator is stopped, then flush once more.
    pub async fn run<S>(self, source: S) -> SessionSummary
    where
        S: KeySource + 'static,
    {
        let Session { store, coordinator, settings } = self;
        let token = coordinator.token();

        let scheduler = PersistenceScheduler::new(
            Arc::clone(&store),
            settings.data_file.clone(),
            settings.flush_interval,
        )
        .spawn(token.clone());

        let intake = {
            let intake = IntakeLoop::new(source, Arc::clone(&store), Arc::clone(&coordinator))
                .with_poll_timeout(settings.poll_timeout);
            tokio::task::spawn_blocking(move || intake.run())
        };

        tracing::info!(path = %settings.data_file.display(), "tracking session started");
        coordinator.stopped().await;

        let scheduler = scheduler.await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "persistence scheduler did not shut down cleanly");
            SchedulerReport::default()
        });

        let intake = match tokio::time::timeout(settings.intake_join_timeout, intake).await {
            Ok(Ok(report)) => Some(report),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "intake loop did not shut down cleanly");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = settings.intake_join_timeout.as_millis() as u64,
                    "intake loop still blocked, flushing without it"
                );
                None
            }
        };

        // Background work has stopped; a direct blocking write is fine here.
        let final_flush = store.flush(&settings.data_file);
        match &final_flush {
            Ok(r) => tracing::info!(keys = r.keys, total = r.total, "final flush complete"),
            Err(e) => tracing::error!(error = %e, "final flush failed"),
        }

        SessionSummary {
            reason: coordinator.reason(),
            intake,
            scheduler,
            final_flush,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::types::{InputEvent, KeyPress};

    /// Emits `n` presses of `c`, then idles.
    struct Burst {
        c: char,
        left: usize,
    }

    impl KeySource for Burst {
        fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>, SourceError> {
            if self.left == 0 {
                std::thread::sleep(timeout);
                return Ok(None);
            }
            self.left -= 1;
            Ok(Some(InputEvent::Press(KeyPress::Character(self.c))))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_flushes_everything_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        let store = Arc::new(TallyStore::new());
        let settings = SessionSettings::new(&path)
            .flush_interval(Duration::from_millis(20))
            .poll_timeout(Duration::from_millis(5));
        let session = Session::new(Arc::clone(&store), settings);
        let coordinator = session.coordinator();

        let run = tokio::spawn(session.run(Burst { c: 'q', left: 500 }));
        while store.total() < 500 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(coordinator.request_stop(ShutdownReason::Terminate));
        assert!(!coordinator.request_stop(ShutdownReason::Interrupt));

        let summary = run.await.unwrap();
        assert_eq!(summary.reason, Some(ShutdownReason::Terminate));
        assert_eq!(summary.intake.map(|r| r.presses), Some(500));
        assert_eq!(summary.final_flush.unwrap().total, 500);

        let on_disk = TallyStore::new();
        on_disk.load(&path);
        assert_eq!(on_disk.snapshot().get("q"), 500);
    }

    #[tokio::test]
    async fn final_flush_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("counts.json");
        let session = Session::new(Arc::new(TallyStore::new()), SessionSettings::new(&path));
        let coordinator = session.coordinator();
        coordinator.request_stop(ShutdownReason::Interrupt);

        let summary = session.run(Burst { c: 'a', left: 0 }).await;
        assert!(summary.final_flush.is_err());
        assert_eq!(summary.reason, Some(ShutdownReason::Interrupt));
    }
}
