//! Event intake loop: drains a [`KeySource`] into the store.
//!
//! Runs on a blocking thread for the whole session. Each event is handled on
//! its own: a source error is logged and the loop carries on, so one bad
//! event cannot end tracking. A source that keeps failing is polled less
//! often, and only the start of a failure streak is logged at warn level.

use crate::normalizer::normalize;
use crate::shutdown::{ShutdownCoordinator, ShutdownReason};
use crate::source::KeySource;
use crate::store::TallyStore;
use crate::types::InputEvent;
use std::sync::Arc;
use std::time::Duration;

/// How long a single poll may block before the loop re-checks the stop flag.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Longest pause between polls of a failing source.
pub const MAX_ERROR_BACKOFF: Duration = Duration::from_millis(500);

/// Consecutive errors logged at warn level before the rest go to debug.
const LOUD_ERRORS: u32 = 3;

/// Counters returned when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeReport {
    pub presses: u64,
    pub errors: u64,
}

pub struct IntakeLoop<S> {
    source: S,
    store: Arc<TallyStore>,
    coordinator: Arc<ShutdownCoordinator>,
    poll_timeout: Duration,
}

impl<S: KeySource> IntakeLoop<S> {
    pub fn new(source: S, store: Arc<TallyStore>, coordinator: Arc<ShutdownCoordinator>) -> Self {
        Self {
            source,
            store,
            coordinator,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Consume events until the session stops or the source closes.
    ///
    /// The source is dropped when this returns, which lets terminal sources
    /// restore the terminal.
    pub fn run(mut self) -> IntakeReport {
        let mut report = IntakeReport::default();
        let mut streak: u32 = 0;

        while self.coordinator.is_running() {
            let polled = self.source.poll_event(self.poll_timeout);
            if polled.is_ok() && streak > 0 {
                if streak > LOUD_ERRORS {
                    tracing::info!(errors = streak, "key source recovered");
                }
                streak = 0;
            }

            match polled {
                Ok(None) => {}
                Ok(Some(InputEvent::Press(press))) => {
                    let id = normalize(&press);
                    let count = self.store.increment(&id);
                    report.presses += 1;
                    tracing::trace!(key = %id, count, "key press");
                }
                Ok(Some(InputEvent::Interrupt)) => {
                    self.coordinator.request_stop(ShutdownReason::Interrupt);
                }
                Ok(Some(InputEvent::Exit)) => {
                    self.coordinator.request_stop(ShutdownReason::ExitKey);
                }
                Ok(Some(InputEvent::Closed)) => {
                    self.coordinator.request_stop(ShutdownReason::SourceClosed);
                    break;
                }
                Err(e) => {
                    report.errors += 1;
                    streak = streak.saturating_add(1);
                    let backoff = error_backoff(self.poll_timeout, streak);
                    if streak <= LOUD_ERRORS {
                        tracing::warn!(error = %e, "skipping unreadable key event");
                    } else if streak == LOUD_ERRORS + 1 {
                        tracing::warn!(error = %e, "key source keeps failing; backing off and logging further errors at debug");
                    } else {
                        tracing::debug!(error = %e, streak, ?backoff, "skipping unreadable key event");
                    }
                    self.pause(backoff);
                }
            }
        }

        tracing::debug!(presses = report.presses, errors = report.errors, "intake loop finished");
        report
    }

    /// Sleep for `total`, in `poll_timeout` slices, waking early on stop.
    fn pause(&self, total: Duration) {
        let slice = self.poll_timeout.max(Duration::from_millis(1));
        let mut left = total;
        while !left.is_zero() && self.coordinator.is_running() {
            let step = left.min(slice);
            std::thread::sleep(step);
            left -= step;
        }
    }
}

/// Pause after the `streak`-th consecutive source error: `base` doubled per
/// error after the first, capped at [`MAX_ERROR_BACKOFF`].
fn error_backoff(base: Duration, streak: u32) -> Duration {
    let doublings = streak.saturating_sub(1).min(16);
    base.saturating_mul(1 << doublings).min(MAX_ERROR_BACKOFF.max(base))
}
