//! Shutdown coordinator: the `Running → Stopped` state machine of a session.
//!
//! Signal listeners and the intake loop only call
//! [`ShutdownCoordinator::request_stop`], which flips the state and cancels
//! the session's [`CancellationToken`]. The final flush runs afterwards on the
//! session's own task, never inside a signal callback.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio_util::sync::CancellationToken;

const RUNNING: u8 = 0;
const STOPPED: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT, or Ctrl+c read from a raw-mode terminal.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// The configured exit key was pressed.
    ExitKey,
    /// The key source ran out of events.
    SourceClosed,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => write!(f, "interrupt"),
            ShutdownReason::Terminate => write!(f, "terminate"),
            ShutdownReason::ExitKey => write!(f, "exit key"),
            ShutdownReason::SourceClosed => write!(f, "source closed"),
        }
    }
}

/// Shared stop flag for one session. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    state: AtomicU8,
    reason: std::sync::OnceLock<ShutdownReason>,
    token: CancellationToken,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
            reason: std::sync::OnceLock::new(),
            token: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => SessionState::Running,
            _ => SessionState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    /// Reason recorded by the first successful [`request_stop`](Self::request_stop).
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.get().copied()
    }

    /// Token cancelled when the session stops. Clone it into background work.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Move to `Stopped`. Returns `true` for the request that performed the
    /// transition and `false` for every later one, which is otherwise a no-op.
    pub fn request_stop(&self, reason: ShutdownReason) -> bool {
        let won = self
            .state
            .compare_exchange(RUNNING, STOPPED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            let _ = self.reason.set(reason);
            tracing::info!(%reason, "shutdown requested");
            self.token.cancel();
        } else {
            tracing::debug!(%reason, "shutdown already in progress, ignoring");
        }
        won
    }

    /// Resolve once the session has been asked to stop.
    pub async fn stopped(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_running() {
        let c = ShutdownCoordinator::new();
        assert_eq!(c.state(), SessionState::Running);
        assert!(!c.token().is_cancelled());
        assert_eq!(c.reason(), None);
    }

    #[test]
    fn first_request_wins() {
        let c = ShutdownCoordinator::new();
        assert!(c.request_stop(ShutdownReason::Terminate));
        assert!(!c.request_stop(ShutdownReason::Interrupt));
        assert_eq!(c.state(), SessionState::Stopped);
        assert_eq!(c.reason(), Some(ShutdownReason::Terminate));
        assert!(c.token().is_cancelled());
    }

    #[test]
    fn racing_requests_transition_once() {
        let c = Arc::new(ShutdownCoordinator::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let c = Arc::clone(&c);
                std::thread::spawn(move || c.request_stop(ShutdownReason::Interrupt))
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn stopped_resolves_after_request() {
        let c = Arc::new(ShutdownCoordinator::new());
        let waiter = {
            let c = Arc::clone(&c);
            tokio::spawn(async move { c.stopped().await })
        };
        c.request_stop(ShutdownReason::ExitKey);
        waiter.await.unwrap();
    }
}
