//! OS signal listener feeding the [`ShutdownCoordinator`].
//!
//! The listener only records the request; it never touches the store.

use crate::shutdown::{ShutdownCoordinator, ShutdownReason};
use std::sync::Arc;

/// Forward SIGINT (and SIGTERM on Unix) to `coordinator` for as long as the
/// returned future is polled.
///
/// Every delivery is forwarded, so a second Ctrl+c during shutdown reaches
/// [`ShutdownCoordinator::request_stop`] and is ignored there instead of
/// killing the process mid-flush.
pub async fn forward_signals(coordinator: Arc<ShutdownCoordinator>) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        loop {
            tokio::select! {
                Some(()) = interrupt.recv() => {
                    coordinator.request_stop(ShutdownReason::Interrupt);
                }
                Some(()) = terminate.recv() => {
                    coordinator.request_stop(ShutdownReason::Terminate);
                }
                else => return Ok(()),
            }
        }
    }

    #[cfg(not(unix))]
    {
        loop {
            tokio::signal::ctrl_c().await?;
            coordinator.request_stop(ShutdownReason::Interrupt);
        }
    }
}
