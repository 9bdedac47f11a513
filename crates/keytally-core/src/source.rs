//! The seam between keytally and whatever delivers key presses.

use crate::error::SourceError;
use crate::types::InputEvent;
use std::time::Duration;

/// Trait implemented by each key event source.
///
/// The intake loop calls [`poll_event`](KeySource::poll_event) repeatedly on a
/// blocking thread. Implementations wait at most `timeout` and return
/// `Ok(None)` when nothing arrived, so the loop can observe cancellation
/// promptly.
pub trait KeySource: Send {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>, SourceError>;
}

