//! Channel-fed key source for embedding keytally and for tests.
//!
//! Events sent through the [`Sender`] are delivered in order. Dropping every
//! sender closes the source, which ends the session with
//! `ShutdownReason::SourceClosed`.

use keytally_core::{InputEvent, KeySource, SourceError};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

pub struct ChannelSource {
    rx: Receiver<InputEvent>,
}

/// Create a connected sender / source pair.
pub fn channel() -> (Sender<InputEvent>, ChannelSource) {
    let (tx, rx) = mpsc::channel();
    (tx, ChannelSource { rx })
}

impl KeySource for ChannelSource {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>, SourceError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Ok(Some(InputEvent::Closed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keytally_core::KeyPress;

    #[test]
    fn delivers_in_order_then_closes() {
        let (tx, mut source) = channel();
        tx.send(InputEvent::Press(KeyPress::Character('a'))).unwrap();
        tx.send(InputEvent::Exit).unwrap();
        drop(tx);

        let t = Duration::from_millis(10);
        assert_eq!(source.poll_event(t).unwrap(), Some(InputEvent::Press(KeyPress::Character('a'))));
        assert_eq!(source.poll_event(t).unwrap(), Some(InputEvent::Exit));
        assert_eq!(source.poll_event(t).unwrap(), Some(InputEvent::Closed));
    }

    #[test]
    fn idle_channel_times_out() {
        let (_tx, mut source) = channel();
        assert_eq!(source.poll_event(Duration::from_millis(5)).unwrap(), None);
    }
}
