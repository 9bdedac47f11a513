//! keytally-input: key event sources for keytally.
//!
//! Each source implements [`keytally_core::KeySource`] and turns its native
//! payload into [`keytally_core::InputEvent`] values for the intake loop.

pub mod channel;
pub mod event;
pub mod terminal;

pub use channel::{channel, ChannelSource};
pub use terminal::{TerminalOptions, TerminalSource};
