//! Terminal key source: reads key presses from the controlling terminal in
//! raw mode.
//!
//! Raw mode is entered when the source is opened and left when it is dropped
//! (the intake loop drops it on exit). In raw mode the terminal sends Ctrl+c
//! as a key rather than raising SIGINT, so it arrives here as
//! [`InputEvent::Interrupt`].

use crate::event::to_input_event;
use crossterm::{
    event::{self as ct_event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement},
};
use keytally_core::{InputEvent, KeySource, SourceError};
use std::{io, time::Duration};

#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    pub exit_on_escape: bool,
    /// Request the kitty keyboard protocol when the terminal supports it, so
    /// modifier keys and key repeats are reported.
    pub enhanced_keyboard: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self { exit_on_escape: true, enhanced_keyboard: true }
    }
}

pub struct TerminalSource {
    exit_on_escape: bool,
    guard: RawModeGuard,
}

impl TerminalSource {
    pub fn open(options: TerminalOptions) -> io::Result<Self> {
        let enhanced = options.enhanced_keyboard && supports_keyboard_enhancement().unwrap_or(false);

        enable_raw_mode()?;
        let guard = RawModeGuard { enhanced };
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }
        tracing::debug!(enhanced, exit_on_escape = options.exit_on_escape, "terminal key source opened");

        Ok(Self { exit_on_escape: options.exit_on_escape, guard })
    }

    /// Whether the kitty keyboard protocol is active.
    pub fn is_enhanced(&self) -> bool {
        self.guard.enhanced
    }
}

impl KeySource for TerminalSource {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>, SourceError> {
        if !ct_event::poll(timeout)? {
            return Ok(None);
        }
        Ok(to_input_event(ct_event::read()?, self.exit_on_escape))
    }
}

struct RawModeGuard {
    enhanced: bool,
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
    }
}

/// Leave raw mode. Safe to call when raw mode is not active.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
}

/// Restore the terminal before the default panic message is printed, so the
/// message is readable if a panic happens while raw mode is on.
pub fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));
}
