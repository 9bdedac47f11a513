//! Crossterm key events mapped to keytally [`InputEvent`]s.
//!
//! This is the boundary where terminal payloads become the closed
//! [`KeyPress`] variant; nothing past this module inspects crossterm types.
//!
//! | Key(s)                        | Event                                   |
//! |-------------------------------|-----------------------------------------|
//! | `Ctrl+c`                      | `Interrupt`                             |
//! | `Esc` (exit key enabled)      | `Exit`                                  |
//! | printable char                | `Press(Character(c))`                   |
//! | `Enter`, `Tab`, `F5`, arrows… | `Press(Named("enter" / "tab" / "f5"…))` |
//! | modifier keys (kitty protocol)| `Press(Named("shift" / "ctrl_r"…))`     |
//! | key release, mouse, resize    | ignored                                 |
//!
//! Named tokens follow the `Key.<name>` vocabulary older keytally files use,
//! so counts from earlier tallies line up with new ones.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MediaKeyCode, ModifierKeyCode};
use keytally_core::{InputEvent, KeyPress};

/// Map a raw crossterm [`Event`] to an [`InputEvent`].
///
/// Returns `None` for events that carry nothing to count (key releases,
/// mouse, focus, paste, resize).
pub fn to_input_event(event: Event, exit_on_escape: bool) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key, exit_on_escape),
        _ => None,
    }
}

fn map_key(key: KeyEvent, exit_on_escape: bool) -> Option<InputEvent> {
    // Auto-repeat counts as a press, the same as holding a key down on a
    // terminal without event-type reporting.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Interrupt),
        KeyCode::Esc if exit_on_escape => Some(InputEvent::Exit),
        KeyCode::Char(c) => Some(InputEvent::Press(KeyPress::Character(c))),
        code => Some(InputEvent::Press(KeyPress::Named(key_name(code)))),
    }
}

/// Symbolic name for a non-character key.
pub fn key_name(code: KeyCode) -> String {
    let name = match code {
        KeyCode::Backspace => "backspace",
        KeyCode::Enter => "enter",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "page_up",
        KeyCode::PageDown => "page_down",
        // Shift+Tab is still the Tab key.
        KeyCode::Tab | KeyCode::BackTab => "tab",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Esc => "esc",
        KeyCode::CapsLock => "caps_lock",
        KeyCode::ScrollLock => "scroll_lock",
        KeyCode::NumLock => "num_lock",
        KeyCode::PrintScreen => "print_screen",
        KeyCode::Pause => "pause",
        KeyCode::Menu => "menu",
        KeyCode::F(n) => return format!("f{n}"),
        KeyCode::Media(m) => media_name(m),
        KeyCode::Modifier(m) => modifier_name(m),
        other => return other.to_string(),
    };
    name.to_string()
}

fn media_name(code: MediaKeyCode) -> &'static str {
    match code {
        MediaKeyCode::Play => "media_play",
        MediaKeyCode::Pause => "media_pause",
        MediaKeyCode::PlayPause => "media_play_pause",
        MediaKeyCode::Reverse => "media_reverse",
        MediaKeyCode::Stop => "media_stop",
        MediaKeyCode::FastForward => "media_fast_forward",
        MediaKeyCode::Rewind => "media_rewind",
        MediaKeyCode::TrackNext => "media_next",
        MediaKeyCode::TrackPrevious => "media_previous",
        MediaKeyCode::Record => "media_record",
        MediaKeyCode::LowerVolume => "media_volume_down",
        MediaKeyCode::RaiseVolume => "media_volume_up",
        MediaKeyCode::MuteVolume => "media_volume_mute",
    }
}

fn modifier_name(code: ModifierKeyCode) -> &'static str {
    match code {
        ModifierKeyCode::LeftShift => "shift",
        ModifierKeyCode::RightShift => "shift_r",
        ModifierKeyCode::LeftControl => "ctrl_l",
        ModifierKeyCode::RightControl => "ctrl_r",
        ModifierKeyCode::LeftAlt => "alt_l",
        ModifierKeyCode::RightAlt => "alt_r",
        ModifierKeyCode::LeftSuper => "cmd",
        ModifierKeyCode::RightSuper => "cmd_r",
        ModifierKeyCode::LeftHyper => "hyper_l",
        ModifierKeyCode::RightHyper => "hyper_r",
        ModifierKeyCode::LeftMeta => "meta_l",
        ModifierKeyCode::RightMeta => "meta_r",
        ModifierKeyCode::IsoLevel3Shift => "alt_gr",
        ModifierKeyCode::IsoLevel5Shift => "iso_level5_shift",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
