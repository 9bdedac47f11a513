//! Static fixtures used across harnesses.

use keytally_core::{InputEvent, KeyPress};

/// Four keys with distinct counts; ranked: c, a, b, d.
pub const SAMPLE_COUNTS: &[(&str, u64)] = &[("a", 5), ("b", 3), ("c", 9), ("d", 1)];

/// A tally that lights up every part of the keyboard view.
pub const MIXED_COUNTS: &[(&str, u64)] = &[
    ("e", 120),
    ("t", 90),
    ("Key.space", 200),
    ("Key.enter", 40),
    ("Key.shift", 25),
    ("Key.media_play_pause", 2),
    ("é", 3),
];

/// Files that exist but are not a usable tally.
pub const CORRUPT_PAYLOADS: &[&str] = &[
    "",
    "not json",
    "{\"a\": 1",
    "[1, 2, 3]",
    "{\"a\": -1}",
    "{\"a\": \"five\"}",
];

/// One `Press` per character of `text`.
pub fn typed(text: &str) -> Vec<InputEvent> {
    text.chars()
        .map(|c| InputEvent::Press(KeyPress::Character(c)))
        .collect()
}

/// A `Press` of a named key, e.g. `named("shift")`.
pub fn named(token: &str) -> InputEvent {
    InputEvent::Press(KeyPress::named(token))
}
