//! Core types for keytally-core.
//!
//! This module defines the data shared across all layers: the raw
//! [`KeyPress`] delivered by a key source, the canonical [`KeyId`] it
//! normalises to, and the [`InputEvent`] envelope the intake loop consumes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Prefix carried by every named-key identifier (`Key.space`, `Key.f5`, …).
pub const NAMED_KEY_PREFIX: &str = "Key.";

/// A single key press as reported by a key source.
///
/// Sources resolve their native event payload into one of these two cases at
/// the boundary, so the normalizer only ever sees a closed set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPress {
    /// The key produced a character (letters, digits, punctuation, space…).
    Character(char),
    /// The key has a symbolic name instead of a character (`"f5"`, `"shift_r"`).
    Named(String),
}

impl KeyPress {
    /// Convenience constructor for [`KeyPress::Named`].
    pub fn named(token: impl Into<String>) -> Self {
        KeyPress::Named(token.into())
    }
}

/// Canonical key identifier used as the tally map key.
///
/// Either a single lower-cased printable character (`"a"`, `"!"`) or a named
/// token with the [`NAMED_KEY_PREFIX`] (`"Key.space"`). Build one with
/// [`normalize`](crate::normalizer::normalize) rather than by hand when the
/// input comes from a key source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    /// Wrap an already-canonical identifier.
    pub fn new(id: impl Into<String>) -> Self {
        KeyId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for KeyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyId {
    fn from(s: &str) -> Self {
        KeyId(s.to_string())
    }
}

impl From<String> for KeyId {
    fn from(s: String) -> Self {
        KeyId(s)
    }
}

/// An event delivered to the intake loop by a [`KeySource`](crate::source::KeySource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed and should be counted.
    Press(KeyPress),
    /// The user asked to interrupt tracking from inside the source (Ctrl+c
    /// while the terminal is in raw mode, where no SIGINT is raised).
    Interrupt,
    /// The configured exit key was pressed.
    Exit,
    /// The source has no more events and will never produce any.
    Closed,
}
