//! Normalizer: maps a [`KeyPress`] to its canonical [`KeyId`].
//!
//! Normalisation is total: every input yields an identifier, so a strange
//! event can never abort tracking.
//!
//! | Input                         | KeyId                     |
//! |-------------------------------|---------------------------|
//! | `Character('A')`              | `a`                       |
//! | `Character(' ')`              | `Key.space`               |
//! | `Character('\t')`             | `Key.tab`                 |
//! | `Character('\u{1f}')`         | `Key.u+001f`              |
//! | `Named("Page Up")`            | `Key.page_up`             |
//! | `Named("Key.esc")`            | `Key.esc`                 |
//! | `Named("")`                   | `Key.unknown`             |

use crate::types::{KeyId, KeyPress, NAMED_KEY_PREFIX};

/// Token used when a named key carries no usable name.
const UNKNOWN_TOKEN: &str = "unknown";

/// Produce the canonical identifier for a key press.
pub fn normalize(press: &KeyPress) -> KeyId {
    match press {
        KeyPress::Character(c) => normalize_char(*c),
        KeyPress::Named(token) => named(token),
    }
}

fn normalize_char(c: char) -> KeyId {
    // Whitespace and control characters have no visible glyph; count them
    // under the same token a named-key event for that key would produce.
    match c {
        ' ' => named("space"),
        '\t' => named("tab"),
        '\r' | '\n' => named("enter"),
        '\u{8}' => named("backspace"),
        '\u{7f}' => named("delete"),
        '\u{1b}' => named("esc"),
        c if c.is_control() || c.is_whitespace() => {
            KeyId::new(format!("{NAMED_KEY_PREFIX}u+{:04x}", c as u32))
        }
        c => KeyId::new(c.to_lowercase().collect::<String>()),
    }
}

/// `token` without a leading `Key.` in any letter case.
fn strip_named_prefix(token: &str) -> &str {
    match token.get(..NAMED_KEY_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(NAMED_KEY_PREFIX) => &token[NAMED_KEY_PREFIX.len()..],
        _ => token,
    }
}

/// Build a `Key.<token>` identifier from a symbolic key name.
///
/// The token is trimmed and lower-cased; runs of whitespace and `-` become a
/// single `_`. An existing `Key.` prefix, in any case, is kept rather than
/// doubled.
pub fn named(token: &str) -> KeyId {
    let token = token.trim();
    let token = strip_named_prefix(token);

    let mut out = String::with_capacity(NAMED_KEY_PREFIX.len() + token.len());
    out.push_str(NAMED_KEY_PREFIX);
    let start = out.len();
    let mut pending_sep = false;
    for c in token.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = out.len() > start;
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.extend(c.to_lowercase());
    }

    if out.len() == start {
        out.push_str(UNKNOWN_TOKEN);
    }
    KeyId::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case('a', "a")]
    #[case('A', "a")]
    #[case('7', "7")]
    #[case('!', "!")]
    #[case('É', "é")]
    #[case(' ', "Key.space")]
    #[case('\t', "Key.tab")]
    #[case('\n', "Key.enter")]
    #[case('\r', "Key.enter")]
    #[case('\u{8}', "Key.backspace")]
    #[case('\u{7f}', "Key.delete")]
    #[case('\u{1b}', "Key.esc")]
    #[case('\u{1f}', "Key.u+001f")]
    fn characters(#[case] c: char, #[case] expected: &str) {
        assert_eq!(normalize(&KeyPress::Character(c)).as_str(), expected);
    }

    #[rstest]
    #[case("space", "Key.space")]
    #[case("F5", "Key.f5")]
    #[case("Page Up", "Key.page_up")]
    #[case("caps-lock", "Key.caps_lock")]
    #[case("  shift_r ", "Key.shift_r")]
    #[case("Key.esc", "Key.esc")]
    #[case("key.space", "Key.space")]
    #[case("KEY.ESC", "Key.esc")]
    #[case("kEy.Page Up", "Key.page_up")]
    #[case("key", "Key.key")]
    #[case("ké.x", "Key.ké.x")]
    #[case("", "Key.unknown")]
    #[case("   ", "Key.unknown")]
    #[case("Key.", "Key.unknown")]
    #[case("__", "Key.unknown")]
    fn named_tokens(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(normalize(&KeyPress::named(token)).as_str(), expected);
    }

    #[test]
    fn same_key_is_stable_across_calls() {
        let a = normalize(&KeyPress::named("Media Play Pause"));
        let b = normalize(&KeyPress::named("media-play-pause"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Key.media_play_pause");
    }

    #[test]
    fn multi_scalar_lowercase_is_kept_whole() {
        // 'İ' lower-cases to "i̇" (two scalars); the id keeps both.
        let id = normalize(&KeyPress::Character('İ'));
        assert_eq!(id.as_str(), "i\u{307}");
    }

    #[test]
    fn prefix_casing_does_not_split_a_key() {
        let ids: Vec<KeyId> = ["Key.space", "key.space", "KEY.SPACE", "space"]
            .into_iter()
            .map(|t| normalize(&KeyPress::named(t)))
            .collect();
        assert!(ids.iter().all(|id| id.as_str() == "Key.space"), "{ids:?}");
    }

    proptest! {
        #[test]
        fn every_character_gets_a_non_empty_id(c in any::<char>()) {
            let id = normalize(&KeyPress::Character(c));
            prop_assert!(!id.as_str().is_empty());
            prop_assert_eq!(id.clone(), normalize(&KeyPress::Character(c)));
        }

        #[test]
        fn named_ids_are_fixed_points(token in "[ -~]{0,24}") {
            let once = named(&token);
            prop_assert_eq!(named(once.as_str()), once);
        }
    }
}
