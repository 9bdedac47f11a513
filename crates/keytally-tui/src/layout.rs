//! Static keyboard geometry (ANSI US) used by the heatmap widget.
//!
//! Widths are in terminal columns. Every cap is [`KEY_HEIGHT`] rows tall and
//! counts the presses of all its ids, so the `1` cap shows `1` plus `!`.

use keytally_core::Snapshot;

pub const KEY_HEIGHT: u16 = 3;
pub const BOARD_WIDTH: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCap {
    pub label: &'static str,
    pub ids: &'static [&'static str],
    pub width: u16,
}

impl KeyCap {
    /// Presses of this cap across all of its ids.
    pub fn count(&self, snapshot: &Snapshot) -> u64 {
        self.ids.iter().fold(0u64, |acc, id| acc.saturating_add(snapshot.get(id)))
    }
}

const fn key(label: &'static str, ids: &'static [&'static str], width: u16) -> KeyCap {
    KeyCap { label, ids, width }
}

const U: u16 = 6;

const FUNCTION_ROW: &[KeyCap] = &[
    key("esc", &["Key.esc"], U),
    key("f1", &["Key.f1"], U),
    key("f2", &["Key.f2"], U),
    key("f3", &["Key.f3"], U),
    key("f4", &["Key.f4"], U),
    key("f5", &["Key.f5"], U),
    key("f6", &["Key.f6"], U),
    key("f7", &["Key.f7"], U),
    key("f8", &["Key.f8"], U),
    key("f9", &["Key.f9"], U),
    key("f10", &["Key.f10"], U),
    key("f11", &["Key.f11"], U),
    key("f12", &["Key.f12"], U),
];

const NUMBER_ROW: &[KeyCap] = &[
    key("`", &["`", "~"], U),
    key("1", &["1", "!"], U),
    key("2", &["2", "@"], U),
    key("3", &["3", "#"], U),
    key("4", &["4", "$"], U),
    key("5", &["5", "%"], U),
    key("6", &["6", "^"], U),
    key("7", &["7", "&"], U),
    key("8", &["8", "*"], U),
    key("9", &["9", "("], U),
    key("0", &["0", ")"], U),
    key("-", &["-", "_"], U),
    key("=", &["=", "+"], U),
    key("bksp", &["Key.backspace"], 12),
];

const TOP_ROW: &[KeyCap] = &[
    key("tab", &["Key.tab"], 9),
    key("q", &["q"], U),
    key("w", &["w"], U),
    key("e", &["e"], U),
    key("r", &["r"], U),
    key("t", &["t"], U),
    key("y", &["y"], U),
    key("u", &["u"], U),
    key("i", &["i"], U),
    key("o", &["o"], U),
    key("p", &["p"], U),
    key("[", &["[", "{"], U),
    key("]", &["]", "}"], U),
    key("\\", &["\\", "|"], 9),
];

const HOME_ROW: &[KeyCap] = &[
    key("caps", &["Key.caps_lock"], 11),
    key("a", &["a"], U),
    key("s", &["s"], U),
    key("d", &["d"], U),
    key("f", &["f"], U),
    key("g", &["g"], U),
    key("h", &["h"], U),
    key("j", &["j"], U),
    key("k", &["k"], U),
    key("l", &["l"], U),
    key(";", &[";", ":"], U),
    key("'", &["'", "\""], U),
    key("enter", &["Key.enter"], 13),
];

const BOTTOM_ROW: &[KeyCap] = &[
    key("shift", &["Key.shift", "Key.shift_l"], 14),
    key("z", &["z"], U),
    key("x", &["x"], U),
    key("c", &["c"], U),
    key("v", &["v"], U),
    key("b", &["b"], U),
    key("n", &["n"], U),
    key("m", &["m"], U),
    key(",", &[",", "<"], U),
    key(".", &[".", ">"], U),
    key("/", &["/", "?"], U),
    key("shift", &["Key.shift_r"], 16),
];

const MODIFIER_ROW: &[KeyCap] = &[
    key("ctrl", &["Key.ctrl_l", "Key.ctrl"], 8),
    key("cmd", &["Key.cmd", "Key.cmd_l"], 7),
    key("alt", &["Key.alt_l", "Key.alt"], 8),
    key("space", &["Key.space"], 37),
    key("alt", &["Key.alt_r", "Key.alt_gr"], 8),
    key("cmd", &["Key.cmd_r"], 7),
    key("menu", &["Key.menu"], 7),
    key("ctrl", &["Key.ctrl_r"], 8),
];

const NAV_ROW: &[KeyCap] = &[
    key("ins", &["Key.insert"], U),
    key("del", &["Key.delete"], U),
    key("home", &["Key.home"], U),
    key("end", &["Key.end"], U),
    key("pgup", &["Key.page_up"], U),
    key("pgdn", &["Key.page_down"], U),
    key("←", &["Key.left"], U),
    key("↑", &["Key.up"], U),
    key("↓", &["Key.down"], U),
    key("→", &["Key.right"], U),
];

/// Keyboard rows, top to bottom.
pub const ROWS: &[&[KeyCap]] = &[
    FUNCTION_ROW,
    NUMBER_ROW,
    TOP_ROW,
    HOME_ROW,
    BOTTOM_ROW,
    MODIFIER_ROW,
    NAV_ROW,
];

/// Rows needed to draw every key cap.
pub fn board_height() -> u16 {
    ROWS.len() as u16 * KEY_HEIGHT
}

/// True if some cap on the board counts `id`.
pub fn has_cap(id: &str) -> bool {
    caps().any(|cap| cap.ids.iter().any(|i| *i == id))
}

pub fn caps() -> impl Iterator<Item = &'static KeyCap> {
    ROWS.iter().flat_map(|row| row.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keytally_core::KeyId;
    use std::collections::HashSet;

    #[test]
    fn rows_fit_the_board() {
        for row in ROWS {
            let width: u16 = row.iter().map(|k| k.width).sum();
            assert!(width <= BOARD_WIDTH, "row {:?} is {width} wide", row[0].label);
        }
    }

    #[test]
    fn labels_fit_inside_borders() {
        for cap in caps() {
            assert!(
                cap.label.chars().count() as u16 <= cap.width - 2,
                "label {:?} too wide for {} columns",
                cap.label,
                cap.width
            );
        }
    }

    #[test]
    fn each_id_has_at_most_one_cap() {
        let mut seen = HashSet::new();
        for id in caps().flat_map(|c| c.ids.iter()) {
            assert!(seen.insert(*id), "{id} appears on two caps");
        }
    }

    #[test]
    fn shifted_symbols_add_to_base_key() {
        let snap: Snapshot = [(KeyId::new("1"), 4), (KeyId::new("!"), 2)].into_iter().collect();
        let one = caps().find(|c| c.label == "1").unwrap();
        assert_eq!(one.count(&snap), 6);
        assert!(has_cap("!"));
        assert!(!has_cap("Key.f20"));
    }
}
