//! Keyboard heatmap widget: the tally drawn over a static keyboard layout.
//!
//! Each cap shows its label in the top border and its count inside. The
//! border style and line set follow the cap's [`HeatLevel`], so the heat is
//! visible even without colour. Tallied keys with no cap on the board are
//! listed underneath as "other keys".

use crate::heat::HeatLevel;
use crate::layout::{board_height, has_cap, KeyCap, BOARD_WIDTH, KEY_HEIGHT, ROWS};
use crate::ranking::{rank, RankedKey};
use crate::theme::Theme;
use crate::NO_DATA_MESSAGE;
use keytally_core::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const OTHER_PREFIX: &str = "other keys: ";

pub struct KeyboardHeatmap<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> KeyboardHeatmap<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    /// `(width, height)` the widget needs to draw without clipping.
    pub fn size(&self) -> (u16, u16) {
        if self.snapshot.is_empty() {
            return (NO_DATA_MESSAGE.len() as u16, 1);
        }
        let height = board_height() + 1 + self.other_lines().len() as u16;
        (BOARD_WIDTH, height)
    }

    /// Tallied keys that have no cap, most pressed first.
    pub fn other_keys(&self) -> Vec<RankedKey> {
        rank(self.snapshot, None)
            .into_iter()
            .filter(|r| !has_cap(r.id.as_str()))
            .collect()
    }

    fn max_count(&self) -> u64 {
        ROWS.iter()
            .flat_map(|row| row.iter())
            .map(|cap| cap.count(self.snapshot))
            .chain(self.other_keys().iter().map(|r| r.count))
            .max()
            .unwrap_or(0)
    }

    fn other_lines(&self) -> Vec<String> {
        let items: Vec<String> = self
            .other_keys()
            .iter()
            .map(|r| format!("{} {}", r.id, r.count))
            .collect();
        wrap(OTHER_PREFIX, &items, BOARD_WIDTH as usize)
    }

    fn render_cap(&self, cap: &KeyCap, max: u64, area: Rect, buf: &mut Buffer) {
        let count = cap.count(self.snapshot);
        let level = HeatLevel::classify(count, max);
        let style = self.theme.heat_style(level);

        let block = Block::bordered()
            .border_type(level.border_type())
            .border_style(style)
            .title(Line::from(cap.label).centered());
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(format_count(count))
            .style(style)
            .centered()
            .render(inner, buf);
    }

    fn legend(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("heat: ")];
        for (level, threshold) in [
            (HeatLevel::Hot, " >66%"),
            (HeatLevel::Warm, " >33%"),
            (HeatLevel::Cool, " >0%"),
            (HeatLevel::Cold, ""),
        ] {
            spans.push(Span::styled(level.sample(), self.theme.heat_style(level)));
            spans.push(Span::raw(format!(" {}{threshold}   ", level.name())));
        }
        Line::from(spans)
    }
}

impl Widget for KeyboardHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.snapshot.is_empty() {
            Paragraph::new(NO_DATA_MESSAGE).render(area, buf);
            return;
        }

        let max = self.max_count();
        for (row_idx, row) in ROWS.iter().enumerate() {
            let y = area.y.saturating_add(row_idx as u16 * KEY_HEIGHT);
            let mut x = area.x;
            for cap in row.iter() {
                let rect = Rect::new(x, y, cap.width, KEY_HEIGHT).intersection(area);
                if rect.width >= 3 && rect.height == KEY_HEIGHT {
                    self.render_cap(cap, max, rect, buf);
                }
                x = x.saturating_add(cap.width);
            }
        }

        let mut lines = vec![self.legend()];
        lines.extend(self.other_lines().into_iter().map(Line::from));
        let text_area = Rect {
            y: area.y.saturating_add(board_height()),
            height: area.height.saturating_sub(board_height()),
            ..area
        };
        Paragraph::new(lines).render(text_area, buf);
    }
}

/// Compact count that fits a four-column cap interior.
pub fn format_count(n: u64) -> String {
    match n {
        0..=9_999 => n.to_string(),
        10_000..=999_999 => format!("{}k", n / 1_000),
        1_000_000..=999_999_999 => format!("{}M", n / 1_000_000),
        _ => format!("{}G", n / 1_000_000_000),
    }
}

/// Greedy word wrap of `items` separated by two spaces, with `prefix` on the
/// first line and matching indentation after it.
fn wrap(prefix: &str, items: &[String], width: usize) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let indent = " ".repeat(prefix.chars().count());
    let mut lines = Vec::new();
    let mut current = prefix.to_string();
    let mut has_item = false;
    for item in items {
        let needed = if has_item { 2 } else { 0 } + item.chars().count();
        if has_item && current.chars().count() + needed > width {
            lines.push(std::mem::replace(&mut current, indent.clone()));
            has_item = false;
        }
        if has_item {
            current.push_str("  ");
        }
        current.push_str(item);
        has_item = true;
    }
    lines.push(current);
    lines
}
