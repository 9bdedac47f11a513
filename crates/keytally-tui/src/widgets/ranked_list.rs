//! Ranked list widget: keys ordered by press count with a share column and a
//! proportional bar.
//!
//! ```text
//!     #  key        count   share
//!     1  c              9   50.0%  ██████████████████████████████
//!     2  a              5   27.8%  █████████████████
//!
//!  18 presses across 4 keys (top 2 shown)
//! ```

use crate::ranking::{rank, RankedKey};
use crate::theme::Theme;
use crate::NO_DATA_MESSAGE;
use keytally_core::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const BAR_WIDTH: u64 = 30;

pub struct RankedList<'a> {
    snapshot: &'a Snapshot,
    top_n: Option<usize>,
    theme: &'a Theme,
}

impl<'a> RankedList<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, top_n: None, theme }
    }

    pub fn top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    /// `(width, height)` the widget needs to draw without clipping.
    pub fn size(&self) -> (u16, u16) {
        let lines = self.lines();
        let width = lines.iter().map(Line::width).max().unwrap_or(0);
        (width as u16, lines.len() as u16)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        if self.snapshot.is_empty() {
            return vec![Line::from(NO_DATA_MESSAGE)];
        }

        let ranked = rank(self.snapshot, self.top_n);
        let total = self.snapshot.total();
        let max = self.snapshot.max();

        let key_w = ranked
            .iter()
            .map(|r| display_width(r.id.as_str()))
            .max()
            .unwrap_or(0)
            .max("key".len());
        let count_w = ranked
            .iter()
            .map(|r| r.count.to_string().len())
            .max()
            .unwrap_or(0)
            .max("count".len());

        let mut lines = Vec::with_capacity(ranked.len() + 3);
        lines.push(Line::styled(
            format!("    #  {:<key_w$}  {:>count_w$}   share", "key", "count"),
            self.theme.list_header,
        ));
        for (i, r) in ranked.iter().enumerate() {
            lines.push(self.row(i + 1, r, key_w, count_w, total, max));
        }
        lines.push(Line::default());

        let shown = ranked.len();
        let keys = self.snapshot.len();
        let mut footer = format!(" {total} presses across {keys} keys");
        if shown < keys {
            footer.push_str(&format!(" (top {shown} shown)"));
        }
        lines.push(Line::from(footer));
        lines
    }

    fn row(&self, rank: usize, r: &RankedKey, key_w: usize, count_w: usize, total: u64, max: u64) -> Line<'static> {
        let share = if total == 0 { 0.0 } else { r.count as f64 * 100.0 / total as f64 };
        Line::from(vec![
            Span::styled(format!(" {rank:>4}"), self.theme.list_rank),
            Span::raw(format!("  {}  {:>count_w$}  {share:>5.1}%  ", pad_key(r.id.as_str(), key_w), r.count)),
            Span::styled(bar(r.count, max), self.theme.list_bar),
        ])
    }
}

/// Terminal columns `s` occupies; wide glyphs take two.
fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// `key` padded with spaces to `width` columns.
fn pad_key(key: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(key));
    format!("{key}{}", " ".repeat(pad))
}

/// Bar length proportional to `count / max`, at least one cell for any
/// non-zero count.
fn bar(count: u64, max: u64) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let cells = (count as u128 * BAR_WIDTH as u128).div_ceil(max as u128) as usize;
    "█".repeat(cells)
}

impl Widget for RankedList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(10, 10).chars().count(), 30);
        assert_eq!(bar(5, 10).chars().count(), 15);
        assert_eq!(bar(1, 1_000_000).chars().count(), 1);
        assert_eq!(bar(0, 10), "");
    }

    fn snap(pairs: &[(&str, u64)]) -> Snapshot {
        pairs.iter().map(|(k, v)| (keytally_core::KeyId::new(*k), *v)).collect()
    }

    #[test]
    fn wide_keys_keep_columns_aligned() {
        let snap = snap(&[("日", 40), ("a", 7), ("Key.space", 3), ("ж", 1)]);
        let theme = Theme::plain();
        let lines = RankedList::new(&snap, &theme).lines();

        // Every bar starts in the same column.
        let bar_columns: Vec<usize> = lines[1..=4]
            .iter()
            .map(|row| row.spans[..2].iter().map(Span::width).sum())
            .collect();
        assert!(bar_columns.windows(2).all(|w| w[0] == w[1]), "bars start at {bar_columns:?}");
    }

    #[test]
    fn bars_scale_against_the_largest_count_even_when_truncated() {
        let snap = snap(&[("a", 10), ("b", 5), ("c", 1)]);
        let theme = Theme::plain();
        let lines = RankedList::new(&snap, &theme).top_n(Some(2)).lines();
        let bar_cells = |i: usize| lines[i].spans[2].content.chars().count();
        assert_eq!(bar_cells(1), 30);
        assert_eq!(bar_cells(2), 15);
    }
}
