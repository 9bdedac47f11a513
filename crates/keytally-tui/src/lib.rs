//! keytally TUI: renders a tally snapshot as a ranked list or a keyboard
//! heatmap.
//!
//! Rendering is read-only: it takes a [`Snapshot`] and produces text. The only
//! "failure" is an empty tally, which renders [`NO_DATA_MESSAGE`].

pub mod heat;
pub mod layout;
pub mod output;
pub mod ranking;
pub mod theme;
pub mod widgets;

use keytally_core::Snapshot;
use std::io::IsTerminal;
use theme::Theme;
use widgets::{KeyboardHeatmap, RankedList};

pub use heat::HeatLevel;
pub use ranking::{rank, RankedKey};

/// Shown instead of a table or keyboard when nothing has been recorded.
pub const NO_DATA_MESSAGE: &str = "No key presses recorded yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Keys by count, optionally limited to the top N.
    List { top_n: Option<usize> },
    /// Heatmap over the keyboard layout.
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: ViewMode,
    /// Style output with the default theme when stdout is a terminal.
    pub color: bool,
}

/// Render `snapshot` as plain text (no colour codes).
pub fn render_text(snapshot: &Snapshot, mode: ViewMode) -> String {
    let theme = Theme::plain();
    match mode {
        ViewMode::List { top_n } => {
            let widget = RankedList::new(snapshot, &theme).top_n(top_n);
            let (w, h) = widget.size();
            output::render_plain(widget, w, h)
        }
        ViewMode::Keyboard => {
            let widget = KeyboardHeatmap::new(snapshot, &theme);
            let (w, h) = widget.size();
            output::render_plain(widget, w, h)
        }
    }
}

/// Print `snapshot` to stdout.
pub fn print_stats(snapshot: &Snapshot, options: RenderOptions) -> anyhow::Result<()> {
    if snapshot.is_empty() {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    }
    if !options.color || !std::io::stdout().is_terminal() {
        println!("{}", render_text(snapshot, options.mode));
        return Ok(());
    }

    let theme = Theme::load_default();
    tracing::debug!(mode = ?options.mode, "drawing stats inline");
    match options.mode {
        ViewMode::List { top_n } => {
            let widget = RankedList::new(snapshot, &theme).top_n(top_n);
            let (_, h) = widget.size();
            output::draw_inline(widget, h)
        }
        ViewMode::Keyboard => {
            let widget = KeyboardHeatmap::new(snapshot, &theme);
            let (_, h) = widget.size();
            output::draw_inline(widget, h)
        }
    }
}
