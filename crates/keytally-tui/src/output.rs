//! Getting rendered widgets onto stdout.
//!
//! Widgets always render into a ratatui [`Buffer`]. For a terminal with
//! colour enabled the buffer is drawn through an inline viewport so styles
//! survive; otherwise it is flattened to plain text.

use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Position, Rect},
    text::Span,
    widgets::Widget,
    Terminal, TerminalOptions, Viewport,
};
use std::io;

/// Flatten a buffer to text: one line per row, trailing blanks trimmed, and
/// trailing empty rows dropped. A wide glyph's continuation cell is skipped.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines: Vec<String> = (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::with_capacity(area.width as usize);
            let mut skip = 0;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buf[(x, y)].symbol();
                skip = Span::raw(symbol).width().saturating_sub(1);
                line.push_str(symbol);
            }
            line.trim_end().to_string()
        })
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Render `widget` into an off-screen `width × height` buffer and return the
/// plain text.
pub fn render_plain<W: Widget>(widget: W, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Draw `widget` below the cursor in a `height`-row inline viewport, keeping
/// its styles, then leave the cursor on the line after it.
pub fn draw_inline<W: Widget>(widget: W, height: u16) -> anyhow::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions { viewport: Viewport::Inline(height) },
    )?;

    let mut drawn = Rect::default();
    terminal.draw(|frame| {
        drawn = frame.area();
        frame.render_widget(widget, drawn);
    })?;

    terminal.set_cursor_position(Position::new(0, drawn.bottom().saturating_sub(1)))?;
    terminal.show_cursor()?;
    drop(terminal);
    println!();
    Ok(())
}
