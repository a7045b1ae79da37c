pub mod theme;
mod footer;
mod header;
mod stats;

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Clear, Paragraph},
};

pub use footer::{help_line, HELP_TEXT};
pub use header::{error_line, title_line, waiting_line};
pub use stats::snapshot_lines;
pub use theme::{get_theme, ThemeColors, ThemeKind};

use crate::tui::state::RenderState;

/// Paint one full dashboard frame.
///
/// Rows are laid out top-down from a fixed order; anything past the bottom
/// edge is dropped and long lines are cut at the right edge. The help line
/// always takes the last row once the terminal has at least three.
pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, state: &RenderState, theme: &ThemeColors) {
    let area = f.size();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut rows = vec![title_line(state, theme), Line::default()];
    if let Some(err) = &state.error {
        rows.push(error_line(err, theme));
        rows.push(Line::default());
    }
    match &state.latest {
        Some(snapshot) => rows.extend(snapshot_lines(snapshot, &state.rates, theme)),
        None if state.error.is_none() => rows.push(waiting_line(theme)),
        None => {}
    }

    for (y, line) in (0..area.height).zip(rows) {
        put_line(f, area, y, line);
    }
    if area.height >= 3 {
        put_line(f, area, area.height - 1, help_line(theme));
    }
}

fn put_line(f: &mut ratatui::Frame<'_>, area: Rect, row: u16, line: Line<'static>) {
    if line.spans.is_empty() {
        return;
    }
    let rect = Rect::new(area.x, area.y + row, area.width, 1);
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(line), rect);
}
