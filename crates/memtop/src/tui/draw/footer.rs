use ratatui::text::{Line, Span};

use super::ThemeColors;

pub const HELP_TEXT: &str = "Controls: q to quit | r to reset rate baseline";

pub fn help_line(theme: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(HELP_TEXT, theme.help()))
}
