use ratatui::text::{Line, Span};

use common::{format_interval, PRODUCT_NAME};

use crate::sampler::SampleError;
use crate::tui::state::RenderState;

use super::ThemeColors;

pub fn title_line(state: &RenderState, theme: &ThemeColors) -> Line<'static> {
    let title = format!(
        "{PRODUCT_NAME}  {}  (refresh {})",
        state.address,
        format_interval(state.interval)
    );
    Line::from(Span::styled(title, theme.title()))
}

pub fn error_line(err: &SampleError, theme: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(format!("Error: {err}"), theme.failure()))
}

pub fn waiting_line(theme: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled("Waiting for initial stats...", theme.pending()))
}
