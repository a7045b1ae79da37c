use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

/// Foreground palette. No background is ever painted, so both palettes sit
/// on whatever the terminal already uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
}

impl ThemeColors {
    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn failure(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Pending states such as the first sample not having arrived yet.
    pub fn pending(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn help(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::BOLD)
    }
}

pub fn get_theme(kind: ThemeKind) -> ThemeColors {
    match kind {
        ThemeKind::Dark => ThemeColors {
            primary: Color::Rgb(79, 172, 254),
            accent: Color::Rgb(168, 85, 247),
            warning: Color::Rgb(251, 191, 36),
            error: Color::Rgb(239, 68, 68),
            muted: Color::Rgb(156, 163, 175),
            text: Color::Rgb(243, 244, 246),
        },
        ThemeKind::Light => ThemeColors {
            primary: Color::Rgb(37, 99, 235),
            accent: Color::Rgb(124, 58, 237),
            warning: Color::Rgb(180, 83, 9),
            error: Color::Rgb(220, 38, 38),
            muted: Color::Rgb(100, 116, 139),
            text: Color::Rgb(15, 23, 42),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_and_never_set_background() {
        let dark = get_theme(ThemeKind::Dark);
        let light = get_theme(ThemeKind::Light);
        assert_ne!(dark, light);
        assert_eq!(get_theme(ThemeKind::default()), dark);
        for theme in [dark, light] {
            for style in [
                theme.title(),
                theme.label(),
                theme.body(),
                theme.failure(),
                theme.pending(),
                theme.help(),
            ] {
                assert_eq!(style.bg, None);
            }
        }
    }

    #[test]
    fn emphasis_roles_are_bold() {
        let theme = get_theme(ThemeKind::Dark);
        assert!(theme.title().add_modifier.contains(Modifier::BOLD));
        assert!(theme.failure().add_modifier.contains(Modifier::BOLD));
        assert!(!theme.body().add_modifier.contains(Modifier::BOLD));
    }
}
