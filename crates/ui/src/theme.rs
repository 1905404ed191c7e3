use helpai_core::Theme as ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors for one theme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Host screen background
    pub bg: Color,
    /// Primary text
    pub fg: Color,
    /// Modal and input background
    pub panel_bg: Color,
    /// Selected tab, button face, input accent bar
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub on_accent: Color,
    /// Hints and placeholders
    pub muted: Color,
    pub border: Color,
    /// Speaker label for the user's lines
    pub user: Color,
    /// Speaker label for the assistant's lines
    pub ai: Color,
}

/// Color themes for the help widget
///
/// `Dark` uses the iceberg.vim palette; `Light` is its daytime counterpart.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    pub const LIGHT: ThemePalette = ThemePalette {
        bg: Color::Rgb(232, 233, 236),
        fg: Color::Rgb(51, 55, 76),
        panel_bg: Color::Rgb(244, 245, 247),
        accent: Color::Rgb(45, 83, 153),
        on_accent: Color::Rgb(244, 245, 247),
        muted: Color::Rgb(130, 133, 150),
        border: Color::Rgb(193, 196, 205),
        user: Color::Rgb(63, 131, 166),
        ai: Color::Rgb(102, 128, 38),
    };

    pub const DARK: ThemePalette = ThemePalette {
        bg: Color::Rgb(22, 24, 33),
        fg: Color::Rgb(198, 200, 209),
        panel_bg: Color::Rgb(30, 33, 50),
        accent: Color::Rgb(132, 160, 198),
        on_accent: Color::Rgb(22, 24, 33),
        muted: Color::Rgb(107, 112, 137),
        border: Color::Rgb(60, 65, 90),
        user: Color::Rgb(137, 184, 194),
        ai: Color::Rgb(180, 190, 130),
    };

    pub fn palette(variant: ThemeVariant) -> ThemePalette {
        match variant {
            ThemeVariant::Light => Self::LIGHT,
            ThemeVariant::Dark => Self::DARK,
        }
    }
}

impl ThemePalette {
    /// Base style for the host screen
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Modal body
    pub fn panel(&self) -> Style {
        Style::default().fg(self.fg).bg(self.panel_bg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.panel_bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.panel_bg)
    }

    /// Toggle button face and the active persona tab
    pub fn button(&self) -> Style {
        Style::default().fg(self.on_accent).bg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn user_label(&self) -> Style {
        Style::default().fg(self.user).bg(self.panel_bg).add_modifier(Modifier::BOLD)
    }

    pub fn ai_label(&self) -> Style {
        Style::default().fg(self.ai).bg(self.panel_bg).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_for_variant() {
        assert_eq!(Theme::palette(ThemeVariant::Light), Theme::LIGHT);
        assert_eq!(Theme::palette(ThemeVariant::Dark), Theme::DARK);
        assert_ne!(Theme::LIGHT.bg, Theme::DARK.bg);
    }

    #[test]
    fn test_styles() {
        let dark = Theme::DARK;
        assert_eq!(dark.base().fg, Some(dark.fg));
        assert_eq!(dark.base().bg, Some(dark.bg));
        assert_eq!(dark.panel().bg, Some(dark.panel_bg));
        assert_eq!(dark.button().bg, Some(dark.accent));
        assert!(dark.button().add_modifier.contains(Modifier::BOLD));
    }
}
