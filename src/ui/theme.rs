use ratatui::style::Color;

/// Color theme, switched by the dark mode setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Theme { dark }
    }

    /// Primary branding color
    pub fn primary(self) -> Color {
        if self.dark { Color::LightRed } else { Color::Red }
    }

    /// Borders
    pub fn secondary(self) -> Color {
        if self.dark { Color::Gray } else { Color::Cyan }
    }

    pub fn success(self) -> Color {
        Color::Green
    }

    /// A running timer
    pub fn active(self) -> Color {
        Color::LightGreen
    }

    pub fn warn(self) -> Color {
        Color::Yellow
    }

    pub fn error(self) -> Color {
        Color::LightRed
    }

    /// Selection/highlight
    pub fn highlight(self) -> Color {
        if self.dark { Color::LightYellow } else { Color::Cyan }
    }

    pub fn selection_marker(self) -> Color {
        Color::Green
    }

    /// Dimmed/inactive text
    pub fn dim(self) -> Color {
        Color::DarkGray
    }

    pub fn text(self) -> Color {
        if self.dark { Color::Gray } else { Color::White }
    }

    /// Accent for numbers/counts
    pub fn accent(self) -> Color {
        if self.dark { Color::LightMagenta } else { Color::LightBlue }
    }
}
