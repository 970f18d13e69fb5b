//! Theme system for dark/light modes

use folio_core::config::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub heading: [Style; 3],
    pub meta: Style,
    pub link: Style,
    pub quote: Style,
    pub list_marker: Style,
    pub table_header: Style,
    pub table_border: Style,
    pub rating: Style,
    pub qualifier: Style,
    pub pros: Style,
    pub cons: Style,
    pub outline_border: Color,
    pub outline_active: Style,
    pub outline_selected: Style,
    pub focus_border: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            heading: [
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ],
            meta: Style::default().fg(Color::Gray),
            link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(Color::LightRed),
            table_header: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            rating: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            qualifier: Style::default().fg(Color::Black).bg(Color::LightBlue),
            pros: Style::default().fg(Color::LightGreen),
            cons: Style::default().fg(Color::LightRed),
            outline_border: Color::DarkGray,
            outline_active: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            outline_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            focus_border: Color::LightCyan,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black),
            heading: [
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ],
            meta: Style::default().fg(Color::DarkGray),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(Color::Red),
            table_header: Style::default()
                .fg(Color::Rgb(150, 100, 0))
                .add_modifier(Modifier::BOLD), // Dark yellow
            table_border: Style::default().fg(Color::Gray),
            rating: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(250, 210, 90))
                .add_modifier(Modifier::BOLD),
            qualifier: Style::default()
                .fg(Color::White)
                .bg(Color::Blue),
            pros: Style::default().fg(Color::Green),
            cons: Style::default().fg(Color::Red),
            outline_border: Color::Gray,
            outline_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            outline_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            focus_border: Color::Blue,
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
        }
    }

    /// Style for a heading of the given level (1-3)
    pub fn heading_style(&self, level: u8) -> Style {
        let idx = usize::from(level.clamp(1, 3)) - 1;
        self.heading[idx]
    }
}
