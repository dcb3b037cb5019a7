//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::record::RatingTier;

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;
    pub const KEY_FG: Color = Color::Yellow;

    // Status colors
    pub const ERROR: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row / card style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of the keyboard-focused column.
    pub fn active_column() -> Style {
        Style::default()
            .fg(Theme::ACCENT)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Key hint style.
    pub fn key() -> Style {
        Style::default().fg(Theme::KEY_FG)
    }

    /// Popup border style.
    pub fn popup_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Error message style.
    pub fn error() -> Style {
        Style::default()
            .fg(Theme::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Rating value colored by tier.
    pub fn tier(tier: RatingTier) -> Style {
        Style::default().fg(tier_color(tier))
    }
}

/// Tier colors, from green (below average) to red (legendary).
pub fn tier_color(tier: RatingTier) -> Color {
    match tier {
        RatingTier::Legendary => Color::Rgb(0xFF, 0x17, 0x44),
        RatingTier::VeryStrong => Color::Rgb(0xFF, 0x6D, 0x00),
        RatingTier::Strong => Color::Rgb(0xFF, 0xA0, 0x00),
        RatingTier::AboveAverage => Color::Rgb(0xFF, 0xD6, 0x00),
        RatingTier::Average => Color::Rgb(0x64, 0xDD, 0x17),
        RatingTier::BelowAverage => Color::Rgb(0x00, 0xC8, 0x53),
    }
}
