//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::gradient::Rgb;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const BACKGROUND: Rgb = Rgb::WHITE;
    pub const INK: Rgb = Rgb(0x2d, 0x18, 0x10);
    pub const INK_SOFT: Rgb = Rgb(0x4d, 0x28, 0x10);
    pub const INK_WARM: Rgb = Rgb(0x6d, 0x48, 0x10);
    pub const MUTED: Rgb = Rgb(0x9c, 0xa3, 0xaf);
    pub const ACCENT: Rgb = Rgb(0xff, 0x7f, 0x50);

    pub fn color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    /// `color` faded toward the page background; `opacity = 1` is unchanged.
    pub fn faded(color: Color, opacity: f64) -> Color {
        match color {
            Color::Rgb(r, g, b) => Self::color(Self::BACKGROUND.lerp(Rgb(r, g, b), opacity)),
            other => other,
        }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default()
            .bg(Self::color(Self::BACKGROUND))
            .fg(Self::color(Self::INK))
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::color(Self::INK))
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(Self::color(Self::INK))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Self::color(Self::INK_SOFT))
    }

    pub fn tagline_style() -> Style {
        Style::default().fg(Self::color(Self::INK_WARM))
    }

    pub fn rotating_name_style(fading: bool) -> Style {
        let style = Style::default()
            .fg(Self::color(Self::ACCENT))
            .add_modifier(Modifier::BOLD);
        if fading {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Self::color(Self::INK_SOFT))
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn placeholder_style() -> Style {
        Style::default().fg(Self::color(Self::MUTED))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(active: bool) -> Style {
        if active {
            Style::default().fg(Self::color(Self::ACCENT))
        } else {
            Style::default().fg(Self::color(Rgb(0xd1, 0xd5, 0xdb)))
        }
    }

    pub fn nav_style() -> Style {
        Style::default()
            .fg(Self::color(Self::INK))
            .bg(Self::color(Self::BACKGROUND))
    }

    pub fn nav_hover_style() -> Style {
        Style::default()
            .fg(Self::color(Self::INK))
            .bg(Self::color(Self::BACKGROUND))
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
