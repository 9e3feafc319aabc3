//! Ratatui styling for editor glyphs and text.
use ratatui::style::{Color, Modifier, Style};
use world_core::{Glyph, Tint};

/// Terminal colour of a tint.
pub fn color(tint: Tint) -> Color {
    match tint {
        Tint::Black => Color::Black,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Brown => Color::Yellow,
        Tint::Blue => Color::Blue,
        Tint::Magenta => Color::Magenta,
        Tint::Cyan => Color::Cyan,
        Tint::LightGray => Color::Gray,
        Tint::DarkGray => Color::DarkGray,
        Tint::LightRed => Color::LightRed,
        Tint::LightGreen => Color::LightGreen,
        Tint::Yellow => Color::LightYellow,
        Tint::LightBlue => Color::LightBlue,
        Tint::Pink => Color::LightMagenta,
        Tint::LightCyan => Color::LightCyan,
        Tint::White => Color::White,
    }
}

pub fn glyph_style(glyph: Glyph) -> Style {
    let style = Style::default().fg(color(glyph.fg));
    match glyph.bg {
        Some(bg) => style.bg(color(bg)),
        None => style,
    }
}

pub fn text_style(tint: Tint) -> Style {
    Style::default().fg(color(tint))
}

/// Highlight of the selected menu or palette entry.
pub fn selected(style: Style) -> Style {
    style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

pub fn key_style() -> Style {
    Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_tint_becomes_bg_colour() {
        let style = glyph_style(Glyph::new('#', Tint::White).on(Tint::Cyan));
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::Cyan));
        assert_eq!(glyph_style(Glyph::new('.', Tint::Brown)).bg, None);
    }
}
