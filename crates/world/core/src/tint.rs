use std::fmt;

/// Sixteen-colour palette for glyph foregrounds and backgrounds.
///
/// The terminal front end maps these onto its own colour type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tint {
    Black,
    Red,
    Green,
    Brown,
    Blue,
    Magenta,
    Cyan,
    #[default]
    LightGray,
    DarkGray,
    LightRed,
    LightGreen,
    Yellow,
    LightBlue,
    Pink,
    LightCyan,
    White,
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single drawn cell: glyph, foreground and optional background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub symbol: char,
    pub fg: Tint,
    pub bg: Option<Tint>,
}

impl Glyph {
    pub const BLANK: Self = Self::new(' ', Tint::Black);

    pub const fn new(symbol: char, fg: Tint) -> Self {
        Self {
            symbol,
            fg,
            bg: None,
        }
    }

    pub const fn on(mut self, bg: Tint) -> Self {
        self.bg = Some(bg);
        self
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}
