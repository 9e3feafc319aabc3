//! Everything a front end needs to draw one editor frame.
use world_core::{Glyph, Point2, Tint};

use crate::input::EditorInput;
use crate::overlay::Surface;

pub use crate::inspector::InfoLine;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub tint: Tint,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tint: Tint::LightGray,
        }
    }

    pub fn tinted(label: impl Into<String>, tint: Tint) -> Self {
        Self {
            label: label.into(),
            tint,
        }
    }
}

/// A vertical list with one highlighted entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
    /// Extra lines drawn under the list.
    pub footer: Vec<InfoLine>,
}

/// The terrain / furniture grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteView {
    pub title: String,
    pub glyphs: Vec<Glyph>,
    pub columns: usize,
    pub cursor: usize,
    pub caption: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Menu(MenuView),
    Palette(PaletteView),
}

/// An input the current mode reacts to, with what it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub input: EditorInput,
    pub label: &'static str,
}

impl Hint {
    pub const fn new(input: EditorInput, label: &'static str) -> Self {
        Self { input, label }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorFrame {
    pub title: String,
    pub surface: Surface,
    /// Screen cell of the selection target, for the terminal cursor.
    pub cursor: Option<Point2>,
    pub info: Vec<InfoLine>,
    pub panel: Option<Panel>,
    pub hints: Vec<Hint>,
    pub message: Option<String>,
}
