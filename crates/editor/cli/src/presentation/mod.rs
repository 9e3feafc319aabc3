//! Terminal presentation: theme, layout and terminal lifecycle.
pub mod terminal;
pub mod theme;
pub mod ui;
