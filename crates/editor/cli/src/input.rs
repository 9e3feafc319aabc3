//! Keyboard mapping for the terminal editor.
//!
//! This module owns the key-to-input mapping so the editor itself stays
//! agnostic about concrete bindings or `crossterm` events. What a key means
//! depends on the editor's [`InputContext`].
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use editor_core::{EditCategory, EditorInput, InputContext};
use world_core::Direction;

/// Direction bound to a vi-style letter, ignoring case.
fn vi_direction(ch: char) -> Option<Direction> {
    let direction = match ch.to_ascii_lowercase() {
        'h' => Direction::West,
        'j' => Direction::South,
        'k' => Direction::North,
        'l' => Direction::East,
        'y' => Direction::NorthWest,
        'u' => Direction::NorthEast,
        'b' => Direction::SouthWest,
        'n' => Direction::SouthEast,
        _ => return None,
    };
    Some(direction)
}

fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::West),
        KeyCode::Right => Some(Direction::East),
        KeyCode::Up => Some(Direction::North),
        KeyCode::Down => Some(Direction::South),
        KeyCode::Home => Some(Direction::NorthWest),
        KeyCode::PageUp => Some(Direction::NorthEast),
        KeyCode::End => Some(Direction::SouthWest),
        KeyCode::PageDown => Some(Direction::SouthEast),
        _ => None,
    }
}

/// Movement shared by every context. Upper-case letters and shifted arrows
/// move wide.
fn movement(key: &KeyEvent) -> Option<EditorInput> {
    if let KeyCode::Char(ch) = key.code {
        let direction = vi_direction(ch)?;
        return Some(if ch.is_ascii_uppercase() {
            EditorInput::MoveWide(direction)
        } else {
            EditorInput::Move(direction)
        });
    }
    let direction = arrow_direction(key.code)?;
    Some(if key.modifiers.contains(KeyModifiers::SHIFT) {
        EditorInput::MoveWide(direction)
    } else {
        EditorInput::Move(direction)
    })
}

/// Confirm / quit keys understood everywhere.
fn common(key: &KeyEvent) -> Option<EditorInput> {
    match key.code {
        KeyCode::Enter => Some(EditorInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(EditorInput::Quit),
        KeyCode::Tab => Some(EditorInput::Tab),
        _ => None,
    }
}

/// Translates one key event for `context`.
///
/// Key releases produce nothing.
pub fn map_key(context: InputContext, key: KeyEvent) -> Option<EditorInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match context {
        InputContext::ShapeChooser => match key.code {
            KeyCode::Up | KeyCode::Down => movement(&key),
            KeyCode::Enter => Some(EditorInput::Confirm),
            KeyCode::Esc | KeyCode::Char('q') => Some(EditorInput::Quit),
            KeyCode::Char(ch) => Some(EditorInput::Hotkey(ch)),
            _ => None,
        },
        InputContext::Preview => match key.code {
            KeyCode::PageDown | KeyCode::Char('+') => Some(EditorInput::NextPage),
            KeyCode::PageUp | KeyCode::Char('-') => Some(EditorInput::PrevPage),
            _ => common(&key).or_else(|| movement(&key)),
        },
        InputContext::Retarget => match key.code {
            KeyCode::Char('<') => Some(EditorInput::LevelUp),
            KeyCode::Char('>') => Some(EditorInput::LevelDown),
            KeyCode::Char('m') => Some(EditorInput::ToggleMoveAll),
            _ => common(&key).or_else(|| movement(&key)),
        },
        InputContext::Looking => match key.code {
            KeyCode::Char('<') => Some(EditorInput::LevelUp),
            KeyCode::Char('>') => Some(EditorInput::LevelDown),
            KeyCode::Char('s') => Some(EditorInput::Resize),
            KeyCode::Char('m') => Some(EditorInput::ToggleMoveAll),
            KeyCode::Char('v') => Some(EditorInput::ToggleShowAll),
            KeyCode::Char('t') => Some(EditorInput::Edit(EditCategory::Terrain)),
            KeyCode::Char('f') => Some(EditorInput::Edit(EditCategory::Fields)),
            KeyCode::Char('i') => Some(EditorInput::Edit(EditCategory::Items)),
            KeyCode::Char('^') => Some(EditorInput::Edit(EditCategory::Traps)),
            KeyCode::Char('o') => Some(EditorInput::Edit(EditCategory::Occupant)),
            KeyCode::Char('g') => Some(EditorInput::Edit(EditCategory::Regenerate)),
            _ => common(&key).or_else(|| movement(&key)),
        },
        InputContext::Selection => match key.code {
            KeyCode::Char('<') => Some(EditorInput::LevelUp),
            KeyCode::Char('>') => Some(EditorInput::LevelDown),
            KeyCode::Char('s') => Some(EditorInput::Resize),
            KeyCode::Char('o') => Some(EditorInput::Swap),
            KeyCode::Char('m') => Some(EditorInput::ToggleMoveAll),
            KeyCode::Char('r') => Some(EditorInput::ReturnToStart),
            _ => common(&key).or_else(|| movement(&key)),
        },
        InputContext::Palette => match key.code {
            KeyCode::Char(' ') => Some(EditorInput::ConfirmQuit),
            KeyCode::Char('s') => Some(EditorInput::Resize),
            KeyCode::Char('v') => Some(EditorInput::ToggleShowAll),
            _ => common(&key).or_else(|| movement(&key)),
        },
        InputContext::Menu => match key.code {
            KeyCode::Char(' ') => Some(EditorInput::ConfirmQuit),
            KeyCode::Char('s') => Some(EditorInput::Resize),
            KeyCode::Char('m') => Some(EditorInput::ToggleMoveAll),
            KeyCode::Char('v') => Some(EditorInput::ToggleShowAll),
            KeyCode::PageDown | KeyCode::Char('+') => Some(EditorInput::NextPage),
            KeyCode::PageUp | KeyCode::Char('-') => Some(EditorInput::PrevPage),
            _ => common(&key).or_else(|| movement(&key)),
        },
    }
}

/// Short key name shown in the help bar for an input.
pub fn key_label(input: EditorInput) -> &'static str {
    match input {
        EditorInput::Move(_) => "hjkl",
        EditorInput::MoveWide(_) => "HJKL",
        EditorInput::LevelUp => "<",
        EditorInput::LevelDown => ">",
        EditorInput::Resize => "s",
        EditorInput::Swap => "o",
        EditorInput::ToggleMoveAll => "m",
        EditorInput::ReturnToStart => "r",
        EditorInput::Tab => "tab",
        EditorInput::Confirm => "enter",
        EditorInput::ConfirmQuit => "space",
        EditorInput::Quit => "esc",
        EditorInput::NextPage => "+",
        EditorInput::PrevPage => "-",
        EditorInput::ToggleShowAll => "v",
        EditorInput::Edit(EditCategory::Terrain) => "t",
        EditorInput::Edit(EditCategory::Fields) => "f",
        EditorInput::Edit(EditCategory::Items) => "i",
        EditorInput::Edit(EditCategory::Traps) => "^",
        EditorInput::Edit(EditCategory::Occupant) => "o",
        EditorInput::Edit(EditCategory::Regenerate) => "g",
        EditorInput::Hotkey(_) => "key",
    }
}
