//! Closed set of editor inputs and the contexts front ends map keys in.
use world_core::Direction;

/// What the operator asked for.
///
/// Front ends translate raw key events into these, using
/// [`InputContext`] to decide what a key means in the current mode. A poll
/// that produced nothing (timeout) is passed to the editor as `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorInput {
    Move(Direction),
    /// Half a viewport in the direction's axis components.
    MoveWide(Direction),
    LevelUp,
    LevelDown,
    /// Open the shape chooser, or leave move-all.
    Resize,
    Swap,
    ToggleMoveAll,
    ReturnToStart,
    Tab,
    Confirm,
    /// Apply the current choice and leave the dialog.
    ConfirmQuit,
    Quit,
    NextPage,
    PrevPage,
    ToggleShowAll,
    Edit(EditCategory),
    /// A key with no fixed meaning, offered to menus as a hotkey.
    Hotkey(char),
}

impl EditorInput {
    /// Signed step of vertical menu navigation.
    pub fn vertical_step(&self) -> Option<i32> {
        match self {
            EditorInput::Move(direction) => match direction.delta() {
                (_, 0) => None,
                (_, dy) => Some(dy),
            },
            _ => None,
        }
    }

    /// Signed step of horizontal value adjustment; wide moves step by ten.
    pub fn horizontal_step(&self) -> Option<i64> {
        let (direction, scale) = match self {
            EditorInput::Move(direction) => (direction, 1),
            EditorInput::MoveWide(direction) => (direction, 10),
            _ => return None,
        };
        match direction.delta() {
            (0, _) => None,
            (dx, _) => Some(i64::from(dx) * scale),
        }
    }
}

/// Editing dialogs reachable from look mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum EditCategory {
    /// Terrain and furniture palette.
    Terrain,
    Fields,
    Items,
    Traps,
    /// Creature or vehicle on the target cell.
    Occupant,
    /// Region-tile regeneration.
    Regenerate,
}

/// Input mode the editor is in, for front-end key mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum InputContext {
    Looking,
    Selection,
    ShapeChooser,
    Palette,
    Menu,
    Retarget,
    Preview,
}
