//! Interactive selection: moving, resizing and reshaping a [`Region`].
use strum::IntoEnumIterator;
use world_core::{Point3, Size, wrap_step};

use crate::input::EditorInput;
use crate::region::{Region, SelectionRules, Shape};

/// Adds `shift` to `var`, clamping the result into `[min, max)`.
///
/// The shift is reduced in place so the result lands on the boundary; callers
/// apply the reduced shift to every other point moved in the same batch.
pub fn limited_shift(var: i32, shift: &mut i32, min: i32, max: i32) -> i32 {
    if var + *shift < min {
        *shift = min - var;
    } else if var + *shift >= max {
        *shift += max - 1 - (var + *shift);
    }
    var + *shift
}

/// Cell delta an input moves the selection by, if it is a movement.
pub fn movement_delta(input: &EditorInput, viewport: Size) -> Option<(i32, i32, i32)> {
    match input {
        EditorInput::Move(direction) => {
            let (dx, dy) = direction.delta();
            Some((dx, dy, 0))
        }
        EditorInput::MoveWide(direction) => {
            let (dx, dy) = direction.delta();
            Some((dx * (viewport.width / 2), dy * (viewport.height / 2), 0))
        }
        EditorInput::LevelUp => Some((0, 0, 1)),
        EditorInput::LevelDown => Some((0, 0, -1)),
        _ => None,
    }
}

/// Moves the target by `delta`, each axis clamped to the world bounds.
///
/// With `move_origin` the origin is translated by the clamped delta, so the
/// selection keeps its extent when pushed against an edge.
pub fn shift_region(
    region: &mut Region,
    delta: (i32, i32, i32),
    move_origin: bool,
    rules: &SelectionRules,
) {
    let (mut dx, mut dy, mut dz) = delta;
    let bounds = rules.bounds;
    let target = region.target();
    let moved = Point3::new(
        limited_shift(target.x, &mut dx, 0, bounds.width),
        limited_shift(target.y, &mut dy, 0, bounds.height),
        limited_shift(target.z, &mut dz, bounds.min_z, bounds.max_z + 1),
    );
    let origin = if move_origin {
        region.origin().offset(dx, dy, dz)
    } else {
        region.origin()
    };
    region.set_anchors(origin, moved, rules);
}

/// How a selection session ended, or that it is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    Continue,
    /// The working region is authoritative.
    Confirmed,
    /// The entry snapshot was restored.
    Aborted,
}

/// Shape chooser sub-dialog.
#[derive(Clone, Debug)]
pub struct ShapeChooser {
    cursor: usize,
    entry: Region,
    entry_move_all: bool,
}

impl ShapeChooser {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Shape {
        Shape::from_position(self.cursor).unwrap_or_default()
    }
}

/// Working copy of a region being moved or resized.
#[derive(Clone, Debug)]
pub struct SelectionSession {
    region: Region,
    move_all: bool,
    blink: bool,
    snapshot: Region,
    chooser: Option<ShapeChooser>,
}

impl SelectionSession {
    /// Starts a session on `region`; `move_all` picks moving over resizing.
    pub fn begin(region: Region, move_all: bool) -> Self {
        Self {
            snapshot: region.clone(),
            region,
            move_all,
            blink: true,
            chooser: None,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn into_region(self) -> Region {
        self.region
    }

    pub fn move_all(&self) -> bool {
        self.move_all
    }

    pub fn blink(&self) -> bool {
        self.blink
    }

    pub fn chooser(&self) -> Option<&ShapeChooser> {
        self.chooser.as_ref()
    }

    /// Feeds one poll result into the session.
    pub fn handle(
        &mut self,
        input: Option<EditorInput>,
        rules: &SelectionRules,
        viewport: Size,
    ) -> SelectionEvent {
        if self.chooser.is_some() {
            self.handle_chooser(input, rules);
            return SelectionEvent::Continue;
        }

        let Some(input) = input else {
            self.blink = !self.blink;
            return SelectionEvent::Continue;
        };

        match input {
            EditorInput::Resize if self.move_all => self.move_all = false,
            EditorInput::Resize => {
                self.chooser = Some(ShapeChooser {
                    cursor: self.region.shape().position(),
                    entry: self.region.clone(),
                    entry_move_all: self.move_all,
                });
            }
            EditorInput::ReturnToStart if !self.move_all => {
                let origin = self.region.origin();
                self.region.set_target(origin, rules);
            }
            EditorInput::Swap => self.region.swap(rules),
            EditorInput::ToggleMoveAll => self.move_all = true,
            EditorInput::Tab if self.move_all => {
                self.move_all = false;
                return SelectionEvent::Confirmed;
            }
            EditorInput::Tab => self.move_all = true,
            EditorInput::Confirm | EditorInput::ConfirmQuit => return SelectionEvent::Confirmed,
            EditorInput::Quit => {
                self.region = self.snapshot.clone();
                return SelectionEvent::Aborted;
            }
            other => match movement_delta(&other, viewport) {
                Some(delta) => shift_region(&mut self.region, delta, self.move_all, rules),
                None => {
                    self.blink = !self.blink;
                    return SelectionEvent::Continue;
                }
            },
        }

        self.blink = true;
        SelectionEvent::Continue
    }

    fn handle_chooser(&mut self, input: Option<EditorInput>, rules: &SelectionRules) {
        let Some(chooser) = self.chooser.as_mut() else {
            return;
        };
        let chosen = match input {
            None => {
                self.blink = !self.blink;
                return;
            }
            Some(EditorInput::Quit) => {
                self.region = chooser.entry.clone();
                self.move_all = chooser.entry_move_all;
                self.chooser = None;
                self.blink = true;
                return;
            }
            Some(EditorInput::Confirm | EditorInput::ConfirmQuit) => Some(chooser.highlighted()),
            Some(EditorInput::Hotkey(key)) => Shape::from_hotkey(key),
            Some(other) => {
                if let Some(step) = other.vertical_step() {
                    chooser.cursor = wrap_step(chooser.cursor, step, Shape::iter().len()).0;
                }
                None
            }
        };

        if let Some(shape) = chosen {
            self.chooser = None;
            self.apply_shape(shape, rules);
        }
    }

    fn apply_shape(&mut self, shape: Shape, rules: &SelectionRules) {
        if shape == Shape::Point {
            self.region.set_shape(Shape::Point, rules);
            self.region.collapse(rules);
            self.move_all = true;
        } else {
            self.region.set_shape(shape, rules);
        }
        self.blink = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{Direction, DistanceMetric, MapBounds};

    const VIEW: Size = Size::new(20, 10);

    fn rules() -> SelectionRules {
        SelectionRules::new(MapBounds::new(50, 40, -2, 2), DistanceMetric::Chebyshev)
    }

    fn p(x: i32, y: i32) -> Point3 {
        Point3::new(x, y, 0)
    }

    fn session(origin: Point3, target: Point3, shape: Shape, move_all: bool) -> SelectionSession {
        SelectionSession::begin(Region::new(origin, target, shape, &rules()), move_all)
    }

    #[test]
    fn limited_shift_clamps_and_reduces_shift() {
        let mut shift = -5;
        assert_eq!(limited_shift(2, &mut shift, 0, 10), 0);
        assert_eq!(shift, -2);

        let mut shift = 4;
        assert_eq!(limited_shift(8, &mut shift, 0, 10), 9);
        assert_eq!(shift, 1);

        let mut shift = 3;
        assert_eq!(limited_shift(4, &mut shift, 0, 10), 7);
        assert_eq!(shift, 3);
    }

    #[test]
    fn resize_move_only_moves_target() {
        let mut session = session(p(5, 5), p(8, 8), Shape::RectFilled, false);
        session.handle(Some(EditorInput::Move(Direction::East)), &rules(), VIEW);
        assert_eq!(session.region().origin(), p(5, 5));
        assert_eq!(session.region().target(), p(9, 8));
        assert_eq!(session.region().len(), 5 * 4);
    }

    #[test]
    fn move_all_carries_clamped_delta_to_origin() {
        let rules = rules();
        let mut session = session(p(6, 5), p(1, 5), Shape::Rect, true);
        session.handle(Some(EditorInput::MoveWide(Direction::West)), &rules, VIEW);
        // Wide move is 10 cells, target can only go 1.
        assert_eq!(session.region().target(), p(0, 5));
        assert_eq!(session.region().origin(), p(5, 5));
    }

    #[test]
    fn level_change_clamps_z() {
        let rules = rules();
        let mut session = session(p(3, 3), Point3::new(3, 3, 2), Shape::Point, true);
        session.handle(Some(EditorInput::LevelUp), &rules, VIEW);
        assert_eq!(session.region().target().z, 2);
        session.handle(Some(EditorInput::LevelDown), &rules, VIEW);
        assert_eq!(session.region().target().z, 1);
    }

    #[test]
    fn quit_restores_entry_snapshot() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Circle, false);
        let entry = session.region().clone();
        session.handle(Some(EditorInput::Move(Direction::South)), &rules, VIEW);
        session.handle(Some(EditorInput::Swap), &rules, VIEW);
        assert_ne!(session.region(), &entry);
        let event = session.handle(Some(EditorInput::Quit), &rules, VIEW);
        assert_eq!(event, SelectionEvent::Aborted);
        assert_eq!(session.region(), &entry);
    }

    #[test]
    fn confirm_keeps_working_region() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        session.handle(Some(EditorInput::Move(Direction::SouthEast)), &rules, VIEW);
        let event = session.handle(Some(EditorInput::Confirm), &rules, VIEW);
        assert_eq!(event, SelectionEvent::Confirmed);
        assert_eq!(session.into_region().target(), p(5, 5));
    }

    #[test]
    fn return_to_start_only_while_resizing() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        session.handle(Some(EditorInput::ReturnToStart), &rules, VIEW);
        assert_eq!(session.region().target(), p(2, 2));

        let mut moving = self::session(p(2, 2), p(4, 4), Shape::Rect, true);
        moving.handle(Some(EditorInput::ReturnToStart), &rules, VIEW);
        assert_eq!(moving.region().target(), p(4, 4));
    }

    #[test]
    fn tab_enters_then_confirms_move_all() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        assert_eq!(session.handle(Some(EditorInput::Tab), &rules, VIEW), SelectionEvent::Continue);
        assert!(session.move_all());
        assert_eq!(session.handle(Some(EditorInput::Tab), &rules, VIEW), SelectionEvent::Confirmed);
        assert!(!session.move_all());
    }

    #[test]
    fn resize_while_moving_all_leaves_move_all() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, true);
        session.handle(Some(EditorInput::Resize), &rules, VIEW);
        assert!(!session.move_all());
        assert!(session.chooser().is_none());
    }

    #[test]
    fn unmatched_input_toggles_blink() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        assert!(session.blink());
        session.handle(None, &rules, VIEW);
        assert!(!session.blink());
        session.handle(Some(EditorInput::Hotkey('#')), &rules, VIEW);
        assert!(session.blink());
        session.handle(None, &rules, VIEW);
        session.handle(Some(EditorInput::Move(Direction::North)), &rules, VIEW);
        assert!(session.blink());
    }

    #[test]
    fn chooser_picks_shape_by_hotkey_and_cursor() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        session.handle(Some(EditorInput::Resize), &rules, VIEW);
        assert_eq!(session.chooser().map(ShapeChooser::highlighted), Some(Shape::Rect));
        session.handle(Some(EditorInput::Hotkey('f')), &rules, VIEW);
        assert!(session.chooser().is_none());
        assert_eq!(session.region().shape(), Shape::RectFilled);
        assert_eq!(session.region().len(), 9);

        session.handle(Some(EditorInput::Resize), &rules, VIEW);
        session.handle(Some(EditorInput::Move(Direction::South)), &rules, VIEW);
        session.handle(Some(EditorInput::Confirm), &rules, VIEW);
        assert_eq!(session.region().shape(), Shape::Line);
    }

    #[test]
    fn choosing_point_collapses_and_moves_all() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Rect, false);
        session.handle(Some(EditorInput::Resize), &rules, VIEW);
        session.handle(Some(EditorInput::Hotkey('p')), &rules, VIEW);
        assert_eq!(session.region().members(), &[p(4, 4)]);
        assert_eq!(session.region().origin(), p(4, 4));
        assert!(session.move_all());
    }

    #[test]
    fn chooser_escape_restores_chooser_entry() {
        let rules = rules();
        let mut session = session(p(2, 2), p(4, 4), Shape::Circle, false);
        session.handle(Some(EditorInput::Move(Direction::East)), &rules, VIEW);
        let before = session.region().clone();
        session.handle(Some(EditorInput::Resize), &rules, VIEW);
        session.handle(Some(EditorInput::Move(Direction::North)), &rules, VIEW);
        session.handle(Some(EditorInput::Quit), &rules, VIEW);
        assert!(session.chooser().is_none());
        assert_eq!(session.region(), &before);
        assert!(!session.move_all());
    }
}
