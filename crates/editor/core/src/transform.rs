//! World <-> screen mapping for the map viewport.
use world_core::{Point2, Point3, Size};

/// Viewport centred on a focus cell.
///
/// The focus is drawn at `(width / 2, height / 2)`. Results outside the
/// viewport are still returned; callers clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransform {
    pub focus: Point3,
    pub viewport: Size,
}

impl ViewTransform {
    pub const fn new(focus: Point3, viewport: Size) -> Self {
        Self { focus, viewport }
    }

    /// Screen cell the focus is drawn at.
    pub const fn center(&self) -> Point2 {
        Point2::new(self.viewport.width / 2, self.viewport.height / 2)
    }

    pub fn world_to_screen(&self, point: Point3) -> Point2 {
        let center = self.center();
        Point2::new(
            center.x + point.x - self.focus.x,
            center.y + point.y - self.focus.y,
        )
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen) on the focus level.
    pub fn screen_to_world(&self, screen: Point2) -> Point3 {
        let center = self.center();
        Point3::new(
            screen.x - center.x + self.focus.x,
            screen.y - center.y + self.focus.y,
            self.focus.z,
        )
    }

    pub fn is_visible(&self, screen: Point2) -> bool {
        self.viewport.contains(screen)
    }

    /// Every viewport cell paired with the world cell drawn there, row by row.
    pub fn visible_points(&self) -> impl Iterator<Item = (Point2, Point3)> + '_ {
        (0..self.viewport.height).flat_map(move |sy| {
            (0..self.viewport.width).map(move |sx| {
                let screen = Point2::new(sx, sy);
                (screen, self.screen_to_world(screen))
            })
        })
    }
}
