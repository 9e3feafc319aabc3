//! Selection shapes and the cells they cover.
use strum::{EnumIter, IntoEnumIterator};
use world_core::{DistanceMetric, MapBounds, Point3, line_to};

/// Shape of a multi-cell selection.
///
/// Variants are listed in shape-chooser order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter, strum::Display)]
pub enum Shape {
    /// Outline of the rectangle spanned by origin and target.
    Rect,
    RectFilled,
    Line,
    /// Every cell within `distance(origin, target)` of the origin.
    Circle,
    #[default]
    Point,
}

impl Shape {
    pub const fn hotkey(self) -> char {
        match self {
            Shape::Rect => 'r',
            Shape::RectFilled => 'f',
            Shape::Line => 'l',
            Shape::Circle => 'c',
            Shape::Point => 'p',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Shape::Rect => "Rectangle",
            Shape::RectFilled => "Filled Rectangle",
            Shape::Line => "Line",
            Shape::Circle => "Filled Circle",
            Shape::Point => "Point",
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::iter().find(|shape| shape.hotkey() == key)
    }

    /// Position in chooser order.
    pub fn position(self) -> usize {
        Self::iter().position(|shape| shape == self).unwrap_or(0)
    }

    pub fn from_position(position: usize) -> Option<Self> {
        Self::iter().nth(position)
    }
}

/// World facts the member computation depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRules {
    pub bounds: MapBounds,
    pub metric: DistanceMetric,
}

impl SelectionRules {
    pub const fn new(bounds: MapBounds, metric: DistanceMetric) -> Self {
        Self { bounds, metric }
    }
}

/// Cells covered by `shape` drawn from `origin` to `target`, on `target`'s level.
///
/// Rectangles and circles are filtered to the world bounds and generated with
/// x as the outer loop. Lines are not filtered.
pub fn recompute(
    origin: Point3,
    target: Point3,
    shape: Shape,
    rules: &SelectionRules,
) -> Vec<Point3> {
    let z = target.z;
    let members = match shape {
        Shape::Point => vec![target],
        Shape::Rect | Shape::RectFilled => {
            let (sx, ex) = (origin.x.min(target.x), origin.x.max(target.x));
            let (sy, ey) = (origin.y.min(target.y), origin.y.max(target.y));
            let filled = shape == Shape::RectFilled;
            let mut members = Vec::new();
            for x in sx..=ex {
                for y in sy..=ey {
                    let edge = x == sx || x == ex || y == sy || y == ey;
                    let point = Point3::new(x, y, z);
                    if (filled || edge) && rules.bounds.contains(point) {
                        members.push(point);
                    }
                }
            }
            members
        }
        Shape::Circle => {
            let center = Point3::new(origin.x, origin.y, z);
            let radius = rules.metric.distance(center, target);
            let mut members = Vec::new();
            for x in center.x - radius..=center.x + radius {
                for y in center.y - radius..=center.y + radius {
                    let point = Point3::new(x, y, z);
                    if rules.metric.distance(center, point) <= radius
                        && rules.bounds.contains(point)
                    {
                        members.push(point);
                    }
                }
            }
            members
        }
        Shape::Line => line_to(origin, target),
    };
    tracing::trace!(%shape, members = members.len(), "recomputed selection");
    members
}

/// A selection: two anchor cells, a shape and the cells it covers.
///
/// `members` is kept equal to [`recompute`] of the other three fields; every
/// mutation goes through a method that recomputes. `origin` only matters when
/// there is more than one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    origin: Point3,
    target: Point3,
    shape: Shape,
    members: Vec<Point3>,
}

impl Region {
    /// Single-cell selection at `target`.
    pub fn point(target: Point3) -> Self {
        Self {
            origin: target,
            target,
            shape: Shape::Point,
            members: vec![target],
        }
    }

    pub fn new(origin: Point3, target: Point3, shape: Shape, rules: &SelectionRules) -> Self {
        Self {
            origin,
            target,
            shape,
            members: recompute(origin, target, shape, rules),
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn members(&self) -> &[Point3] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_multi(&self) -> bool {
        self.members.len() > 1
    }

    pub fn contains(&self, point: Point3) -> bool {
        self.members.contains(&point)
    }

    pub fn recompute(&mut self, rules: &SelectionRules) {
        self.members = recompute(self.origin, self.target, self.shape, rules);
    }

    pub fn set_anchors(&mut self, origin: Point3, target: Point3, rules: &SelectionRules) {
        self.origin = origin;
        self.target = target;
        self.recompute(rules);
    }

    pub fn set_target(&mut self, target: Point3, rules: &SelectionRules) {
        self.target = target;
        self.recompute(rules);
    }

    pub fn set_shape(&mut self, shape: Shape, rules: &SelectionRules) {
        self.shape = shape;
        self.recompute(rules);
    }

    /// Exchanges origin and target.
    pub fn swap(&mut self, rules: &SelectionRules) {
        std::mem::swap(&mut self.origin, &mut self.target);
        self.recompute(rules);
    }

    /// Pulls the origin onto the target, keeping the shape.
    pub fn collapse(&mut self, rules: &SelectionRules) {
        self.origin = self.target;
        self.recompute(rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rules() -> SelectionRules {
        SelectionRules::new(MapBounds::new(30, 20, -1, 1), DistanceMetric::Chebyshev)
    }

    fn p(x: i32, y: i32) -> Point3 {
        Point3::new(x, y, 0)
    }

    #[test]
    fn point_is_target_only() {
        let members = recompute(p(1, 1), p(4, 5), Shape::Point, &rules());
        assert_eq!(members, vec![p(4, 5)]);
    }

    #[test]
    fn filled_rect_runs_x_outer() {
        let members = recompute(p(3, 4), p(2, 5), Shape::RectFilled, &rules());
        assert_eq!(members, vec![p(2, 4), p(2, 5), p(3, 4), p(3, 5)]);
    }

    #[test]
    fn rect_is_border_of_filled_rect() {
        let rules = rules();
        let outline: HashSet<_> = recompute(p(2, 2), p(7, 6), Shape::Rect, &rules)
            .into_iter()
            .collect();
        let filled: HashSet<_> = recompute(p(2, 2), p(7, 6), Shape::RectFilled, &rules)
            .into_iter()
            .collect();
        assert!(outline.is_subset(&filled));
        assert_eq!(outline.len(), 2 * 6 + 2 * 3);
        assert!(!outline.contains(&p(4, 4)));
        assert_eq!(filled.len(), 30);
    }

    #[test]
    fn rect_is_clipped_to_bounds() {
        let rules = rules();
        let members = recompute(p(27, 17), p(29, 19), Shape::RectFilled, &rules);
        assert_eq!(members.len(), 9);
        let members = recompute(p(-2, 0), p(1, 1), Shape::RectFilled, &rules);
        assert!(members.iter().all(|m| rules.bounds.contains(*m)));
        assert_eq!(members.len(), 4);
    }

    #[test]
    fn circle_uses_metric_radius() {
        let rules = rules();
        let members = recompute(p(10, 10), p(12, 11), Shape::Circle, &rules);
        // Chebyshev radius 2 covers the full 5x5 square.
        assert_eq!(members.len(), 25);
        assert!(members.contains(&p(12, 11)));

        let octile = SelectionRules::new(rules.bounds, DistanceMetric::Octile);
        let members = recompute(p(10, 10), p(12, 10), Shape::Circle, &octile);
        assert!(!members.contains(&p(12, 12)));
        assert!(members.contains(&p(11, 11)));
        assert!(members.contains(&p(12, 10)));
    }

    #[test]
    fn circle_projects_origin_to_target_level() {
        let members = recompute(
            Point3::new(5, 5, 1),
            Point3::new(6, 5, 0),
            Shape::Circle,
            &rules(),
        );
        assert_eq!(members.len(), 9);
        assert!(members.iter().all(|m| m.z == 0));
    }

    #[test]
    fn line_is_not_filtered() {
        let members = recompute(p(28, 0), p(33, 0), Shape::Line, &rules());
        assert_eq!(members.len(), 5);
        assert_eq!(members.last(), Some(&p(33, 0)));
        assert!(!members.contains(&p(28, 0)));
    }

    #[test]
    fn members_contain_target_for_every_shape() {
        let rules = rules();
        for shape in Shape::iter() {
            let region = Region::new(p(3, 3), p(9, 12), shape, &rules);
            assert!(region.contains(p(9, 12)), "{shape}");
            if shape != Shape::Line {
                assert!(region.members().iter().all(|m| rules.bounds.contains(*m)));
            }
        }
    }

    #[test]
    fn swap_twice_is_identity() {
        let rules = rules();
        let region = Region::new(p(1, 2), p(6, 8), Shape::Line, &rules);
        let mut swapped = region.clone();
        swapped.swap(&rules);
        assert_eq!(swapped.origin(), p(6, 8));
        assert!(swapped.contains(p(1, 2)));
        swapped.swap(&rules);
        assert_eq!(swapped, region);
    }

    #[test]
    fn collapse_keeps_shape() {
        let rules = rules();
        let mut region = Region::new(p(1, 2), p(6, 8), Shape::RectFilled, &rules);
        region.collapse(&rules);
        assert_eq!(region.members(), &[p(6, 8)]);
        assert_eq!(region.shape(), Shape::RectFilled);
        assert!(!region.is_multi());
    }

    #[test]
    fn hotkeys_round_trip() {
        for shape in Shape::iter() {
            assert_eq!(Shape::from_hotkey(shape.hotkey()), Some(shape));
            assert_eq!(Shape::from_position(shape.position()), Some(shape));
        }
        assert_eq!(Shape::from_hotkey('x'), None);
    }
}
