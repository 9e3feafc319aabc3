use super::Point3;

/// Traces a Bresenham line from `from` to `to` on `to`'s z-level.
///
/// The start cell is excluded and the end cell is included, so the result is
/// never empty: identical planar endpoints yield just `to`.
pub fn line_to(from: Point3, to: Point3) -> Vec<Point3> {
    if from.x == to.x && from.y == to.y {
        return vec![to];
    }

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut line = Vec::with_capacity(dx.max(-dy) as usize);
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    while x != to.x || y != to.y {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        line.push(Point3::new(x, y, to.z));
    }

    line
}
