use super::Point3;

/// Tile distance used by circle selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DistanceMetric {
    /// King-move distance: diagonals cost the same as orthogonal steps.
    #[default]
    Chebyshev,
    /// Diagonals cost roughly 1.41 orthogonal steps.
    Octile,
}

impl DistanceMetric {
    pub fn distance(self, a: Point3, b: Point3) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        let dz = (a.z - b.z).abs();
        match self {
            DistanceMetric::Chebyshev => dx.max(dy).max(dz),
            DistanceMetric::Octile => {
                let (long, short) = if dx >= dy { (dx, dy) } else { (dy, dx) };
                // 0.41421 scaled by 100000, rounded to nearest
                let planar = long + (short * 41_421 + 50_000) / 100_000;
                planar.max(dz)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_takes_largest_axis() {
        let a = Point3::new(0, 0, 0);
        assert_eq!(DistanceMetric::Chebyshev.distance(a, Point3::new(3, -5, 0)), 5);
        assert_eq!(DistanceMetric::Chebyshev.distance(a, Point3::new(2, 2, 0)), 2);
    }

    #[test]
    fn octile_charges_extra_for_diagonals() {
        let a = Point3::new(0, 0, 0);
        assert_eq!(DistanceMetric::Octile.distance(a, Point3::new(4, 0, 0)), 4);
        assert_eq!(DistanceMetric::Octile.distance(a, Point3::new(5, 5, 0)), 7);
        assert_eq!(DistanceMetric::Octile.distance(a, Point3::new(1, 1, 0)), 1);
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!("octile".parse::<DistanceMetric>().ok(), Some(DistanceMetric::Octile));
        assert_eq!(DistanceMetric::Chebyshev.to_string(), "chebyshev");
    }
}
