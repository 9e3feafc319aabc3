//! Coordinates, tile metrics, and line tracing on the world grid.
mod coords;
mod distance;
mod line;

pub use coords::{ChunkPos, Direction, LocalPos, MapBounds, Point2, Point3, RegionPos, Size};
pub use distance::DistanceMetric;
pub use line::line_to;
