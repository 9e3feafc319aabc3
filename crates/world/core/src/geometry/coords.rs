use std::fmt;
use std::ops::{Add, Sub};

use strum::{EnumIter, IntoEnumIterator};

use crate::config::WorldConfig;

const CHUNK: i32 = WorldConfig::CHUNK_SIZE as i32;
const REGION: i32 = WorldConfig::REGION_SIZE;

/// Absolute world cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Chunk containing this cell.
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::new(self.x.div_euclid(CHUNK), self.y.div_euclid(CHUNK), self.z)
    }

    /// Cell offset inside the containing chunk.
    pub fn local(self) -> LocalPos {
        LocalPos::new(
            self.x.rem_euclid(CHUNK) as usize,
            self.y.rem_euclid(CHUNK) as usize,
        )
    }

    /// Region tile (the classification and generation unit) containing this cell.
    pub fn region(self) -> RegionPos {
        RegionPos::new(
            self.x.div_euclid(REGION),
            self.y.div_euclid(REGION),
            self.z,
        )
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Screen cell or planar offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a viewport or surface, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point2) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }
}

/// Eight-way compass direction. North is towards negative y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Looks up the direction with the given unit delta.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::iter().find(|direction| direction.delta() == (dx.signum(), dy.signum()))
    }
}

/// Extent of the editable world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub width: i32,
    pub height: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl MapBounds {
    pub const fn new(width: i32, height: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            width,
            height,
            min_z,
            max_z,
        }
    }

    pub fn contains(&self, point: Point3) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.width
            && point.y < self.height
            && point.z >= self.min_z
            && point.z <= self.max_z
    }

    /// True when every cell of the region tile lies inside the bounds.
    pub fn contains_region(&self, region: RegionPos) -> bool {
        let origin = region.origin();
        self.contains(origin) && self.contains(origin.offset(REGION - 1, REGION - 1, 0))
    }
}

/// Chunk coordinate (one chunk is `CHUNK_SIZE` cells square).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z)
    }

    /// World position of the chunk's top-left cell.
    pub const fn origin(self) -> Point3 {
        Point3::new(self.x * CHUNK, self.y * CHUNK, self.z)
    }

    /// World position of a cell inside this chunk.
    pub const fn point(self, local: LocalPos) -> Point3 {
        self.origin().offset(local.x as i32, local.y as i32, 0)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Region tile coordinate: the 2x2-chunk unit carrying a region-type
/// classification and produced as one piece by the content generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl RegionPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn origin(self) -> Point3 {
        Point3::new(self.x * REGION, self.y * REGION, self.z)
    }

    /// Top-left chunk of the tile.
    pub const fn anchor_chunk(self) -> ChunkPos {
        ChunkPos::new(
            self.x * WorldConfig::REGION_CHUNKS,
            self.y * WorldConfig::REGION_CHUNKS,
            self.z,
        )
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z)
    }
}

impl fmt::Display for RegionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Cell offset inside a chunk, `0..CHUNK_SIZE` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
}

impl LocalPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index into a chunk layer.
    pub const fn index(self) -> usize {
        self.y * WorldConfig::CHUNK_SIZE + self.x
    }

    pub const fn from_index(index: usize) -> Self {
        Self::new(index % WorldConfig::CHUNK_SIZE, index / WorldConfig::CHUNK_SIZE)
    }

    /// Iterates every cell of a chunk in row-major order.
    pub fn all() -> impl Iterator<Item = LocalPos> {
        (0..WorldConfig::CHUNK_CELLS).map(LocalPos::from_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cells_map_to_negative_chunks() {
        let point = Point3::new(-1, 13, 2);
        assert_eq!(point.chunk(), ChunkPos::new(-1, 1, 2));
        assert_eq!(point.local(), LocalPos::new(11, 1));
        assert_eq!(point.chunk().point(point.local()), point);
    }

    #[test]
    fn region_anchor_is_first_of_two_by_two_chunks() {
        let region = Point3::new(30, 50, 0).region();
        assert_eq!(region, RegionPos::new(1, 2, 0));
        assert_eq!(region.anchor_chunk(), ChunkPos::new(2, 4, 0));
        assert_eq!(region.origin(), Point3::new(24, 48, 0));
    }

    #[test]
    fn bounds_reject_outside_cells() {
        let bounds = MapBounds::new(48, 48, -1, 1);
        assert!(bounds.contains(Point3::new(0, 47, -1)));
        assert!(!bounds.contains(Point3::new(48, 0, 0)));
        assert!(!bounds.contains(Point3::new(0, -1, 0)));
        assert!(!bounds.contains(Point3::new(0, 0, 2)));
        assert!(bounds.contains_region(RegionPos::new(1, 1, 0)));
        assert!(!bounds.contains_region(RegionPos::new(2, 0, 0)));
    }

    #[test]
    fn direction_roundtrips_through_delta() {
        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
    }
}
