//! Dense strong ids into the [`Catalog`](crate::Catalog) tables.
//!
//! Ids are list positions. Absence is always `Option<Id>`; there is no
//! "null" id value.
use std::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u16);

        impl $name {
            pub const fn new(index: u16) -> Self {
                Self(index)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Builds an id from a table position. Positions beyond `u16` saturate.
            pub fn from_index(index: usize) -> Self {
                Self(u16::try_from(index).unwrap_or(u16::MAX))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Terrain definition id.
    TerrainId
);
catalog_id!(
    /// Furniture definition id.
    FurnitureId
);
catalog_id!(
    /// Trap definition id.
    TrapId
);
catalog_id!(
    /// Field (fire, smoke, blood, ...) definition id.
    FieldTypeId
);
catalog_id!(
    /// Item type id.
    ItemTypeId
);
catalog_id!(
    /// Region-type (overmap terrain) classification id.
    RegionTypeId
);

/// Identifier of a vehicle object, unique within one world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "veh#{}", self.0)
    }
}

/// Steps `index` by `delta` inside `[0, count)`.
///
/// Leaving the range on either side wraps around; the flag reports whether it
/// did. An empty range always yields `(0, false)`.
pub fn wrap_step(index: usize, delta: i32, count: usize) -> (usize, bool) {
    if count == 0 {
        return (0, false);
    }
    let count = count as i64;
    let next = index as i64 + i64::from(delta);
    let wrapped = !(0..count).contains(&next);
    (next.rem_euclid(count) as usize, wrapped)
}

/// True when stepping `index` by `delta` would leave `[0, count)`.
pub fn would_overflow(index: usize, delta: i32, count: usize) -> bool {
    let next = index as i64 + i64::from(delta);
    next < 0 || next >= count as i64
}
