//! Catalog compiled into the binary, used when no catalog file is given.

use world_core::Catalog;

use crate::loaders::{CatalogLoader, LoadResult};

/// Contents of `data/catalog.ron`.
pub const BUILTIN_CATALOG_RON: &str = include_str!("../data/catalog.ron");

/// Parses and validates the bundled catalog.
pub fn builtin_catalog() -> LoadResult<Catalog> {
    CatalogLoader::parse(BUILTIN_CATALOG_RON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{TerrainId, TileFlags, WallOrientation};

    #[test]
    fn builtin_catalog_is_consistent() {
        let catalog = builtin_catalog().expect("builtin catalog");
        assert_eq!(catalog.terrain_id("t_dirt"), Some(catalog.default_terrain()));
        assert!(catalog.region_id("house").is_some());
        assert_eq!(catalog.furniture_count(), 8);
        assert_eq!(catalog.terrain_count(), 23);
    }

    #[test]
    fn flag_strings_are_parsed() {
        let catalog = builtin_catalog().expect("builtin catalog");
        let door = catalog.terrain_id("t_door_o").expect("open door");
        let flags = catalog.terrain(door).expect("door def").flags;
        assert!(flags.contains(TileFlags::DOOR | TileFlags::TRANSPARENT));
        let rock = catalog.terrain_id("t_rock").expect("rock");
        assert_eq!(catalog.terrain(rock).map(|def| def.flags), Some(TileFlags::empty()));
    }

    #[test]
    fn every_oriented_terrain_has_a_counterpart() {
        let catalog = builtin_catalog().expect("builtin catalog");
        for index in 0..catalog.terrain_count() {
            let id = TerrainId::from_index(index);
            let Some(def) = catalog.terrain(id) else {
                continue;
            };
            if let Some(orientation) = WallOrientation::of_glyph(def.glyph) {
                assert!(
                    catalog.alternate_orientation(id, orientation).is_some(),
                    "{} has no alternate",
                    def.key
                );
            }
        }
    }
}
