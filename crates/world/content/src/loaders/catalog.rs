//! Tile catalog loader.
//!
//! The RON file holds one list per definition kind; an entry's position in
//! its list is its id.

use std::path::Path;

use world_core::{Catalog, CatalogTables};

use crate::loaders::{LoadResult, read_file};

/// Loader for the tile catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        tracing::info!(
            path = %path.display(),
            terrain = catalog.terrain_count(),
            furniture = catalog.furniture_count(),
            regions = catalog.region_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let tables: CatalogTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Ok(Catalog::from_tables(tables)?)
    }
}
