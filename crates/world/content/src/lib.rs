//! Tile catalog and editor configuration content.
//!
//! Loaders sit behind the `loaders` feature (enabled by default):
//! - Tile catalog (terrain, furniture, traps, fields, items, region types) from RON
//! - Editor configuration from TOML
//!
//! The builtin catalog is the bundled `data/catalog.ron`, parsed by the same
//! loader as catalog files.

#[cfg(feature = "loaders")]
pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use builtin::{BUILTIN_CATALOG_RON, builtin_catalog};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, LoadResult};
