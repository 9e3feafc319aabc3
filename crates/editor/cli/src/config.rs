//! CLI-specific configuration for the terminal editor.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use world_content::{CatalogLoader, ConfigLoader, builtin_catalog};
use world_core::{Catalog, EditorConfig};

/// Terminal editor configuration.
///
/// Everything is optional; the builtin catalog and default editor settings
/// are used when no file is named.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// TOML file with editor settings.
    pub config_path: Option<PathBuf>,
    /// RON tile catalog.
    pub catalog_path: Option<PathBuf>,
    /// Seed of the demo world and of regeneration requests.
    pub seed: u64,
    /// Height of the cell info panel in lines (including borders).
    pub info_height: u16,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            catalog_path: None,
            seed: 1,
            info_height: 14,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EDITMAP_CONFIG` - editor settings file (TOML)
    /// - `EDITMAP_CATALOG` - tile catalog file (RON)
    /// - `EDITMAP_SEED` - world seed (default: 1)
    /// - `EDITMAP_INFO_HEIGHT` - info panel height in lines (default: 14)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = read_env::<PathBuf>("EDITMAP_CONFIG");
        config.catalog_path = read_env::<PathBuf>("EDITMAP_CATALOG");
        if let Some(seed) = read_env::<u64>("EDITMAP_SEED") {
            config.seed = seed;
        }
        if let Some(height) = read_env::<u16>("EDITMAP_INFO_HEIGHT") {
            config.info_height = height.max(4);
        }

        config
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => CatalogLoader::load(path)
                .with_context(|| format!("loading catalog {}", path.display())),
            None => builtin_catalog().context("building the builtin catalog"),
        }
    }

    pub fn load_editor_config(&self) -> Result<EditorConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("loading editor config {}", path.display())),
            None => Ok(EditorConfig::default()),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
