//! Editor configuration loader.

use std::path::Path;

use world_core::EditorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for editor configuration from TOML files.
///
/// Missing keys fall back to [`EditorConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<EditorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EditorConfig> {
        let config: EditorConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse editor config TOML: {}", e))?;
        if config.blink_interval_ms == 0 {
            anyhow::bail!("blink_interval_ms must be positive");
        }
        Ok(config)
    }
}
