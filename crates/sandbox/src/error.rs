use thiserror::Error;
use world_core::{CatalogError, ErrorSeverity, RegionPos, WorldError};

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{region} lies outside the world")]
    RegionOutOfBounds { region: RegionPos },

    #[error("world of {width}x{height} cells cannot hold a region tile")]
    WorldTooSmall { width: i32, height: i32 },
}

impl WorldError for SandboxError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog(err) => err.severity(),
            Self::RegionOutOfBounds { .. } | Self::WorldTooSmall { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(err) => err.error_code(),
            Self::RegionOutOfBounds { .. } => "SANDBOX_REGION_OUT_OF_BOUNDS",
            Self::WorldTooSmall { .. } => "SANDBOX_WORLD_TOO_SMALL",
        }
    }
}
