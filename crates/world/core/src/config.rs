use crate::geometry::{DistanceMetric, Size};

/// Compile-time world layout constants.
#[derive(Clone, Copy, Debug)]
pub struct WorldConfig;

impl WorldConfig {
    /// Cells per chunk edge.
    pub const CHUNK_SIZE: usize = 12;
    pub const CHUNK_CELLS: usize = Self::CHUNK_SIZE * Self::CHUNK_SIZE;
    /// Chunks per region tile edge.
    pub const REGION_CHUNKS: i32 = 2;
    /// Cells per region tile edge.
    pub const REGION_SIZE: i32 = Self::CHUNK_SIZE as i32 * Self::REGION_CHUNKS;
    pub const MAX_FIELD_DENSITY: u8 = 3;
}

/// Runtime-tunable editor parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Milliseconds between blink ticks when no input arrives.
    pub blink_interval_ms: u64,
    /// Multiplier applied to the blink interval while a regeneration preview is shown.
    pub preview_blink_factor: u32,
    pub distance_metric: DistanceMetric,
    /// Palette entries per row.
    pub palette_columns: u16,
    /// Map viewport used until the front end reports its real size.
    pub viewport: Size,
}

impl EditorConfig {
    pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 300;
    pub const DEFAULT_PREVIEW_BLINK_FACTOR: u32 = 3;
    pub const DEFAULT_PALETTE_COLUMNS: u16 = 16;
    pub const DEFAULT_VIEWPORT: Size = Size::new(55, 25);

    pub fn new() -> Self {
        Self {
            blink_interval_ms: Self::DEFAULT_BLINK_INTERVAL_MS,
            preview_blink_factor: Self::DEFAULT_PREVIEW_BLINK_FACTOR,
            distance_metric: DistanceMetric::default(),
            palette_columns: Self::DEFAULT_PALETTE_COLUMNS,
            viewport: Self::DEFAULT_VIEWPORT,
        }
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// Blink timeout while previewing a regenerated region.
    pub fn preview_interval_ms(&self) -> u64 {
        self.blink_interval_ms
            .saturating_mul(u64::from(self.preview_blink_factor.max(1)))
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
