//! World model shared by the editor, the sandbox world and content loaders.
//!
//! `world-core` defines grid geometry, the definition catalog, chunk storage,
//! the scratch map used for regeneration, and the traits through which the
//! editor reads and mutates a host world.
pub mod access;
pub mod catalog;
pub mod chunk;
pub mod config;
pub mod entity;
pub mod error;
pub mod field;
pub mod geometry;
pub mod ids;
pub mod item;
pub mod rng;
pub mod scratch;
pub mod time;
pub mod tint;

pub use access::{
    CellAccess, ChunkStore, ContentGenerator, CreatureLookup, GenerationRequest,
    RegionTypeStore, SpawnTrigger, VehicleIndex, VehicleRef, WorldAccess,
};
pub use catalog::{
    Catalog, CatalogError, CatalogTables, FieldDef, FurnitureDef, ItemTypeDef, RegionStyle,
    RegionTypeDef, TerrainDef, TileFlags, TrapDef, WallOrientation,
};
pub use chunk::{Chunk, Layer};
pub use config::{EditorConfig, WorldConfig};
pub use entity::{
    Attitude, Camp, Computer, Creature, Monster, Npc, SpawnPoint, Vehicle, VehiclePart,
};
pub use error::{ErrorSeverity, WorldError};
pub use field::{FieldEntry, FieldSet};
pub use geometry::{
    ChunkPos, Direction, DistanceMetric, LocalPos, MapBounds, Point2, Point3, RegionPos, Size,
    line_to,
};
pub use ids::{
    FieldTypeId, FurnitureId, ItemTypeId, RegionTypeId, TerrainId, TrapId, VehicleId, wrap_step,
    would_overflow,
};
pub use item::{Cosmetic, Item, ItemProperty};
pub use rng::{PcgRng, compute_seed};
pub use scratch::ScratchChunk;
pub use time::Tick;
pub use tint::{Glyph, Tint};
