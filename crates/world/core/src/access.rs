//! Interfaces the editor consumes from the host world.
//!
//! The editor never owns the world: it receives `&mut W where W: WorldAccess`
//! and performs every read and write through these traits. The bundle is a
//! blanket impl, so a host only implements the individual traits.
use crate::catalog::Catalog;
use crate::chunk::Chunk;
use crate::entity::{Creature, Vehicle};
use crate::field::FieldSet;
use crate::geometry::{ChunkPos, LocalPos, MapBounds, Point3, RegionPos};
use crate::ids::{FieldTypeId, FurnitureId, RegionTypeId, TerrainId, TrapId, VehicleId};
use crate::item::{Cosmetic, Item};
use crate::scratch::ScratchChunk;
use crate::time::Tick;

/// Key-addressed store of fixed-size chunks.
pub trait ChunkStore {
    fn bounds(&self) -> MapBounds;
    fn current_turn(&self) -> Tick;
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk>;
    fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk>;
}

/// Where an indexed vehicle lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VehicleRef {
    pub id: VehicleId,
    pub chunk: ChunkPos,
}

/// Per-z-level cache from occupied cells to vehicles.
pub trait VehicleIndex {
    fn vehicle_at(&self, point: Point3) -> Option<VehicleRef>;
    fn index_vehicle(&mut self, vehicle: &Vehicle);
    fn unindex_vehicle(&mut self, vehicle: &Vehicle);
    fn clear_vehicle_index(&mut self, z: i32);
    /// Re-indexes every vehicle stored in the chunks of level `z`.
    fn rebuild_vehicle_index(&mut self, z: i32);
    /// Hands out an id no live vehicle uses.
    fn allocate_vehicle_id(&mut self) -> VehicleId;
}

pub trait CreatureLookup {
    fn creature_at(&self, point: Point3) -> Option<&Creature>;
    fn creature_at_mut(&mut self, point: Point3) -> Option<&mut Creature>;
}

pub trait SpawnTrigger {
    /// Turns the pending spawn points of `chunk` into creatures. Returns how
    /// many creatures were placed.
    fn spawn_monsters(&mut self, chunk: ChunkPos) -> usize;
}

/// Region-type classification of region tiles.
pub trait RegionTypeStore {
    fn region_type(&self, tile: RegionPos) -> Option<RegionTypeId>;
    fn set_region_type(&mut self, tile: RegionPos, region_type: Option<RegionTypeId>);
}

/// Everything the editor needs from the world.
pub trait WorldAccess:
    ChunkStore + VehicleIndex + CreatureLookup + SpawnTrigger + RegionTypeStore
{
    /// Resolves the indexed vehicle covering `point`.
    fn vehicle_at_point(&self, point: Point3) -> Option<&Vehicle> {
        let found = self.vehicle_at(point)?;
        self.chunk(found.chunk)?
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id == found.id)
    }

    /// True when a vehicle part or creature sits on the cell.
    fn is_occupied(&self, point: Point3) -> bool {
        self.vehicle_at(point).is_some() || self.creature_at(point).is_some()
    }
}

impl<T> WorldAccess for T where
    T: ChunkStore + VehicleIndex + CreatureLookup + SpawnTrigger + RegionTypeStore + ?Sized
{
}

/// Per-cell reads and writes over any chunk store.
///
/// Every operation checks [`MapBounds::contains`] first; reads outside the
/// world return nothing and writes outside it are dropped.
pub trait CellAccess: ChunkStore {
    fn cell(&self, point: Point3) -> Option<(&Chunk, LocalPos)> {
        if !self.bounds().contains(point) {
            return None;
        }
        Some((self.chunk(point.chunk())?, point.local()))
    }

    fn cell_mut(&mut self, point: Point3) -> Option<(&mut Chunk, LocalPos)> {
        if !self.bounds().contains(point) {
            return None;
        }
        Some((self.chunk_mut(point.chunk())?, point.local()))
    }

    fn terrain_at(&self, point: Point3) -> Option<TerrainId> {
        self.cell(point).map(|(chunk, local)| *chunk.terrain.get(local))
    }

    fn set_terrain(&mut self, point: Point3, terrain: TerrainId) -> bool {
        self.cell_mut(point)
            .map(|(chunk, local)| chunk.terrain.set(local, terrain))
            .is_some()
    }

    fn furniture_at(&self, point: Point3) -> Option<FurnitureId> {
        self.cell(point)
            .and_then(|(chunk, local)| *chunk.furniture.get(local))
    }

    fn set_furniture(&mut self, point: Point3, furniture: Option<FurnitureId>) -> bool {
        self.cell_mut(point)
            .map(|(chunk, local)| chunk.furniture.set(local, furniture))
            .is_some()
    }

    fn trap_at(&self, point: Point3) -> Option<TrapId> {
        self.cell(point).and_then(|(chunk, local)| *chunk.traps.get(local))
    }

    fn set_trap(&mut self, point: Point3, trap: Option<TrapId>) -> bool {
        self.cell_mut(point)
            .map(|(chunk, local)| chunk.traps.set(local, trap))
            .is_some()
    }

    fn fields_at(&self, point: Point3) -> Option<&FieldSet> {
        self.cell(point).map(|(chunk, local)| chunk.fields_at(local))
    }

    /// Adds a fresh field (age 0). Returns false outside the world or when the
    /// type was already present (it is replaced either way).
    fn add_field(&mut self, point: Point3, kind: FieldTypeId, density: u8) -> bool {
        self.cell_mut(point)
            .is_some_and(|(chunk, local)| chunk.add_field(local, kind, density, 0))
    }

    fn remove_field(&mut self, point: Point3, kind: FieldTypeId) -> bool {
        self.cell_mut(point)
            .is_some_and(|(chunk, local)| chunk.remove_field(local, kind))
    }

    fn set_field_density(&mut self, point: Point3, kind: FieldTypeId, density: u8) -> bool {
        self.cell_mut(point)
            .is_some_and(|(chunk, local)| chunk.set_field_density(local, kind, density))
    }

    fn clear_fields(&mut self, point: Point3) -> usize {
        self.cell_mut(point)
            .map_or(0, |(chunk, local)| chunk.clear_fields(local))
    }

    fn items_at(&self, point: Point3) -> &[Item] {
        self.cell(point)
            .map(|(chunk, local)| chunk.items.get(local).as_slice())
            .unwrap_or_default()
    }

    fn items_at_mut(&mut self, point: Point3) -> Option<&mut Vec<Item>> {
        self.cell_mut(point)
            .map(|(chunk, local)| chunk.items.get_mut(local))
    }

    fn cosmetics_at(&self, point: Point3) -> &[Cosmetic] {
        self.cell(point)
            .map(|(chunk, local)| chunk.cosmetics.get(local).as_slice())
            .unwrap_or_default()
    }

    fn radiation_at(&self, point: Point3) -> u16 {
        self.cell(point)
            .map_or(0, |(chunk, local)| *chunk.radiation.get(local))
    }
}

impl<T: ChunkStore + ?Sized> CellAccess for T {}

/// Parameters of one generator invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub region: RegionPos,
    /// Classification the tile is generated as. `None` generates a blank tile.
    pub region_type: Option<RegionTypeId>,
    pub turn: Tick,
    pub seed: u64,
}

/// Procedural content generator.
///
/// Must be deterministic: identical requests yield identical scratch chunks.
pub trait ContentGenerator {
    fn generate(&self, catalog: &Catalog, request: &GenerationRequest) -> ScratchChunk;
}
