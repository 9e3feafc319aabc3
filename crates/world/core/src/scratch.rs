//! Off-world map the content generator writes one region tile into.
use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::chunk::Chunk;
use crate::config::WorldConfig;
use crate::entity::{SpawnPoint, Vehicle};
use crate::geometry::{ChunkPos, LocalPos, Point2, RegionPos};
use crate::ids::{TerrainId, VehicleId};

const SIZE: i32 = WorldConfig::REGION_SIZE;
const CHUNK: i32 = WorldConfig::CHUNK_SIZE as i32;
const SIDE: usize = WorldConfig::REGION_CHUNKS as usize;
const CHUNKS: usize = SIDE * SIDE;

/// 2x2 generated chunks covering one region tile.
///
/// Cells are addressed by tile-local coordinates in `0..REGION_SIZE`. Vehicles
/// held here carry scratch chunk coordinates (`0..2` on each axis, tile z) and
/// are re-addressed when merged into the live world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchChunk {
    region: RegionPos,
    chunks: ArrayVec<Chunk, CHUNKS>,
    vehicle_cache: HashMap<Point2, VehicleId>,
}

impl ScratchChunk {
    pub fn new(region: RegionPos, fill: TerrainId) -> Self {
        Self {
            region,
            chunks: (0..CHUNKS).map(|_| Chunk::new(fill)).collect(),
            vehicle_cache: HashMap::new(),
        }
    }

    pub fn region(&self) -> RegionPos {
        self.region
    }

    /// Splits a tile-local cell into its chunk index and in-chunk offset.
    pub fn locate(x: i32, y: i32) -> Option<(usize, LocalPos)> {
        if !(0..SIZE).contains(&x) || !(0..SIZE).contains(&y) {
            return None;
        }
        let index = (y / CHUNK) as usize * SIDE + (x / CHUNK) as usize;
        Some((index, LocalPos::new((x % CHUNK) as usize, (y % CHUNK) as usize)))
    }

    /// Chunk offset (`0..2`, `0..2`) of a chunk index.
    pub fn chunk_offset(index: usize) -> (i32, i32) {
        ((index % SIDE) as i32, (index / SIDE) as i32)
    }

    /// Scratch coordinates of chunk `index`, as stored on scratch vehicles.
    pub fn scratch_chunk_pos(&self, index: usize) -> ChunkPos {
        let (cx, cy) = Self::chunk_offset(index);
        ChunkPos::new(cx, cy, self.region.z)
    }

    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn chunk_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        self.chunks.get_mut(index)
    }

    pub fn chunks(&self) -> impl Iterator<Item = (usize, &Chunk)> {
        self.chunks.iter().enumerate()
    }

    pub fn chunks_mut(&mut self) -> impl Iterator<Item = (usize, &mut Chunk)> {
        self.chunks.iter_mut().enumerate()
    }

    /// Chunk and offset holding a tile-local cell.
    pub fn cell(&self, x: i32, y: i32) -> Option<(&Chunk, LocalPos)> {
        let (index, local) = Self::locate(x, y)?;
        Some((&self.chunks[index], local))
    }

    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<(&mut Chunk, LocalPos)> {
        let (index, local) = Self::locate(x, y)?;
        Some((&mut self.chunks[index], local))
    }

    pub fn terrain_at(&self, x: i32, y: i32) -> Option<TerrainId> {
        self.cell(x, y).map(|(chunk, local)| *chunk.terrain.get(local))
    }

    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainId) {
        if let Some((chunk, local)) = self.cell_mut(x, y) {
            chunk.terrain.set(local, terrain);
        }
    }

    /// Places a vehicle whose anchor is the tile-local cell `(x, y)`.
    pub fn add_vehicle(&mut self, x: i32, y: i32, mut vehicle: Vehicle) -> bool {
        let Some((index, local)) = Self::locate(x, y) else {
            return false;
        };
        vehicle.chunk = self.scratch_chunk_pos(index);
        vehicle.anchor = local;
        self.chunks[index].vehicles.push(vehicle);
        self.rebuild_vehicle_cache();
        true
    }

    /// Queues a spawn at the tile-local cell `(x, y)`.
    pub fn add_spawn(&mut self, x: i32, y: i32, mut spawn: SpawnPoint) -> bool {
        let Some((index, local)) = Self::locate(x, y) else {
            return false;
        };
        spawn.local = local;
        self.chunks[index].spawns.push(spawn);
        true
    }

    pub fn vehicle_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.vehicles.len()).sum()
    }

    /// Vehicle occupying the tile-local cell, via the scratch vehicle cache.
    pub fn vehicle_at(&self, x: i32, y: i32) -> Option<&Vehicle> {
        let id = self.vehicle_cache.get(&Point2::new(x, y))?;
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.vehicles.iter())
            .find(|vehicle| vehicle.id == *id)
    }

    pub fn vehicle_cache_len(&self) -> usize {
        self.vehicle_cache.len()
    }

    pub fn rebuild_vehicle_cache(&mut self) {
        self.vehicle_cache.clear();
        for (index, chunk) in self.chunks.iter().enumerate() {
            let (cx, cy) = Self::chunk_offset(index);
            for vehicle in &chunk.vehicles {
                let ax = cx * CHUNK + vehicle.anchor.x as i32;
                let ay = cy * CHUNK + vehicle.anchor.y as i32;
                for part in &vehicle.parts {
                    self.vehicle_cache
                        .insert(Point2::new(ax + part.offset.x, ay + part.offset.y), vehicle.id);
                }
            }
        }
    }

    /// Drops every generated object and resets all cells to `fill`.
    ///
    /// Returns how many vehicles were discarded.
    pub fn clear(&mut self, fill: TerrainId) -> usize {
        let dropped = self.vehicle_count();
        self.vehicle_cache.clear();
        for chunk in &mut self.chunks {
            *chunk = Chunk::new(fill);
        }
        tracing::debug!(region = %self.region, dropped, "cleared scratch map");
        dropped
    }

    /// Retargets an empty scratch map at another tile.
    pub fn set_region(&mut self, region: RegionPos) {
        self.region = region;
        for (index, chunk) in self.chunks.iter_mut().enumerate() {
            let (cx, cy) = Self::chunk_offset(index);
            for vehicle in &mut chunk.vehicles {
                vehicle.chunk = ChunkPos::new(cx, cy, region.z);
            }
        }
    }

    /// Turns the whole tile clockwise by `turns` quarter turns in place.
    ///
    /// A cell at `(x, y)` moves to `(SIZE - 1 - y, x)`. Chunks rotate as
    /// whole units, so chunk attachments follow their chunk; vehicles and
    /// spawns follow their anchor cell and vehicle part offsets turn with them.
    pub fn rotate(&mut self, turns: u8) {
        for _ in 0..turns % 4 {
            self.rotate_once();
        }
        self.rebuild_vehicle_cache();
        tracing::debug!(region = %self.region, turns, "rotated scratch map");
    }

    fn rotate_once(&mut self) {
        let fill = self
            .chunks
            .first()
            .map(|chunk| *chunk.terrain.get(LocalPos::new(0, 0)))
            .unwrap_or(TerrainId(0));
        let mut old = std::mem::take(&mut self.chunks);
        let mut rotated: ArrayVec<Chunk, CHUNKS> = (0..CHUNKS).map(|_| Chunk::new(fill)).collect();

        for (index, chunk) in old.iter_mut().enumerate() {
            let (cx, cy) = Self::chunk_offset(index);
            let dest_index = cx as usize * SIDE + (SIDE - 1 - cy as usize);
            let dest = &mut rotated[dest_index];
            dest.temperature = chunk.temperature;
            dest.last_touched = chunk.last_touched;
            dest.computer = chunk.computer.take();
            dest.camp = chunk.camp.take();

            for local in LocalPos::all() {
                let turned = rotate_local(local);
                dest.terrain.set(turned, *chunk.terrain.get(local));
                dest.furniture.set(turned, *chunk.furniture.get(local));
                dest.traps.set(turned, *chunk.traps.get(local));
                dest.radiation.set(turned, *chunk.radiation.get(local));
                dest.luminance.set(turned, *chunk.luminance.get(local));
                dest.items
                    .set(turned, std::mem::take(chunk.items.get_mut(local)));
                dest.cosmetics
                    .set(turned, std::mem::take(chunk.cosmetics.get_mut(local)));
                let fields = chunk.take_fields(local);
                dest.put_fields(turned, fields);
            }

            let dest_pos = ChunkPos::new(
                (dest_index % SIDE) as i32,
                (dest_index / SIDE) as i32,
                self.region.z,
            );
            for mut vehicle in chunk.vehicles.drain(..) {
                vehicle.anchor = rotate_local(vehicle.anchor);
                vehicle.chunk = dest_pos;
                for part in &mut vehicle.parts {
                    part.offset = Point2::new(-part.offset.y, part.offset.x);
                }
                dest.vehicles.push(vehicle);
            }
            for mut spawn in chunk.spawns.drain(..) {
                spawn.local = rotate_local(spawn.local);
                dest.spawns.push(spawn);
            }
        }

        self.chunks = rotated;
    }
}

/// Clockwise quarter turn of an in-chunk offset.
fn rotate_local(local: LocalPos) -> LocalPos {
    LocalPos::new(WorldConfig::CHUNK_SIZE - 1 - local.y, local.x)
}
