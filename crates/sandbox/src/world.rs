//! In-memory world backing the editor in tests and the terminal binary.
use std::collections::HashMap;

use world_core::{
    Chunk, ChunkPos, ChunkStore, Creature, CreatureLookup, LocalPos, MapBounds, Monster, Point3,
    RegionPos, RegionTypeId, RegionTypeStore, ScratchChunk, SpawnTrigger, TerrainId, Tick, Tint,
    Vehicle, VehicleId, VehicleIndex, VehicleRef, WorldConfig,
};

const CHUNK: i32 = WorldConfig::CHUNK_SIZE as i32;

/// Chunk store, vehicle index, creature map and region classification held
/// in plain maps.
///
/// Every chunk inside the bounds exists from construction on.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    bounds: MapBounds,
    turn: Tick,
    chunks: HashMap<ChunkPos, Chunk>,
    vehicle_index: HashMap<i32, HashMap<(i32, i32), VehicleRef>>,
    creatures: HashMap<Point3, Creature>,
    region_types: HashMap<RegionPos, RegionTypeId>,
    next_vehicle: u32,
    spawn_passes: usize,
}

impl MemoryWorld {
    pub fn new(bounds: MapBounds, fill: TerrainId) -> Self {
        let chunks_x = (bounds.width + CHUNK - 1) / CHUNK;
        let chunks_y = (bounds.height + CHUNK - 1) / CHUNK;
        let mut chunks = HashMap::new();
        for z in bounds.min_z..=bounds.max_z {
            for cy in 0..chunks_y {
                for cx in 0..chunks_x {
                    chunks.insert(ChunkPos::new(cx, cy, z), Chunk::new(fill));
                }
            }
        }
        tracing::debug!(chunks = chunks.len(), "created memory world");
        Self {
            bounds,
            turn: Tick::ZERO,
            chunks,
            vehicle_index: HashMap::new(),
            creatures: HashMap::new(),
            region_types: HashMap::new(),
            next_vehicle: 1,
            spawn_passes: 0,
        }
    }

    pub fn set_turn(&mut self, turn: Tick) {
        self.turn = turn;
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of times the spawn pass ran.
    pub fn spawn_passes(&self) -> usize {
        self.spawn_passes
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn creatures(&self) -> impl Iterator<Item = (&Point3, &Creature)> {
        self.creatures.iter()
    }

    /// Puts a creature on a cell, returning the one it displaced.
    pub fn place_creature(&mut self, point: Point3, creature: Creature) -> Option<Creature> {
        if !self.bounds.contains(point) {
            return None;
        }
        self.creatures.insert(point, creature)
    }

    /// Stores a vehicle in the chunk containing `anchor` and indexes it.
    ///
    /// The vehicle receives a fresh id and its chunk and anchor fields are
    /// overwritten from `anchor`.
    pub fn place_vehicle(&mut self, anchor: Point3, mut vehicle: Vehicle) -> Option<VehicleId> {
        if !self.bounds.contains(anchor) {
            return None;
        }
        vehicle.id = self.allocate_vehicle_id();
        vehicle.chunk = anchor.chunk();
        vehicle.anchor = anchor.local();
        self.index_vehicle(&vehicle);
        let id = vehicle.id;
        self.chunks.get_mut(&vehicle.chunk)?.vehicles.push(vehicle);
        Some(id)
    }

    /// Replaces the chunks of a region tile with a generated scratch map.
    ///
    /// Used to seed scenarios; the editor's pipeline does its own merge.
    pub fn install(&mut self, mut scratch: ScratchChunk) -> bool {
        let region = scratch.region();
        if !self.bounds.contains_region(region) {
            return false;
        }
        let anchor = region.anchor_chunk();
        for (index, chunk) in scratch.chunks_mut() {
            let (dx, dy) = ScratchChunk::chunk_offset(index);
            let pos = anchor.offset(dx, dy);
            let mut installed = std::mem::replace(chunk, Chunk::new(TerrainId(0)));
            if let Some(old) = self.chunks.get(&pos) {
                for vehicle in old.vehicles.clone() {
                    self.unindex_vehicle(&vehicle);
                }
            }
            for vehicle in &mut installed.vehicles {
                vehicle.id = self.allocate_vehicle_id();
                vehicle.chunk = pos;
            }
            for vehicle in &installed.vehicles {
                self.index_vehicle(vehicle);
            }
            self.chunks.insert(pos, installed);
            self.spawn_monsters(pos);
        }
        true
    }

    fn free_cell_near(&self, chunk: ChunkPos, local: LocalPos) -> Option<Point3> {
        let center = chunk.point(local);
        let origin = chunk.origin();
        (0..CHUNK).find_map(|radius| {
            (-radius..=radius)
                .flat_map(|dy| (-radius..=radius).map(move |dx| center.offset(dx, dy, 0)))
                .filter(|p| {
                    (origin.x..origin.x + CHUNK).contains(&p.x)
                        && (origin.y..origin.y + CHUNK).contains(&p.y)
                })
                .find(|p| {
                    self.bounds.contains(*p)
                        && !self.creatures.contains_key(p)
                        && self.vehicle_at(*p).is_none()
                })
        })
    }
}

impl ChunkStore for MemoryWorld {
    fn bounds(&self) -> MapBounds {
        self.bounds
    }

    fn current_turn(&self) -> Tick {
        self.turn
    }

    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }
}

impl VehicleIndex for MemoryWorld {
    fn vehicle_at(&self, point: Point3) -> Option<VehicleRef> {
        self.vehicle_index
            .get(&point.z)
            .and_then(|level| level.get(&(point.x, point.y)))
            .copied()
    }

    fn index_vehicle(&mut self, vehicle: &Vehicle) {
        let found = VehicleRef {
            id: vehicle.id,
            chunk: vehicle.chunk,
        };
        for point in vehicle.occupied_points() {
            self.vehicle_index
                .entry(point.z)
                .or_default()
                .insert((point.x, point.y), found);
        }
    }

    fn unindex_vehicle(&mut self, vehicle: &Vehicle) {
        let z = vehicle.chunk.z;
        if let Some(level) = self.vehicle_index.get_mut(&z) {
            level.retain(|_, found| found.id != vehicle.id);
        }
    }

    fn clear_vehicle_index(&mut self, z: i32) {
        self.vehicle_index.remove(&z);
    }

    fn rebuild_vehicle_index(&mut self, z: i32) {
        let mut level = HashMap::new();
        for (pos, chunk) in self.chunks.iter().filter(|(pos, _)| pos.z == z) {
            for vehicle in &chunk.vehicles {
                let found = VehicleRef {
                    id: vehicle.id,
                    chunk: *pos,
                };
                for point in vehicle.occupied_points() {
                    level.insert((point.x, point.y), found);
                }
            }
        }
        tracing::debug!(z, cells = level.len(), "rebuilt vehicle index");
        self.vehicle_index.insert(z, level);
    }

    fn allocate_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_vehicle);
        self.next_vehicle += 1;
        id
    }
}

impl CreatureLookup for MemoryWorld {
    fn creature_at(&self, point: Point3) -> Option<&Creature> {
        self.creatures.get(&point)
    }

    fn creature_at_mut(&mut self, point: Point3) -> Option<&mut Creature> {
        self.creatures.get_mut(&point)
    }
}

impl SpawnTrigger for MemoryWorld {
    fn spawn_monsters(&mut self, pos: ChunkPos) -> usize {
        let Some(chunk) = self.chunks.get_mut(&pos) else {
            return 0;
        };
        let spawns = std::mem::take(&mut chunk.spawns);
        if spawns.is_empty() {
            return 0;
        }
        self.spawn_passes += 1;

        let mut placed = 0;
        for spawn in spawns {
            for _ in 0..spawn.count {
                let Some(point) = self.free_cell_near(pos, spawn.local) else {
                    break;
                };
                let monster = Monster {
                    kind: spawn.kind.clone(),
                    name: spawn.name.clone().unwrap_or_else(|| spawn.kind.clone()),
                    glyph: 'Z',
                    tint: if spawn.friendly { Tint::LightGreen } else { Tint::Green },
                    hp: 40,
                    max_hp: 40,
                    friendly: spawn.friendly,
                    destination: None,
                };
                self.creatures.insert(point, Creature::Monster(monster));
                placed += 1;
            }
        }
        tracing::debug!(chunk = %pos, placed, "spawned monsters");
        placed
    }
}

impl RegionTypeStore for MemoryWorld {
    fn region_type(&self, tile: RegionPos) -> Option<RegionTypeId> {
        self.region_types.get(&tile).copied()
    }

    fn set_region_type(&mut self, tile: RegionPos, region_type: Option<RegionTypeId>) {
        match region_type {
            Some(id) => {
                self.region_types.insert(tile, id);
            }
            None => {
                self.region_types.remove(&tile);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{Point2, SpawnPoint, VehiclePart, WorldAccess};

    fn world() -> MemoryWorld {
        MemoryWorld::new(MapBounds::new(48, 48, 0, 0), TerrainId(0))
    }

    fn wagon() -> Vehicle {
        Vehicle {
            id: VehicleId(0),
            name: "wagon".into(),
            chunk: ChunkPos::default(),
            anchor: LocalPos::default(),
            parts: vec![
                VehiclePart {
                    name: "board".into(),
                    offset: Point2::new(0, 0),
                    glyph: '=',
                    tint: Tint::Brown,
                },
                VehiclePart {
                    name: "wheel".into(),
                    offset: Point2::new(0, 1),
                    glyph: 'o',
                    tint: Tint::DarkGray,
                },
            ],
        }
    }

    #[test]
    fn chunks_cover_bounds() {
        assert_eq!(world().chunk_count(), 16);
    }

    #[test]
    fn placed_vehicle_is_indexed_and_resolvable() {
        let mut world = world();
        let id = world.place_vehicle(Point3::new(13, 11, 0), wagon()).expect("placed");
        let below = Point3::new(13, 12, 0);
        assert_eq!(world.vehicle_at(below).map(|v| v.id), Some(id));
        assert_eq!(world.vehicle_at_point(below).map(|v| v.name.as_str()), Some("wagon"));

        let vehicle = world.vehicle_at_point(below).cloned().expect("vehicle");
        world.unindex_vehicle(&vehicle);
        assert!(world.vehicle_at(below).is_none());
        world.rebuild_vehicle_index(0);
        assert!(world.vehicle_at(below).is_some());
    }

    #[test]
    fn spawn_pass_places_monsters_inside_chunk() {
        let mut world = world();
        let pos = ChunkPos::new(1, 1, 0);
        world.chunk_mut(pos).expect("chunk").spawns.push(SpawnPoint {
            kind: "mon_zombie".into(),
            count: 3,
            local: LocalPos::new(0, 0),
            friendly: false,
            name: None,
        });
        assert_eq!(world.spawn_monsters(pos), 3);
        assert_eq!(world.spawn_passes(), 1);
        assert!(world.creatures().all(|(p, _)| p.chunk() == pos));
        assert_eq!(world.spawn_monsters(pos), 0);
        assert_eq!(world.spawn_passes(), 1);
    }

    #[test]
    fn region_type_none_clears() {
        let mut world = world();
        let tile = RegionPos::new(1, 0, 0);
        world.set_region_type(tile, Some(RegionTypeId(2)));
        assert_eq!(world.region_type(tile), Some(RegionTypeId(2)));
        world.set_region_type(tile, None);
        assert_eq!(world.region_type(tile), None);
    }
}
