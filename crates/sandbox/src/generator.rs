//! Deterministic region generator driven by [`RegionStyle`].
use world_core::{
    Catalog, Cosmetic, ContentGenerator, GenerationRequest, Item, ItemTypeId, PcgRng, Point2,
    RegionStyle, ScratchChunk, SpawnPoint, TerrainId, Tint, Vehicle, VehicleId, VehiclePart,
    WorldConfig,
};

const SIZE: i32 = WorldConfig::REGION_SIZE;

/// Stamps simple layouts (open ground, woods, a house, a parking lot, a pond)
/// onto a scratch map.
///
/// Output depends only on the catalog and the request, so identical requests
/// produce identical scratch maps.
#[derive(Clone, Copy, Debug, Default)]
pub struct StampGenerator;

struct Stamp<'a> {
    catalog: &'a Catalog,
    scratch: ScratchChunk,
    rng: PcgRng,
    vehicles: u32,
}

impl Stamp<'_> {
    fn terrain(&self, key: &str) -> Option<TerrainId> {
        self.catalog.terrain_id(key)
    }

    fn put_terrain(&mut self, x: i32, y: i32, key: &str) {
        if let Some(id) = self.terrain(key) {
            self.scratch.set_terrain(x, y, id);
        }
    }

    fn put_furniture(&mut self, x: i32, y: i32, key: &str) {
        let furniture = self.catalog.furniture_id(key);
        if let (Some(id), Some((chunk, local))) = (furniture, self.scratch.cell_mut(x, y)) {
            chunk.furniture.set(local, Some(id));
        }
    }

    fn put_item(&mut self, x: i32, y: i32, key: &str, turn: world_core::Tick) {
        let Some(kind) = self.catalog.item_id(key) else {
            return;
        };
        let light = self.item_light(kind);
        if let Some((chunk, local)) = self.scratch.cell_mut(x, y) {
            chunk.items.get_mut(local).push(Item::new(kind, turn));
            let lum = chunk.luminance.get_mut(local);
            *lum = lum.saturating_add(light);
        }
    }

    fn item_light(&self, kind: ItemTypeId) -> u8 {
        self.catalog.item(kind).map_or(0, |def| def.light)
    }

    fn put_field(&mut self, x: i32, y: i32, key: &str, density: u8) {
        let field = self.catalog.field_id(key);
        if let (Some(kind), Some((chunk, local))) = (field, self.scratch.cell_mut(x, y)) {
            chunk.add_field(local, kind, density, 0);
        }
    }

    fn random_cell(&mut self, margin: i32) -> (i32, i32) {
        (
            self.rng.range(margin, SIZE - 1 - margin),
            self.rng.range(margin, SIZE - 1 - margin),
        )
    }

    fn sprinkle(&mut self, key: &str, percent: u32) {
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.rng.chance(percent) {
                    self.put_terrain(x, y, key);
                }
            }
        }
    }

    fn add_vehicle(&mut self, x: i32, y: i32, name: &str, width: i32, length: i32, tint: Tint) {
        let mut parts = Vec::new();
        for dy in 0..length {
            for dx in 0..width {
                let edge = dy == 0 || dy == length - 1;
                parts.push(VehiclePart {
                    name: if edge { "wheel".into() } else { "seat".into() },
                    offset: Point2::new(dx, dy),
                    glyph: if edge { 'o' } else { '#' },
                    tint,
                });
            }
        }
        self.vehicles += 1;
        let vehicle = Vehicle {
            id: VehicleId(self.vehicles),
            name: name.into(),
            chunk: Default::default(),
            anchor: Default::default(),
            parts,
        };
        self.scratch.add_vehicle(x, y, vehicle);
    }

    fn add_spawn(&mut self, x: i32, y: i32, kind: &str, count: u16) {
        self.scratch.add_spawn(
            x,
            y,
            SpawnPoint {
                kind: kind.into(),
                count,
                local: Default::default(),
                friendly: false,
                name: None,
            },
        );
    }

    fn open(&mut self, turn: world_core::Tick) {
        for _ in 0..self.rng.range(3, 8) {
            let (x, y) = self.random_cell(0);
            self.put_item(x, y, "rock", turn);
        }
        self.sprinkle("t_shrub", 2);
        let (x, y) = self.random_cell(2);
        if let Some((chunk, local)) = self.scratch.cell_mut(x, y) {
            chunk.radiation.set(local, 2);
        }
    }

    fn scatter(&mut self) {
        self.sprinkle("t_tree", 18);
        self.sprinkle("t_shrub", 6);
        if self.rng.chance(50) {
            let (x, y) = self.random_cell(4);
            self.add_spawn(x, y, "mon_wolf", 2);
        }
    }

    fn building(&mut self, turn: world_core::Tick) {
        let x0 = self.rng.range(2, 5);
        let y0 = self.rng.range(2, 5);
        let x1 = self.rng.range(16, 21);
        let y1 = self.rng.range(14, 21);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let key = if y == y0 || y == y1 {
                    "t_wall_h"
                } else if x == x0 || x == x1 {
                    "t_wall_v"
                } else {
                    "t_floor"
                };
                self.put_terrain(x, y, key);
            }
        }
        let door_x = (x0 + x1) / 2;
        self.put_terrain(door_x, y1, "t_door_c");
        self.put_terrain(x0 + 2, y0, "t_window");
        self.put_terrain(x1 - 2, y0, "t_window");

        self.put_furniture(x0 + 1, y0 + 1, "f_bed");
        self.put_furniture(x1 - 2, y1 - 2, "f_table");
        self.put_furniture(x1 - 3, y1 - 2, "f_chair");
        self.put_furniture(x1 - 1, y0 + 1, "f_fridge");
        self.put_item(x1 - 2, y1 - 2, "can_beans", turn);
        self.put_item(x0 + 1, y1 - 1, "lantern_on", turn);

        if self.rng.chance(40) {
            let (x, y) = (self.rng.range(x0 + 1, x1 - 1), self.rng.range(y0 + 1, y1 - 1));
            self.put_field(x, y, "fd_blood", 2);
        }
        if let Some(chunk) = self.scratch.chunk_mut(0) {
            chunk.computer = Some(world_core::Computer {
                name: "home terminal".into(),
                security: 1,
            });
        }
        if let Some((chunk, local)) = self.scratch.cell_mut(door_x + 1, y1 + 1) {
            chunk
                .cosmetics
                .get_mut(local)
                .push(Cosmetic::Graffiti("keep out".into()));
        }
        self.add_spawn(door_x, y0 + 2, "mon_zombie", 1);
    }

    fn parking(&mut self, turn: world_core::Tick) {
        for y in 4..SIZE - 4 {
            for x in (2..SIZE).step_by(5) {
                self.put_terrain(x, y, "t_pavement_y");
            }
        }
        let cars = self.rng.range(1, 3);
        for lane in 0..cars {
            let x = 3 + lane * 5 + self.rng.range(0, 1);
            let y = self.rng.range(5, 14);
            self.add_vehicle(x, y, "car", 2, 4, Tint::LightBlue);
        }
        self.put_furniture(SIZE - 2, 1, "f_dumpster");
        let (x, y) = self.random_cell(1);
        self.put_item(x, y, "plank", turn);
    }

    fn pond(&mut self) {
        let center = SIZE / 2;
        let radius = self.rng.range(5, 9);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let d2 = (x - center).pow(2) + (y - center).pow(2);
                if d2 <= (radius - 2).pow(2) {
                    self.put_terrain(x, y, "t_water_dp");
                } else if d2 <= radius.pow(2) {
                    self.put_terrain(x, y, "t_water_sh");
                } else if d2 <= (radius + 2).pow(2) && self.rng.chance(25) {
                    self.put_terrain(x, y, "t_shrub");
                }
            }
        }
    }
}

impl ContentGenerator for StampGenerator {
    fn generate(&self, catalog: &Catalog, request: &GenerationRequest) -> ScratchChunk {
        let definition = request.region_type.and_then(|id| catalog.region(id));
        let fill = definition
            .and_then(|def| catalog.terrain_id(&def.base_terrain))
            .unwrap_or_else(|| catalog.default_terrain());

        let mut stamp = Stamp {
            catalog,
            scratch: ScratchChunk::new(request.region, fill),
            rng: PcgRng::new(request.seed),
            vehicles: 0,
        };

        if let Some(def) = definition {
            match def.style {
                RegionStyle::Open => stamp.open(request.turn),
                RegionStyle::Scatter => stamp.scatter(),
                RegionStyle::Building => stamp.building(request.turn),
                RegionStyle::Parking => stamp.parking(request.turn),
                RegionStyle::Pond => stamp.pond(),
            }
        }

        let temperature = stamp.rng.range(5, 25) as i16;
        for (_, chunk) in stamp.scratch.chunks_mut() {
            chunk.temperature = temperature;
            chunk.last_touched = request.turn;
        }

        tracing::debug!(
            region = %request.region,
            style = %definition.map(|def| def.style.to_string()).unwrap_or_else(|| "none".into()),
            seed = request.seed,
            vehicles = stamp.scratch.vehicle_count(),
            "generated region"
        );
        stamp.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{RegionPos, Tick};

    fn catalog() -> Catalog {
        world_content::builtin_catalog().expect("builtin catalog")
    }

    fn request(catalog: &Catalog, key: &str, seed: u64) -> GenerationRequest {
        GenerationRequest {
            region: RegionPos::new(1, 1, 0),
            region_type: catalog.region_id(key),
            turn: Tick(100),
            seed,
        }
    }

    #[test]
    fn same_request_same_scratch() {
        let catalog = catalog();
        let a = StampGenerator.generate(&catalog, &request(&catalog, "house", 3));
        let b = StampGenerator.generate(&catalog, &request(&catalog, "house", 3));
        assert_eq!(a, b);
    }

    #[test]
    fn house_has_walls_floor_and_spawn() {
        let catalog = catalog();
        let scratch = StampGenerator.generate(&catalog, &request(&catalog, "house", 11));
        let floor = catalog.terrain_id("t_floor");
        let cells: Vec<_> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
            .filter_map(|(x, y)| scratch.terrain_at(x, y))
            .collect();
        assert!(cells.iter().any(|id| Some(*id) == floor));
        assert!(cells.iter().any(|id| Some(*id) == catalog.terrain_id("t_wall_v")));
        let spawns: usize = scratch.chunks().map(|(_, chunk)| chunk.spawns.len()).sum();
        assert_eq!(spawns, 1);
        assert!(scratch.chunk(0).and_then(|chunk| chunk.computer.as_ref()).is_some());
    }

    #[test]
    fn parking_lot_holds_vehicles() {
        let catalog = catalog();
        let scratch = StampGenerator.generate(&catalog, &request(&catalog, "parking_lot", 5));
        assert!(scratch.vehicle_count() >= 1);
        assert!(scratch.vehicle_cache_len() >= 8);
    }

    #[test]
    fn missing_region_type_yields_blank_tile() {
        let catalog = catalog();
        let request = GenerationRequest {
            region: RegionPos::new(0, 0, 0),
            region_type: None,
            turn: Tick(1),
            seed: 1,
        };
        let scratch = StampGenerator.generate(&catalog, &request);
        assert_eq!(scratch.terrain_at(5, 5), Some(catalog.default_terrain()));
        assert_eq!(scratch.vehicle_count(), 0);
    }
}
