//! Demo world used by the terminal binary.
use world_core::{
    Attitude, Catalog, ContentGenerator, Creature, GenerationRequest, MapBounds, Monster, Npc,
    Point3, RegionPos, RegionTypeStore, Tick, Tint, WorldConfig, compute_seed,
};

use crate::error::SandboxError;
use crate::generator::StampGenerator;
use crate::world::MemoryWorld;

const REGION: i32 = WorldConfig::REGION_SIZE;

/// Shape of a generated scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioLayout {
    /// Region tiles along x.
    pub tiles_x: i32,
    /// Region tiles along y.
    pub tiles_y: i32,
    pub min_z: i32,
    pub max_z: i32,
    pub seed: u64,
    pub start_turn: Tick,
    /// Region types assigned to ground-level tiles in row-major order, cycling.
    pub region_keys: Vec<String>,
}

impl Default for ScenarioLayout {
    fn default() -> Self {
        Self {
            tiles_x: 4,
            tiles_y: 3,
            min_z: -1,
            max_z: 1,
            seed: 0x5eed,
            start_turn: Tick(3_600),
            region_keys: ["field", "house", "forest", "parking_lot", "pond", "house"]
                .map(String::from)
                .to_vec(),
        }
    }
}

pub struct Scenario;

impl Scenario {
    pub fn demo(catalog: &Catalog, seed: u64) -> Result<MemoryWorld, SandboxError> {
        let layout = ScenarioLayout {
            seed,
            ..ScenarioLayout::default()
        };
        Self::build(catalog, &StampGenerator, &layout)
    }

    pub fn build<G: ContentGenerator>(
        catalog: &Catalog,
        generator: &G,
        layout: &ScenarioLayout,
    ) -> Result<MemoryWorld, SandboxError> {
        let width = layout.tiles_x * REGION;
        let height = layout.tiles_y * REGION;
        if layout.tiles_x < 1 || layout.tiles_y < 1 {
            return Err(SandboxError::WorldTooSmall { width, height });
        }
        let bounds = MapBounds::new(width, height, layout.min_z, layout.max_z);
        let fill = catalog
            .terrain_id("t_grass")
            .unwrap_or_else(|| catalog.default_terrain());
        let mut world = MemoryWorld::new(bounds, fill);
        world.set_turn(layout.start_turn);

        let mut index = 0;
        for ty in 0..layout.tiles_y {
            for tx in 0..layout.tiles_x {
                let region = RegionPos::new(tx, ty, 0);
                let region_type = layout
                    .region_keys
                    .get(index % layout.region_keys.len().max(1))
                    .and_then(|key| catalog.region_id(key));
                index += 1;

                world.set_region_type(region, region_type);
                let request = GenerationRequest {
                    region,
                    region_type,
                    turn: layout.start_turn,
                    seed: compute_seed(layout.seed, region, 0),
                };
                let scratch = generator.generate(catalog, &request);
                if !world.install(scratch) {
                    return Err(SandboxError::RegionOutOfBounds { region });
                }
            }
        }

        let center = Point3::new(width / 2, height / 2, 0);
        world.place_creature(
            center,
            Creature::Monster(Monster {
                kind: "mon_dog".into(),
                name: "stray dog".into(),
                glyph: 'd',
                tint: Tint::Brown,
                hp: 15,
                max_hp: 15,
                friendly: false,
                destination: Some(center.offset(-8, 5, 0)),
            }),
        );
        world.place_creature(
            center.offset(3, -2, 0),
            Creature::Npc(Npc {
                name: "Sam Ortiz".into(),
                hp: 80,
                max_hp: 100,
                attitude: Attitude::Neutral,
            }),
        );

        tracing::info!(
            width,
            height,
            creatures = world.creature_count(),
            "built demo scenario"
        );
        Ok(world)
    }
}
