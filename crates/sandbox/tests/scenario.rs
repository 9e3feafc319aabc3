use sandbox::{MemoryWorld, Scenario, ScenarioLayout, StampGenerator};
use world_core::{
    CellAccess, ChunkStore, RegionPos, RegionTypeStore, VehicleIndex, WorldAccess,
};

fn demo() -> (world_core::Catalog, MemoryWorld) {
    let catalog = world_content::builtin_catalog().expect("builtin catalog");
    let world = Scenario::demo(&catalog, 77).expect("scenario");
    (catalog, world)
}

#[test]
fn demo_world_classifies_every_ground_tile() {
    let (catalog, world) = demo();
    let layout = ScenarioLayout::default();
    for ty in 0..layout.tiles_y {
        for tx in 0..layout.tiles_x {
            assert!(world.region_type(RegionPos::new(tx, ty, 0)).is_some());
        }
    }
    assert_eq!(
        world.region_type(RegionPos::new(1, 0, 0)),
        catalog.region_id("house")
    );
    assert!(world.region_type(RegionPos::new(0, 0, 1)).is_none());
}

#[test]
fn installed_vehicles_are_indexed_at_live_coordinates() {
    let (_, world) = demo();
    let bounds = world.bounds();
    let mut found = 0;
    for y in 0..bounds.height {
        for x in 0..bounds.width {
            let point = world_core::Point3::new(x, y, 0);
            if let Some(vehicle) = world.vehicle_at_point(point) {
                assert!(vehicle.part_at(point).is_some());
                assert_eq!(world.vehicle_at(point).map(|v| v.chunk), Some(vehicle.chunk));
                found += 1;
            }
        }
    }
    assert!(found > 0, "the parking lot should hold at least one car");
}

#[test]
fn generated_spawns_become_creatures() {
    let (_, world) = demo();
    // two houses each spawn one zombie, plus the dog and the npc
    assert!(world.creature_count() >= 4);
    assert!(world.spawn_passes() >= 2);
}

#[test]
fn houses_get_oriented_walls() {
    let (catalog, world) = demo();
    let origin = RegionPos::new(1, 0, 0).origin();
    let wall_h = catalog.terrain_id("t_wall_h");
    let has_wall = (0..24)
        .flat_map(|y| (0..24).map(move |x| origin.offset(x, y, 0)))
        .any(|p| world.terrain_at(p) == wall_h);
    assert!(has_wall);
}

#[test]
fn layout_without_tiles_is_rejected() {
    let catalog = world_content::builtin_catalog().expect("builtin catalog");
    let layout = ScenarioLayout {
        tiles_x: 0,
        ..ScenarioLayout::default()
    };
    assert!(Scenario::build(&catalog, &StampGenerator, &layout).is_err());
}
