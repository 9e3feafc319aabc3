use world_core::{RegionPos, ScratchChunk, WorldAccess};

use super::{PipelineError, tile_chunks};

/// What a merge changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub tile: RegionPos,
    pub chunks: usize,
    /// Vehicles moved from the scratch map into the world.
    pub vehicles_moved: usize,
    /// Live vehicles dropped with the chunks they stood in.
    pub vehicles_removed: usize,
    pub spawns_added: usize,
    /// Creatures placed by the world's spawn pass.
    pub creatures_spawned: usize,
}

/// Moves the generated tile into the world's chunk storage.
///
/// The vehicle index of the tile's level is cleared first and rebuilt at the
/// end, so no entry can point at a vehicle that left with its chunk.
pub(super) fn merge_scratch<W: WorldAccess + ?Sized>(
    world: &mut W,
    mut scratch: ScratchChunk,
) -> Result<ApplyReport, PipelineError> {
    let tile = scratch.region();
    if let Some(chunk) = tile_chunks(tile).find(|pos| world.chunk(*pos).is_none()) {
        return Err(PipelineError::MissingChunk { chunk });
    }

    let turn = world.current_turn();
    let mut report = ApplyReport {
        tile,
        ..ApplyReport::default()
    };
    world.clear_vehicle_index(tile.z);

    for (pos, (_, generated)) in tile_chunks(tile).zip(scratch.chunks_mut()) {
        let Some(live) = world.chunk_mut(pos) else {
            continue;
        };
        let departing = std::mem::take(&mut live.vehicles);
        for vehicle in &departing {
            world.unindex_vehicle(vehicle);
        }
        report.vehicles_removed += departing.len();

        let mut arriving = std::mem::take(&mut generated.vehicles);
        for vehicle in &mut arriving {
            vehicle.id = world.allocate_vehicle_id();
            vehicle.chunk = pos;
            world.index_vehicle(vehicle);
        }
        report.vehicles_moved += arriving.len();

        let spawns = std::mem::take(&mut generated.spawns);
        let spawned = spawns.len();

        let Some(live) = world.chunk_mut(pos) else {
            continue;
        };
        live.vehicles = arriving;
        live.spawns.extend(spawns);
        live.copy_fields_from(generated);
        live.terrain.replace_from(&generated.terrain);
        live.furniture.replace_from(&generated.furniture);
        live.traps.replace_from(&generated.traps);
        live.radiation.replace_from(&generated.radiation);
        live.luminance.replace_from(&generated.luminance);
        live.items.swap_cells(&mut generated.items);
        live.cosmetics.swap_cells(&mut generated.cosmetics);
        live.temperature = generated.temperature;
        live.computer = generated.computer.take();
        live.camp = generated.camp.take();
        live.last_touched = turn;
        report.chunks += 1;

        if spawned > 0 {
            report.spawns_added += spawned;
            report.creatures_spawned += world.spawn_monsters(pos);
        }
        tracing::debug!(chunk = %pos, spawned, "merged scratch chunk");
    }

    world.rebuild_vehicle_index(tile.z);
    Ok(report)
}
