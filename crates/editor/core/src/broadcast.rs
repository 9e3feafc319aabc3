//! Writes applied to every cell of a selection.
//!
//! Members outside the world are skipped. Each function returns how many
//! cells (or items) it changed; writes are unconditional and not logged for
//! undo.
use world_core::{
    Catalog, CellAccess, FieldTypeId, FurnitureId, Item, ItemProperty, ItemTypeId, Point3,
    TerrainId, Tick, TrapId, WallOrientation,
};

use crate::region::{Region, Shape};

/// Sets the terrain of every member.
///
/// On an unfilled rectangle, wall terrain is swapped for its other
/// orientation where it runs across the selection: a vertical wall becomes
/// horizontal on the rows of the two anchors, a horizontal wall becomes
/// vertical on their columns.
pub fn paint_terrain<W: CellAccess + ?Sized>(
    world: &mut W,
    catalog: &Catalog,
    region: &Region,
    terrain: TerrainId,
) -> usize {
    let alternate = orientation_alternate(catalog, region, terrain);
    let (origin, target) = (region.origin(), region.target());
    let mut painted = 0;
    for &point in region.members() {
        let chosen = match alternate {
            Some((WallOrientation::Vertical, other))
                if point.y == origin.y || point.y == target.y =>
            {
                other
            }
            Some((WallOrientation::Horizontal, other))
                if point.x == origin.x || point.x == target.x =>
            {
                other
            }
            _ => terrain,
        };
        if world.set_terrain(point, chosen) {
            painted += 1;
        }
    }
    tracing::debug!(%terrain, painted, "painted terrain");
    painted
}

fn orientation_alternate(
    catalog: &Catalog,
    region: &Region,
    terrain: TerrainId,
) -> Option<(WallOrientation, TerrainId)> {
    if region.shape() != Shape::Rect {
        return None;
    }
    let orientation = catalog.wall_orientation(terrain)?;
    let alternate = catalog.alternate_orientation(terrain, orientation)?;
    Some((orientation, alternate))
}

pub fn set_furniture<W: CellAccess + ?Sized>(
    world: &mut W,
    members: &[Point3],
    furniture: Option<FurnitureId>,
) -> usize {
    members
        .iter()
        .filter(|point| world.set_furniture(**point, furniture))
        .count()
}

pub fn set_trap<W: CellAccess + ?Sized>(
    world: &mut W,
    members: &[Point3],
    trap: Option<TrapId>,
) -> usize {
    members
        .iter()
        .filter(|point| world.set_trap(**point, trap))
        .count()
}

/// Density of `kind` on a cell, zero when absent.
pub fn field_density<W: CellAccess + ?Sized>(world: &W, point: Point3, kind: FieldTypeId) -> u8 {
    world
        .fields_at(point)
        .and_then(|fields| fields.get(kind))
        .map_or(0, |entry| entry.density)
}

/// Sets `kind` to `density` on every member.
///
/// Zero removes the field. A present field keeps its age and only changes
/// density; an absent one is added with age zero.
pub fn set_field<W: CellAccess + ?Sized>(
    world: &mut W,
    members: &[Point3],
    kind: FieldTypeId,
    density: u8,
) -> usize {
    let mut changed = 0;
    for &point in members {
        if world.fields_at(point).is_none() {
            continue;
        }
        let current = field_density(&*world, point, kind);
        let wrote = match (density, current) {
            (0, 0) => false,
            (0, _) => world.remove_field(point, kind),
            (_, 0) => world.add_field(point, kind, density),
            _ => world.set_field_density(point, kind, density),
        };
        if wrote {
            changed += 1;
        }
    }
    changed
}

/// Removes every field from every member. Returns the number of fields removed.
pub fn clear_fields<W: CellAccess + ?Sized>(world: &mut W, members: &[Point3]) -> usize {
    members.iter().map(|point| world.clear_fields(*point)).sum()
}

/// Writes an item property.
///
/// A multi-cell region writes every item on every member; a single cell
/// writes only the item at `index`. Returns the number of items changed.
pub fn set_item_property<W: CellAccess + ?Sized>(
    world: &mut W,
    region: &Region,
    index: usize,
    property: ItemProperty,
    value: i64,
) -> usize {
    if !region.is_multi() {
        return world
            .items_at_mut(region.target())
            .and_then(|items| items.get_mut(index))
            .map_or(0, |item| {
                item.set_property(property, value);
                1
            });
    }

    let mut changed = 0;
    for &point in region.members() {
        if let Some(items) = world.items_at_mut(point) {
            for item in items.iter_mut() {
                item.set_property(property, value);
                changed += 1;
            }
        }
    }
    changed
}

/// Drops a new item of `kind` on every member, adding its light to the cell.
pub fn add_item<W: CellAccess + ?Sized>(
    world: &mut W,
    catalog: &Catalog,
    members: &[Point3],
    kind: ItemTypeId,
    birthday: Tick,
) -> usize {
    let light = catalog.item(kind).map_or(0, |def| def.light);
    let mut added = 0;
    for &point in members {
        if let Some((chunk, local)) = world.cell_mut(point) {
            chunk.items.get_mut(local).push(Item::new(kind, birthday));
            let luminance = chunk.luminance.get_mut(local);
            *luminance = luminance.saturating_add(light);
            added += 1;
        }
    }
    added
}
