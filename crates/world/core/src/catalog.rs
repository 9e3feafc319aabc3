//! Tile, field, item and region-type definitions addressed by dense ids.
use std::collections::HashMap;

use bitflags::bitflags;
use thiserror::Error;

use crate::error::{ErrorSeverity, WorldError};
use crate::ids::{FieldTypeId, FurnitureId, ItemTypeId, RegionTypeId, TerrainId, TrapId};
use crate::tint::Tint;

bitflags! {
    /// Static properties of terrain and furniture.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TileFlags: u16 {
        const TRANSPARENT = 1 << 0;
        const FLAMMABLE = 1 << 1;
        const INDOORS = 1 << 2;
        const SUPPORTS_ROOF = 1 << 3;
        const DIGGABLE = 1 << 4;
        const DOOR = 1 << 5;
        const WINDOW = 1 << 6;
        const LIQUID = 1 << 7;
        const NOITEM = 1 << 8;
        const ALARMED = 1 << 9;
        const CONTAINER = 1 << 10;
    }
}

impl TileFlags {
    /// Flag names joined for reports, e.g. `"TRANSPARENT INDOORS"`.
    pub fn describe(&self) -> String {
        self.iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainDef {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    /// Zero means impassable.
    pub move_cost: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: TileFlags,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FurnitureDef {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    /// Added to the terrain move cost; negative values make the cell impassable.
    pub move_cost_mod: i8,
    /// Strength needed to drag the furniture; `None` when it cannot be moved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub move_strength: Option<u16>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: TileFlags,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapDef {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    /// Perception needed to notice the trap.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility: u8,
}

/// Field effect with one name and tint per density level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    pub key: String,
    pub names: [String; 3],
    pub glyph: char,
    pub tints: [Tint; 3],
}

impl FieldDef {
    /// Name for a density in `1..=3`; out-of-range densities clamp.
    pub fn name_at(&self, density: u8) -> &str {
        &self.names[density_slot(density)]
    }

    pub fn tint_at(&self, density: u8) -> Tint {
        self.tints[density_slot(density)]
    }
}

fn density_slot(density: u8) -> usize {
    usize::from(density.clamp(1, 3) - 1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTypeDef {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    /// Light contributed to the cell's luminance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub light: u8,
}

/// Layout family the stamp generator uses for a region type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RegionStyle {
    #[default]
    Open,
    Scatter,
    Building,
    Parking,
    Pond,
}

/// Region-type (overmap terrain) classification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionTypeDef {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    /// Terrain key the generator floods the tile with.
    pub base_terrain: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: RegionStyle,
}

/// Orientation of a line-drawing terrain glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallOrientation {
    Vertical,
    Horizontal,
}

impl WallOrientation {
    pub fn of_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '|' | '│' => Some(Self::Vertical),
            '-' | '─' => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Key suffix pairs, vertical first. Tried in this order.
const ORIENTATION_SUFFIXES: [(&str, &str); 3] = [
    ("_v", "_h"),
    ("_v_alarm", "_h_alarm"),
    ("_vertical", "_horizontal"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate {table} key `{key}`")]
    DuplicateKey { table: &'static str, key: String },

    #[error("unknown {table} key `{key}`")]
    UnknownKey { table: &'static str, key: String },

    #[error("{table} table holds {count} entries, more than ids can address")]
    TableTooLarge { table: &'static str, count: usize },

    #[error("catalog has no terrain definitions")]
    NoTerrain,
}

impl WorldError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "CATALOG_DUPLICATE_KEY",
            Self::UnknownKey { .. } => "CATALOG_UNKNOWN_KEY",
            Self::TableTooLarge { .. } => "CATALOG_TABLE_TOO_LARGE",
            Self::NoTerrain => "CATALOG_NO_TERRAIN",
        }
    }
}

/// Raw definition lists, in id order. This is the on-disk catalog shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatalogTables {
    pub terrain: Vec<TerrainDef>,
    pub furniture: Vec<FurnitureDef>,
    pub traps: Vec<TrapDef>,
    pub fields: Vec<FieldDef>,
    pub items: Vec<ItemTypeDef>,
    pub regions: Vec<RegionTypeDef>,
}

trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! impl_keyed {
    ($($def:ty),*) => {
        $(impl Keyed for $def {
            fn key(&self) -> &str {
                &self.key
            }
        })*
    };
}

impl_keyed!(TerrainDef, FurnitureDef, TrapDef, FieldDef, ItemTypeDef, RegionTypeDef);

#[derive(Clone, Debug)]
struct Table<D> {
    defs: Vec<D>,
    keys: HashMap<String, u16>,
}

impl<D: Keyed> Table<D> {
    fn build(table: &'static str, defs: Vec<D>) -> Result<Self, CatalogError> {
        if defs.len() > usize::from(u16::MAX) {
            return Err(CatalogError::TableTooLarge {
                table,
                count: defs.len(),
            });
        }
        let mut keys = HashMap::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            if keys.insert(def.key().to_owned(), index as u16).is_some() {
                return Err(CatalogError::DuplicateKey {
                    table,
                    key: def.key().to_owned(),
                });
            }
        }
        Ok(Self { defs, keys })
    }

    fn get(&self, index: usize) -> Option<&D> {
        self.defs.get(index)
    }

    fn find(&self, key: &str) -> Option<u16> {
        self.keys.get(key).copied()
    }
}

/// Immutable lookup tables for every definition kind.
#[derive(Clone, Debug)]
pub struct Catalog {
    terrain: Table<TerrainDef>,
    furniture: Table<FurnitureDef>,
    traps: Table<TrapDef>,
    fields: Table<FieldDef>,
    items: Table<ItemTypeDef>,
    regions: Table<RegionTypeDef>,
}

impl Catalog {
    pub fn from_tables(tables: CatalogTables) -> Result<Self, CatalogError> {
        if tables.terrain.is_empty() {
            return Err(CatalogError::NoTerrain);
        }
        let catalog = Self {
            terrain: Table::build("terrain", tables.terrain)?,
            furniture: Table::build("furniture", tables.furniture)?,
            traps: Table::build("trap", tables.traps)?,
            fields: Table::build("field", tables.fields)?,
            items: Table::build("item", tables.items)?,
            regions: Table::build("region", tables.regions)?,
        };
        for region in &catalog.regions.defs {
            if catalog.terrain.find(&region.base_terrain).is_none() {
                return Err(CatalogError::UnknownKey {
                    table: "terrain",
                    key: region.base_terrain.clone(),
                });
            }
        }
        Ok(catalog)
    }

    pub fn terrain_count(&self) -> usize {
        self.terrain.defs.len()
    }

    pub fn furniture_count(&self) -> usize {
        self.furniture.defs.len()
    }

    pub fn trap_count(&self) -> usize {
        self.traps.defs.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.defs.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.defs.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.defs.len()
    }

    pub fn terrain(&self, id: TerrainId) -> Option<&TerrainDef> {
        self.terrain.get(id.index())
    }

    pub fn furniture(&self, id: FurnitureId) -> Option<&FurnitureDef> {
        self.furniture.get(id.index())
    }

    pub fn trap(&self, id: TrapId) -> Option<&TrapDef> {
        self.traps.get(id.index())
    }

    pub fn field(&self, id: FieldTypeId) -> Option<&FieldDef> {
        self.fields.get(id.index())
    }

    pub fn item(&self, id: ItemTypeId) -> Option<&ItemTypeDef> {
        self.items.get(id.index())
    }

    pub fn region(&self, id: RegionTypeId) -> Option<&RegionTypeDef> {
        self.regions.get(id.index())
    }

    pub fn terrain_id(&self, key: &str) -> Option<TerrainId> {
        self.terrain.find(key).map(TerrainId)
    }

    pub fn furniture_id(&self, key: &str) -> Option<FurnitureId> {
        self.furniture.find(key).map(FurnitureId)
    }

    pub fn trap_id(&self, key: &str) -> Option<TrapId> {
        self.traps.find(key).map(TrapId)
    }

    pub fn field_id(&self, key: &str) -> Option<FieldTypeId> {
        self.fields.find(key).map(FieldTypeId)
    }

    pub fn item_id(&self, key: &str) -> Option<ItemTypeId> {
        self.items.find(key).map(ItemTypeId)
    }

    pub fn region_id(&self, key: &str) -> Option<RegionTypeId> {
        self.regions.find(key).map(RegionTypeId)
    }

    /// Like [`Catalog::terrain_id`] but reports the missing key.
    pub fn require_terrain(&self, key: &str) -> Result<TerrainId, CatalogError> {
        self.terrain_id(key).ok_or_else(|| CatalogError::UnknownKey {
            table: "terrain",
            key: key.to_owned(),
        })
    }

    /// The first terrain entry, used as the blank fill for fresh chunks.
    pub fn default_terrain(&self) -> TerrainId {
        TerrainId(0)
    }

    pub fn wall_orientation(&self, id: TerrainId) -> Option<WallOrientation> {
        self.terrain(id)
            .and_then(|def| WallOrientation::of_glyph(def.glyph))
    }

    /// Finds the counterpart of an oriented terrain by swapping its key suffix.
    ///
    /// `from` is the orientation of `id` itself: a vertical terrain ending in
    /// `_v` maps to the `_h` key and vice versa.
    pub fn alternate_orientation(
        &self,
        id: TerrainId,
        from: WallOrientation,
    ) -> Option<TerrainId> {
        let key = &self.terrain(id)?.key;
        ORIENTATION_SUFFIXES.iter().find_map(|&(vertical, horizontal)| {
            let (suffix, replacement) = match from {
                WallOrientation::Vertical => (vertical, horizontal),
                WallOrientation::Horizontal => (horizontal, vertical),
            };
            let stem = key.strip_suffix(suffix).filter(|stem| !stem.is_empty())?;
            self.terrain_id(&format!("{stem}{replacement}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain(key: &str, glyph: char) -> TerrainDef {
        TerrainDef {
            key: key.to_owned(),
            name: key.to_owned(),
            glyph,
            tint: Tint::LightGray,
            move_cost: 0,
            flags: TileFlags::empty(),
        }
    }

    fn catalog(keys: &[(&str, char)]) -> Catalog {
        let tables = CatalogTables {
            terrain: keys.iter().map(|&(key, glyph)| terrain(key, glyph)).collect(),
            ..CatalogTables::default()
        };
        Catalog::from_tables(tables).expect("valid catalog")
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let tables = CatalogTables {
            terrain: vec![terrain("t_dirt", '.'), terrain("t_dirt", ',')],
            ..CatalogTables::default()
        };
        let err = Catalog::from_tables(tables).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_DUPLICATE_KEY");
    }

    #[test]
    fn region_base_terrain_must_exist() {
        let tables = CatalogTables {
            terrain: vec![terrain("t_dirt", '.')],
            regions: vec![RegionTypeDef {
                key: "field".into(),
                name: "field".into(),
                glyph: '.',
                tint: Tint::Brown,
                base_terrain: "t_grass".into(),
                style: RegionStyle::Open,
            }],
            ..CatalogTables::default()
        };
        assert!(matches!(
            Catalog::from_tables(tables),
            Err(CatalogError::UnknownKey { .. })
        ));
    }

    #[test]
    fn alternate_orientation_swaps_suffix_pairs() {
        let catalog = catalog(&[
            ("t_floor", '.'),
            ("t_wall_v", '|'),
            ("t_wall_h", '-'),
            ("t_fence_vertical", '|'),
            ("t_fence_horizontal", '-'),
            ("t_window_v_alarm", '|'),
            ("t_window_h_alarm", '-'),
            ("t_bars_v", '|'),
        ]);
        let id = |key: &str| catalog.terrain_id(key).expect("key");

        let wall_v = id("t_wall_v");
        assert_eq!(catalog.wall_orientation(wall_v), Some(WallOrientation::Vertical));
        assert_eq!(
            catalog.alternate_orientation(wall_v, WallOrientation::Vertical),
            Some(id("t_wall_h"))
        );
        assert_eq!(
            catalog.alternate_orientation(id("t_wall_h"), WallOrientation::Horizontal),
            Some(wall_v)
        );
        assert_eq!(
            catalog.alternate_orientation(id("t_fence_vertical"), WallOrientation::Vertical),
            Some(id("t_fence_horizontal"))
        );
        assert_eq!(
            catalog.alternate_orientation(id("t_window_v_alarm"), WallOrientation::Vertical),
            Some(id("t_window_h_alarm"))
        );
        assert_eq!(
            catalog.alternate_orientation(id("t_bars_v"), WallOrientation::Vertical),
            None
        );
        assert_eq!(catalog.wall_orientation(id("t_floor")), None);
    }

    #[test]
    fn flags_describe_in_declaration_order() {
        let flags = TileFlags::INDOORS | TileFlags::TRANSPARENT;
        assert_eq!(flags.describe(), "TRANSPARENT INDOORS");
    }
}
