//! Fixed-size chunk storage.
use sha2::{Digest, Sha256};

use crate::config::WorldConfig;
use crate::entity::{Camp, Computer, SpawnPoint, Vehicle};
use crate::field::FieldSet;
use crate::geometry::LocalPos;
use crate::ids::{FieldTypeId, FurnitureId, TerrainId, TrapId};
use crate::item::{Cosmetic, Item};
use crate::time::Tick;

/// One value per chunk cell, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer<T> {
    cells: Vec<T>,
}

impl<T: Clone> Layer<T> {
    pub fn filled(value: T) -> Self {
        Self {
            cells: vec![value; WorldConfig::CHUNK_CELLS],
        }
    }

    /// Overwrites every cell with a copy of `other`.
    pub fn replace_from(&mut self, other: &Layer<T>) {
        self.cells.clone_from_slice(&other.cells);
    }
}

impl<T: Default + Clone> Default for Layer<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Layer<T> {
    pub fn get(&self, local: LocalPos) -> &T {
        &self.cells[local.index()]
    }

    pub fn get_mut(&mut self, local: LocalPos) -> &mut T {
        &mut self.cells[local.index()]
    }

    /// Stores `value` and returns the previous one.
    pub fn set(&mut self, local: LocalPos, value: T) -> T {
        std::mem::replace(&mut self.cells[local.index()], value)
    }

    /// Exchanges the contents of every cell with the same cell of `other`.
    pub fn swap_cells(&mut self, other: &mut Layer<T>) {
        for (mine, theirs) in self.cells.iter_mut().zip(other.cells.iter_mut()) {
            std::mem::swap(mine, theirs);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocalPos, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, value)| (LocalPos::from_index(index), value))
    }
}

/// A `CHUNK_SIZE` square of world cells with its attached objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub terrain: Layer<TerrainId>,
    pub furniture: Layer<Option<FurnitureId>>,
    pub traps: Layer<Option<TrapId>>,
    pub radiation: Layer<u16>,
    pub luminance: Layer<u8>,
    pub items: Layer<Vec<Item>>,
    pub cosmetics: Layer<Vec<Cosmetic>>,
    fields: Layer<FieldSet>,
    field_count: usize,
    pub vehicles: Vec<Vehicle>,
    pub spawns: Vec<SpawnPoint>,
    pub temperature: i16,
    pub last_touched: Tick,
    pub computer: Option<Computer>,
    pub camp: Option<Camp>,
}

impl Chunk {
    pub fn new(fill: TerrainId) -> Self {
        Self {
            terrain: Layer::filled(fill),
            furniture: Layer::default(),
            traps: Layer::default(),
            radiation: Layer::default(),
            luminance: Layer::default(),
            items: Layer::default(),
            cosmetics: Layer::default(),
            fields: Layer::default(),
            field_count: 0,
            vehicles: Vec::new(),
            spawns: Vec::new(),
            temperature: 0,
            last_touched: Tick::ZERO,
            computer: None,
            camp: None,
        }
    }

    pub fn fields(&self) -> &Layer<FieldSet> {
        &self.fields
    }

    /// Number of field entries across all cells.
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn fields_at(&self, local: LocalPos) -> &FieldSet {
        self.fields.get(local)
    }

    /// Adds a field, or replaces an existing one of the same type.
    pub fn add_field(&mut self, local: LocalPos, kind: FieldTypeId, density: u8, age: u64) -> bool {
        let added = self.fields.get_mut(local).add(kind, density, age);
        if added {
            self.field_count += 1;
        }
        added
    }

    pub fn remove_field(&mut self, local: LocalPos, kind: FieldTypeId) -> bool {
        let removed = self.fields.get_mut(local).remove(kind);
        if removed {
            self.field_count -= 1;
        }
        removed
    }

    pub fn set_field_density(&mut self, local: LocalPos, kind: FieldTypeId, density: u8) -> bool {
        self.fields.get_mut(local).set_density(kind, density)
    }

    pub fn clear_fields(&mut self, local: LocalPos) -> usize {
        let cleared = self.fields.get_mut(local).clear();
        self.field_count -= cleared;
        cleared
    }

    /// Replaces the whole field layer and its count with copies of `other`'s.
    pub fn copy_fields_from(&mut self, other: &Chunk) {
        self.fields.replace_from(&other.fields);
        self.field_count = other.field_count;
    }

    /// Moves the field set of one cell out, leaving it empty.
    pub fn take_fields(&mut self, local: LocalPos) -> FieldSet {
        let taken = std::mem::take(self.fields.get_mut(local));
        self.field_count -= taken.len();
        taken
    }

    /// Installs a field set into an empty cell slot, replacing what was there.
    pub fn put_fields(&mut self, local: LocalPos, fields: FieldSet) {
        self.field_count += fields.len();
        let old = self.fields.set(local, fields);
        self.field_count -= old.len();
    }

    /// SHA-256 over every cell layer, in a fixed order.
    ///
    /// Objects (vehicles, spawns, attachments) are not part of the digest.
    pub fn layer_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (_, terrain) in self.terrain.iter() {
            hasher.update(terrain.0.to_le_bytes());
        }
        for (_, furniture) in self.furniture.iter() {
            hasher.update(optional_id(furniture.map(|id| id.0)));
        }
        for (_, trap) in self.traps.iter() {
            hasher.update(optional_id(trap.map(|id| id.0)));
        }
        for (_, radiation) in self.radiation.iter() {
            hasher.update(radiation.to_le_bytes());
        }
        for (_, light) in self.luminance.iter() {
            hasher.update([*light]);
        }
        for (_, items) in self.items.iter() {
            hasher.update((items.len() as u32).to_le_bytes());
            for item in items {
                hasher.update(item.kind.0.to_le_bytes());
                hasher.update(item.birthday.0.to_le_bytes());
                hasher.update(item.damage.to_le_bytes());
                hasher.update(item.burnt.to_le_bytes());
            }
        }
        for (_, cosmetics) in self.cosmetics.iter() {
            hasher.update((cosmetics.len() as u32).to_le_bytes());
            for text in cosmetics.iter().filter_map(Cosmetic::graffiti) {
                hasher.update((text.len() as u32).to_le_bytes());
                hasher.update(text.as_bytes());
            }
        }
        for (_, fields) in self.fields.iter() {
            hasher.update((fields.len() as u32).to_le_bytes());
            for (kind, entry) in fields.iter() {
                hasher.update(kind.0.to_le_bytes());
                hasher.update([entry.density]);
                hasher.update(entry.age.to_le_bytes());
            }
        }
        hasher.finalize().into()
    }
}

fn optional_id(id: Option<u16>) -> [u8; 3] {
    match id {
        Some(raw) => {
            let [lo, hi] = raw.to_le_bytes();
            [1, lo, hi]
        }
        None => [0, 0, 0],
    }
}
