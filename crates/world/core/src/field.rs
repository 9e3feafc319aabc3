use std::collections::BTreeMap;

use crate::config::WorldConfig;
use crate::ids::FieldTypeId;

/// Density (1..=3) and age of one field effect on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEntry {
    pub density: u8,
    pub age: u64,
}

/// All field effects on a cell, at most one per field type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: BTreeMap<FieldTypeId, FieldEntry>,
}

fn clamp_density(density: u8) -> u8 {
    density.clamp(1, WorldConfig::MAX_FIELD_DENSITY)
}

impl FieldSet {
    pub fn get(&self, kind: FieldTypeId) -> Option<&FieldEntry> {
        self.entries.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldTypeId, &FieldEntry)> {
        self.entries.iter().map(|(kind, entry)| (*kind, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a field with the given age. Returns true when the type was not present.
    ///
    /// An existing field of the same type is replaced.
    pub fn add(&mut self, kind: FieldTypeId, density: u8, age: u64) -> bool {
        let entry = FieldEntry {
            density: clamp_density(density),
            age,
        };
        self.entries.insert(kind, entry).is_none()
    }

    pub fn remove(&mut self, kind: FieldTypeId) -> bool {
        self.entries.remove(&kind).is_some()
    }

    /// Overwrites the density of an existing field, keeping its age.
    pub fn set_density(&mut self, kind: FieldTypeId, density: u8) -> bool {
        match self.entries.get_mut(&kind) {
            Some(entry) => {
                entry.density = clamp_density(density);
                true
            }
            None => false,
        }
    }

    /// Removes every field and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Field drawn for the cell: highest density, lowest id on ties.
    pub fn strongest(&self) -> Option<(FieldTypeId, &FieldEntry)> {
        self.iter()
            .max_by(|(ka, a), (kb, b)| a.density.cmp(&b.density).then(kb.cmp(ka)))
    }
}
