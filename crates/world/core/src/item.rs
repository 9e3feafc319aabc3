use crate::ids::ItemTypeId;
use crate::time::Tick;

/// An item lying on a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemTypeId,
    /// Turn the item was created.
    pub birthday: Tick,
    /// Damage level, -1 (reinforced) to 4 (nearly destroyed).
    pub damage: i8,
    pub burnt: u16,
}

impl Item {
    pub const MIN_DAMAGE: i8 = -1;
    pub const MAX_DAMAGE: i8 = 4;

    pub fn new(kind: ItemTypeId, birthday: Tick) -> Self {
        Self {
            kind,
            birthday,
            damage: 0,
            burnt: 0,
        }
    }

    pub fn property(&self, property: ItemProperty) -> i64 {
        match property {
            ItemProperty::Birthday => self.birthday.0 as i64,
            ItemProperty::Damage => i64::from(self.damage),
            ItemProperty::Burnt => i64::from(self.burnt),
        }
    }

    /// Writes a property, clamping the value into the property's range.
    pub fn set_property(&mut self, property: ItemProperty, value: i64) {
        match property {
            ItemProperty::Birthday => self.birthday = Tick(value.max(0) as u64),
            ItemProperty::Damage => {
                self.damage =
                    value.clamp(i64::from(Self::MIN_DAMAGE), i64::from(Self::MAX_DAMAGE)) as i8
            }
            ItemProperty::Burnt => self.burnt = value.clamp(0, i64::from(u16::MAX)) as u16,
        }
    }
}

/// Editable item properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ItemProperty {
    Birthday,
    Damage,
    Burnt,
}

/// Cosmetic overlay drawn over a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cosmetic {
    Graffiti(String),
}

impl Cosmetic {
    pub fn graffiti(&self) -> Option<&str> {
        match self {
            Cosmetic::Graffiti(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_property_clamps() {
        let mut item = Item::new(ItemTypeId(0), Tick(5));
        item.set_property(ItemProperty::Damage, 10);
        item.set_property(ItemProperty::Burnt, -3);
        item.set_property(ItemProperty::Birthday, 77);
        assert_eq!(item.damage, Item::MAX_DAMAGE);
        assert_eq!(item.burnt, 0);
        assert_eq!(item.property(ItemProperty::Birthday), 77);
        assert_eq!(ItemProperty::Birthday.to_string(), "birthday");
    }
}
