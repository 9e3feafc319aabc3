//! Objects that live on the map: vehicles, creatures, pending spawns and
//! chunk attachments.
use crate::geometry::{ChunkPos, LocalPos, Point2, Point3};
use crate::ids::VehicleId;
use crate::tint::{Glyph, Tint};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehiclePart {
    pub name: String,
    /// Offset from the vehicle anchor.
    pub offset: Point2,
    pub glyph: char,
    pub tint: Tint,
}

/// A vehicle stored in the chunk holding its anchor cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    /// Owning chunk. Re-addressed when the vehicle moves between maps.
    pub chunk: ChunkPos,
    pub anchor: LocalPos,
    pub parts: Vec<VehiclePart>,
}

impl Vehicle {
    pub fn anchor_point(&self) -> Point3 {
        self.chunk.point(self.anchor)
    }

    pub fn occupied_points(&self) -> impl Iterator<Item = Point3> + '_ {
        let anchor = self.anchor_point();
        self.parts
            .iter()
            .map(move |part| anchor.offset(part.offset.x, part.offset.y, 0))
    }

    pub fn part_at(&self, point: Point3) -> Option<&VehiclePart> {
        let anchor = self.anchor_point();
        if point.z != anchor.z {
            return None;
        }
        let offset = Point2::new(point.x - anchor.x, point.y - anchor.y);
        self.parts.iter().find(|part| part.offset == offset)
    }
}

/// Disposition of an NPC towards the player.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attitude {
    #[default]
    Neutral,
    Friendly,
    Follow,
    Hostile,
    Fleeing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub kind: String,
    pub name: String,
    pub glyph: char,
    pub tint: Tint,
    pub hp: i32,
    pub max_hp: i32,
    pub friendly: bool,
    /// Where the monster is heading, if anywhere.
    pub destination: Option<Point3>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attitude: Attitude,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Creature {
    Monster(Monster),
    Npc(Npc),
}

impl Creature {
    pub fn name(&self) -> &str {
        match self {
            Creature::Monster(monster) => &monster.name,
            Creature::Npc(npc) => &npc.name,
        }
    }

    pub fn hp(&self) -> (i32, i32) {
        match self {
            Creature::Monster(monster) => (monster.hp, monster.max_hp),
            Creature::Npc(npc) => (npc.hp, npc.max_hp),
        }
    }

    pub fn glyph(&self) -> Glyph {
        match self {
            Creature::Monster(monster) => Glyph::new(monster.glyph, monster.tint),
            Creature::Npc(npc) => {
                let tint = match npc.attitude {
                    Attitude::Hostile => Tint::LightRed,
                    Attitude::Friendly | Attitude::Follow => Tint::LightGreen,
                    Attitude::Neutral | Attitude::Fleeing => Tint::White,
                };
                Glyph::new('@', tint)
            }
        }
    }
}

/// Monster group waiting to be placed by the world's spawn pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoint {
    pub kind: String,
    pub count: u16,
    pub local: LocalPos,
    pub friendly: bool,
    pub name: Option<String>,
}

/// Terminal attached to a chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Computer {
    pub name: String,
    pub security: u8,
}

/// Faction camp anchored in a chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camp {
    pub name: String,
    pub owner: String,
}
