//! Cell reports and creature editing.
use strum::IntoEnumIterator;
use world_core::{
    Attitude, Catalog, CellAccess, ChunkPos, Creature, LocalPos, Point3, RegionPos, Tint,
    TileFlags, Vehicle, WorldAccess, line_to, wrap_step,
};

/// One line of text for an info panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoLine {
    pub text: String,
    pub tint: Tint,
}

impl InfoLine {
    pub fn new(text: impl Into<String>, tint: Tint) -> Self {
        Self {
            text: text.into(),
            tint,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tint::LightGray)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSummary {
    pub key: String,
    pub name: String,
    pub density: u8,
    pub age: u64,
}

/// Creature or vehicle standing on the cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Occupant {
    Creature { name: String, hp: i32, max_hp: i32, detail: String },
    Vehicle { name: String, part: String },
}

/// Everything worth knowing about one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellReport {
    pub point: Point3,
    pub chunk: ChunkPos,
    pub local: LocalPos,
    pub tile: RegionPos,
    pub region_type: Option<String>,
    pub in_bounds: bool,
    pub terrain: Option<String>,
    pub furniture: Option<String>,
    pub flags: TileFlags,
    pub fields: Vec<FieldSummary>,
    pub trap: Option<String>,
    pub occupant: Option<Occupant>,
    /// First item's name and how many others share the cell.
    pub items: Option<(String, usize)>,
    pub graffiti: Option<String>,
    pub radiation: u16,
}

/// Collects the report for `point`.
pub fn inspect<W: WorldAccess + ?Sized>(world: &W, catalog: &Catalog, point: Point3) -> CellReport {
    let tile = point.region();
    let region_type = world
        .region_type(tile)
        .and_then(|id| catalog.region(id))
        .map(|def| format!("{} ({})", def.name, def.key));

    let mut flags = TileFlags::empty();
    let terrain = world.terrain_at(point).and_then(|id| {
        let def = catalog.terrain(id)?;
        flags |= def.flags;
        Some(format!(
            "{}: {} ({}), move {}",
            id.index(),
            def.name,
            def.key,
            def.move_cost
        ))
    });
    let furniture = world.furniture_at(point).and_then(|id| {
        let def = catalog.furniture(id)?;
        flags |= def.flags;
        let strength = def
            .move_strength
            .map_or_else(|| "fixed".to_owned(), |s| format!("str {s}"));
        Some(format!(
            "{}: {} ({}), move {:+}, {}",
            id.index(),
            def.name,
            def.key,
            def.move_cost_mod,
            strength
        ))
    });

    let fields = world
        .fields_at(point)
        .map(|set| {
            set.iter()
                .filter_map(|(kind, entry)| {
                    let def = catalog.field(kind)?;
                    Some(FieldSummary {
                        key: def.key.clone(),
                        name: def.name_at(entry.density).to_owned(),
                        density: entry.density,
                        age: entry.age,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let trap = world
        .trap_at(point)
        .and_then(|id| catalog.trap(id))
        .map(|def| format!("{} ({})", def.name, def.key));

    let occupant = if let Some(creature) = world.creature_at(point) {
        let (hp, max_hp) = creature.hp();
        let detail = match creature {
            Creature::Monster(monster) if monster.friendly => format!("{}, friendly", monster.kind),
            Creature::Monster(monster) => monster.kind.clone(),
            Creature::Npc(npc) => format!("npc, {}", npc.attitude),
        };
        Some(Occupant::Creature {
            name: creature.name().to_owned(),
            hp,
            max_hp,
            detail,
        })
    } else {
        world.vehicle_at_point(point).map(|vehicle| Occupant::Vehicle {
            name: format!("{} ({})", vehicle.name, vehicle.id),
            part: vehicle
                .part_at(point)
                .map_or_else(String::new, |part| part.name.clone()),
        })
    };

    let items = if flags.contains(TileFlags::CONTAINER) {
        None
    } else {
        let items = world.items_at(point);
        items.first().map(|first| {
            let name = catalog
                .item(first.kind)
                .map_or_else(|| first.kind.to_string(), |def| def.name.clone());
            (name, items.len() - 1)
        })
    };

    let graffiti = world
        .cosmetics_at(point)
        .iter()
        .find_map(|cosmetic| cosmetic.graffiti())
        .map(str::to_owned);

    CellReport {
        point,
        chunk: point.chunk(),
        local: point.local(),
        tile,
        region_type,
        in_bounds: world.bounds().contains(point),
        terrain,
        furniture,
        flags,
        fields,
        trap,
        occupant,
        items,
        graffiti,
        radiation: world.radiation_at(point),
    }
}

impl CellReport {
    /// Panel rendering of the report.
    pub fn lines(&self) -> Vec<InfoLine> {
        let mut lines = vec![InfoLine::new(
            format!(
                "{} {} local {},{}",
                self.point, self.chunk, self.local.x, self.local.y
            ),
            Tint::White,
        )];
        if !self.in_bounds {
            lines.push(InfoLine::new("outside the world", Tint::DarkGray));
            return lines;
        }
        lines.push(InfoLine::plain(format!(
            "{}: {}",
            self.tile,
            self.region_type.as_deref().unwrap_or("-")
        )));
        if let Some(terrain) = &self.terrain {
            lines.push(InfoLine::plain(terrain.clone()));
        }
        if let Some(furniture) = &self.furniture {
            lines.push(InfoLine::plain(furniture.clone()));
        }
        let flags = self.flags.describe();
        if !flags.is_empty() {
            lines.push(InfoLine::new(flags, Tint::DarkGray));
        }
        for field in &self.fields {
            lines.push(InfoLine::new(
                format!(
                    "field: {} ({}) density {} age {}",
                    field.name, field.key, field.density, field.age
                ),
                Tint::LightRed,
            ));
        }
        if let Some(trap) = &self.trap {
            lines.push(InfoLine::new(format!("trap: {trap}"), Tint::LightRed));
        }
        match &self.occupant {
            Some(Occupant::Creature {
                name,
                hp,
                max_hp,
                detail,
            }) => lines.push(InfoLine::new(
                format!("{name} [{detail}] hp {hp}/{max_hp}"),
                Tint::White,
            )),
            Some(Occupant::Vehicle { name, part }) => {
                lines.push(InfoLine::new(format!("vehicle: {name} / {part}"), Tint::LightCyan))
            }
            None => {}
        }
        match &self.items {
            Some((first, 0)) => {
                lines.push(InfoLine::new(format!("item: {first}"), Tint::LightGreen))
            }
            Some((first, others)) => lines.push(InfoLine::new(
                format!("item: {first} and {others} others"),
                Tint::LightGreen,
            )),
            None => {}
        }
        if let Some(graffiti) = &self.graffiti {
            lines.push(InfoLine::new(format!("graffiti: {graffiti}"), Tint::Yellow));
        }
        if self.radiation > 0 {
            lines.push(InfoLine::new(format!("radiation: {}", self.radiation), Tint::LightGreen));
        }
        lines
    }
}

/// Editable creature property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum CreatureField {
    HitPoints,
    Friendly,
    Attitude,
}

/// Properties editable on this kind of creature.
pub fn creature_fields(creature: &Creature) -> &'static [CreatureField] {
    match creature {
        Creature::Monster(_) => &[CreatureField::HitPoints, CreatureField::Friendly],
        Creature::Npc(_) => &[CreatureField::HitPoints, CreatureField::Attitude],
    }
}

pub fn describe_creature_field(creature: &Creature, field: CreatureField) -> String {
    match (field, creature) {
        (CreatureField::HitPoints, _) => {
            let (hp, max_hp) = creature.hp();
            format!("hp: {hp}/{max_hp}")
        }
        (CreatureField::Friendly, Creature::Monster(monster)) => {
            format!("friendly: {}", if monster.friendly { "yes" } else { "no" })
        }
        (CreatureField::Attitude, Creature::Npc(npc)) => format!("attitude: {}", npc.attitude),
        (field, _) => format!("{field}: -"),
    }
}

/// Steps a creature property. Returns false when the property does not
/// apply to this creature.
///
/// Hit points move by `step` within `1..=max`; friendliness flips; attitude
/// cycles.
pub fn adjust_creature(creature: &mut Creature, field: CreatureField, step: i64) -> bool {
    match (field, creature) {
        (CreatureField::HitPoints, Creature::Monster(monster)) => {
            monster.hp = step_hp(monster.hp, monster.max_hp, step);
            true
        }
        (CreatureField::HitPoints, Creature::Npc(npc)) => {
            npc.hp = step_hp(npc.hp, npc.max_hp, step);
            true
        }
        (CreatureField::Friendly, Creature::Monster(monster)) => {
            monster.friendly = !monster.friendly;
            true
        }
        (CreatureField::Attitude, Creature::Npc(npc)) => {
            let all: Vec<Attitude> = Attitude::iter().collect();
            let current = all.iter().position(|a| *a == npc.attitude).unwrap_or(0);
            let delta = if step < 0 { -1 } else { 1 };
            npc.attitude = all[wrap_step(current, delta, all.len()).0];
            true
        }
        _ => false,
    }
}

fn step_hp(hp: i32, max_hp: i32, step: i64) -> i32 {
    let next = i64::from(hp) + step;
    next.clamp(1, i64::from(max_hp.max(1))) as i32
}

/// Cells a monster will walk through to reach its destination.
pub fn movement_plan(creature: &Creature, at: Point3) -> Vec<Point3> {
    match creature {
        Creature::Monster(monster) => monster
            .destination
            .map(|destination| line_to(at, destination))
            .unwrap_or_default(),
        Creature::Npc(_) => Vec::new(),
    }
}

/// Read-only description of a vehicle and its parts.
pub fn vehicle_report(vehicle: &Vehicle) -> Vec<InfoLine> {
    let mut lines = vec![
        InfoLine::new(format!("{} ({})", vehicle.name, vehicle.id), Tint::White),
        InfoLine::plain(format!("anchor {} in {}", vehicle.anchor_point(), vehicle.chunk)),
    ];
    lines.extend(vehicle.parts.iter().map(|part| {
        InfoLine::new(
            format!("{} {} at {:+},{:+}", part.glyph, part.name, part.offset.x, part.offset.y),
            part.tint,
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{Monster, Npc};

    fn dog(destination: Option<Point3>) -> Creature {
        Creature::Monster(Monster {
            kind: "mon_dog".into(),
            name: "dog".into(),
            glyph: 'd',
            tint: Tint::Brown,
            hp: 10,
            max_hp: 12,
            friendly: false,
            destination,
        })
    }

    #[test]
    fn fields_depend_on_variant() {
        let npc = Creature::Npc(Npc {
            name: "Ann".into(),
            hp: 5,
            max_hp: 20,
            attitude: Attitude::Neutral,
        });
        assert_eq!(creature_fields(&npc), &[CreatureField::HitPoints, CreatureField::Attitude]);
        assert_eq!(creature_fields(&dog(None))[1], CreatureField::Friendly);
    }

    #[test]
    fn adjust_clamps_hp_and_flips_friendly() {
        let mut creature = dog(None);
        assert!(adjust_creature(&mut creature, CreatureField::HitPoints, 10));
        assert_eq!(creature.hp(), (12, 12));
        adjust_creature(&mut creature, CreatureField::HitPoints, -100);
        assert_eq!(creature.hp(), (1, 12));
        assert!(adjust_creature(&mut creature, CreatureField::Friendly, 1));
        assert_eq!(describe_creature_field(&creature, CreatureField::Friendly), "friendly: yes");
        assert!(!adjust_creature(&mut creature, CreatureField::Attitude, 1));
    }

    #[test]
    fn attitude_cycles_both_ways() {
        let mut npc = Creature::Npc(Npc {
            name: "Ann".into(),
            hp: 5,
            max_hp: 20,
            attitude: Attitude::Neutral,
        });
        adjust_creature(&mut npc, CreatureField::Attitude, -1);
        assert_eq!(describe_creature_field(&npc, CreatureField::Attitude), "attitude: Fleeing");
        adjust_creature(&mut npc, CreatureField::Attitude, 1);
        adjust_creature(&mut npc, CreatureField::Attitude, 1);
        assert_eq!(describe_creature_field(&npc, CreatureField::Attitude), "attitude: Friendly");
    }

    #[test]
    fn movement_plan_traces_to_destination() {
        let at = Point3::new(2, 2, 0);
        let plan = movement_plan(&dog(Some(Point3::new(5, 2, 0))), at);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.last(), Some(&Point3::new(5, 2, 0)));
        assert!(movement_plan(&dog(None), at).is_empty());
    }
}
