use strum::IntoEnumIterator;
use world_core::{
    CellAccess, ContentGenerator, FieldTypeId, ItemProperty, ItemTypeId, Point3, Tint, TrapId,
    WorldAccess, WorldConfig, wrap_step,
};

use super::{EditorContext, MapEditor, MenuEntry, MenuView, Mode};
use crate::broadcast;
use crate::input::EditorInput;
use crate::inspector::{self, CreatureField, InfoLine};
use crate::overlay::OverlayKind;

/// Wrapping cursor over a list of `len` entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
    len: usize,
}

impl ListCursor {
    pub fn new(len: usize, index: usize) -> Self {
        Self {
            index: index.min(len.saturating_sub(1)),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step(&mut self, delta: i32) {
        self.index = wrap_step(self.index, delta, self.len).0;
    }

    /// Resizes the list, pulling the cursor back inside it.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Field list with an optional density picker for the highlighted type.
///
/// Entry 0 clears every field; entry `i` is field type `i - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct FieldMenu {
    cursor: ListCursor,
    picker: Option<ListCursor>,
}

impl FieldMenu {
    pub(super) fn open<W, G>(ctx: &EditorContext<'_, W, G>, target: Point3) -> Self
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let strongest = ctx
            .world
            .fields_at(target)
            .and_then(|fields| fields.strongest())
            .map_or(0, |(kind, _)| kind.index() + 1);
        Self {
            cursor: ListCursor::new(ctx.catalog.field_count() + 1, strongest),
            picker: None,
        }
    }

    fn kind(&self) -> Option<FieldTypeId> {
        self.cursor.index().checked_sub(1).map(FieldTypeId::from_index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemStage {
    List,
    Properties { item: usize, cursor: ListCursor },
    Adding(ListCursor),
}

/// Items on the target cell followed by an "add item" entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ItemMenu {
    cursor: usize,
    stage: ItemStage,
}

impl Default for ItemMenu {
    fn default() -> Self {
        Self {
            cursor: 0,
            stage: ItemStage::List,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OccupantMenu {
    Creature { at: Point3, cursor: ListCursor },
    Vehicle { at: Point3 },
}

fn trap_choice(cursor: &ListCursor) -> Option<TrapId> {
    cursor.index().checked_sub(1).map(TrapId::from_index)
}

fn item_property(index: usize) -> ItemProperty {
    ItemProperty::iter().nth(index).unwrap_or(ItemProperty::Birthday)
}

impl MapEditor {
    fn write_field<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        kind: FieldTypeId,
        density: u8,
    )
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let current = broadcast::field_density(&*ctx.world, self.region.target(), kind);
        if density == current && !self.region.is_multi() {
            return;
        }
        let changed = broadcast::set_field(ctx.world, self.region.members(), kind, density);
        self.message = Some(format!("set field on {changed} cells"));
    }

    pub(super) fn handle_fields<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        mut menu: FieldMenu,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Fields(menu);
        };

        if let Some(mut picker) = menu.picker {
            menu.picker = match input {
                EditorInput::Quit => None,
                EditorInput::Confirm | EditorInput::ConfirmQuit => {
                    if let Some(kind) = menu.kind() {
                        self.write_field(ctx, kind, picker.index() as u8);
                    }
                    if input == EditorInput::ConfirmQuit {
                        return Mode::Looking;
                    }
                    None
                }
                other => {
                    if let Some(step) = other.vertical_step() {
                        picker.step(step);
                    }
                    Some(picker)
                }
            };
            return Mode::Fields(menu);
        }

        if self.handle_common(&input) {
            return Mode::Fields(menu);
        }
        match input {
            EditorInput::Quit => return Mode::Looking,
            EditorInput::Confirm | EditorInput::ConfirmQuit => match menu.kind() {
                None => {
                    let cleared = broadcast::clear_fields(ctx.world, self.region.members());
                    self.message = Some(format!("cleared {cleared} fields"));
                    if input == EditorInput::ConfirmQuit {
                        return Mode::Looking;
                    }
                }
                Some(kind) => {
                    let current = broadcast::field_density(&*ctx.world, self.region.target(), kind);
                    let entries = usize::from(WorldConfig::MAX_FIELD_DENSITY) + 1;
                    menu.picker = Some(ListCursor::new(entries, usize::from(current)));
                }
            },
            other => {
                if let Some(step) = other.vertical_step() {
                    menu.cursor.step(step);
                } else if let (Some(step), Some(kind)) = (other.horizontal_step(), menu.kind()) {
                    let current = broadcast::field_density(&*ctx.world, self.region.target(), kind);
                    let density = (i64::from(current) + step)
                        .clamp(0, i64::from(WorldConfig::MAX_FIELD_DENSITY))
                        as u8;
                    self.write_field(ctx, kind, density);
                } else {
                    self.toggle_blink();
                }
            }
        }
        Mode::Fields(menu)
    }

    pub(super) fn handle_traps<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        mut cursor: ListCursor,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Traps(cursor);
        };
        if self.handle_common(&input) {
            return Mode::Traps(cursor);
        }
        match input {
            EditorInput::Quit => return Mode::Looking,
            EditorInput::Confirm | EditorInput::ConfirmQuit => {
                let changed =
                    broadcast::set_trap(ctx.world, self.region.members(), trap_choice(&cursor));
                self.message = Some(format!("set trap on {changed} cells"));
                if input == EditorInput::ConfirmQuit {
                    return Mode::Looking;
                }
            }
            other => match other.vertical_step() {
                Some(step) => cursor.step(step),
                None => self.toggle_blink(),
            },
        }
        Mode::Traps(cursor)
    }

    pub(super) fn handle_items<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        mut menu: ItemMenu,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Items(menu);
        };
        let target = self.region.target();
        let item_count = ctx.world.items_at(target).len();

        menu.stage = match menu.stage {
            ItemStage::List => {
                if self.handle_common(&input) {
                    return Mode::Items(menu);
                }
                match input {
                    EditorInput::Quit => return Mode::Looking,
                    EditorInput::Confirm | EditorInput::ConfirmQuit if menu.cursor < item_count => {
                        ItemStage::Properties {
                            item: menu.cursor,
                            cursor: ListCursor::new(ItemProperty::iter().len(), 0),
                        }
                    }
                    EditorInput::Confirm | EditorInput::ConfirmQuit => {
                        ItemStage::Adding(ListCursor::new(ctx.catalog.item_count(), 0))
                    }
                    other => {
                        match other.vertical_step() {
                            Some(step) => {
                                menu.cursor = wrap_step(menu.cursor, step, item_count + 1).0
                            }
                            None => self.toggle_blink(),
                        }
                        ItemStage::List
                    }
                }
            }
            ItemStage::Properties { item, mut cursor } => match input {
                EditorInput::Quit | EditorInput::Confirm | EditorInput::ConfirmQuit => {
                    ItemStage::List
                }
                other => {
                    if let Some(step) = other.vertical_step() {
                        cursor.step(step);
                    } else if let Some(step) = other.horizontal_step() {
                        let property = item_property(cursor.index());
                        let current = ctx
                            .world
                            .items_at(target)
                            .get(item)
                            .map_or(0, |found| found.property(property));
                        let changed = broadcast::set_item_property(
                            ctx.world,
                            &self.region,
                            item,
                            property,
                            current + step,
                        );
                        self.message = Some(format!("{property} set on {changed} items"));
                    }
                    ItemStage::Properties { item, cursor }
                }
            },
            ItemStage::Adding(mut cursor) => match input {
                EditorInput::Quit => ItemStage::List,
                EditorInput::Confirm | EditorInput::ConfirmQuit if !cursor.is_empty() => {
                    let kind = ItemTypeId::from_index(cursor.index());
                    let turn = ctx.world.current_turn();
                    let added = broadcast::add_item(
                        ctx.world,
                        ctx.catalog,
                        self.region.members(),
                        kind,
                        turn,
                    );
                    self.message = Some(format!("added {added} items"));
                    if input == EditorInput::ConfirmQuit {
                        return Mode::Looking;
                    }
                    ItemStage::List
                }
                other => {
                    if let Some(step) = other.vertical_step() {
                        cursor.step(step);
                    }
                    ItemStage::Adding(cursor)
                }
            },
        };
        Mode::Items(menu)
    }

    pub(super) fn open_occupant<W, G>(&mut self, ctx: &mut EditorContext<'_, W, G>) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let at = self.region.target();
        if let Some(creature) = ctx.world.creature_at(at) {
            let plan = self.highlights.get_mut(OverlayKind::MovementPlan);
            plan.clear();
            for point in inspector::movement_plan(creature, at) {
                plan.mark(point, 1);
            }
            let fields = inspector::creature_fields(creature).len();
            return Mode::Occupant(OccupantMenu::Creature {
                at,
                cursor: ListCursor::new(fields, 0),
            });
        }
        if ctx.world.vehicle_at_point(at).is_some() {
            return Mode::Occupant(OccupantMenu::Vehicle { at });
        }
        self.message = Some("nothing to edit here".to_owned());
        Mode::Looking
    }

    pub(super) fn handle_occupant<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        menu: OccupantMenu,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Occupant(menu);
        };
        if matches!(
            input,
            EditorInput::Quit | EditorInput::Confirm | EditorInput::ConfirmQuit
        ) {
            self.highlights.get_mut(OverlayKind::MovementPlan).clear();
            return Mode::Looking;
        }
        let OccupantMenu::Creature { at, mut cursor } = menu else {
            self.toggle_blink();
            return Mode::Occupant(menu);
        };
        if let Some(step) = input.vertical_step() {
            cursor.step(step);
        } else if let Some(step) = input.horizontal_step() {
            if let Some(creature) = ctx.world.creature_at_mut(at) {
                let fields = inspector::creature_fields(creature);
                if let Some(field) = fields.get(cursor.index()).copied() {
                    inspector::adjust_creature(creature, field, step);
                }
            }
        }
        Mode::Occupant(OccupantMenu::Creature { at, cursor })
    }

    pub(super) fn field_panel<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        menu: &FieldMenu,
    ) -> MenuView
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let target = self.region.target();
        if let (Some(picker), Some(kind)) = (menu.picker, menu.kind()) {
            let def = ctx.catalog.field(kind);
            let mut entries = vec![MenuEntry::new("-clear-")];
            entries.extend((1..=WorldConfig::MAX_FIELD_DENSITY).map(|density| {
                let name = def.map_or("?", |def| def.name_at(density));
                let tint = def.map_or(Tint::LightGray, |def| def.tint_at(density));
                MenuEntry::tinted(format!("{density}: {name}"), tint)
            }));
            return MenuView {
                title: def.map_or_else(|| kind.to_string(), |def| def.key.clone()),
                entries,
                selected: picker.index(),
                footer: Vec::new(),
            };
        }

        let mut entries = vec![MenuEntry::new("-clear-")];
        entries.extend((0..ctx.catalog.field_count()).map(|index| {
            let kind = FieldTypeId::from_index(index);
            let density = broadcast::field_density(&*ctx.world, target, kind);
            match ctx.catalog.field(kind) {
                Some(def) => MenuEntry::tinted(
                    format!("{} [{}] ({})", def.name_at(density.max(1)), density, def.key),
                    def.tint_at(density.max(1)),
                ),
                None => MenuEntry::new(kind.to_string()),
            }
        }));
        MenuView {
            title: "Fields".to_owned(),
            entries,
            selected: menu.cursor.index(),
            footer: vec![InfoLine::plain("left/right: density")],
        }
    }

    pub(super) fn trap_panel<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        cursor: &ListCursor,
    ) -> MenuView
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let mut entries = vec![MenuEntry::new("-clear-")];
        entries.extend((0..ctx.catalog.trap_count()).filter_map(|index| {
            let def = ctx.catalog.trap(TrapId::from_index(index))?;
            Some(MenuEntry::tinted(
                format!("{} {} ({})", def.glyph, def.name, def.key),
                def.tint,
            ))
        }));
        let footer = trap_choice(cursor)
            .and_then(|id| ctx.catalog.trap(id))
            .map(|def| vec![InfoLine::plain(format!("visibility: {}", def.visibility))])
            .unwrap_or_default();
        MenuView {
            title: "Traps".to_owned(),
            entries,
            selected: cursor.index(),
            footer,
        }
    }

    pub(super) fn item_panel<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        menu: &ItemMenu,
    ) -> MenuView
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let items = ctx.world.items_at(self.region.target());
        let item_name = |kind: ItemTypeId| {
            ctx.catalog
                .item(kind)
                .map_or_else(|| kind.to_string(), |def| def.name.clone())
        };
        match menu.stage {
            ItemStage::List => {
                let mut entries: Vec<_> = items
                    .iter()
                    .map(|item| MenuEntry::new(item_name(item.kind)))
                    .collect();
                entries.push(MenuEntry::tinted("Add item", Tint::LightGreen));
                MenuView {
                    title: "Items".to_owned(),
                    entries,
                    selected: menu.cursor,
                    footer: Vec::new(),
                }
            }
            ItemStage::Properties { item, cursor } => {
                let found = items.get(item);
                let entries = ItemProperty::iter()
                    .map(|property| {
                        let value = found.map_or(0, |found| found.property(property));
                        MenuEntry::new(format!("{property}: {value}"))
                    })
                    .collect();
                let footer = if self.region.is_multi() {
                    vec![InfoLine::new("writes every item in the region", Tint::Yellow)]
                } else {
                    Vec::new()
                };
                MenuView {
                    title: found.map_or_else(|| "Item".to_owned(), |found| item_name(found.kind)),
                    entries,
                    selected: cursor.index(),
                    footer,
                }
            }
            ItemStage::Adding(cursor) => MenuView {
                title: "Add item".to_owned(),
                entries: (0..ctx.catalog.item_count())
                    .filter_map(|index| ctx.catalog.item(ItemTypeId::from_index(index)))
                    .map(|def| MenuEntry::tinted(format!("{} {}", def.glyph, def.name), def.tint))
                    .collect(),
                selected: cursor.index(),
                footer: Vec::new(),
            },
        }
    }

    pub(super) fn occupant_panel<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        menu: &OccupantMenu,
    ) -> MenuView
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        match *menu {
            OccupantMenu::Creature { at, cursor } => {
                let Some(creature) = ctx.world.creature_at(at) else {
                    return MenuView {
                        title: "Creature".to_owned(),
                        entries: Vec::new(),
                        selected: 0,
                        footer: vec![InfoLine::new("the creature is gone", Tint::DarkGray)],
                    };
                };
                let entries = inspector::creature_fields(creature)
                    .iter()
                    .map(|field: &CreatureField| {
                        MenuEntry::new(inspector::describe_creature_field(creature, *field))
                    })
                    .collect();
                let plan = self.highlights.get(OverlayKind::MovementPlan).points().count();
                MenuView {
                    title: creature.name().to_owned(),
                    entries,
                    selected: cursor.index(),
                    footer: vec![InfoLine::plain(format!("path: {plan} cells"))],
                }
            }
            OccupantMenu::Vehicle { at } => MenuView {
                title: "Vehicle".to_owned(),
                entries: Vec::new(),
                selected: 0,
                footer: ctx
                    .world
                    .vehicle_at_point(at)
                    .map(inspector::vehicle_report)
                    .unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Panel;
    use crate::input::{EditCategory, InputContext};
    use sandbox::{MemoryWorld, StampGenerator};
    use world_content::builtin_catalog;
    use world_core::{
        Attitude, Catalog, Creature, CreatureLookup, Direction, EditorConfig, MapBounds, Monster,
        Npc,
    };

    fn setup() -> (MemoryWorld, Catalog) {
        let catalog = builtin_catalog().expect("builtin catalog is valid");
        let world = MemoryWorld::new(MapBounds::new(48, 48, 0, 0), catalog.default_terrain());
        (world, catalog)
    }

    fn p(x: i32, y: i32) -> Point3 {
        Point3::new(x, y, 0)
    }

    fn press(
        editor: &mut MapEditor,
        ctx: &mut EditorContext<'_, MemoryWorld, StampGenerator>,
        inputs: &[EditorInput],
    ) {
        for input in inputs {
            editor.handle(ctx, Some(*input));
        }
    }

    #[test]
    fn list_cursor_wraps_and_clamps() {
        let mut cursor = ListCursor::new(3, 7);
        assert_eq!(cursor.index(), 2);
        cursor.step(1);
        assert_eq!(cursor.index(), 0);
        cursor.step(-1);
        assert_eq!(cursor.index(), 2);
        cursor.set_len(2);
        assert_eq!(cursor.index(), 1);
        assert!(ListCursor::new(0, 0).is_empty());
    }

    #[test]
    fn trap_dialog_sets_and_clears() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, p(4, 4), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        press(&mut editor, &mut ctx, &[
            EditorInput::Edit(EditCategory::Traps),
            EditorInput::Move(Direction::South),
            EditorInput::Confirm,
        ]);
        assert_eq!(ctx.world.trap_at(p(4, 4)), Some(TrapId(0)));
        assert_eq!(editor.input_context(), InputContext::Menu);

        press(
            &mut editor,
            &mut ctx,
            &[EditorInput::Move(Direction::North), EditorInput::ConfirmQuit],
        );
        assert_eq!(ctx.world.trap_at(p(4, 4)), None);
        assert_eq!(editor.input_context(), InputContext::Looking);
    }

    #[test]
    fn field_dialog_adjusts_density_and_clears() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, p(4, 4), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        let first = FieldTypeId(0);

        press(&mut editor, &mut ctx, &[
            EditorInput::Edit(EditCategory::Fields),
            EditorInput::Move(Direction::South),
            EditorInput::Move(Direction::East),
            EditorInput::Move(Direction::East),
        ]);
        assert_eq!(broadcast::field_density(&*ctx.world, p(4, 4), first), 2);

        press(&mut editor, &mut ctx, &[
            EditorInput::Confirm,
            EditorInput::Move(Direction::South),
            EditorInput::Confirm,
        ]);
        assert_eq!(broadcast::field_density(&*ctx.world, p(4, 4), first), 3);

        press(&mut editor, &mut ctx, &[EditorInput::Move(Direction::North), EditorInput::Confirm]);
        assert_eq!(ctx.world.fields_at(p(4, 4)).map(|f| f.len()), Some(0));
    }

    #[test]
    fn item_dialog_adds_and_edits() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, p(4, 4), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        press(&mut editor, &mut ctx, &[
            EditorInput::Edit(EditCategory::Items),
            EditorInput::Confirm,
            EditorInput::Confirm,
        ]);
        assert_eq!(ctx.world.items_at(p(4, 4)).len(), 1);

        press(&mut editor, &mut ctx, &[
            EditorInput::Move(Direction::North),
            EditorInput::Move(Direction::North),
            EditorInput::Confirm,
            EditorInput::Move(Direction::South),
            EditorInput::Move(Direction::East),
            EditorInput::MoveWide(Direction::East),
        ]);
        assert_eq!(ctx.world.items_at(p(4, 4))[0].damage, world_core::Item::MAX_DAMAGE);

        let frame = editor.render(&ctx);
        let Some(Panel::Menu(menu)) = frame.panel else {
            panic!("item properties are a menu");
        };
        assert_eq!(menu.entries[1].label, "damage: 4");
    }

    #[test]
    fn creature_dialog_edits_hp_and_plots_path() {
        let (mut world, catalog) = setup();
        world.place_creature(
            p(4, 4),
            Creature::Monster(Monster {
                kind: "mon_dog".into(),
                name: "dog".into(),
                glyph: 'd',
                tint: Tint::Brown,
                hp: 5,
                max_hp: 10,
                friendly: false,
                destination: Some(p(8, 4)),
            }),
        );
        world.place_creature(
            p(6, 6),
            Creature::Npc(Npc {
                name: "Lee".into(),
                hp: 3,
                max_hp: 9,
                attitude: Attitude::Neutral,
            }),
        );
        let mut editor = MapEditor::new(EditorConfig::default(), &world, p(4, 4), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        press(&mut editor, &mut ctx, &[
            EditorInput::Edit(EditCategory::Occupant),
            EditorInput::Move(Direction::East),
            EditorInput::Move(Direction::East),
        ]);
        assert_eq!(ctx.world.creature_at(p(4, 4)).map(Creature::hp), Some((7, 10)));
        assert_eq!(
            editor.highlights.get(OverlayKind::MovementPlan).points().count(),
            4
        );

        press(&mut editor, &mut ctx, &[EditorInput::Quit]);
        assert!(editor.highlights.get(OverlayKind::MovementPlan).is_empty());

        press(&mut editor, &mut ctx, &[
            EditorInput::Move(Direction::SouthEast),
            EditorInput::Move(Direction::SouthEast),
            EditorInput::Edit(EditCategory::Occupant),
            EditorInput::Move(Direction::South),
            EditorInput::Move(Direction::East),
        ]);
        let attitude = match ctx.world.creature_at(p(6, 6)) {
            Some(Creature::Npc(npc)) => Some(npc.attitude),
            _ => None,
        };
        assert_eq!(attitude, Some(Attitude::Friendly));
    }

    #[test]
    fn empty_cell_has_no_occupant_dialog() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, p(4, 4), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        press(&mut editor, &mut ctx, &[EditorInput::Edit(EditCategory::Occupant)]);
        assert_eq!(editor.input_context(), InputContext::Looking);
        assert_eq!(editor.message.as_deref(), Some("nothing to edit here"));
    }
}
