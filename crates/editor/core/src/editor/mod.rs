//! The editor's mode machine.
//!
//! [`MapEditor`] owns the selection, the open dialog and the regeneration
//! pipeline. The world, catalog and generator are lent to it per call through
//! [`EditorContext`]. Handlers are split by dialog:
//! - `menus`: field, trap, item and occupant dialogs
//! - `mapgen`: region-type choice, retargeting and the regeneration preview
//! - `render`: frame assembly
//!
//! All of them are `impl MapEditor` blocks in their own files.
mod frame;
mod mapgen;
mod menus;
mod render;

use std::time::Duration;

use world_core::{
    Catalog, CellAccess, ContentGenerator, EditorConfig, Point3, Size, TerrainId, WorldAccess,
};

use crate::broadcast;
use crate::input::{EditCategory, EditorInput, InputContext};
use crate::overlay::HighlightSet;
use crate::palette::{PaletteLayer, TilePalette};
use crate::pipeline::RegenPipeline;
use crate::region::{Region, SelectionRules};
use crate::selector::{SelectionEvent, SelectionSession, movement_delta, shift_region};

pub use frame::{EditorFrame, Hint, InfoLine, MenuEntry, MenuView, Panel, PaletteView};
pub use menus::ListCursor;

use mapgen::MapgenMode;
use menus::{FieldMenu, ItemMenu, OccupantMenu};

/// World, catalog and generator lent to the editor for one call.
pub struct EditorContext<'a, W: ?Sized, G: ?Sized> {
    pub world: &'a mut W,
    pub catalog: &'a Catalog,
    pub generator: &'a G,
}

impl<'a, W: ?Sized, G: ?Sized> EditorContext<'a, W, G> {
    pub fn new(world: &'a mut W, catalog: &'a Catalog, generator: &'a G) -> Self {
        Self {
            world,
            catalog,
            generator,
        }
    }
}

/// Whether the editor session goes on after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
enum Mode {
    Looking,
    Palette,
    Fields(FieldMenu),
    Traps(ListCursor),
    Items(ItemMenu),
    Occupant(OccupantMenu),
    Mapgen(MapgenMode),
}

/// Interactive editor over a borrowed world.
#[derive(Debug)]
pub struct MapEditor {
    config: EditorConfig,
    rules: SelectionRules,
    viewport: Size,
    region: Region,
    blink: bool,
    show_all: bool,
    mode: Mode,
    selection: Option<SelectionSession>,
    palette: TilePalette,
    pipeline: RegenPipeline,
    highlights: HighlightSet,
    message: Option<String>,
}

impl MapEditor {
    pub fn new<W: WorldAccess + ?Sized>(
        config: EditorConfig,
        world: &W,
        start: Point3,
        world_seed: u64,
    ) -> Self {
        let rules = SelectionRules::new(world.bounds(), config.distance_metric);
        let palette = TilePalette::new(
            config.palette_columns,
            world.terrain_at(start).unwrap_or(TerrainId(0)),
            world.furniture_at(start),
        );
        tracing::info!(%start, bounds = ?rules.bounds, "editor started");
        Self {
            viewport: config.viewport,
            config,
            rules,
            region: Region::point(start),
            blink: false,
            show_all: false,
            mode: Mode::Looking,
            selection: None,
            palette,
            pipeline: RegenPipeline::new(world_seed),
            highlights: HighlightSet::default(),
            message: None,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The region being drawn: the selection's working copy while one is open.
    pub fn active_region(&self) -> &Region {
        self.selection
            .as_ref()
            .map_or(&self.region, SelectionSession::region)
    }

    pub fn target(&self) -> Point3 {
        self.active_region().target()
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    pub fn pipeline(&self) -> &RegenPipeline {
        &self.pipeline
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// How long to wait for input before the next blink tick.
    pub fn blink_interval(&self) -> Duration {
        let millis = if self.pipeline.is_previewing() {
            self.config.preview_interval_ms()
        } else {
            self.config.blink_interval_ms
        };
        Duration::from_millis(millis)
    }

    /// What keys mean right now.
    pub fn input_context(&self) -> InputContext {
        if let Some(session) = &self.selection {
            return if session.chooser().is_some() {
                InputContext::ShapeChooser
            } else {
                InputContext::Selection
            };
        }
        match &self.mode {
            Mode::Looking => InputContext::Looking,
            Mode::Palette => InputContext::Palette,
            Mode::Fields(_) | Mode::Traps(_) | Mode::Items(_) | Mode::Occupant(_) => {
                InputContext::Menu
            }
            Mode::Mapgen(mapgen) => mapgen.input_context(),
        }
    }

    /// Feeds one poll result (`None` on timeout) to the editor.
    pub fn handle<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        input: Option<EditorInput>,
    ) -> Flow
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        if input.is_some() {
            self.message = None;
        }
        if self.selection.is_some() {
            self.handle_selection(input);
            return Flow::Continue;
        }

        let mode = std::mem::replace(&mut self.mode, Mode::Looking);
        let (mode, flow) = match mode {
            Mode::Looking => self.handle_looking(ctx, input),
            Mode::Palette => (self.handle_palette(ctx, input), Flow::Continue),
            Mode::Fields(menu) => (self.handle_fields(ctx, menu, input), Flow::Continue),
            Mode::Traps(cursor) => (self.handle_traps(ctx, cursor, input), Flow::Continue),
            Mode::Items(menu) => (self.handle_items(ctx, menu, input), Flow::Continue),
            Mode::Occupant(menu) => (self.handle_occupant(ctx, menu, input), Flow::Continue),
            Mode::Mapgen(mapgen) => (self.handle_mapgen(ctx, mapgen, input), Flow::Continue),
        };
        self.mode = mode;
        flow
    }

    fn handle_selection(&mut self, input: Option<EditorInput>) {
        let Some(session) = self.selection.as_mut() else {
            return;
        };
        match session.handle(input, &self.rules, self.viewport) {
            SelectionEvent::Continue => {}
            SelectionEvent::Confirmed => {
                if let Some(session) = self.selection.take() {
                    let mut region = session.into_region();
                    if region.len() == 1 {
                        region.collapse(&self.rules);
                    }
                    tracing::debug!(
                        members = region.len(),
                        shape = %region.shape(),
                        "selection confirmed"
                    );
                    self.region = region;
                    self.blink = true;
                }
            }
            SelectionEvent::Aborted => {
                if let Some(session) = self.selection.take() {
                    self.region = session.into_region();
                    self.blink = true;
                }
            }
        }
    }

    /// Opens a selection session on the current region.
    pub(crate) fn begin_selection(&mut self, move_all: bool) {
        self.selection = Some(SelectionSession::begin(self.region.clone(), move_all));
    }

    fn toggle_blink(&mut self) {
        self.blink = !self.blink;
    }

    fn handle_looking<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        input: Option<EditorInput>,
    ) -> (Mode, Flow)
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return (Mode::Looking, Flow::Continue);
        };
        if let Some(delta) = movement_delta(&input, self.viewport) {
            shift_region(&mut self.region, delta, true, &self.rules);
            self.blink = self.region.is_multi();
            return (Mode::Looking, Flow::Continue);
        }
        let mode = match input {
            EditorInput::Quit => return (Mode::Looking, Flow::Exit),
            EditorInput::Resize => {
                self.begin_selection(false);
                Mode::Looking
            }
            EditorInput::ToggleMoveAll | EditorInput::Tab => {
                self.begin_selection(true);
                Mode::Looking
            }
            EditorInput::ToggleShowAll => {
                self.show_all = !self.show_all;
                Mode::Looking
            }
            EditorInput::Edit(category) => self.open_editor(ctx, category),
            _ => {
                self.toggle_blink();
                Mode::Looking
            }
        };
        (mode, Flow::Continue)
    }

    fn open_editor<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        category: EditCategory,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        tracing::debug!(%category, target = %self.region.target(), "opened editor");
        match category {
            EditCategory::Terrain => Mode::Palette,
            EditCategory::Fields => Mode::Fields(FieldMenu::open(ctx, self.region.target())),
            EditCategory::Items => Mode::Items(ItemMenu::default()),
            EditCategory::Traps => {
                let current = ctx.world.trap_at(self.region.target());
                Mode::Traps(ListCursor::new(
                    ctx.catalog.trap_count() + 1,
                    current.map_or(0, |id| id.index() + 1),
                ))
            }
            EditCategory::Occupant => self.open_occupant(ctx),
            EditCategory::Regenerate => self.enter_mapgen(ctx),
        }
    }

    /// Selection, shape and return keys shared by every editing dialog.
    ///
    /// Returns true when the input was consumed.
    fn handle_common(&mut self, input: &EditorInput) -> bool {
        match input {
            EditorInput::Resize => self.begin_selection(false),
            EditorInput::Tab => self.begin_selection(true),
            EditorInput::ToggleShowAll => self.show_all = !self.show_all,
            _ => return false,
        }
        true
    }

    fn handle_palette<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Palette;
        };
        if self.handle_common(&input) {
            return Mode::Palette;
        }
        match input {
            EditorInput::Move(direction) => {
                self.palette.step(direction, ctx.catalog);
                Mode::Palette
            }
            EditorInput::Confirm => {
                self.paint(ctx);
                Mode::Palette
            }
            EditorInput::ConfirmQuit => {
                self.paint(ctx);
                Mode::Looking
            }
            EditorInput::Quit => Mode::Looking,
            _ => {
                self.toggle_blink();
                Mode::Palette
            }
        }
    }

    fn paint<W, G>(&mut self, ctx: &mut EditorContext<'_, W, G>)
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let changed = match self.palette.layer() {
            PaletteLayer::Terrain => broadcast::paint_terrain(
                ctx.world,
                ctx.catalog,
                &self.region,
                self.palette.selected_terrain(),
            ),
            PaletteLayer::Furniture => broadcast::set_furniture(
                ctx.world,
                self.region.members(),
                self.palette.selected_furniture(),
            ),
        };
        self.message = Some(format!("{} {changed} cells", self.palette.layer()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox::{MemoryWorld, StampGenerator};
    use world_content::builtin_catalog;
    use world_core::{Direction, MapBounds};

    fn setup() -> (MemoryWorld, Catalog) {
        let catalog = builtin_catalog().expect("builtin catalog is valid");
        let world = MemoryWorld::new(MapBounds::new(48, 48, 0, 1), catalog.default_terrain());
        (world, catalog)
    }

    fn editor(world: &MemoryWorld, start: Point3) -> MapEditor {
        MapEditor::new(EditorConfig::default(), world, start, 11)
    }

    #[test]
    fn looking_moves_both_anchors() {
        let (mut world, catalog) = setup();
        let mut editor = editor(&world, Point3::new(5, 5, 0));
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        editor.handle(&mut ctx, Some(EditorInput::Move(Direction::East)));
        editor.handle(&mut ctx, Some(EditorInput::LevelUp));
        assert_eq!(editor.region().target(), Point3::new(6, 5, 1));
        assert_eq!(editor.region().origin(), Point3::new(6, 5, 1));
        assert_eq!(editor.handle(&mut ctx, Some(EditorInput::Quit)), Flow::Exit);
    }

    #[test]
    fn timeouts_toggle_blink() {
        let (mut world, catalog) = setup();
        let mut editor = editor(&world, Point3::new(5, 5, 0));
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        let before = editor.blink;
        editor.handle(&mut ctx, None);
        assert_ne!(editor.blink, before);
        editor.handle(&mut ctx, Some(EditorInput::Hotkey('?')));
        assert_eq!(editor.blink, before);
    }

    #[test]
    fn resize_then_confirm_makes_rectangle() {
        let (mut world, catalog) = setup();
        let mut editor = editor(&world, Point3::new(5, 5, 0));
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        editor.handle(&mut ctx, Some(EditorInput::Resize));
        assert_eq!(editor.input_context(), InputContext::Selection);
        editor.handle(&mut ctx, Some(EditorInput::Move(Direction::SouthEast)));
        editor.handle(&mut ctx, Some(EditorInput::Resize));
        assert_eq!(editor.input_context(), InputContext::ShapeChooser);
        editor.handle(&mut ctx, Some(EditorInput::Hotkey('f')));
        editor.handle(&mut ctx, Some(EditorInput::Confirm));

        assert!(!editor.is_selecting());
        assert_eq!(editor.region().len(), 4);
        assert_eq!(editor.region().origin(), Point3::new(5, 5, 0));
    }

    #[test]
    fn palette_paints_every_member() {
        let (mut world, catalog) = setup();
        let mut editor = editor(&world, Point3::new(2, 2, 0));
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);

        editor.handle(&mut ctx, Some(EditorInput::Resize));
        editor.handle(&mut ctx, Some(EditorInput::Resize));
        editor.handle(&mut ctx, Some(EditorInput::Hotkey('f')));
        editor.handle(&mut ctx, Some(EditorInput::Move(Direction::East)));
        editor.handle(&mut ctx, Some(EditorInput::Confirm));

        editor.handle(&mut ctx, Some(EditorInput::Edit(EditCategory::Terrain)));
        assert_eq!(editor.input_context(), InputContext::Palette);
        editor.handle(&mut ctx, Some(EditorInput::Move(Direction::East)));
        editor.handle(&mut ctx, Some(EditorInput::ConfirmQuit));

        let painted = TerrainId::from_index(catalog.default_terrain().index() + 1);
        assert_eq!(ctx.world.terrain_at(Point3::new(2, 2, 0)), Some(painted));
        assert_eq!(ctx.world.terrain_at(Point3::new(3, 2, 0)), Some(painted));
        assert_eq!(editor.input_context(), InputContext::Looking);
    }

    #[test]
    fn preview_slows_the_blink() {
        let (mut world, catalog) = setup();
        let mut editor = editor(&world, Point3::new(5, 5, 0));
        assert_eq!(editor.blink_interval(), Duration::from_millis(300));
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        editor.handle(&mut ctx, Some(EditorInput::Edit(EditCategory::Regenerate)));
        editor.handle(&mut ctx, Some(EditorInput::Confirm));
        assert!(editor.pipeline().is_previewing());
        assert_eq!(editor.blink_interval(), Duration::from_millis(900));
    }
}
