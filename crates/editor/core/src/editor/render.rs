use strum::IntoEnumIterator;
use world_core::{Direction, WorldAccess};

use super::{
    EditorContext, EditorFrame, Hint, MapEditor, MenuEntry, MenuView, Mode, Panel, PaletteView,
};
use crate::input::{EditCategory, EditorInput, InputContext};
use crate::inspector::{InfoLine, inspect};
use crate::overlay::{draw_arrows, draw_region_blink, render_base, render_preview};
use crate::region::Shape;
use crate::transform::ViewTransform;

const LOOKING_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Move(Direction::North), "move"),
    Hint::new(EditorInput::Resize, "select"),
    Hint::new(EditorInput::ToggleMoveAll, "move region"),
    Hint::new(EditorInput::Edit(EditCategory::Terrain), "terrain"),
    Hint::new(EditorInput::Edit(EditCategory::Fields), "fields"),
    Hint::new(EditorInput::Edit(EditCategory::Items), "items"),
    Hint::new(EditorInput::Edit(EditCategory::Traps), "traps"),
    Hint::new(EditorInput::Edit(EditCategory::Occupant), "occupant"),
    Hint::new(EditorInput::Edit(EditCategory::Regenerate), "regenerate"),
    Hint::new(EditorInput::ToggleShowAll, "show hidden"),
    Hint::new(EditorInput::Quit, "quit"),
];

const SELECTION_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Resize, "shape"),
    Hint::new(EditorInput::Swap, "swap ends"),
    Hint::new(EditorInput::ToggleMoveAll, "move all"),
    Hint::new(EditorInput::ReturnToStart, "reset"),
    Hint::new(EditorInput::Confirm, "accept"),
    Hint::new(EditorInput::Quit, "cancel"),
];

const CHOOSER_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Confirm, "pick"),
    Hint::new(EditorInput::Quit, "back"),
];

const PALETTE_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Confirm, "paint"),
    Hint::new(EditorInput::ConfirmQuit, "paint and close"),
    Hint::new(EditorInput::Resize, "select"),
    Hint::new(EditorInput::Quit, "close"),
];

const MENU_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Confirm, "choose"),
    Hint::new(EditorInput::Resize, "select"),
    Hint::new(EditorInput::ToggleMoveAll, "retarget"),
    Hint::new(EditorInput::Quit, "back"),
];

const RETARGET_HINTS: &[Hint] = &[
    Hint::new(EditorInput::Move(Direction::North), "move tile"),
    Hint::new(EditorInput::Confirm, "accept"),
    Hint::new(EditorInput::Quit, "cancel"),
];

const PREVIEW_HINTS: &[Hint] = &[
    Hint::new(EditorInput::NextPage, "next type"),
    Hint::new(EditorInput::PrevPage, "previous type"),
    Hint::new(EditorInput::Confirm, "choose"),
    Hint::new(EditorInput::Quit, "abort"),
];

fn hints(context: InputContext) -> &'static [Hint] {
    match context {
        InputContext::Looking => LOOKING_HINTS,
        InputContext::Selection => SELECTION_HINTS,
        InputContext::ShapeChooser => CHOOSER_HINTS,
        InputContext::Palette => PALETTE_HINTS,
        InputContext::Menu => MENU_HINTS,
        InputContext::Retarget => RETARGET_HINTS,
        InputContext::Preview => PREVIEW_HINTS,
    }
}

impl MapEditor {
    /// Assembles the frame for the current state.
    ///
    /// Takes `&mut self` because highlight overlays advance one blink phase
    /// per frame.
    pub fn render<W, G>(&mut self, ctx: &EditorContext<'_, W, G>) -> EditorFrame
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let target = self.target();
        let view = ViewTransform::new(target, self.viewport);
        let mut surface = render_base(&*ctx.world, ctx.catalog, &view, self.show_all);

        if let (Some(tile), Some(scratch)) = (self.pipeline.tile(), self.pipeline.scratch()) {
            if tile.z == target.z {
                let preview = render_preview(ctx.catalog, scratch);
                surface.blit(&preview, view.world_to_screen(tile.origin()));
            }
        }

        let (move_all, blink) = self
            .selection
            .as_ref()
            .map_or((false, self.blink), |session| (session.move_all(), session.blink()));
        let members = match (&self.mode, &self.selection) {
            (Mode::Mapgen(mapgen), None) => mapgen.outline(),
            _ => self.active_region().members(),
        };
        draw_region_blink(
            &mut surface,
            &*ctx.world,
            ctx.catalog,
            &view,
            members,
            move_all,
            blink,
        );
        self.highlights.draw_all(&mut surface, &*ctx.world, ctx.catalog, &view);
        if move_all && blink {
            draw_arrows(&mut surface);
        }

        let cursor = view.world_to_screen(target);
        let mut info = inspect(&*ctx.world, ctx.catalog, target).lines();
        if let Some(tile) = self.pipeline.tile() {
            let name = self
                .pipeline
                .region_type()
                .flatten()
                .and_then(|id| ctx.catalog.region(id))
                .map_or("(none)", |def| def.name.as_str());
            info.push(InfoLine::plain(format!("previewing {tile} as {name}")));
        }

        let context = self.input_context();
        EditorFrame {
            title: format!("Map editor [{context}] {target}"),
            surface,
            cursor: view.is_visible(cursor).then_some(cursor),
            info,
            panel: self.panel(ctx),
            hints: hints(context).to_vec(),
            message: self.message.clone(),
        }
    }

    fn panel<W, G>(&self, ctx: &EditorContext<'_, W, G>) -> Option<Panel>
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        if let Some(chooser) = self.selection.as_ref().and_then(|session| session.chooser()) {
            return Some(Panel::Menu(MenuView {
                title: "Shape".to_owned(),
                entries: Shape::iter()
                    .map(|shape| MenuEntry::new(format!("{} {}", shape.hotkey(), shape.label())))
                    .collect(),
                selected: chooser.cursor(),
                footer: Vec::new(),
            }));
        }
        let panel = match &self.mode {
            Mode::Looking => return None,
            Mode::Palette => Panel::Palette(PaletteView {
                title: self.palette.layer().to_string(),
                glyphs: self.palette.glyphs(ctx.catalog),
                columns: self.palette.columns(),
                cursor: self.palette.cursor(),
                caption: self.palette.describe(ctx.catalog),
            }),
            Mode::Fields(menu) => Panel::Menu(self.field_panel(ctx, menu)),
            Mode::Traps(cursor) => Panel::Menu(self.trap_panel(ctx, cursor)),
            Mode::Items(menu) => Panel::Menu(self.item_panel(ctx, menu)),
            Mode::Occupant(menu) => Panel::Menu(self.occupant_panel(ctx, menu)),
            Mode::Mapgen(mapgen) => Panel::Menu(self.mapgen_panel(ctx, mapgen)),
        };
        Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox::{MemoryWorld, StampGenerator};
    use world_content::builtin_catalog;
    use world_core::{Catalog, EditorConfig, Glyph, MapBounds, Point2, Point3, Tint};

    fn setup() -> (MemoryWorld, Catalog) {
        let catalog = builtin_catalog().expect("builtin catalog is valid");
        let world = MemoryWorld::new(MapBounds::new(48, 48, 0, 0), catalog.default_terrain());
        (world, catalog)
    }

    #[test]
    fn looking_frame_centres_cursor() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(10, 10, 0), 1);
        let ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        let frame = editor.render(&ctx);

        assert_eq!(frame.cursor, Some(Point2::new(27, 12)));
        assert!(frame.panel.is_none());
        assert_eq!(frame.hints.last().map(|hint| hint.input), Some(EditorInput::Quit));
        assert!(!frame.info.is_empty());
    }

    #[test]
    fn selection_blinks_members_and_arrows() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(10, 10, 0), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        editor.handle(&mut ctx, Some(EditorInput::Resize));
        editor.handle(&mut ctx, Some(EditorInput::Resize));
        editor.handle(&mut ctx, Some(EditorInput::Hotkey('f')));
        editor.handle(&mut ctx, Some(EditorInput::Move(Direction::East)));
        editor.handle(&mut ctx, Some(EditorInput::ToggleMoveAll));

        let frame = editor.render(&ctx);
        let centre = Point2::new(27, 12);
        let cell = frame.surface.get(centre).expect("centre is on screen");
        assert_eq!(cell.bg, Some(Tint::Green));
        assert_eq!(frame.surface.get(Point2::new(28, 1)), Some(Glyph::new('^', Tint::Yellow)));
    }

    #[test]
    fn shape_chooser_lists_every_shape() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(10, 10, 0), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        editor.handle(&mut ctx, Some(EditorInput::Resize));
        editor.handle(&mut ctx, Some(EditorInput::Resize));

        let frame = editor.render(&ctx);
        let Some(Panel::Menu(menu)) = frame.panel else {
            panic!("expected the shape menu");
        };
        assert_eq!(menu.entries.len(), Shape::iter().count());
        assert_eq!(menu.entries[0].label, "r Rectangle");
    }

    #[test]
    fn preview_is_drawn_over_the_tile() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(5, 5, 0), 1);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        editor.handle(&mut ctx, Some(EditorInput::Edit(EditCategory::Regenerate)));
        editor.handle(&mut ctx, Some(EditorInput::Confirm));

        let frame = editor.render(&ctx);
        let scratch = editor.pipeline().scratch().expect("previewing");
        let preview = render_preview(&catalog, scratch);
        let view = ViewTransform::new(editor.target(), editor.viewport());
        let inner = view.world_to_screen(Point3::new(5, 5, 0));
        assert_eq!(frame.surface.get(inner), preview.get(Point2::new(5, 5)));
        assert!(frame.info.iter().any(|line| line.text.starts_with("previewing")));
        assert!(matches!(frame.panel, Some(Panel::Menu(_))));
    }
}
