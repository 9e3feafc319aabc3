use world_core::{
    ContentGenerator, Point3, RegionPos, RegionTypeId, Tint, WorldAccess, WorldConfig,
    WorldError,
};

use super::{EditorContext, MapEditor, MenuEntry, MenuView, Mode};
use crate::input::{EditorInput, InputContext};
use crate::inspector::InfoLine;
use crate::overlay::OverlayKind;
use crate::pipeline::PipelineError;
use crate::region::{Region, Shape, recompute};

const REGION: i32 = WorldConfig::REGION_SIZE;

const PREVIEW_ACTIONS: [&str; 5] = [
    "Regenerate",
    "Rotate",
    "Apply",
    "Change region type only",
    "Abort",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Choosing,
    Retarget { previous: Point3 },
    Preview { action: usize },
}

/// Region-type list, tile retargeting and the preview dialog.
///
/// Type entry 0 is "no classification"; entry `i` is region type `i - 1`.
/// The editor's region is a single cell at the tile centre while this mode
/// runs; `outline` holds the border cells drawn around the tile.
#[derive(Debug)]
pub(super) struct MapgenMode {
    saved: Region,
    outline: Vec<Point3>,
    types: super::ListCursor,
    stage: Stage,
}

impl MapgenMode {
    pub(super) fn input_context(&self) -> InputContext {
        match self.stage {
            Stage::Choosing => InputContext::Menu,
            Stage::Retarget { .. } => InputContext::Retarget,
            Stage::Preview { .. } => InputContext::Preview,
        }
    }

    fn region_type(&self) -> Option<RegionTypeId> {
        self.types.index().checked_sub(1).map(RegionTypeId::from_index)
    }

    pub(super) fn outline(&self) -> &[Point3] {
        &self.outline
    }
}

fn type_cursor(current: Option<RegionTypeId>, region_count: usize) -> super::ListCursor {
    super::ListCursor::new(region_count + 1, current.map_or(0, |id| id.index() + 1))
}

/// Cells just outside the four corners of a tile.
fn tile_corners(tile: RegionPos) -> [Point3; 4] {
    let origin = tile.origin();
    [
        origin.offset(-1, -1, 0),
        origin.offset(REGION, -1, 0),
        origin.offset(-1, REGION, 0),
        origin.offset(REGION, REGION, 0),
    ]
}

/// Cell the editor targets while `tile` is chosen.
fn tile_centre(tile: RegionPos) -> Point3 {
    tile.origin().offset(REGION / 2 - 1, REGION / 2 - 1, 0)
}

impl MapEditor {
    /// Targets the centre of `tile` and outlines its border.
    fn focus_tile(&mut self, mapgen: &mut MapgenMode, tile: RegionPos) {
        let origin = tile.origin();
        let far = origin.offset(REGION - 1, REGION - 1, 0);
        mapgen.outline = recompute(origin, far, Shape::Rect, &self.rules);
        self.region = Region::point(tile_centre(tile));
    }

    pub(super) fn enter_mapgen<W, G>(&mut self, ctx: &mut EditorContext<'_, W, G>) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let tile = self.region.target().region();
        let mut mapgen = MapgenMode {
            saved: self.region.clone(),
            outline: Vec::new(),
            types: type_cursor(ctx.world.region_type(tile), ctx.catalog.region_count()),
            stage: Stage::Choosing,
        };
        self.focus_tile(&mut mapgen, tile);
        Mode::Mapgen(mapgen)
    }

    fn report_pipeline_error(&mut self, err: PipelineError) {
        tracing::error!(
            code = err.error_code(),
            severity = err.severity().as_str(),
            %err,
            "regeneration request failed"
        );
        self.message = Some(err.to_string());
    }

    fn finish_mapgen(&mut self) -> Mode {
        self.highlights.get_mut(OverlayKind::GenerationTarget).clear();
        self.region = Region::point(self.region.target());
        Mode::Looking
    }

    pub(super) fn handle_mapgen<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        mut mapgen: MapgenMode,
        input: Option<EditorInput>,
    ) -> Mode
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let Some(input) = input else {
            self.toggle_blink();
            return Mode::Mapgen(mapgen);
        };
        mapgen.stage = match mapgen.stage {
            Stage::Choosing => match input {
                EditorInput::Quit => {
                    self.region = mapgen.saved;
                    return Mode::Looking;
                }
                EditorInput::ToggleMoveAll => Stage::Retarget {
                    previous: self.region.target(),
                },
                EditorInput::Confirm | EditorInput::ConfirmQuit => {
                    let tile = self.region.target().region();
                    match self.pipeline.begin(ctx, tile, mapgen.region_type()) {
                        Ok(()) => {
                            let marks = self.highlights.get_mut(OverlayKind::GenerationTarget);
                            marks.clear();
                            for corner in tile_corners(tile) {
                                marks.mark(corner, 1);
                            }
                            Stage::Preview { action: 0 }
                        }
                        Err(err) => {
                            self.report_pipeline_error(err);
                            Stage::Choosing
                        }
                    }
                }
                EditorInput::NextPage => {
                    mapgen.types.step(1);
                    Stage::Choosing
                }
                EditorInput::PrevPage => {
                    mapgen.types.step(-1);
                    Stage::Choosing
                }
                other => {
                    match other.vertical_step() {
                        Some(step) => mapgen.types.step(step),
                        None => self.toggle_blink(),
                    }
                    Stage::Choosing
                }
            },
            Stage::Retarget { previous } => match input {
                EditorInput::Quit => {
                    let tile = previous.region();
                    self.focus_tile(&mut mapgen, tile);
                    mapgen.types =
                        type_cursor(ctx.world.region_type(tile), ctx.catalog.region_count());
                    Stage::Choosing
                }
                EditorInput::Confirm | EditorInput::ConfirmQuit | EditorInput::ToggleMoveAll => {
                    let tile = self.region.target().region();
                    mapgen.types =
                        type_cursor(ctx.world.region_type(tile), ctx.catalog.region_count());
                    Stage::Choosing
                }
                other => {
                    let step = match other {
                        EditorInput::Move(direction) | EditorInput::MoveWide(direction) => {
                            let (dx, dy) = direction.delta();
                            Some((dx, dy, 0))
                        }
                        EditorInput::LevelUp => Some((0, 0, 1)),
                        EditorInput::LevelDown => Some((0, 0, -1)),
                        _ => None,
                    };
                    match step {
                        Some((dx, dy, dz)) => {
                            let tile = self.region.target().region().offset(dx, dy);
                            let tile = RegionPos::new(tile.x, tile.y, tile.z + dz);
                            if self.rules.bounds.contains_region(tile) {
                                self.focus_tile(&mut mapgen, tile);
                                self.blink = true;
                            }
                        }
                        None => self.toggle_blink(),
                    }
                    Stage::Retarget { previous }
                }
            },
            Stage::Preview { mut action } => {
                let page = match input {
                    EditorInput::NextPage => Some(1),
                    EditorInput::PrevPage => Some(-1),
                    other => other.horizontal_step().map(|step| step.signum() as i32),
                };
                if let Some(page) = page {
                    mapgen.types.step(page);
                    if let Err(err) = self.pipeline.regenerate(ctx, mapgen.region_type()) {
                        self.report_pipeline_error(err);
                    }
                    return Mode::Mapgen(mapgen);
                }
                match input {
                    EditorInput::Quit => {
                        self.abort_preview(ctx);
                        return self.finish_mapgen();
                    }
                    EditorInput::Confirm | EditorInput::ConfirmQuit => match action {
                        0 => {
                            if let Err(err) = self.pipeline.regenerate(ctx, mapgen.region_type()) {
                                self.report_pipeline_error(err);
                            }
                        }
                        1 => {
                            if let Err(err) = self.pipeline.rotate(1) {
                                self.report_pipeline_error(err);
                            }
                        }
                        2 => {
                            match self.pipeline.apply(ctx) {
                                Ok(report) => {
                                    self.message = Some(format!(
                                        "applied {}: {} chunks, {} vehicles, {} spawns",
                                        report.tile,
                                        report.chunks,
                                        report.vehicles_moved,
                                        report.spawns_added
                                    ));
                                }
                                Err(err) => self.report_pipeline_error(err),
                            }
                            return self.finish_mapgen();
                        }
                        3 => {
                            match self.pipeline.change_marker_only() {
                                Ok(change) => {
                                    self.message = Some(format!("reclassified {}", change.tile));
                                }
                                Err(err) => self.report_pipeline_error(err),
                            }
                            return self.finish_mapgen();
                        }
                        _ => {
                            self.abort_preview(ctx);
                            return self.finish_mapgen();
                        }
                    },
                    other => match other.vertical_step() {
                        Some(step) => {
                            action = world_core::wrap_step(action, step, PREVIEW_ACTIONS.len()).0;
                        }
                        None => self.toggle_blink(),
                    },
                }
                Stage::Preview { action }
            }
        };
        Mode::Mapgen(mapgen)
    }

    fn abort_preview<W, G>(&mut self, ctx: &mut EditorContext<'_, W, G>)
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        match self.pipeline.abort(ctx) {
            Ok(true) => self.message = Some("regeneration aborted".to_owned()),
            Ok(false) => {
                self.message = Some("aborted; live cells changed during preview".to_owned())
            }
            Err(err) => self.report_pipeline_error(err),
        }
    }

    pub(super) fn mapgen_panel<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        mapgen: &MapgenMode,
    ) -> MenuView
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        let catalog = ctx.catalog;
        let tile = self.region.target().region();
        let type_name = |id: Option<RegionTypeId>| {
            id.and_then(|id| catalog.region(id))
                .map_or_else(|| "(none)".to_owned(), |def| def.name.clone())
        };
        let current =
            InfoLine::plain(format!("{tile}: {}", type_name(ctx.world.region_type(tile))));

        match mapgen.stage {
            Stage::Choosing => {
                let mut entries = vec![MenuEntry::new("(none)")];
                entries.extend((0..catalog.region_count()).filter_map(|index| {
                    let def = catalog.region(RegionTypeId::from_index(index))?;
                    Some(MenuEntry::tinted(
                        format!("{} {} ({})", def.glyph, def.name, def.key),
                        def.tint,
                    ))
                }));
                MenuView {
                    title: "Regenerate as".to_owned(),
                    entries,
                    selected: mapgen.types.index(),
                    footer: vec![current],
                }
            }
            Stage::Retarget { previous } => MenuView {
                title: "Choose tile".to_owned(),
                entries: Vec::new(),
                selected: 0,
                footer: vec![
                    current,
                    InfoLine::new(format!("from {}", previous.region()), Tint::DarkGray),
                ],
            },
            Stage::Preview { action } => MenuView {
                title: format!("Preview: {}", type_name(mapgen.region_type())),
                entries: PREVIEW_ACTIONS.iter().map(|label| MenuEntry::new(*label)).collect(),
                selected: action,
                footer: vec![InfoLine::new(
                    format!("was {}", type_name(self.pipeline_previous(ctx, tile))),
                    Tint::DarkGray,
                )],
            },
        }
    }

    fn pipeline_previous<W, G>(
        &self,
        ctx: &EditorContext<'_, W, G>,
        tile: RegionPos,
    ) -> Option<RegionTypeId>
    where
        W: WorldAccess + ?Sized,
        G: ?Sized,
    {
        match self.pipeline.tile() {
            Some(active) if active == tile => self.pipeline.previous_type(),
            _ => ctx.world.region_type(tile),
        }
    }
}
