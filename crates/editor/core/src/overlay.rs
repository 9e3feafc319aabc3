//! Frame surfaces and the overlays drawn on top of the live map.
use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use world_core::{
    Catalog, Chunk, Glyph, LocalPos, Point2, Point3, ScratchChunk, Size, Tint, WorldAccess,
    WorldConfig,
};

use crate::transform::ViewTransform;

/// Fixed-size grid of glyphs, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    size: Size,
    cells: Vec<Glyph>,
}

impl Surface {
    pub fn new(size: Size) -> Self {
        let size = Size::new(size.width.max(0), size.height.max(0));
        Self {
            size,
            cells: vec![Glyph::BLANK; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, at: Point2) -> Option<usize> {
        self.size
            .contains(at)
            .then(|| (at.y * self.size.width + at.x) as usize)
    }

    pub fn get(&self, at: Point2) -> Option<Glyph> {
        self.index(at).map(|index| self.cells[index])
    }

    /// Writes one cell; positions outside the surface are ignored.
    pub fn set(&mut self, at: Point2, glyph: Glyph) {
        if let Some(index) = self.index(at) {
            self.cells[index] = glyph;
        }
    }

    /// Copies `other` with its top-left corner at `at`, clipped.
    pub fn blit(&mut self, other: &Surface, at: Point2) {
        for y in 0..other.size.height {
            for x in 0..other.size.width {
                if let Some(glyph) = other.get(Point2::new(x, y)) {
                    self.set(Point2::new(at.x + x, at.y + y), glyph);
                }
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }
}

/// Glyph of a chunk cell without occupants: field, furniture, then terrain.
pub fn tile_glyph(catalog: &Catalog, chunk: &Chunk, local: LocalPos) -> Glyph {
    if let Some((kind, entry)) = chunk.fields_at(local).strongest() {
        if let Some(def) = catalog.field(kind) {
            return Glyph::new(def.glyph, def.tint_at(entry.density));
        }
    }
    if let Some(def) = chunk.furniture.get(local).and_then(|id| catalog.furniture(id)) {
        return Glyph::new(def.glyph, def.tint);
    }
    catalog
        .terrain(*chunk.terrain.get(local))
        .map_or(Glyph::new('?', Tint::Magenta), |def| Glyph::new(def.glyph, def.tint))
}

/// Glyph of a live cell, ignoring line of sight.
///
/// Traps the operator would need to spot are only drawn with `show_all`.
pub fn cell_glyph<W: WorldAccess + ?Sized>(
    world: &W,
    catalog: &Catalog,
    point: Point3,
    show_all: bool,
) -> Glyph {
    if !world.bounds().contains(point) {
        return Glyph::BLANK;
    }
    if let Some(creature) = world.creature_at(point) {
        return creature.glyph();
    }
    if let Some(part) = world
        .vehicle_at_point(point)
        .and_then(|vehicle| vehicle.part_at(point))
    {
        return Glyph::new(part.glyph, part.tint);
    }
    let Some((chunk, local)) = world.chunk(point.chunk()).map(|c| (c, point.local())) else {
        return Glyph::BLANK;
    };
    if chunk.fields_at(local).strongest().is_some() {
        return tile_glyph(catalog, chunk, local);
    }
    if let Some(def) = chunk
        .items
        .get(local)
        .first()
        .and_then(|item| catalog.item(item.kind))
    {
        return Glyph::new(def.glyph, def.tint);
    }
    if chunk.furniture.get(local).is_some() {
        return tile_glyph(catalog, chunk, local);
    }
    if let Some(def) = chunk.traps.get(local).and_then(|id| catalog.trap(id)) {
        if show_all || def.visibility == 0 {
            return Glyph::new(def.glyph, def.tint);
        }
    }
    tile_glyph(catalog, chunk, local)
}

/// Draws the live map under the viewport.
pub fn render_base<W: WorldAccess + ?Sized>(
    world: &W,
    catalog: &Catalog,
    view: &ViewTransform,
    show_all: bool,
) -> Surface {
    let mut surface = Surface::new(view.viewport);
    for (screen, point) in view.visible_points() {
        surface.set(screen, cell_glyph(world, catalog, point, show_all));
    }
    surface
}

fn redraw_on<W: WorldAccess + ?Sized>(
    surface: &mut Surface,
    world: &W,
    catalog: &Catalog,
    view: &ViewTransform,
    point: Point3,
    background: Option<Tint>,
) {
    if world.is_occupied(point) {
        return;
    }
    let screen = view.world_to_screen(point);
    if !view.is_visible(screen) {
        return;
    }
    let glyph = cell_glyph(world, catalog, point, true);
    surface.set(screen, background.map_or(glyph, |bg| glyph.on(bg)));
}

/// Marks the cells of a multi-cell selection while `blink` is on.
///
/// Cells holding a creature or vehicle keep their occupant glyph.
pub fn draw_region_blink<W: WorldAccess + ?Sized>(
    surface: &mut Surface,
    world: &W,
    catalog: &Catalog,
    view: &ViewTransform,
    members: &[Point3],
    move_all: bool,
    blink: bool,
) {
    if !blink || members.len() < 2 {
        return;
    }
    let background = if move_all { Tint::Green } else { Tint::Cyan };
    for &point in members {
        redraw_on(surface, world, catalog, view, point, Some(background));
    }
}

/// Edge arrows shown while the whole region moves.
pub fn draw_arrows(surface: &mut Surface) {
    let Size { width, height } = surface.size();
    let mid_x = (width - 1) / 2 + 1;
    let mid_y = (height - 1) / 2 + 1;
    for (at, symbol) in [
        (Point2::new(mid_x, 1), '^'),
        (Point2::new(1, mid_y), '<'),
        (Point2::new(width - 2, mid_y), '>'),
        (Point2::new(mid_x, height - 2), 'v'),
    ] {
        surface.set(at, Glyph::new(symbol, Tint::Yellow));
    }
}

/// Draws a generated tile into a `REGION_SIZE` square surface.
pub fn render_preview(catalog: &Catalog, scratch: &ScratchChunk) -> Surface {
    const SIZE: i32 = WorldConfig::REGION_SIZE;
    const CHUNK: i32 = WorldConfig::CHUNK_SIZE as i32;
    let mut surface = Surface::new(Size::new(SIZE, SIZE));
    for y in 0..SIZE {
        for x in 0..SIZE {
            let vehicle = scratch.vehicle_at(x, y).and_then(|vehicle| {
                let anchor_x = vehicle.chunk.x * CHUNK + vehicle.anchor.x as i32;
                let anchor_y = vehicle.chunk.y * CHUNK + vehicle.anchor.y as i32;
                vehicle
                    .parts
                    .iter()
                    .find(|part| anchor_x + part.offset.x == x && anchor_y + part.offset.y == y)
            });
            let glyph = match vehicle {
                Some(part) => Glyph::new(part.glyph, part.tint),
                None => scratch
                    .cell(x, y)
                    .map_or(Glyph::BLANK, |(chunk, local)| tile_glyph(catalog, chunk, local)),
            };
            surface.set(Point2::new(x, y), glyph);
        }
    }
    surface
}

/// Fixed named overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum OverlayKind {
    /// Path of the inspected monster.
    MovementPlan,
    /// Corners of the tile being regenerated.
    GenerationTarget,
}

impl OverlayKind {
    pub fn tint(self) -> Tint {
        match self {
            OverlayKind::MovementPlan => Tint::Red,
            OverlayKind::GenerationTarget => Tint::Cyan,
        }
    }

    fn pattern(self) -> ArrayVec<bool, 4> {
        let mut pattern = ArrayVec::new();
        match self {
            OverlayKind::MovementPlan => pattern.extend([true, false]),
            OverlayKind::GenerationTarget => pattern.extend([true, false, false]),
        }
        pattern
    }
}

/// Blinking set of marked points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    tint: Tint,
    pattern: ArrayVec<bool, 4>,
    cursor: usize,
    points: BTreeMap<Point3, u8>,
}

impl Highlight {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            tint: kind.tint(),
            pattern: kind.pattern(),
            cursor: 0,
            points: BTreeMap::new(),
        }
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (Point3, u8)> + '_ {
        self.points.iter().map(|(point, intensity)| (*point, *intensity))
    }

    pub fn mark(&mut self, point: Point3, intensity: u8) {
        self.points.insert(point, intensity);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.cursor = 0;
    }

    /// Moves to the next blink phase and reports whether it is lit.
    pub fn advance(&mut self) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + 1) % self.pattern.len();
        self.pattern[self.cursor]
    }

    /// Advances the blink and redraws the marked points.
    ///
    /// Points are redrawn on lit phases, or on every phase when `force` is
    /// set; the tint is only applied as background on lit phases.
    pub fn draw<W: WorldAccess + ?Sized>(
        &mut self,
        surface: &mut Surface,
        world: &W,
        catalog: &Catalog,
        view: &ViewTransform,
        force: bool,
    ) {
        let lit = self.advance();
        if !lit && !force {
            return;
        }
        let background = lit.then_some(self.tint);
        for point in self.points.keys() {
            redraw_on(surface, world, catalog, view, *point, background);
        }
    }
}

/// The editor's named overlays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSet {
    movement: Highlight,
    generation: Highlight,
}

impl Default for HighlightSet {
    fn default() -> Self {
        Self {
            movement: Highlight::new(OverlayKind::MovementPlan),
            generation: Highlight::new(OverlayKind::GenerationTarget),
        }
    }
}

impl HighlightSet {
    pub fn get(&self, kind: OverlayKind) -> &Highlight {
        match kind {
            OverlayKind::MovementPlan => &self.movement,
            OverlayKind::GenerationTarget => &self.generation,
        }
    }

    pub fn get_mut(&mut self, kind: OverlayKind) -> &mut Highlight {
        match kind {
            OverlayKind::MovementPlan => &mut self.movement,
            OverlayKind::GenerationTarget => &mut self.generation,
        }
    }

    pub fn draw_all<W: WorldAccess + ?Sized>(
        &mut self,
        surface: &mut Surface,
        world: &W,
        catalog: &Catalog,
        view: &ViewTransform,
    ) {
        for highlight in [&mut self.movement, &mut self.generation] {
            if !highlight.is_empty() {
                highlight.draw(surface, world, catalog, view, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Region, Shape};
    use sandbox::MemoryWorld;
    use world_content::builtin_catalog;
    use world_core::{CellAccess, ChunkStore, Creature, MapBounds, Monster};

    fn setup() -> (MemoryWorld, Catalog) {
        let catalog = builtin_catalog().expect("builtin catalog is valid");
        let world = MemoryWorld::new(MapBounds::new(24, 24, 0, 0), catalog.default_terrain());
        (world, catalog)
    }

    fn terrain_glyph(catalog: &Catalog) -> Glyph {
        catalog
            .terrain(catalog.default_terrain())
            .map(|def| Glyph::new(def.glyph, def.tint))
            .expect("default terrain exists")
    }

    #[test]
    fn blit_clips_to_target() {
        let mut big = Surface::new(Size::new(4, 3));
        let mut small = Surface::new(Size::new(2, 2));
        small.set(Point2::new(1, 1), Glyph::new('#', Tint::White));
        big.blit(&small, Point2::new(2, 1));
        assert_eq!(big.get(Point2::new(3, 2)).map(|g| g.symbol), Some('#'));
        big.blit(&small, Point2::new(3, 2));
        assert_eq!(big.rows().count(), 3);
        assert_eq!(big.get(Point2::new(4, 3)), None);
    }

    #[test]
    fn base_surface_blanks_outside_bounds() {
        let (world, catalog) = setup();
        let view = ViewTransform::new(Point3::new(0, 0, 0), Size::new(5, 5));
        let surface = render_base(&world, &catalog, &view, false);
        assert_eq!(surface.get(Point2::new(0, 0)), Some(Glyph::BLANK));
        assert_eq!(surface.get(Point2::new(2, 2)), Some(terrain_glyph(&catalog)));
    }

    #[test]
    fn creatures_draw_over_furniture() {
        let (mut world, catalog) = setup();
        let at = Point3::new(3, 3, 0);
        world.set_furniture(at, catalog.furniture_id("f_chair"));
        let chair = cell_glyph(&world, &catalog, at, false);
        assert_ne!(chair, terrain_glyph(&catalog));

        world.place_creature(
            at,
            Creature::Monster(Monster {
                kind: "mon_cat".into(),
                name: "cat".into(),
                glyph: 'c',
                tint: Tint::White,
                hp: 3,
                max_hp: 3,
                friendly: true,
                destination: None,
            }),
        );
        assert_eq!(cell_glyph(&world, &catalog, at, false).symbol, 'c');
    }

    #[test]
    fn region_blink_skips_occupied_cells() {
        let (mut world, catalog) = setup();
        let view = ViewTransform::new(Point3::new(5, 5, 0), Size::new(11, 11));
        let rules = crate::region::SelectionRules::new(
            world.bounds(),
            world_core::DistanceMetric::Chebyshev,
        );
        let region = Region::new(
            Point3::new(4, 5, 0),
            Point3::new(6, 5, 0),
            Shape::RectFilled,
            &rules,
        );
        let npc = Creature::Npc(world_core::Npc {
            name: "Jo".into(),
            hp: 1,
            max_hp: 1,
            attitude: world_core::Attitude::Neutral,
        });
        world.place_creature(Point3::new(6, 5, 0), npc);

        let mut surface = render_base(&world, &catalog, &view, false);
        draw_region_blink(
            &mut surface,
            &world,
            &catalog,
            &view,
            region.members(),
            true,
            true,
        );
        let at = |x| surface.get(view.world_to_screen(Point3::new(x, 5, 0)));
        assert_eq!(at(4).and_then(|g| g.bg), Some(Tint::Green));
        assert_eq!(at(6).and_then(|g| g.bg), None);
    }

    #[test]
    fn generation_target_blinks_one_in_three() {
        let (world, catalog) = setup();
        let view = ViewTransform::new(Point3::new(5, 5, 0), Size::new(11, 11));
        let mut highlight = Highlight::new(OverlayKind::GenerationTarget);
        highlight.mark(Point3::new(5, 5, 0), 1);

        let mut lit = 0;
        for _ in 0..6 {
            let mut surface = render_base(&world, &catalog, &view, false);
            highlight.draw(&mut surface, &world, &catalog, &view, false);
            if surface.get(view.center()).and_then(|g| g.bg) == Some(Tint::Cyan) {
                lit += 1;
            }
        }
        assert_eq!(lit, 2);
    }

    #[test]
    fn arrows_sit_on_edge_midpoints() {
        let mut surface = Surface::new(Size::new(9, 7));
        draw_arrows(&mut surface);
        assert_eq!(surface.get(Point2::new(5, 1)).map(|g| g.symbol), Some('^'));
        assert_eq!(surface.get(Point2::new(7, 4)).map(|g| g.symbol), Some('>'));
    }

    #[test]
    fn preview_covers_the_tile() {
        let (_, catalog) = setup();
        let scratch =
            ScratchChunk::new(world_core::RegionPos::new(0, 0, 0), catalog.default_terrain());
        let surface = render_preview(&catalog, &scratch);
        assert_eq!(surface.size(), Size::new(24, 24));
        assert_eq!(surface.get(Point2::new(23, 23)), Some(terrain_glyph(&catalog)));
    }
}
