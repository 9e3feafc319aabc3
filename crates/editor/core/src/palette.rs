//! Terrain / furniture picker grid.
use world_core::{
    Catalog, Direction, FurnitureId, Glyph, TerrainId, Tint, wrap_step, would_overflow,
};

/// Which catalog table the palette is browsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum PaletteLayer {
    Terrain,
    Furniture,
}

impl PaletteLayer {
    fn toggled(self) -> Self {
        match self {
            PaletteLayer::Terrain => PaletteLayer::Furniture,
            PaletteLayer::Furniture => PaletteLayer::Terrain,
        }
    }
}

/// Cursor over a grid of terrain or furniture entries.
///
/// The furniture grid starts with a "no furniture" entry, so furniture index
/// `i` is `FurnitureId(i - 1)`. Horizontal steps wrap; a vertical step that
/// would leave the grid switches to the other layer instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePalette {
    layer: PaletteLayer,
    terrain: usize,
    furniture: usize,
    columns: usize,
}

impl TilePalette {
    pub fn new(columns: u16, terrain: TerrainId, furniture: Option<FurnitureId>) -> Self {
        Self {
            layer: PaletteLayer::Terrain,
            terrain: terrain.index(),
            furniture: furniture.map_or(0, |id| id.index() + 1),
            columns: usize::from(columns.max(1)),
        }
    }

    pub fn layer(&self) -> PaletteLayer {
        self.layer
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cursor(&self) -> usize {
        match self.layer {
            PaletteLayer::Terrain => self.terrain,
            PaletteLayer::Furniture => self.furniture,
        }
    }

    pub fn selected_terrain(&self) -> TerrainId {
        TerrainId::from_index(self.terrain)
    }

    pub fn selected_furniture(&self) -> Option<FurnitureId> {
        self.furniture.checked_sub(1).map(FurnitureId::from_index)
    }

    /// Number of entries on the active layer.
    pub fn len(&self, catalog: &Catalog) -> usize {
        match self.layer {
            PaletteLayer::Terrain => catalog.terrain_count(),
            PaletteLayer::Furniture => catalog.furniture_count() + 1,
        }
    }

    pub fn step(&mut self, direction: Direction, catalog: &Catalog) {
        let (dx, dy) = direction.delta();
        let count = self.len(catalog);
        let columns = self.columns as i32;
        if dx != 0 {
            self.move_cursor(dx, count);
        }
        if dy != 0 {
            if would_overflow(self.cursor(), dy * columns, count) {
                self.layer = self.layer.toggled();
            } else {
                self.move_cursor(dy * columns, count);
            }
        }
    }

    fn move_cursor(&mut self, delta: i32, count: usize) {
        let cursor = match self.layer {
            PaletteLayer::Terrain => &mut self.terrain,
            PaletteLayer::Furniture => &mut self.furniture,
        };
        *cursor = wrap_step(*cursor, delta, count).0;
    }

    /// Glyphs of the active layer in grid order.
    pub fn glyphs(&self, catalog: &Catalog) -> Vec<Glyph> {
        match self.layer {
            PaletteLayer::Terrain => (0..catalog.terrain_count())
                .filter_map(|index| catalog.terrain(TerrainId::from_index(index)))
                .map(|def| Glyph::new(def.glyph, def.tint))
                .collect(),
            PaletteLayer::Furniture => std::iter::once(Glyph::new('x', Tint::DarkGray))
                .chain(
                    (0..catalog.furniture_count())
                        .filter_map(|index| catalog.furniture(FurnitureId::from_index(index)))
                        .map(|def| Glyph::new(def.glyph, def.tint)),
                )
                .collect(),
        }
    }

    /// Caption lines describing the entry under the cursor.
    pub fn describe(&self, catalog: &Catalog) -> Vec<String> {
        match self.layer {
            PaletteLayer::Terrain => catalog
                .terrain(self.selected_terrain())
                .map(|def| {
                    vec![
                        format!("{}: {}", self.terrain, def.name),
                        format!("id: {}", def.key),
                        format!("move cost: {}", def.move_cost),
                        def.flags.describe(),
                    ]
                })
                .unwrap_or_default(),
            PaletteLayer::Furniture => match self.selected_furniture() {
                None => vec!["0: -clear-".to_owned()],
                Some(id) => catalog
                    .furniture(id)
                    .map(|def| {
                        vec![
                            format!("{}: {}", self.furniture, def.name),
                            format!("id: {}", def.key),
                            format!("move cost mod: {}", def.move_cost_mod),
                            def.flags.describe(),
                        ]
                    })
                    .unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_content::builtin_catalog;

    fn catalog() -> Catalog {
        builtin_catalog().expect("builtin catalog is valid")
    }

    #[test]
    fn horizontal_steps_wrap() {
        let catalog = catalog();
        let count = catalog.terrain_count();
        let mut palette = TilePalette::new(4, TerrainId(0), None);
        palette.step(Direction::West, &catalog);
        assert_eq!(palette.cursor(), count - 1);
        palette.step(Direction::East, &catalog);
        assert_eq!(palette.cursor(), 0);
    }

    #[test]
    fn vertical_overflow_switches_layer() {
        let catalog = catalog();
        let mut palette = TilePalette::new(4, TerrainId(1), None);
        palette.step(Direction::South, &catalog);
        assert_eq!(palette.layer(), PaletteLayer::Terrain);
        assert_eq!(palette.cursor(), 5);

        palette.step(Direction::North, &catalog);
        palette.step(Direction::North, &catalog);
        assert_eq!(palette.layer(), PaletteLayer::Furniture);
        assert_eq!(palette.selected_furniture(), None);
        assert_eq!(palette.selected_terrain(), TerrainId(1));
    }

    #[test]
    fn furniture_index_is_shifted_by_clear_entry() {
        let catalog = catalog();
        let palette = TilePalette::new(4, TerrainId(0), Some(FurnitureId(2)));
        assert_eq!(palette.selected_furniture(), Some(FurnitureId(2)));
        assert_eq!(palette.glyphs(&catalog).len(), catalog.terrain_count());
    }
}
