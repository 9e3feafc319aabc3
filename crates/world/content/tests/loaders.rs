use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use world_content::{CatalogLoader, ConfigLoader};
use world_core::{DistanceMetric, EditorConfig, RegionStyle, Size, TileFlags, WallOrientation};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn shipped_catalog_loads() {
    let catalog = CatalogLoader::load(&data_file("catalog.ron")).expect("catalog");
    let wall = catalog.terrain_id("t_wall_v").expect("wall");
    assert_eq!(
        catalog.alternate_orientation(wall, WallOrientation::Vertical),
        catalog.terrain_id("t_wall_h")
    );
    let floor = catalog.terrain_id("t_floor").expect("floor");
    let flags = catalog.terrain(floor).expect("floor def").flags;
    assert!(flags.contains(TileFlags::INDOORS | TileFlags::SUPPORTS_ROOF));
    let house = catalog.region_id("house").expect("house");
    assert_eq!(catalog.region(house).map(|def| def.style), Some(RegionStyle::Building));
    let chair = catalog.furniture_id("f_chair").expect("chair");
    assert_eq!(catalog.furniture(chair).and_then(|def| def.move_strength), Some(10));
}

#[test]
fn flags_are_written_as_names() {
    let catalog = CatalogLoader::parse(
        r#"(
            terrain: [
                (key: "t_glass", name: "glass", glyph: '|', tint: LightCyan, move_cost: 0,
                 flags: "TRANSPARENT | SUPPORTS_ROOF"),
                (key: "t_mud", name: "mud", glyph: '.', tint: Brown, move_cost: 4),
            ],
        )"#,
    )
    .expect("catalog with flag names");
    let glass = catalog.terrain_id("t_glass").expect("glass");
    assert_eq!(
        catalog.terrain(glass).map(|def| def.flags),
        Some(TileFlags::TRANSPARENT | TileFlags::SUPPORTS_ROOF)
    );
    let mud = catalog.terrain_id("t_mud").expect("mud");
    assert_eq!(catalog.terrain(mud).map(|def| def.flags), Some(TileFlags::empty()));
}

#[test]
fn catalog_with_duplicate_keys_is_rejected() {
    let file = write_temp(
        r#"(
            terrain: [
                (key: "t_dirt", name: "dirt", glyph: '.', tint: Brown, move_cost: 2),
                (key: "t_dirt", name: "more dirt", glyph: ',', tint: Brown, move_cost: 2),
            ],
        )"#,
    );
    let err = CatalogLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("duplicate terrain key"), "{err}");
}

#[test]
fn catalog_parse_error_names_the_format() {
    let err = CatalogLoader::parse("(terrain: [").unwrap_err();
    assert!(err.to_string().contains("catalog RON"));
}

#[test]
fn missing_catalog_file_is_reported() {
    let err = CatalogLoader::load(&data_file("absent.ron")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn shipped_config_matches_defaults() {
    let config = ConfigLoader::load(&data_file("editor.toml")).expect("config");
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn partial_config_keeps_defaults() {
    let file = write_temp("distance_metric = \"octile\"\nblink_interval_ms = 120\n");
    let config = ConfigLoader::load(file.path()).expect("config");
    assert_eq!(config.distance_metric, DistanceMetric::Octile);
    assert_eq!(config.blink_interval_ms, 120);
    assert_eq!(config.preview_blink_factor, EditorConfig::DEFAULT_PREVIEW_BLINK_FACTOR);
    assert_eq!(config.viewport, Size::new(55, 25));
}

#[test]
fn zero_blink_interval_is_rejected() {
    assert!(ConfigLoader::parse("blink_interval_ms = 0").is_err());
}
