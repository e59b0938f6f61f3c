//! Test fixtures and helpers.
//!
//! Pre-built layers, levels and sprites for consistent testing.

use fixed::types::I32F32;
use image::{Rgba, RgbaImage};
use tilewright_core::board::Goal;
use tilewright_core::config::EditorConfig;
use tilewright_core::editor::TileEditor;
use tilewright_core::footprint::Footprint;
use tilewright_core::grid::{cell_center, default_tile_size, GridCell, GridRect};
use tilewright_core::host::{HeadlessHost, TemplateId};
use tilewright_core::layer::{SparseLayer, TileLayer, TileRecord};
use tilewright_core::level::Level;
use tilewright_core::math::Vec2Fixed;

/// Editor type used throughout the tests.
pub type TestEditor = TileEditor<SparseLayer, HeadlessHost>;

/// Source id of the bulk-selectable "drum" bricks.
pub const DRUM_SOURCE: i32 = 3;

/// Template id of the two-cell drum obstacle.
pub const DRUM_TEMPLATE: TemplateId = TemplateId(1);

/// Template id of the single-cell crate obstacle.
pub const CRATE_TEMPLATE: TemplateId = TemplateId(2);

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// World position of the center of cell `(x, y)` with 8x8 tiles.
#[must_use]
pub fn at(x: i32, y: i32) -> Vec2Fixed {
    cell_center(GridCell::new(x, y), default_tile_size())
}

/// A drum brick.
#[must_use]
pub fn brick() -> TileRecord {
    TileRecord::new(DRUM_SOURCE, GridCell::ZERO)
}

/// A plain wall brick.
#[must_use]
pub fn wall() -> TileRecord {
    TileRecord::new(0, GridCell::new(1, 0))
}

/// A navigation cell.
#[must_use]
pub fn nav_record() -> TileRecord {
    TileRecord::new(0, GridCell::ZERO)
}

/// Navigation layer covering `width` x `height` cells from the origin.
#[must_use]
pub fn nav_floor(width: i32, height: i32) -> SparseLayer {
    SparseLayer::filled(
        GridRect {
            position: GridCell::ZERO,
            size: GridCell::new(width, height),
        },
        nav_record(),
    )
}

/// Tile layer holding `record` at every cell in `cells`.
#[must_use]
pub fn layer_with(cells: &[(i32, i32)], record: TileRecord) -> SparseLayer {
    let mut layer = SparseLayer::new();
    for &(x, y) in cells {
        layer.set_tile(GridCell::new(x, y), record);
    }
    layer
}

/// Two-cell horizontal footprint.
#[must_use]
pub fn drum_footprint() -> Footprint {
    Footprint::new([GridCell::ZERO, GridCell::new(1, 0)])
}

/// Editor over a `size` x `size` navigation floor with drum bricks at
/// `bricks`, the goal in the top-right corner and both templates registered.
#[must_use]
pub fn editor_with_bricks(size: i32, bricks: &[(i32, i32)]) -> TestEditor {
    let goal = Goal::new(at(size - 1, 0), default_tile_size());
    let mut editor = TileEditor::new(
        EditorConfig::default(),
        layer_with(bricks, brick()),
        nav_floor(size, size),
        goal,
        HeadlessHost::new(),
    )
    .expect("default config is valid");
    editor.register_template_footprint(DRUM_TEMPLATE, drum_footprint());
    editor.register_template_footprint(CRATE_TEMPLATE, Footprint::anchor_only());
    editor
}

/// Embedded tutorial level.
pub const TUTORIAL_LEVEL: &str = r#"(
    name: "Tutorial",
    number: 1,
    requirement: (min_bricks: 2, min_objects: 2),
    tiles: [
        (cell: (x: 2, y: 2), source_id: 3),
        (cell: (x: 3, y: 2), source_id: 3),
        (cell: (x: 5, y: 4), source_id: 0, atlas: (x: 1, y: 0)),
    ],
    nav: [
        (cell: (x: 0, y: 0), source_id: 0), (cell: (x: 1, y: 0), source_id: 0),
        (cell: (x: 2, y: 0), source_id: 0), (cell: (x: 3, y: 0), source_id: 0),
        (cell: (x: 2, y: 2), source_id: 0), (cell: (x: 3, y: 2), source_id: 0),
        (cell: (x: 2, y: 3), source_id: 0), (cell: (x: 3, y: 3), source_id: 0),
        (cell: (x: 5, y: 5), source_id: 0),
    ],
    goal: (position: (x: 60.0, y: 4.0), size: (x: 8.0, y: 8.0)),
    templates: [
        (id: 1, name: "Drum", footprint: Some([(x: 0, y: 0), (x: 1, y: 0)])),
        (id: 2, name: "Crate"),
    ],
)"#;

/// Parsed tutorial level.
#[must_use]
pub fn tutorial_level() -> Level {
    Level::from_ron_str(TUTORIAL_LEVEL).expect("embedded level parses")
}

/// Fully transparent RGBA image.
#[must_use]
pub fn transparent_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Transparent image with opaque pixels at `pixels`.
#[must_use]
pub fn image_with_opaque(width: u32, height: u32, pixels: &[(u32, u32)]) -> RgbaImage {
    let mut image = transparent_image(width, height);
    for &(x, y) in pixels {
        image.put_pixel(x, y, Rgba([200, 120, 40, 255]));
    }
    image
}
