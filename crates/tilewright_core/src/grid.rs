//! Grid addressing.
//!
//! Integer cell coordinates and the conversions between world positions and
//! cells. All functions here are pure.

use serde::{Deserialize, Serialize};

use crate::math::{Fixed, Vec2Fixed};

/// Integer grid coordinate. Also used for cell deltas (drag offsets,
/// footprint offsets) and atlas coordinates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridCell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin / zero offset.
    pub const ZERO: Self = Self::new(0, 0);

    /// Sentinel for "no cell hovered yet".
    pub const NONE: Self = Self::new(i32::MIN, i32::MIN);

    /// Convert to a fixed-point vector (for centroid math).
    #[must_use]
    pub fn as_vec2(self) -> Vec2Fixed {
        Vec2Fixed::from_ints(self.x, self.y)
    }
}

impl std::ops::Add for GridCell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl std::ops::Sub for GridCell {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Convert a world position to the cell containing it (floor division).
///
/// Positions beyond the addressable grid clamp to its edge.
#[must_use]
pub fn world_to_cell(pos: Vec2Fixed, tile_size: Vec2Fixed) -> GridCell {
    GridCell::new(
        floor_div(pos.x, tile_size.x),
        floor_div(pos.y, tile_size.y),
    )
}

fn floor_div(value: Fixed, edge: Fixed) -> i32 {
    value
        .saturating_div(edge)
        .saturating_floor()
        .saturating_to_num::<i32>()
}

/// Convert a cell to the world position of its anchor (top-left) corner.
#[must_use]
pub fn cell_to_world(cell: GridCell, tile_size: Vec2Fixed) -> Vec2Fixed {
    cell.as_vec2().mul_components(tile_size)
}

/// World position of a cell's center.
#[must_use]
pub fn cell_center(cell: GridCell, tile_size: Vec2Fixed) -> Vec2Fixed {
    cell_to_world(cell, tile_size) + tile_size.half()
}

/// Axis-aligned rectangle of cells (`position` inclusive, `size` in cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Top-left cell.
    pub position: GridCell,
    /// Width and height in cells.
    pub size: GridCell,
}

impl GridRect {
    /// Smallest rectangle containing every cell of the iterator.
    /// Empty input gives an empty rectangle.
    #[must_use]
    pub fn enclosing(cells: impl IntoIterator<Item = GridCell>) -> Self {
        let mut iter = cells.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut min, mut max) = (first, first);
        for cell in iter {
            min = GridCell::new(min.x.min(cell.x), min.y.min(cell.y));
            max = GridCell::new(max.x.max(cell.x), max.y.max(cell.y));
        }
        Self {
            position: min,
            size: GridCell::new(
                max.x.saturating_sub(min.x).saturating_add(1),
                max.y.saturating_sub(min.y).saturating_add(1),
            ),
        }
    }

    /// Whether the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Whether `cell` lies inside.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x >= self.position.x
            && cell.y >= self.position.y
            && i64::from(cell.x) < i64::from(self.position.x) + i64::from(self.size.x)
            && i64::from(cell.y) < i64::from(self.position.y) + i64::from(self.size.y)
    }

    /// Cells in column-major order (x outer, y inner).
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let (x0, y0) = (self.position.x, self.position.y);
        let (w, h) = (self.size.x.max(0), self.size.y.max(0));
        span(x0, w).flat_map(move |x| span(y0, h).map(move |y| GridCell::new(x, y)))
    }
}

/// `len` consecutive values starting at `start`, stopping at `i32::MAX`.
#[allow(clippy::reversed_empty_ranges)]
fn span(start: i32, len: i32) -> std::ops::RangeInclusive<i32> {
    if len > 0 {
        start..=start.saturating_add(len - 1)
    } else {
        1..=0
    }
}

/// Default tile edge in world units.
pub const DEFAULT_TILE_EDGE: i32 = 8;

/// The default 8×8 tile size.
#[must_use]
pub fn default_tile_size() -> Vec2Fixed {
    Vec2Fixed::new(
        Fixed::from_num(DEFAULT_TILE_EDGE),
        Fixed::from_num(DEFAULT_TILE_EDGE),
    )
}
