//! Occupancy queries.
//!
//! A cell is blocked when the tile layer holds something there or when a
//! placed obstacle's footprint covers it. The two sources are tracked
//! separately: tiles live in the layer, obstacle cells in [`ObjectOccupancy`].

use std::collections::BTreeSet;

use crate::grid::GridCell;
use crate::layer::TileLayer;

/// Cells currently covered by placed obstacles.
///
/// A cell is present iff some placed obstacle's footprint covers it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectOccupancy {
    cells: BTreeSet<GridCell>,
}

impl ObjectOccupancy {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an obstacle covers `cell`.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Mark `cell` as covered.
    pub fn insert(&mut self, cell: GridCell) -> bool {
        self.cells.insert(cell)
    }

    /// Unmark `cell`.
    pub fn remove(&mut self, cell: GridCell) -> bool {
        self.cells.remove(&cell)
    }

    /// Number of covered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Covered cells in order.
    pub fn iter(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().copied()
    }
}

/// Read-only view combining tile and obstacle occupancy.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a, L: TileLayer> {
    tiles: &'a L,
    objects: &'a ObjectOccupancy,
}

impl<'a, L: TileLayer> Occupancy<'a, L> {
    /// Create a view over a tile layer and an obstacle set.
    #[must_use]
    pub const fn new(tiles: &'a L, objects: &'a ObjectOccupancy) -> Self {
        Self { tiles, objects }
    }

    /// Tile layer has a non-empty record at `cell`.
    #[must_use]
    pub fn is_tile_occupied(&self, cell: GridCell) -> bool {
        self.tiles.is_occupied(cell)
    }

    /// A placed obstacle covers `cell`.
    #[must_use]
    pub fn is_object_occupied(&self, cell: GridCell) -> bool {
        self.objects.contains(cell)
    }

    /// Either of the above.
    #[must_use]
    pub fn is_blocked(&self, cell: GridCell) -> bool {
        self.is_tile_occupied(cell) || self.is_object_occupied(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{SparseLayer, TileRecord};

    #[test]
    fn test_blocked_by_either_source() {
        let mut tiles = SparseLayer::new();
        tiles.set_tile(GridCell::new(1, 1), TileRecord::new(0, GridCell::ZERO));
        let mut objects = ObjectOccupancy::new();
        objects.insert(GridCell::new(2, 2));

        let view = Occupancy::new(&tiles, &objects);
        assert!(view.is_tile_occupied(GridCell::new(1, 1)));
        assert!(!view.is_object_occupied(GridCell::new(1, 1)));
        assert!(view.is_blocked(GridCell::new(1, 1)));

        assert!(view.is_object_occupied(GridCell::new(2, 2)));
        assert!(view.is_blocked(GridCell::new(2, 2)));

        assert!(!view.is_blocked(GridCell::new(3, 3)));
    }

    #[test]
    fn test_insert_remove() {
        let mut objects = ObjectOccupancy::new();
        assert!(objects.insert(GridCell::new(0, 0)));
        assert!(!objects.insert(GridCell::new(0, 0)));
        assert_eq!(objects.len(), 1);
        assert!(objects.remove(GridCell::new(0, 0)));
        assert!(objects.is_empty());
    }
}
