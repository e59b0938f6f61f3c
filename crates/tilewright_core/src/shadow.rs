//! Navigation shadowing.
//!
//! Whenever a tile or an obstacle comes to rest on a cell, the navigation
//! layer's record for that cell is saved and cleared so the pathing
//! collaborator routes around it. Lifting the obstruction restores the saved
//! record exactly.
//!
//! Invariant: a cell has a backup iff it currently has no live navigation
//! record and it had one before being obstructed.

use std::collections::BTreeMap;

use crate::grid::GridCell;
use crate::layer::{TileLayer, TileRecord};

/// Saved navigation records for obstructed cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavShadow {
    backups: BTreeMap<GridCell, TileRecord>,
}

impl NavShadow {
    /// Create an empty shadow map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the navigation record at `cell`, saving it first.
    ///
    /// A no-op when the cell has no live navigation record, which makes a
    /// second call on an already shadowed cell harmless. Returns whether the
    /// navigation layer changed.
    pub fn shadow<N: TileLayer>(&mut self, nav: &mut N, cell: GridCell) -> bool {
        let Some(record) = nav.get_tile(cell) else {
            return false;
        };

        if let Some(existing) = self.backups.get(&cell) {
            tracing::warn!(
                %cell,
                ?existing,
                "Live navigation cell already has a backup; keeping the original"
            );
        } else {
            self.backups.insert(cell, record);
        }

        nav.erase_tile(cell);
        tracing::debug!(%cell, "Navigation cell shadowed");
        true
    }

    /// Write the saved record for `cell` back and forget it.
    ///
    /// A no-op when no backup exists. Returns whether anything was restored.
    pub fn restore<N: TileLayer>(&mut self, nav: &mut N, cell: GridCell) -> bool {
        let Some(record) = self.backups.remove(&cell) else {
            return false;
        };
        nav.set_tile(cell, record);
        tracing::debug!(%cell, "Navigation cell restored");
        true
    }

    /// Establish the baseline at startup: shadow every cell inside the tile
    /// layer's used rectangle that holds both a tile and a navigation record.
    ///
    /// Returns the number of cells shadowed.
    pub fn scan_initial<T: TileLayer, N: TileLayer>(&mut self, tiles: &T, nav: &mut N) -> usize {
        let region = tiles.used_rect();
        let mut shadowed = 0;

        for cell in region.cells() {
            if tiles.is_occupied(cell) && nav.is_occupied(cell) && self.shadow(nav, cell) {
                shadowed += 1;
            }
        }

        tracing::info!(shadowed, "Initial navigation scan complete");
        shadowed
    }

    /// Whether `cell` has a saved record.
    #[must_use]
    pub fn is_shadowed(&self, cell: GridCell) -> bool {
        self.backups.contains_key(&cell)
    }

    /// Saved record for `cell`.
    #[must_use]
    pub fn backup(&self, cell: GridCell) -> Option<TileRecord> {
        self.backups.get(&cell).copied()
    }

    /// Number of saved records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backups.len()
    }

    /// Whether nothing is shadowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backups.is_empty()
    }

    /// Saved records in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, TileRecord)> + '_ {
        self.backups.iter().map(|(cell, record)| (*cell, *record))
    }
}
