//! Tile layers.
//!
//! Both the visual/walkable tile layer and the navigation layer are consumed
//! through [`TileLayer`]. [`SparseLayer`] is the in-memory implementation used
//! by the headless runner, the Bevy client and the tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grid::{GridCell, GridRect};

/// Source id meaning "no tile here".
pub const EMPTY_SOURCE: i32 = -1;

/// Opaque tile identity: which tile source and which atlas entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRecord {
    /// Tile source id. Never [`EMPTY_SOURCE`] for a stored record.
    pub source_id: i32,
    /// Coordinate inside the source atlas.
    pub atlas: GridCell,
}

impl TileRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(source_id: i32, atlas: GridCell) -> Self {
        Self { source_id, atlas }
    }
}

/// A grid of optional tile records.
///
/// The editor is the only mutator; implementations must not reject writes.
pub trait TileLayer {
    /// Record at `cell`, if any.
    fn get_tile(&self, cell: GridCell) -> Option<TileRecord>;

    /// Write a record. Writing [`EMPTY_SOURCE`] erases the cell.
    fn set_tile(&mut self, cell: GridCell, record: TileRecord);

    /// Remove whatever is at `cell`.
    fn erase_tile(&mut self, cell: GridCell);

    /// Smallest rectangle enclosing every non-empty cell.
    fn used_rect(&self) -> GridRect;

    /// Whether `cell` holds a tile.
    fn is_occupied(&self, cell: GridCell) -> bool {
        self.get_tile(cell).is_some()
    }

    /// Source id at `cell`, [`EMPTY_SOURCE`] when empty.
    fn source_id(&self, cell: GridCell) -> i32 {
        self.get_tile(cell).map_or(EMPTY_SOURCE, |r| r.source_id)
    }
}

/// One stored cell, the on-disk form of a [`SparseLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    /// Where the tile sits.
    pub cell: GridCell,
    /// Tile source id.
    pub source_id: i32,
    /// Atlas coordinate.
    #[serde(default)]
    pub atlas: GridCell,
}

/// Ordered sparse tile layer.
///
/// Backed by a `BTreeMap` so iteration (and therefore ASCII dumps, state
/// fingerprints and bulk selection) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LayerEntry>", into = "Vec<LayerEntry>")]
pub struct SparseLayer {
    cells: BTreeMap<GridCell, TileRecord>,
}

impl SparseLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every cell of `rect` with `record`.
    #[must_use]
    pub fn filled(rect: GridRect, record: TileRecord) -> Self {
        let mut layer = Self::new();
        for cell in rect.cells() {
            layer.set_tile(cell, record);
        }
        layer
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the layer holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate non-empty cells in order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, TileRecord)> + '_ {
        self.cells.iter().map(|(cell, record)| (*cell, *record))
    }
}

impl TileLayer for SparseLayer {
    fn get_tile(&self, cell: GridCell) -> Option<TileRecord> {
        self.cells.get(&cell).copied()
    }

    fn set_tile(&mut self, cell: GridCell, record: TileRecord) {
        if record.source_id == EMPTY_SOURCE {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, record);
        }
    }

    fn erase_tile(&mut self, cell: GridCell) {
        self.cells.remove(&cell);
    }

    fn used_rect(&self) -> GridRect {
        GridRect::enclosing(self.cells.keys().copied())
    }
}

impl From<Vec<LayerEntry>> for SparseLayer {
    fn from(entries: Vec<LayerEntry>) -> Self {
        let mut layer = Self::new();
        for entry in entries {
            layer.set_tile(entry.cell, TileRecord::new(entry.source_id, entry.atlas));
        }
        layer
    }
}

impl From<SparseLayer> for Vec<LayerEntry> {
    fn from(layer: SparseLayer) -> Self {
        layer
            .cells
            .into_iter()
            .map(|(cell, record)| LayerEntry {
                cell,
                source_id: record.source_id,
                atlas: record.atlas,
            })
            .collect()
    }
}
