//! Placement validation.
//!
//! Every check is all-or-nothing: a batch is either fully placeable or it is
//! rejected with the list of offending cells and nothing changes.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::grid::GridCell;
use crate::history::TileMove;
use crate::layer::TileLayer;
use crate::occupancy::Occupancy;

/// Result of validating a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementCheck {
    /// Every destination is free.
    Valid,
    /// One or more destinations are covered by a tile or an obstacle.
    Blocked {
        /// Blocked destination cells, in batch order.
        cells: Vec<GridCell>,
    },
}

impl PlacementCheck {
    /// Check if placement is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, PlacementCheck::Valid)
    }

    /// Cells that blocked the placement.
    #[must_use]
    pub fn blocked_cells(&self) -> &[GridCell] {
        match self {
            PlacementCheck::Valid => &[],
            PlacementCheck::Blocked { cells } => cells,
        }
    }
}

/// Check that every cell in `destinations` is free.
#[must_use]
pub fn check_cells<L: TileLayer>(
    occupancy: &Occupancy<'_, L>,
    destinations: impl IntoIterator<Item = GridCell>,
) -> PlacementCheck {
    let cells: Vec<GridCell> = destinations
        .into_iter()
        .filter(|cell| occupancy.is_blocked(*cell))
        .collect();

    if cells.is_empty() {
        PlacementCheck::Valid
    } else {
        PlacementCheck::Blocked { cells }
    }
}

/// Validate moving every selected tile by `offset`.
///
/// The selected tiles still occupy their cells while this runs, so a move
/// that overlaps its own selection is rejected.
#[must_use]
pub fn validate_tile_move<L: TileLayer>(
    occupancy: &Occupancy<'_, L>,
    selection: &[GridCell],
    offset: GridCell,
) -> PlacementCheck {
    check_cells(occupancy, selection.iter().map(|cell| *cell + offset))
}

/// Validate an obstacle footprint anchored at `anchor`.
#[must_use]
pub fn validate_footprint<L: TileLayer>(
    occupancy: &Occupancy<'_, L>,
    footprint: &Footprint,
    anchor: GridCell,
) -> PlacementCheck {
    check_cells(occupancy, footprint.cells_at(anchor))
}

/// Validate re-applying a recorded tile batch.
///
/// Tiles of the batch still sit on their `from` cells, so those cells do not
/// block a `to` that coincides with them. Obstacles always block.
#[must_use]
pub fn validate_relocation<L: TileLayer>(
    occupancy: &Occupancy<'_, L>,
    moves: &[TileMove],
) -> PlacementCheck {
    let cells: Vec<GridCell> = moves
        .iter()
        .map(|mv| mv.to)
        .filter(|to| {
            occupancy.is_object_occupied(*to)
                || (occupancy.is_tile_occupied(*to) && !moves.iter().any(|mv| mv.from == *to))
        })
        .collect();

    if cells.is_empty() {
        PlacementCheck::Valid
    } else {
        PlacementCheck::Blocked { cells }
    }
}

/// Validate dropping the goal on `cell`.
#[must_use]
pub fn validate_goal<L: TileLayer>(occupancy: &Occupancy<'_, L>, cell: GridCell) -> PlacementCheck {
    check_cells(occupancy, [cell])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{SparseLayer, TileRecord};
    use crate::occupancy::ObjectOccupancy;

    fn fixture() -> (SparseLayer, ObjectOccupancy) {
        let mut tiles = SparseLayer::new();
        tiles.set_tile(GridCell::new(2, 2), TileRecord::new(3, GridCell::ZERO));
        tiles.set_tile(GridCell::new(3, 2), TileRecord::new(3, GridCell::ZERO));
        let mut objects = ObjectOccupancy::new();
        objects.insert(GridCell::new(6, 6));
        (tiles, objects)
    }

    #[test]
    fn test_tile_move_into_free_cells() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        let selection = [GridCell::new(2, 2), GridCell::new(3, 2)];
        assert!(validate_tile_move(&occupancy, &selection, GridCell::new(0, 3)).is_valid());
    }

    #[test]
    fn test_tile_move_rejects_whole_batch() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        let selection = [GridCell::new(2, 2), GridCell::new(3, 2)];
        // (3,2) -> (6,6) hits the obstacle; (2,2) -> (5,6) would be free.
        let check = validate_tile_move(&occupancy, &selection, GridCell::new(3, 4));
        assert_eq!(check.blocked_cells(), &[GridCell::new(6, 6)]);
    }

    #[test]
    fn test_tile_move_overlapping_itself_is_rejected() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        let selection = [GridCell::new(2, 2), GridCell::new(3, 2)];
        let check = validate_tile_move(&occupancy, &selection, GridCell::new(1, 0));
        assert_eq!(check.blocked_cells(), &[GridCell::new(3, 2)]);
    }

    #[test]
    fn test_footprint_blocked_by_object() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        let footprint = Footprint::new([GridCell::ZERO, GridCell::new(1, 0)]);
        assert!(validate_footprint(&occupancy, &footprint, GridCell::new(10, 10)).is_valid());
        assert!(!validate_footprint(&occupancy, &footprint, GridCell::new(5, 6)).is_valid());
    }

    #[test]
    fn test_relocation_ignores_own_sources() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        let record = TileRecord::new(3, GridCell::ZERO);
        // (2,2) -> (3,2) is fine because the tile at (3,2) leaves in the same batch.
        let moves = [
            TileMove { from: GridCell::new(2, 2), to: GridCell::new(3, 2), record },
            TileMove { from: GridCell::new(3, 2), to: GridCell::new(4, 2), record },
        ];
        assert!(validate_relocation(&occupancy, &moves).is_valid());

        let blocked = [TileMove { from: GridCell::new(2, 2), to: GridCell::new(6, 6), record }];
        assert_eq!(
            validate_relocation(&occupancy, &blocked).blocked_cells(),
            &[GridCell::new(6, 6)]
        );
    }

    #[test]
    fn test_goal_needs_free_cell() {
        let (tiles, objects) = fixture();
        let occupancy = Occupancy::new(&tiles, &objects);
        assert!(validate_goal(&occupancy, GridCell::new(0, 0)).is_valid());
        assert!(!validate_goal(&occupancy, GridCell::new(2, 2)).is_valid());
    }
}
