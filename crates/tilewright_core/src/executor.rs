//! Applying accepted edits and their inverses.
//!
//! Relocations run in two phases: every source is vacated before any
//! destination is written. A batch is a permutation of tile positions once
//! chaining has rewritten it, so this is the only order that is correct for
//! every batch, forwards and backwards. Within each phase the navigation
//! restore of a vacated cell happens before the shadow of an occupied one.

use crate::board::Board;
use crate::error::EditorError;
use crate::footprint::Footprint;
use crate::grid::{cell_center, GridCell};
use crate::history::{EditRecord, History, ObjectPlacement, TileMove};
use crate::layer::TileLayer;
use crate::math::Vec2Fixed;

/// How a tile commit landed in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainSummary {
    /// Moves folded into the previous batch.
    pub chained: usize,
    /// Moves pushed as a new batch.
    pub appended: usize,
}

/// Build the move list for `selection` shifted by `offset`.
///
/// Cells without a tile are skipped.
pub fn plan_tile_moves<L: TileLayer>(
    board: &Board<L>,
    selection: &[GridCell],
    offset: GridCell,
) -> Vec<TileMove> {
    selection
        .iter()
        .filter_map(|from| {
            let record = board.tiles.get_tile(*from);
            if record.is_none() {
                tracing::warn!(cell = %from, "Selected cell has no tile; skipping");
            }
            record.map(|record| TileMove {
                from: *from,
                to: *from + offset,
                record,
            })
        })
        .collect()
}

fn relocate<L: TileLayer>(board: &mut Board<L>, moves: &[TileMove], reverse: bool) {
    let ends = |mv: &TileMove| if reverse { (mv.to, mv.from) } else { (mv.from, mv.to) };

    for mv in moves {
        let (source, _) = ends(mv);
        board.tiles.erase_tile(source);
        board.shadow.restore(&mut board.nav, source);
    }

    for mv in moves {
        let (source, target) = ends(mv);
        board.tiles.set_tile(target, mv.record);
        board.shadow.shadow(&mut board.nav, target);
        tracing::debug!(
            from = %source,
            to = %target,
            source_id = mv.record.source_id,
            "Tile moved"
        );
    }
}

/// Move every tile of the batch from `from` to `to`.
pub fn apply_tile_moves<L: TileLayer>(board: &mut Board<L>, moves: &[TileMove]) {
    relocate(board, moves, false);
}

/// Move every tile of the batch from `to` back to `from`.
pub fn revert_tile_moves<L: TileLayer>(board: &mut Board<L>, moves: &[TileMove]) {
    relocate(board, moves, true);
}

/// Record a committed tile batch.
///
/// With `chain` set, a move whose source is the destination of an entry in
/// the batch on top of the undo stack rewrites that entry instead of being
/// appended, so one undo returns the tile to its true origin. The redo stack
/// is cleared either way.
pub fn record_tile_moves(
    history: &mut History,
    moves: Vec<TileMove>,
    chain: bool,
) -> ChainSummary {
    let mut summary = ChainSummary::default();
    let mut fresh = Vec::with_capacity(moves.len());

    for mv in moves {
        if chain && chain_into_top(history, &mv) {
            summary.chained += 1;
        } else {
            fresh.push(mv);
        }
    }

    summary.appended = fresh.len();
    if fresh.is_empty() {
        history.clear_redo();
    } else {
        history.record(EditRecord::TileMoveBatch(fresh));
    }
    summary
}

fn chain_into_top(history: &mut History, mv: &TileMove) -> bool {
    let Some(batch) = history.last_tile_batch_mut() else {
        return false;
    };
    let Some(entry) = batch.iter_mut().find(|entry| entry.to == mv.from) else {
        return false;
    };

    if entry.record != mv.record {
        let err = EditorError::ChainInconsistency {
            cell: mv.from,
            message: format!(
                "history expects {:?} but the layer holds {:?}",
                entry.record, mv.record
            ),
        };
        tracing::error!(%err, "Appending a fresh entry instead of chaining");
        return false;
    }

    tracing::debug!(origin = %entry.from, via = %mv.from, to = %mv.to, "Chained tile move");
    entry.to = mv.to;
    true
}

/// Where an obstacle with `footprint` anchored at `anchor` is drawn: the
/// anchor cell's center shifted by the footprint centroid.
#[must_use]
pub fn placed_world_position(
    footprint: &Footprint,
    anchor: GridCell,
    tile_size: Vec2Fixed,
) -> Vec2Fixed {
    cell_center(anchor, tile_size) + tile_size.mul_components(footprint.centroid())
}

/// Mark every cell of the placement occupied and shadow its navigation.
pub fn occupy_footprint<L: TileLayer>(board: &mut Board<L>, placement: &ObjectPlacement) {
    for cell in placement.cells() {
        board.shadow.shadow(&mut board.nav, cell);
        board.objects.insert(cell);
    }
}

/// Release every cell of the placement and restore its navigation.
pub fn vacate_footprint<L: TileLayer>(board: &mut Board<L>, placement: &ObjectPlacement) {
    for cell in placement.cells() {
        board.objects.remove(cell);
        board.shadow.restore(&mut board.nav, cell);
    }
}

/// Move the goal marker.
pub fn set_goal_position<L: TileLayer>(board: &mut Board<L>, position: Vec2Fixed) {
    board.goal.position = position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Goal;
    use crate::grid::default_tile_size;
    use crate::host::TemplateId;
    use crate::layer::{SparseLayer, TileRecord};
    use crate::math::Fixed;

    fn record(source_id: i32) -> TileRecord {
        TileRecord::new(source_id, GridCell::ZERO)
    }

    fn nav_record() -> TileRecord {
        TileRecord::new(0, GridCell::new(1, 0))
    }

    fn board_with(tiles: &[(i32, i32, i32)]) -> Board<SparseLayer> {
        let mut layer = SparseLayer::new();
        let mut nav = SparseLayer::new();
        for x in 0..10 {
            for y in 0..10 {
                nav.set_tile(GridCell::new(x, y), nav_record());
            }
        }
        for &(x, y, source) in tiles {
            layer.set_tile(GridCell::new(x, y), record(source));
        }
        Board::new(layer, nav, Goal::new(Vec2Fixed::ZERO, Vec2Fixed::ZERO))
    }

    #[test]
    fn test_apply_and_revert_tile_moves() {
        let mut board = board_with(&[(2, 2, 3)]);
        let moves = plan_tile_moves(&board, &[GridCell::new(2, 2)], GridCell::new(3, 3));

        apply_tile_moves(&mut board, &moves);
        assert_eq!(board.tiles.get_tile(GridCell::new(5, 5)), Some(record(3)));
        assert!(!board.tiles.is_occupied(GridCell::new(2, 2)));
        assert_eq!(board.nav.get_tile(GridCell::new(2, 2)), Some(nav_record()));
        assert!(!board.nav.is_occupied(GridCell::new(5, 5)));
        assert_eq!(board.shadow.backup(GridCell::new(5, 5)), Some(nav_record()));

        revert_tile_moves(&mut board, &moves);
        assert_eq!(board.tiles.get_tile(GridCell::new(2, 2)), Some(record(3)));
        assert_eq!(board.nav.get_tile(GridCell::new(5, 5)), Some(nav_record()));
        assert!(!board.nav.is_occupied(GridCell::new(2, 2)));
        assert!(board.shadow.is_shadowed(GridCell::new(2, 2)));
        assert!(!board.shadow.is_shadowed(GridCell::new(5, 5)));
    }

    #[test]
    fn test_revert_handles_swapped_positions() {
        // After chaining, A -> E and E -> F share the cell E.
        let mut board = board_with(&[(4, 0, 1), (5, 0, 2)]);
        let moves = vec![
            TileMove {
                from: GridCell::new(0, 0),
                to: GridCell::new(4, 0),
                record: record(1),
            },
            TileMove {
                from: GridCell::new(4, 0),
                to: GridCell::new(5, 0),
                record: record(2),
            },
        ];
        revert_tile_moves(&mut board, &moves);
        assert_eq!(board.tiles.get_tile(GridCell::new(0, 0)), Some(record(1)));
        assert_eq!(board.tiles.get_tile(GridCell::new(4, 0)), Some(record(2)));
        assert!(!board.tiles.is_occupied(GridCell::new(5, 0)));
        assert_eq!(board.nav.get_tile(GridCell::new(5, 0)), Some(nav_record()));

        apply_tile_moves(&mut board, &moves);
        assert_eq!(board.tiles.get_tile(GridCell::new(4, 0)), Some(record(1)));
        assert_eq!(board.tiles.get_tile(GridCell::new(5, 0)), Some(record(2)));
        assert!(!board.tiles.is_occupied(GridCell::new(0, 0)));
    }

    #[test]
    fn test_record_chains_into_previous_batch() {
        let mut history = History::new();
        let first = TileMove {
            from: GridCell::new(0, 0),
            to: GridCell::new(1, 0),
            record: record(3),
        };
        record_tile_moves(&mut history, vec![first], true);

        let second = TileMove {
            from: GridCell::new(1, 0),
            to: GridCell::new(2, 0),
            record: record(3),
        };
        let summary = record_tile_moves(&mut history, vec![second], true);

        assert_eq!(
            summary,
            ChainSummary {
                chained: 1,
                appended: 0,
            }
        );
        assert_eq!(history.undo_len(), 1);
        assert_eq!(
            history.undo_stack()[0],
            EditRecord::TileMoveBatch(vec![TileMove {
                from: GridCell::new(0, 0),
                to: GridCell::new(2, 0),
                record: record(3),
            }])
        );
    }

    #[test]
    fn test_record_without_chain_appends() {
        let mut history = History::new();
        let first = TileMove {
            from: GridCell::new(0, 0),
            to: GridCell::new(1, 0),
            record: record(3),
        };
        record_tile_moves(&mut history, vec![first], true);
        let second = TileMove {
            from: GridCell::new(1, 0),
            to: GridCell::new(2, 0),
            record: record(3),
        };
        let summary = record_tile_moves(&mut history, vec![second], false);
        assert_eq!(summary.appended, 1);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_mixed_commit_splits_chained_and_fresh() {
        let mut history = History::new();
        let first = TileMove {
            from: GridCell::new(0, 0),
            to: GridCell::new(1, 0),
            record: record(3),
        };
        record_tile_moves(&mut history, vec![first], true);

        let moves = vec![
            TileMove {
                from: GridCell::new(1, 0),
                to: GridCell::new(1, 5),
                record: record(3),
            },
            TileMove {
                from: GridCell::new(7, 7),
                to: GridCell::new(0, 0),
                record: record(4),
            },
        ];
        let summary = record_tile_moves(&mut history, moves, true);
        assert_eq!(
            summary,
            ChainSummary {
                chained: 1,
                appended: 1,
            }
        );
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_mismatched_record_is_appended_not_chained() {
        let mut history = History::new();
        let first = TileMove {
            from: GridCell::new(0, 0),
            to: GridCell::new(1, 0),
            record: record(3),
        };
        record_tile_moves(&mut history, vec![first], true);

        let stranger = TileMove {
            from: GridCell::new(1, 0),
            to: GridCell::new(2, 0),
            record: record(4),
        };
        let summary = record_tile_moves(&mut history, vec![stranger], true);

        assert_eq!(
            summary,
            ChainSummary {
                chained: 0,
                appended: 1,
            }
        );
        assert_eq!(
            history.undo_stack(),
            &[
                EditRecord::TileMoveBatch(vec![first]),
                EditRecord::TileMoveBatch(vec![stranger]),
            ]
        );
    }

    #[test]
    fn test_placed_world_position_saturates() {
        let far = GridCell::new(i32::MAX, i32::MIN);
        let position = placed_world_position(&Footprint::anchor_only(), far, default_tile_size());
        assert_eq!(position.x, Fixed::MAX);
        assert_eq!(position.y, Fixed::MIN + Fixed::from_num(4));
    }

    #[test]
    fn test_occupy_and_vacate_footprint() {
        let mut board = board_with(&[]);
        let placement = ObjectPlacement {
            template: TemplateId(1),
            world_position: Vec2Fixed::ZERO,
            footprint: Footprint::new([GridCell::ZERO, GridCell::new(1, 0)]),
            origin: GridCell::new(3, 3),
        };

        occupy_footprint(&mut board, &placement);
        assert!(board.objects.contains(GridCell::new(4, 3)));
        assert!(!board.nav.is_occupied(GridCell::new(3, 3)));
        assert_eq!(board.shadow.len(), 2);

        vacate_footprint(&mut board, &placement);
        assert!(board.objects.is_empty());
        assert!(board.shadow.is_empty());
        assert_eq!(board.nav.get_tile(GridCell::new(4, 3)), Some(nav_record()));
    }

    #[test]
    fn test_placed_world_position_uses_centroid() {
        let footprint = Footprint::new([GridCell::ZERO, GridCell::new(1, 0)]);
        let position = placed_world_position(&footprint, GridCell::new(2, 2), default_tile_size());
        // center (20, 20) plus half a tile to the right
        assert_eq!(position, Vec2Fixed::from_ints(24, 20));
    }
}
