//! Edit history.
//!
//! Every accepted edit becomes an [`EditRecord`] on the undo stack. Undo moves
//! the record to the redo stack; redo moves it back. A fresh edit clears the
//! redo stack. Both stacks are bounded only by memory.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::grid::GridCell;
use crate::host::TemplateId;
use crate::layer::TileRecord;
use crate::math::Vec2Fixed;

/// One tile relocation inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMove {
    /// Where the tile came from (its true origin once chained).
    pub from: GridCell,
    /// Where the tile is now.
    pub to: GridCell,
    /// The tile that moved.
    pub record: TileRecord,
}

/// A committed obstacle placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    /// Which obstacle template was placed.
    pub template: TemplateId,
    /// World position the instance was placed at.
    pub world_position: Vec2Fixed,
    /// Cells covered, relative to `origin`.
    pub footprint: Footprint,
    /// Anchor cell the footprint is relative to.
    pub origin: GridCell,
}

impl ObjectPlacement {
    /// Absolute cells covered by this placement.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.footprint.cells_at(self.origin)
    }
}

/// A committed goal-marker move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMove {
    /// Cell the goal was picked up from.
    pub from_cell: GridCell,
    /// Cell the goal was dropped on.
    pub to_cell: GridCell,
    /// World position before the drag.
    pub from_world: Vec2Fixed,
    /// World position after the drop.
    pub to_world: Vec2Fixed,
}

/// A reversible edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditRecord {
    /// One commit's worth of tile relocations, possibly chained.
    TileMoveBatch(Vec<TileMove>),
    /// An obstacle placement.
    ObjectPlacement(ObjectPlacement),
    /// A goal-marker move.
    GoalMove(GoalMove),
}

impl EditRecord {
    /// Short name for logs and events.
    #[must_use]
    pub const fn kind(&self) -> EditKind {
        match self {
            Self::TileMoveBatch(_) => EditKind::TileMove,
            Self::ObjectPlacement(_) => EditKind::ObjectPlacement,
            Self::GoalMove(_) => EditKind::GoalMove,
        }
    }
}

/// Discriminant of [`EditRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// Tile relocation batch.
    TileMove,
    /// Obstacle placement.
    ObjectPlacement,
    /// Goal move.
    GoalMove,
}

/// Undo and redo stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    undo: Vec<EditRecord>,
    redo: Vec<EditRecord>,
}

impl History {
    /// Create empty stacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh edit. Clears the redo stack.
    pub fn record(&mut self, record: EditRecord) {
        self.undo.push(record);
        self.redo.clear();
    }

    /// Clear the redo stack after an edit that extended an existing record
    /// instead of pushing a new one.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// The tile batch on top of the undo stack, if the top is one.
    pub fn last_tile_batch_mut(&mut self) -> Option<&mut Vec<TileMove>> {
        match self.undo.last_mut() {
            Some(EditRecord::TileMoveBatch(moves)) => Some(moves),
            _ => None,
        }
    }

    /// Pop the most recent edit for undoing.
    pub fn pop_undo(&mut self) -> Option<EditRecord> {
        self.undo.pop()
    }

    /// Pop the most recently undone edit for redoing.
    pub fn pop_redo(&mut self) -> Option<EditRecord> {
        self.redo.pop()
    }

    /// Park an undone record on the redo stack.
    pub fn push_redo(&mut self, record: EditRecord) {
        self.redo.push(record);
    }

    /// Return a redone record to the undo stack without touching redo.
    pub fn push_undo(&mut self, record: EditRecord) {
        self.undo.push(record);
    }

    /// Number of undoable edits.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable edits.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Undo stack, oldest first.
    #[must_use]
    pub fn undo_stack(&self) -> &[EditRecord] {
        &self.undo
    }

    /// Redo stack, oldest first.
    #[must_use]
    pub fn redo_stack(&self) -> &[EditRecord] {
        &self.redo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_move() -> EditRecord {
        EditRecord::GoalMove(GoalMove {
            from_cell: GridCell::ZERO,
            to_cell: GridCell::new(1, 0),
            from_world: Vec2Fixed::from_ints(4, 4),
            to_world: Vec2Fixed::from_ints(12, 4),
        })
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(goal_move());
        let popped = history.pop_undo().unwrap();
        history.push_redo(popped);
        assert_eq!(history.redo_len(), 1);

        history.record(goal_move());
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_last_tile_batch_only_when_on_top() {
        let mut history = History::new();
        history.record(EditRecord::TileMoveBatch(vec![]));
        assert!(history.last_tile_batch_mut().is_some());
        history.record(goal_move());
        assert!(history.last_tile_batch_mut().is_none());
    }

    #[test]
    fn test_kind() {
        assert_eq!(goal_move().kind(), EditKind::GoalMove);
        assert_eq!(
            EditRecord::TileMoveBatch(Vec::new()).kind(),
            EditKind::TileMove
        );
    }
}
