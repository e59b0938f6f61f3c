//! Selection and drag state.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::grid::GridCell;
use crate::host::{InstanceHandle, TemplateId};
use crate::math::Vec2Fixed;

/// The ordered multi-select plus the live drag offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    cells: Vec<GridCell>,
    offset: GridCell,
    last_hovered: GridCell,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            offset: GridCell::ZERO,
            last_hovered: GridCell::NONE,
        }
    }
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected cells in selection order.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Current drag offset.
    #[must_use]
    pub const fn offset(&self) -> GridCell {
        self.offset
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` is selected.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Drop every selected cell and reset the offset.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.offset = GridCell::ZERO;
        self.last_hovered = GridCell::NONE;
    }

    /// Replace the selection with a single cell.
    pub fn select_single(&mut self, cell: GridCell) {
        self.clear();
        self.cells.push(cell);
    }

    /// Append `cell` unless it is already selected. Returns whether it was added.
    pub fn add(&mut self, cell: GridCell) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    /// Recompute the offset so the first selected cell follows `hovered`.
    ///
    /// Returns `false` when the hovered cell has not changed since the last call.
    pub fn track(&mut self, hovered: GridCell) -> bool {
        let Some(first) = self.cells.first() else {
            return false;
        };
        if hovered == self.last_hovered {
            return false;
        }
        self.offset = hovered - *first;
        self.last_hovered = hovered;
        true
    }

    /// Live destination of every selected cell.
    pub fn destinations(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().map(|cell| *cell + self.offset)
    }
}

/// An obstacle instance following the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingObstacle {
    /// Template being placed.
    pub template: TemplateId,
    /// Footprint fixed when placement began.
    pub footprint: Footprint,
    /// Preview instance owned by the host.
    pub handle: InstanceHandle,
    /// Cell under the cursor.
    pub anchor: GridCell,
}

/// Goal marker picked up by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalDrag {
    /// Cell the goal was on when picked up.
    pub origin_cell: GridCell,
    /// World position to snap back to on rejection.
    pub origin_world: Vec2Fixed,
}

/// Interaction state of the editor.
///
/// A single left-click selection goes straight to `DraggingForPlacement`,
/// so there is no separate single-selected state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Right button held, hovered tiles join the selection.
    DragAccumulating,
    /// Selection fixed, destinations follow the cursor until a left-click.
    DraggingForPlacement,
    /// An obstacle follows the cursor.
    PlacingObstacle(PendingObstacle),
    /// The goal marker follows the cursor.
    DraggingGoal(GoalDrag),
}

/// Serializable name of an [`EditorMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// See [`EditorMode::Idle`].
    Idle,
    /// See [`EditorMode::DragAccumulating`].
    DragAccumulating,
    /// See [`EditorMode::DraggingForPlacement`].
    DraggingForPlacement,
    /// See [`EditorMode::PlacingObstacle`].
    PlacingObstacle,
    /// See [`EditorMode::DraggingGoal`].
    DraggingGoal,
}

impl EditorMode {
    /// Name of the mode without its payload.
    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Idle => ModeKind::Idle,
            Self::DragAccumulating => ModeKind::DragAccumulating,
            Self::DraggingForPlacement => ModeKind::DraggingForPlacement,
            Self::PlacingObstacle(_) => ModeKind::PlacingObstacle,
            Self::DraggingGoal(_) => ModeKind::DraggingGoal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_single_replaces() {
        let mut selection = Selection::new();
        selection.add(GridCell::new(1, 1));
        selection.add(GridCell::new(2, 1));
        selection.select_single(GridCell::new(5, 5));
        assert_eq!(selection.cells(), &[GridCell::new(5, 5)]);
    }

    #[test]
    fn test_add_ignores_duplicates() {
        let mut selection = Selection::new();
        assert!(selection.add(GridCell::new(1, 1)));
        assert!(!selection.add(GridCell::new(1, 1)));
        assert_eq!(selection.cells().len(), 1);
    }

    #[test]
    fn test_track_offsets_from_first_cell() {
        let mut selection = Selection::new();
        selection.add(GridCell::new(2, 2));
        selection.add(GridCell::new(3, 2));

        assert!(selection.track(GridCell::new(5, 5)));
        assert_eq!(selection.offset(), GridCell::new(3, 3));
        assert_eq!(
            selection.destinations().collect::<Vec<_>>(),
            vec![GridCell::new(5, 5), GridCell::new(6, 5)]
        );
        assert!(!selection.track(GridCell::new(5, 5)));
    }

    #[test]
    fn test_track_without_selection() {
        let mut selection = Selection::new();
        assert!(!selection.track(GridCell::new(1, 1)));
        assert_eq!(selection.offset(), GridCell::ZERO);
    }
}
