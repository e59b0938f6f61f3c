//! Edit scripts.
//!
//! An [`EditOp`] is one user gesture expressed in grid terms. [`apply`] turns
//! it into the pointer calls a player would make, so scripts exercise the
//! same state machine as real input. Gestures that end up rejected are
//! cancelled so the next op always starts from an idle editor.

use tilewright_core::editor::{EditorEvent, PointerButton};
use tilewright_core::footprint::Footprint;
use tilewright_core::grid::GridCell;
use tilewright_core::host::TemplateId;

use crate::fixtures::{at, TestEditor};

/// One scripted gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Left-click `from`, then left-click `from + offset`.
    MoveTile {
        /// Cell to pick up.
        from: GridCell,
        /// Drag offset.
        offset: GridCell,
    },
    /// Right-drag over `cells`, then left-click the first cell shifted by `offset`.
    MoveGroup {
        /// Cells to accumulate, in drag order.
        cells: Vec<GridCell>,
        /// Drag offset.
        offset: GridCell,
    },
    /// Place an obstacle with an explicit footprint at `anchor`.
    PlaceObstacle {
        /// Template to place.
        template: TemplateId,
        /// Footprint to use.
        footprint: Footprint,
        /// Cell to click.
        anchor: GridCell,
    },
    /// Drag the goal to `to`.
    MoveGoal {
        /// Destination cell.
        to: GridCell,
    },
    /// Undo.
    Undo,
    /// Redo.
    Redo,
}

impl EditOp {
    /// Whether the op is a commit rather than a history command.
    #[must_use]
    pub const fn is_commit(&self) -> bool {
        !matches!(self, Self::Undo | Self::Redo)
    }
}

fn click(editor: &mut TestEditor, cell: GridCell) {
    let world = at(cell.x, cell.y);
    editor.on_pointer_move(world);
    editor.on_pointer_down(world, PointerButton::Left);
    editor.on_pointer_up(world, PointerButton::Left);
}

/// Perform `op` on `editor` and return the events it produced.
pub fn apply(editor: &mut TestEditor, op: &EditOp) -> Vec<EditorEvent> {
    editor.drain_events();
    match op {
        EditOp::MoveTile { from, offset } => {
            click(editor, *from);
            click(editor, *from + *offset);
        }
        EditOp::MoveGroup { cells, offset } => {
            let Some(first) = cells.first() else {
                return editor.drain_events();
            };
            for (index, cell) in cells.iter().enumerate() {
                let world = at(cell.x, cell.y);
                editor.on_pointer_move(world);
                if index == 0 {
                    editor.on_pointer_down(world, PointerButton::Right);
                }
            }
            let last = cells.last().copied().unwrap_or(*first);
            editor.on_pointer_up(at(last.x, last.y), PointerButton::Right);
            click(editor, *first + *offset);
        }
        EditOp::PlaceObstacle {
            template,
            footprint,
            anchor,
        } => {
            if editor
                .begin_placing_object(*template, Some(footprint.clone()))
                .is_ok()
            {
                click(editor, *anchor);
            }
        }
        EditOp::MoveGoal { to } => {
            let goal = editor.goal().position;
            editor.on_pointer_move(goal);
            editor.on_pointer_down(goal, PointerButton::Left);
            editor.on_pointer_move(at(to.x, to.y));
            editor.on_pointer_up(at(to.x, to.y), PointerButton::Left);
        }
        EditOp::Undo => {
            editor.undo();
        }
        EditOp::Redo => {
            editor.redo();
        }
    }
    editor.cancel_placement();
    editor.drain_events()
}

/// Whether `events` contain an accepted commit.
#[must_use]
pub fn committed(events: &[EditorEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            EditorEvent::TilesMoved { .. }
                | EditorEvent::ObjectPlaced { .. }
                | EditorEvent::GoalMoved { .. }
        )
    })
}

/// Proptest strategies for edit scripts.
///
/// Cells stay inside a small board so that collisions, chaining and
/// rejections all happen often.
pub mod strategies {
    use proptest::prelude::*;
    use tilewright_core::footprint::Footprint;
    use tilewright_core::grid::GridCell;
    use tilewright_core::host::TemplateId;

    use super::EditOp;
    use crate::fixtures::{CRATE_TEMPLATE, DRUM_TEMPLATE};

    /// Board edge length used by the strategies.
    pub const BOARD: i32 = 8;

    /// A cell on the board, leaving the goal's corner alone.
    pub fn arb_cell() -> impl Strategy<Value = GridCell> {
        (0..BOARD, 1..BOARD).prop_map(|(x, y)| GridCell::new(x, y))
    }

    /// A short drag offset.
    pub fn arb_offset() -> impl Strategy<Value = GridCell> {
        (-3i32..=3, -3i32..=3).prop_map(|(x, y)| GridCell::new(x, y))
    }

    /// One of the two test templates with its footprint.
    pub fn arb_template() -> impl Strategy<Value = (TemplateId, Footprint)> {
        prop_oneof![
            Just((
                DRUM_TEMPLATE,
                Footprint::new([GridCell::ZERO, GridCell::new(1, 0)])
            )),
            Just((CRATE_TEMPLATE, Footprint::anchor_only())),
        ]
    }

    /// Starting brick positions.
    pub fn arb_bricks(max: usize) -> impl Strategy<Value = Vec<(i32, i32)>> {
        proptest::collection::btree_set((0..BOARD, 1..BOARD), 1..max)
            .prop_map(|cells| cells.into_iter().collect())
    }

    /// Any commit gesture.
    pub fn arb_commit() -> impl Strategy<Value = EditOp> {
        prop_oneof![
            4 => (arb_cell(), arb_offset())
                .prop_map(|(from, offset)| EditOp::MoveTile { from, offset }),
            2 => (proptest::collection::vec(arb_cell(), 1..4), arb_offset())
                .prop_map(|(cells, offset)| EditOp::MoveGroup { cells, offset }),
            2 => (arb_template(), arb_cell()).prop_map(|((template, footprint), anchor)| {
                EditOp::PlaceObstacle { template, footprint, anchor }
            }),
            1 => arb_cell().prop_map(|to| EditOp::MoveGoal { to }),
        ]
    }

    /// A sequence of commits only.
    pub fn arb_commit_script(max_len: usize) -> impl Strategy<Value = Vec<EditOp>> {
        proptest::collection::vec(arb_commit(), 1..max_len)
    }

    /// A sequence mixing commits with undo and redo.
    pub fn arb_edit_script(max_len: usize) -> impl Strategy<Value = Vec<EditOp>> {
        let op = prop_oneof![
            6 => arb_commit(),
            2 => Just(EditOp::Undo),
            1 => Just(EditOp::Redo),
        ];
        proptest::collection::vec(op, 1..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::editor_with_bricks;
    use tilewright_core::layer::TileLayer;

    #[test]
    fn test_move_tile_op() {
        let mut editor = editor_with_bricks(8, &[(2, 2)]);
        let events = apply(
            &mut editor,
            &EditOp::MoveTile {
                from: GridCell::new(2, 2),
                offset: GridCell::new(1, 1),
            },
        );
        assert!(committed(&events));
        assert!(editor.tiles().get_tile(GridCell::new(3, 3)).is_some());
    }

    #[test]
    fn test_rejected_op_leaves_editor_idle() {
        let mut editor = editor_with_bricks(8, &[(2, 2), (3, 2)]);
        let events = apply(
            &mut editor,
            &EditOp::MoveTile {
                from: GridCell::new(2, 2),
                offset: GridCell::new(1, 0),
            },
        );
        assert!(!committed(&events));
        assert!(editor.selection().is_empty());
        assert_eq!(editor.history().undo_len(), 0);
    }

    #[test]
    fn test_group_move_op() {
        let mut editor = editor_with_bricks(8, &[(2, 2), (3, 2)]);
        let events = apply(
            &mut editor,
            &EditOp::MoveGroup {
                cells: vec![GridCell::new(2, 2), GridCell::new(3, 2)],
                offset: GridCell::new(0, 3),
            },
        );
        assert!(committed(&events));
        assert!(editor.tiles().get_tile(GridCell::new(2, 5)).is_some());
        assert!(editor.tiles().get_tile(GridCell::new(3, 5)).is_some());
    }
}
