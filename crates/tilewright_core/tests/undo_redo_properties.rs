//! Property tests for the undo/redo engine.

use proptest::prelude::*;

use tilewright_core::grid::GridCell;
use tilewright_core::layer::TileLayer;
use tilewright_test_utils::fingerprint::{verify_determinism, StateFingerprint};
use tilewright_test_utils::fixtures::{editor_with_bricks, TestEditor};
use tilewright_test_utils::script::strategies::{
    arb_bricks, arb_commit_script, arb_edit_script, BOARD,
};
use tilewright_test_utils::script::{apply, committed, EditOp};

fn obstruction_violations(editor: &TestEditor) -> Vec<String> {
    let mut violations = editor.board().invariant_violations();
    for (cell, _) in editor.shadow().iter() {
        if !editor.tiles().is_occupied(cell) && !editor.objects().contains(cell) {
            violations.push(format!("{cell} is backed up but nothing covers it"));
        }
    }
    for (cell, _) in editor.tiles().iter() {
        if editor.nav().is_occupied(cell) {
            violations.push(format!("{cell} has a tile over live navigation"));
        }
    }
    for cell in editor.objects().iter() {
        if editor.nav().is_occupied(cell) {
            violations.push(format!("{cell} has an obstacle over live navigation"));
        }
    }
    violations
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Undoing every accepted commit returns to the starting state, and
    /// redoing them reproduces the final state.
    #[test]
    fn prop_undo_redo_inverse_law(
        bricks in arb_bricks(12),
        script in arb_commit_script(16),
    ) {
        let mut editor = editor_with_bricks(BOARD, &bricks);
        let before = StateFingerprint::capture(&editor);

        let mut commits = 0;
        for op in &script {
            if committed(&apply(&mut editor, op)) {
                commits += 1;
            }
        }
        let after = StateFingerprint::capture(&editor);

        for _ in 0..commits {
            editor.undo();
        }
        prop_assert_eq!(StateFingerprint::capture(&editor), before);

        for _ in 0..commits {
            editor.redo();
        }
        prop_assert_eq!(StateFingerprint::capture(&editor), after);
    }

    /// A gesture that does not commit leaves every piece of state untouched.
    #[test]
    fn prop_rejected_commits_change_nothing(
        bricks in arb_bricks(16),
        script in arb_edit_script(20),
    ) {
        let mut editor = editor_with_bricks(BOARD, &bricks);
        for op in &script {
            let before = StateFingerprint::capture(&editor);
            let undo_len = editor.history().undo_len();
            let events = apply(&mut editor, op);
            if op.is_commit() && !committed(&events) {
                prop_assert_eq!(StateFingerprint::capture(&editor), before);
                prop_assert_eq!(editor.history().undo_len(), undo_len);
            }
        }
    }

    /// Navigation backups exist exactly under obstructions, and no cell is
    /// ever covered by both a tile and an obstacle.
    #[test]
    fn prop_shadow_conservation(
        bricks in arb_bricks(16),
        script in arb_edit_script(24),
    ) {
        let mut editor = editor_with_bricks(BOARD, &bricks);
        for op in &script {
            apply(&mut editor, op);
            let violations = obstruction_violations(&editor);
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", op, violations);
        }
    }

    /// Replaying a script from the same setup always ends in the same state.
    #[test]
    fn prop_replay_is_deterministic(
        bricks in arb_bricks(12),
        script in arb_edit_script(20),
    ) {
        let result = verify_determinism(
            3,
            || editor_with_bricks(BOARD, &bricks),
            |editor| {
                for op in &script {
                    apply(editor, op);
                }
            },
        );
        prop_assert!(result.is_deterministic);
    }

    /// Moving one tile step by step produces a single history entry.
    #[test]
    fn prop_chained_steps_collapse(steps in 1usize..6) {
        let mut editor = editor_with_bricks(BOARD, &[(0, 1)]);
        for step in 0..steps {
            let from = GridCell::new(i32::try_from(step).unwrap(), 1);
            let events = apply(
                &mut editor,
                &EditOp::MoveTile { from, offset: GridCell::new(1, 0) },
            );
            prop_assert!(committed(&events));
        }
        prop_assert_eq!(editor.history().undo_len(), 1);

        editor.undo();
        prop_assert!(editor.tiles().is_occupied(GridCell::new(0, 1)));
        prop_assert_eq!(editor.tiles().len(), 1);
    }
}
