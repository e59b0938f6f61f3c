//! Undo/redo benchmarks for tilewright_core.
//!
//! Run with: `cargo bench -p tilewright_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tilewright_core::footprint::Footprint;
use tilewright_core::grid::GridCell;
use tilewright_test_utils::fixtures::{editor_with_bricks, TestEditor, CRATE_TEMPLATE};
use tilewright_test_utils::script::{apply, EditOp};

const BOARD: i32 = 64;

/// Editor with one obstacle on every cell of rows 1..=8, one history entry each.
fn editor_with_placements() -> TestEditor {
    let mut editor = editor_with_bricks(BOARD, &[]);
    for y in 1..=8 {
        for x in 0..BOARD {
            apply(
                &mut editor,
                &EditOp::PlaceObstacle {
                    template: CRATE_TEMPLATE,
                    footprint: Footprint::anchor_only(),
                    anchor: GridCell::new(x, y),
                },
            );
        }
    }
    editor
}

/// Editor with a row of bricks whose first brick walks upward one step per commit.
fn editor_with_chained_walk(steps: i32) -> TestEditor {
    let bricks: Vec<(i32, i32)> = (0..BOARD).map(|x| (x, 1)).collect();
    let mut editor = editor_with_bricks(BOARD, &bricks);
    for step in 0..steps {
        apply(
            &mut editor,
            &EditOp::MoveTile {
                from: GridCell::new(0, 1 + step),
                offset: GridCell::new(0, 1),
            },
        );
    }
    editor
}

pub fn history_benchmark(c: &mut Criterion) {
    c.bench_function("undo_redo_512_placements", |b| {
        b.iter_batched(
            editor_with_placements,
            |mut editor| {
                while editor.undo() {}
                while editor.redo() {}
                black_box(editor.history().undo_len())
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("chained_walk_32_steps", |b| {
        b.iter(|| black_box(editor_with_chained_walk(32).history().undo_len()));
    });

    c.bench_function("undo_chained_batch", |b| {
        b.iter_batched(
            || editor_with_chained_walk(32),
            |mut editor| black_box(editor.undo()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, history_benchmark);
criterion_main!(benches);
