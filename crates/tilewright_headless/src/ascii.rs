//! ASCII level renderer for quick terminal review.
//!
//! One character per cell, rows top to bottom:
//!
//! | char | meaning |
//! |------|---------|
//! | `G`  | goal |
//! | `o`  | obstacle |
//! | `#`  | tile |
//! | `.`  | navigation only |
//! | ` `  | empty |

use tilewright_core::board::Board;
use tilewright_core::grid::{GridCell, GridRect};
use tilewright_core::layer::TileLayer;
use tilewright_core::math::Vec2Fixed;

/// Legend line printed under the grid.
pub const LEGEND: &str = "G goal  o obstacle  # tile  . navigation";

/// Character for a single cell.
pub fn cell_char<L: TileLayer>(board: &Board<L>, goal: GridCell, cell: GridCell) -> char {
    if cell == goal {
        'G'
    } else if board.objects().contains(cell) {
        'o'
    } else if board.tiles().is_occupied(cell) {
        '#'
    } else if board.nav().is_occupied(cell) {
        '.'
    } else {
        ' '
    }
}

fn corners(rect: GridRect) -> impl Iterator<Item = GridCell> {
    let far = GridCell::new(
        rect.position.x + rect.size.x - 1,
        rect.position.y + rect.size.y - 1,
    );
    (!rect.is_empty())
        .then_some([rect.position, far])
        .into_iter()
        .flatten()
}

/// Region covering every tile, navigation cell, obstacle and the goal.
pub fn board_bounds<L: TileLayer>(board: &Board<L>, goal: GridCell) -> GridRect {
    GridRect::enclosing(
        corners(board.tiles().used_rect())
            .chain(corners(board.nav().used_rect()))
            .chain(board.objects().iter())
            .chain(std::iter::once(goal)),
    )
}

/// Render the board, one line per row, without trailing spaces.
pub fn render_board<L: TileLayer>(board: &Board<L>, tile_size: Vec2Fixed) -> String {
    let goal = board.goal().cell(tile_size);
    let bounds = board_bounds(board, goal);

    let mut out = String::new();
    for y in bounds.position.y..bounds.position.y + bounds.size.y {
        let row: String = (bounds.position.x..bounds.position.x + bounds.size.x)
            .map(|x| cell_char(board, goal, GridCell::new(x, y)))
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewright_core::board::Goal;
    use tilewright_core::grid::{cell_center, default_tile_size};
    use tilewright_core::layer::{SparseLayer, TileRecord};

    fn board() -> Board<SparseLayer> {
        let mut tiles = SparseLayer::new();
        tiles.set_tile(GridCell::new(1, 1), TileRecord::new(3, GridCell::ZERO));
        let nav = SparseLayer::filled(
            GridRect {
                position: GridCell::ZERO,
                size: GridCell::new(3, 2),
            },
            TileRecord::new(0, GridCell::ZERO),
        );
        let goal = Goal::new(
            cell_center(GridCell::new(2, 0), default_tile_size()),
            default_tile_size(),
        );
        Board::new(tiles, nav, goal)
    }

    #[test]
    fn test_render_small_board() {
        let text = render_board(&board(), default_tile_size());
        assert_eq!(text, "..G\n.#.\n");
    }

    #[test]
    fn test_bounds_include_goal_outside_layers() {
        let base = board();
        let far = Goal::new(
            cell_center(GridCell::new(5, 3), default_tile_size()),
            default_tile_size(),
        );
        let moved = Board::new(base.tiles().clone(), base.nav().clone(), far);
        let bounds = board_bounds(&moved, far.cell(default_tile_size()));
        assert_eq!(bounds.size, GridCell::new(6, 4));
    }
}
