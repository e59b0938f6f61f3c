//! Mutable editing state: both layers, obstacle occupancy, the nav shadow and
//! the goal marker.

use serde::{Deserialize, Serialize};

use crate::grid::{world_to_cell, GridCell};
use crate::layer::TileLayer;
use crate::math::Vec2Fixed;
use crate::occupancy::{ObjectOccupancy, Occupancy};
use crate::shadow::NavShadow;

/// The goal marker. Not an obstacle: it never blocks or shadows anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// World position of the marker's center.
    pub position: Vec2Fixed,
    /// Extent of the marker's hit box.
    pub size: Vec2Fixed,
}

impl Goal {
    /// Create a goal centered on `position`.
    #[must_use]
    pub const fn new(position: Vec2Fixed, size: Vec2Fixed) -> Self {
        Self { position, size }
    }

    /// Whether `world` lies inside the marker's bounds.
    #[must_use]
    pub fn contains(&self, world: Vec2Fixed) -> bool {
        let half = self.size.half();
        let min = self.position - half;
        let max = self.position + half;
        world.x >= min.x && world.x < max.x && world.y >= min.y && world.y < max.y
    }

    /// Cell the marker's center is in.
    #[must_use]
    pub fn cell(&self, tile_size: Vec2Fixed) -> GridCell {
        world_to_cell(self.position, tile_size)
    }
}

/// Grid state the executor mutates.
#[derive(Debug, Clone)]
pub struct Board<L: TileLayer> {
    pub(crate) tiles: L,
    pub(crate) nav: L,
    pub(crate) objects: ObjectOccupancy,
    pub(crate) shadow: NavShadow,
    pub(crate) goal: Goal,
}

impl<L: TileLayer> Board<L> {
    /// Wrap the layers and hide navigation under every starting tile.
    pub fn new(tiles: L, mut nav: L, goal: Goal) -> Self {
        let mut shadow = NavShadow::new();
        shadow.scan_initial(&tiles, &mut nav);
        Self {
            tiles,
            nav,
            objects: ObjectOccupancy::new(),
            shadow,
            goal,
        }
    }

    /// Read-only occupancy view.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy<'_, L> {
        Occupancy::new(&self.tiles, &self.objects)
    }

    /// The tile layer.
    #[must_use]
    pub fn tiles(&self) -> &L {
        &self.tiles
    }

    /// The navigation layer.
    #[must_use]
    pub fn nav(&self) -> &L {
        &self.nav
    }

    /// Cells covered by placed obstacles.
    #[must_use]
    pub fn objects(&self) -> &ObjectOccupancy {
        &self.objects
    }

    /// Navigation backups.
    #[must_use]
    pub fn shadow(&self) -> &NavShadow {
        &self.shadow
    }

    /// The goal marker.
    #[must_use]
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Check the occupancy and shadow invariants, returning every violation.
    ///
    /// No cell may hold both a tile and an obstacle, and no backed-up cell may
    /// have a live navigation record.
    #[must_use]
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for cell in self.objects.iter() {
            if self.tiles.is_occupied(cell) {
                violations.push(format!("{cell} holds both a tile and an obstacle"));
            }
        }
        for (cell, _) in self.shadow.iter() {
            if self.nav.is_occupied(cell) {
                violations.push(format!("{cell} has a backup and a live navigation record"));
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{SparseLayer, TileRecord};

    #[test]
    fn test_goal_bounds() {
        let goal = Goal::new(Vec2Fixed::from_ints(20, 20), Vec2Fixed::from_ints(8, 8));
        assert!(goal.contains(Vec2Fixed::from_ints(16, 16)));
        assert!(goal.contains(Vec2Fixed::from_ints(23, 23)));
        assert!(!goal.contains(Vec2Fixed::from_ints(24, 20)));
        assert_eq!(goal.cell(Vec2Fixed::from_ints(8, 8)), GridCell::new(2, 2));
    }

    #[test]
    fn test_new_board_shadows_tiles() {
        let mut tiles = SparseLayer::new();
        tiles.set_tile(GridCell::new(1, 1), TileRecord::new(0, GridCell::ZERO));
        let mut nav = SparseLayer::new();
        nav.set_tile(GridCell::new(1, 1), TileRecord::new(9, GridCell::ZERO));
        nav.set_tile(GridCell::new(2, 1), TileRecord::new(9, GridCell::ZERO));

        let board = Board::new(tiles, nav, Goal::new(Vec2Fixed::ZERO, Vec2Fixed::ZERO));
        assert!(!board.nav().is_occupied(GridCell::new(1, 1)));
        assert!(board.nav().is_occupied(GridCell::new(2, 1)));
        assert!(board.shadow().is_shadowed(GridCell::new(1, 1)));
        assert!(board.invariant_violations().is_empty());
    }
}
