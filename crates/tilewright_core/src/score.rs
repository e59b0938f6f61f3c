//! Score keeping.
//!
//! Moving bricks, placing obstacles and using undo/redo all cost points;
//! collecting gold earns them. The final score is scaled by how efficiently
//! the level was solved compared to its requirements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::host::ScoreSink;

/// Score a fresh session starts with.
pub const STARTING_SCORE: i64 = 100;
/// Points weight of one placed obstacle in the object counter.
pub const OBJECT_PLACEMENT_COST: u32 = 15;
/// Points weight of one undo/redo in the object counter.
pub const UNDO_REDO_COST: u32 = 5;
/// Multiplier applied to collected gold.
pub const LEVEL_DIFFICULTY_MULTIPLIER: f64 = 1.3;

/// Minimum bricks / obstacles a level needs to be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirement {
    /// Minimum brick moves.
    pub min_bricks: u32,
    /// Minimum obstacle placements.
    pub min_objects: u32,
}

impl Default for LevelRequirement {
    fn default() -> Self {
        Self {
            min_bricks: 2,
            min_objects: 2,
        }
    }
}

/// What a HUD shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Current score.
    pub score: i64,
    /// Gold collected.
    pub gold: u32,
    /// Weighted object counter.
    pub object_place_count: u32,
}

impl ScoreSnapshot {
    /// Zero-padded strings for the score, gold and object counters.
    #[must_use]
    pub fn formatted(&self) -> (String, String, String) {
        (
            format!("{:07}", self.score),
            format!("{:03}", self.gold),
            format!("{:03}", self.object_place_count),
        )
    }
}

/// Session score counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Gold collected.
    pub gold: u32,
    /// Weighted count of bricks, obstacles and undo/redo use.
    pub object_place_count: u32,
    /// Bricks moved.
    pub bricks_placed: u32,
    /// Undo/redo steps applied.
    pub undo_count: u32,
    /// Current level number.
    pub current_level: u32,
    /// Current score.
    pub score: i64,
    requirements: BTreeMap<u32, LevelRequirement>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        let mut requirements = BTreeMap::new();
        requirements.insert(1, LevelRequirement::default());
        let mut board = Self {
            gold: 0,
            object_place_count: 0,
            bricks_placed: 0,
            undo_count: 0,
            current_level: 1,
            score: STARTING_SCORE,
            requirements,
        };
        board.recalculate();
        board
    }
}

impl ScoreBoard {
    /// Fresh board for level 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the requirement for a level.
    pub fn set_requirement(&mut self, level: u32, requirement: LevelRequirement) {
        self.requirements.insert(level, requirement);
        self.recalculate();
    }

    /// Gold was picked up.
    pub fn register_gold_collect(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
        self.recalculate();
    }

    /// Recompute the score from the counters.
    pub fn recalculate(&mut self) {
        let requirement = self
            .requirements
            .get(&self.current_level)
            .copied()
            .unwrap_or_default();

        let spent = f64::from(self.object_place_count)
            + f64::from(self.bricks_placed)
            + f64::from(self.undo_count);
        let base = f64::from(self.gold) * LEVEL_DIFFICULTY_MULTIPLIER - spent;

        let object_budget = requirement.min_objects.saturating_mul(OBJECT_PLACEMENT_COST);
        let multiplier = if self.bricks_placed <= requirement.min_bricks
            && self.object_place_count <= object_budget
        {
            1.2
        } else if self.bricks_placed > requirement.min_bricks.saturating_mul(3)
            || self.object_place_count > object_budget.saturating_mul(3)
        {
            0.7
        } else {
            1.0
        };

        self.score = ((base * multiplier).round() as i64).max(0);
        tracing::debug!(
            score = self.score,
            gold = self.gold,
            objects = self.object_place_count,
            "Score updated"
        );
    }

    /// Back to a fresh session on the current level.
    pub fn reset(&mut self) {
        self.gold = 0;
        self.object_place_count = 0;
        self.bricks_placed = 0;
        self.undo_count = 0;
        self.score = STARTING_SCORE;
        self.recalculate();
    }

    /// Values for display.
    #[must_use]
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            gold: self.gold,
            object_place_count: self.object_place_count,
        }
    }
}

impl ScoreSink for ScoreBoard {
    fn register_brick_move(&mut self, count: u32) {
        self.bricks_placed = self.bricks_placed.saturating_add(count);
        self.object_place_count = self.object_place_count.saturating_add(count);
        self.recalculate();
    }

    fn register_object_placement(&mut self, count: u32) {
        self.object_place_count = self
            .object_place_count
            .saturating_add(count.saturating_mul(OBJECT_PLACEMENT_COST));
        self.recalculate();
    }

    fn register_undo_redo(&mut self) {
        self.undo_count = self.undo_count.saturating_add(1);
        self.object_place_count = self.object_place_count.saturating_add(UNDO_REDO_COST);
        self.recalculate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_scores_zero() {
        // No gold yet: base is 0 regardless of the efficiency bonus.
        let board = ScoreBoard::new();
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_efficient_run_gets_bonus() {
        let mut board = ScoreBoard::new();
        board.register_gold_collect(50);
        board.register_brick_move(2);
        // base = 65 - (2 + 2) = 61, bonus 1.2 -> 73.2
        assert_eq!(board.score, 73);
    }

    #[test]
    fn test_wasteful_run_is_penalised() {
        let mut board = ScoreBoard::new();
        board.register_gold_collect(100);
        board.register_brick_move(7);
        // base = 130 - (7 + 7) = 116, penalty 0.7 -> 81.2
        assert_eq!(board.score, 81);
    }

    #[test]
    fn test_undo_redo_costs() {
        let mut board = ScoreBoard::new();
        board.register_gold_collect(100);
        board.register_undo_redo();
        assert_eq!(board.undo_count, 1);
        assert_eq!(board.object_place_count, UNDO_REDO_COST);
        // base = 130 - (5 + 0 + 1) = 124, bonus 1.2 -> 148.8
        assert_eq!(board.score, 149);
    }

    #[test]
    fn test_score_never_negative() {
        let mut board = ScoreBoard::new();
        board.register_object_placement(3);
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_unknown_level_uses_default_requirement() {
        let mut board = ScoreBoard::new();
        board.current_level = 9;
        board.register_gold_collect(10);
        // 13 * 1.2 = 15.6
        assert_eq!(board.score, 16);
    }

    #[test]
    fn test_counters_saturate() {
        let mut board = ScoreBoard::new();
        board.register_gold_collect(u32::MAX);
        board.register_gold_collect(1);
        assert_eq!(board.gold, u32::MAX);
        assert!(board.score > 0);

        board.register_brick_move(u32::MAX);
        board.register_object_placement(u32::MAX);
        board.register_undo_redo();
        assert_eq!(board.bricks_placed, u32::MAX);
        assert_eq!(board.object_place_count, u32::MAX);
        assert_eq!(board.undo_count, 1);
    }

    #[test]
    fn test_huge_requirement_does_not_overflow() {
        let mut board = ScoreBoard::new();
        board.set_requirement(
            1,
            LevelRequirement {
                min_bricks: u32::MAX,
                min_objects: u32::MAX,
            },
        );
        board.register_gold_collect(100);
        board.register_object_placement(1);
        // base = 130 - 15 = 115, bonus 1.2 -> 138
        assert_eq!(board.score, 138);
    }

    #[test]
    fn test_snapshot_formatting() {
        let snapshot = ScoreSnapshot {
            score: 42,
            gold: 7,
            object_place_count: 15,
        };
        let (score, gold, objects) = snapshot.formatted();
        assert_eq!(score, "0000042");
        assert_eq!(gold, "007");
        assert_eq!(objects, "015");
    }

    #[test]
    fn test_reset() {
        let mut board = ScoreBoard::new();
        board.register_gold_collect(10);
        board.register_brick_move(4);
        board.reset();
        assert_eq!(board.gold, 0);
        assert_eq!(board.bricks_placed, 0);
        assert_eq!(board.score, 0);
    }
}
