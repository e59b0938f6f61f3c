//! The editor facade.
//!
//! [`TileEditor`] turns pointer input into validated, reversible edits. It
//! owns the grid state and the history, and talks to its host for scoring,
//! rendering obstacle instances and drawing markers. Everything the host
//! might want to show the player is queued as an [`EditorEvent`].

use std::collections::BTreeMap;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Goal};
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::executor::{
    apply_tile_moves, occupy_footprint, placed_world_position, plan_tile_moves,
    record_tile_moves, revert_tile_moves, set_goal_position, vacate_footprint,
};
use crate::footprint::{extract_footprint, Footprint, MAX_FOOTPRINT_OFFSET};
use crate::grid::{cell_center, world_to_cell, GridCell};
use crate::history::{EditKind, EditRecord, GoalMove, History, ObjectPlacement};
use crate::host::{EditorHost, InstanceHandle, MarkerGroup, MarkerKind, TemplateId};
use crate::layer::TileLayer;
use crate::math::Vec2Fixed;
use crate::occupancy::{ObjectOccupancy, Occupancy};
use crate::selection::{EditorMode, GoalDrag, ModeKind, PendingObstacle, Selection};
use crate::shadow::NavShadow;
use crate::validator::{
    validate_footprint, validate_goal, validate_relocation, validate_tile_move, PlacementCheck,
};

/// Pointer buttons the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Select, commit, pick up the goal.
    Left,
    /// Accumulate a multi-select; cancels obstacle placement.
    Right,
}

/// Something the host may want to show the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    /// The selection was replaced, extended or cleared.
    SelectionChanged {
        /// Selected cells after the change.
        cells: Vec<GridCell>,
    },
    /// An obstacle now follows the cursor.
    PlacementStarted {
        /// Template being placed.
        template: TemplateId,
        /// Cells it will cover, relative to the cursor cell.
        footprint: Footprint,
    },
    /// An in-flight obstacle was discarded.
    PlacementCancelled {
        /// Template that was being placed.
        template: TemplateId,
    },
    /// A commit was refused because destinations are occupied.
    PlacementRejected {
        /// What was being committed.
        kind: EditKind,
        /// Blocked destination cells.
        cells: Vec<GridCell>,
    },
    /// Tiles were relocated.
    TilesMoved {
        /// Tiles moved by this commit.
        count: usize,
        /// How many of them extended the previous history entry.
        chained: usize,
    },
    /// An obstacle was placed.
    ObjectPlaced {
        /// Template placed.
        template: TemplateId,
        /// Anchor cell.
        origin: GridCell,
        /// World position of the instance.
        position: Vec2Fixed,
    },
    /// The goal marker was picked up.
    GoalPickedUp {
        /// Cell it was on.
        cell: GridCell,
    },
    /// The goal marker was dropped on a new cell.
    GoalMoved {
        /// Previous cell.
        from: GridCell,
        /// New cell.
        to: GridCell,
    },
    /// An edit was undone.
    Undone {
        /// Kind of the edit.
        kind: EditKind,
    },
    /// An edit was redone.
    Redone {
        /// Kind of the edit.
        kind: EditKind,
    },
    /// Undo was requested with an empty history.
    NothingToUndo,
    /// Redo was requested with nothing undone.
    NothingToRedo,
    /// Redo could not re-apply the edit; it stays on the redo stack.
    RedoBlocked {
        /// Kind of the edit.
        kind: EditKind,
        /// Blocked cells.
        cells: Vec<GridCell>,
    },
}

/// An obstacle instance the editor placed and may have to remove on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedInstance {
    /// Template the instance shows.
    pub template: TemplateId,
    /// Where it was placed.
    pub position: Vec2Fixed,
    /// Host handle.
    pub handle: InstanceHandle,
}

/// Grid tile and obstacle editor with undo/redo.
pub struct TileEditor<L: TileLayer, H: EditorHost> {
    config: EditorConfig,
    board: Board<L>,
    history: History,
    selection: Selection,
    mode: EditorMode,
    templates: BTreeMap<TemplateId, Footprint>,
    placed: Vec<PlacedInstance>,
    chain_open: bool,
    pointer_cell: Option<GridCell>,
    events: Vec<EditorEvent>,
    host: H,
}

impl<L: TileLayer, H: EditorHost> TileEditor<L, H> {
    /// Create an editor over `tiles` and `nav`.
    ///
    /// Fails if the configuration is unusable. Navigation under every
    /// starting tile is shadowed before the editor is returned.
    pub fn new(config: EditorConfig, tiles: L, nav: L, goal: Goal, host: H) -> Result<Self> {
        config.validate()?;
        let board = Board::new(tiles, nav, goal);
        tracing::info!(
            tile_size = ?config.tile_size.to_f32(),
            shadowed = board.shadow().len(),
            "Tile editor ready"
        );
        Ok(Self {
            config,
            board,
            history: History::new(),
            selection: Selection::new(),
            mode: EditorMode::Idle,
            templates: BTreeMap::new(),
            placed: Vec::new(),
            chain_open: false,
            pointer_cell: None,
            events: Vec::new(),
            host,
        })
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Register an obstacle template, deriving its footprint from `image`.
    ///
    /// No image, or a fully transparent one, registers an empty footprint;
    /// the configured policy decides what that means when placement begins.
    pub fn register_template(&mut self, id: TemplateId, image: Option<&RgbaImage>) -> Footprint {
        let footprint =
            extract_footprint(image, self.config.tile_size, self.config.alpha_threshold);
        self.register_template_footprint(id, footprint.clone());
        footprint
    }

    /// Register an obstacle template with an explicit footprint.
    pub fn register_template_footprint(&mut self, id: TemplateId, footprint: Footprint) {
        tracing::debug!(template = %id, cells = footprint.len(), "Template registered");
        self.templates.insert(id, footprint);
    }

    /// Registered templates and their footprints.
    #[must_use]
    pub fn templates(&self) -> &BTreeMap<TemplateId, Footprint> {
        &self.templates
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// A pointer button went down at `world`.
    pub fn on_pointer_down(&mut self, world: Vec2Fixed, button: PointerButton) {
        let cell = self.cell_at(world);
        self.pointer_cell = Some(cell);

        match (self.mode.kind(), button) {
            (ModeKind::PlacingObstacle, PointerButton::Left) => self.commit_obstacle(cell),
            (ModeKind::PlacingObstacle, PointerButton::Right) => {
                self.cancel_placement();
            }
            (ModeKind::DraggingGoal, _) => {}
            (_, PointerButton::Left) => self.left_press(world, cell),
            (_, PointerButton::Right) => self.right_press(cell),
        }
    }

    /// A pointer button was released at `world`.
    pub fn on_pointer_up(&mut self, world: Vec2Fixed, button: PointerButton) {
        let cell = self.cell_at(world);
        self.pointer_cell = Some(cell);

        match (self.mode.kind(), button) {
            (ModeKind::DragAccumulating, PointerButton::Right) => {
                self.mode = EditorMode::DraggingForPlacement;
                tracing::debug!(
                    selected = self.selection.cells().len(),
                    "Multi-select drag started"
                );
                if self.selection.track(cell) {
                    self.refresh_target_markers();
                }
            }
            (ModeKind::DraggingGoal, PointerButton::Left) => self.commit_goal(cell),
            _ => {}
        }
    }

    /// The pointer moved to `world`.
    pub fn on_pointer_move(&mut self, world: Vec2Fixed) {
        let cell = self.cell_at(world);
        if self.pointer_cell == Some(cell) {
            return;
        }
        self.pointer_cell = Some(cell);

        match self.mode.kind() {
            ModeKind::DragAccumulating => {
                if self.board.tiles.is_occupied(cell) && self.selection.add(cell) {
                    tracing::debug!(%cell, "Drag-selected");
                    self.selection_changed();
                }
            }
            ModeKind::DraggingForPlacement => {
                if self.selection.track(cell) {
                    self.refresh_target_markers();
                }
            }
            ModeKind::PlacingObstacle => self.follow_with_obstacle(cell),
            ModeKind::DraggingGoal => {
                set_goal_position(&mut self.board, cell_center(cell, self.config.tile_size));
            }
            ModeKind::Idle => {}
        }
    }

    fn left_press(&mut self, world: Vec2Fixed, cell: GridCell) {
        let kind = self.mode.kind();

        if kind == ModeKind::Idle && self.board.goal.contains(world) {
            let drag = GoalDrag {
                origin_cell: self.board.goal.cell(self.config.tile_size),
                origin_world: self.board.goal.position,
            };
            tracing::debug!(cell = %drag.origin_cell, "Goal picked up");
            self.events.push(EditorEvent::GoalPickedUp {
                cell: drag.origin_cell,
            });
            self.mode = EditorMode::DraggingGoal(drag);
            return;
        }

        if kind == ModeKind::DraggingForPlacement && !self.selection.is_empty() {
            if self.selection.track(cell) {
                self.refresh_target_markers();
            }
            self.commit_tiles();
            return;
        }

        if !self.board.tiles.is_occupied(cell) {
            tracing::debug!(%cell, "Ignoring click on empty cell");
            return;
        }

        self.selection.select_single(cell);
        self.mode = EditorMode::DraggingForPlacement;
        self.host.clear_markers(MarkerGroup::Targets);
        tracing::debug!(%cell, "Single-click selected");
        self.selection_changed();
    }

    fn right_press(&mut self, cell: GridCell) {
        if !self.board.tiles.is_occupied(cell) || self.selection.contains(cell) {
            tracing::debug!(%cell, "Ignoring right-click");
            return;
        }
        self.selection.add(cell);
        self.mode = EditorMode::DragAccumulating;
        tracing::debug!(%cell, "Started drag-selection");
        self.selection_changed();
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Start placing an obstacle that follows the cursor.
    ///
    /// Any in-flight interaction is cancelled first. Without an override the
    /// registered footprint is used.
    pub fn begin_placing_object(
        &mut self,
        template: TemplateId,
        footprint_override: Option<Footprint>,
    ) -> Result<()> {
        let footprint = match footprint_override {
            Some(footprint) => footprint,
            None => self
                .templates
                .get(&template)
                .cloned()
                .ok_or(EditorError::UnknownTemplate(template.0))?,
        };
        let footprint = self
            .config
            .empty_footprint
            .resolve(footprint)
            .ok_or(EditorError::EmptyFootprint(template.0))?;
        let extent = footprint.extent();
        if extent > MAX_FOOTPRINT_OFFSET {
            return Err(EditorError::FootprintOutOfRange {
                template: template.0,
                extent,
                limit: MAX_FOOTPRINT_OFFSET,
            });
        }

        self.cancel_placement();

        let handle = self.host.instantiate(template);
        tracing::info!(%template, cells = footprint.len(), "Object placement started");
        self.events.push(EditorEvent::PlacementStarted {
            template,
            footprint: footprint.clone(),
        });
        self.mode = EditorMode::PlacingObstacle(PendingObstacle {
            template,
            footprint,
            handle,
            anchor: GridCell::NONE,
        });

        if let Some(cell) = self.pointer_cell {
            self.follow_with_obstacle(cell);
        }
        Ok(())
    }

    /// Abandon whatever is in flight.
    ///
    /// Discards a following obstacle, snaps a dragged goal back, or drops the
    /// current tile selection. Returns whether anything was cancelled.
    pub fn cancel_placement(&mut self) -> bool {
        match std::mem::take(&mut self.mode) {
            EditorMode::Idle => false,
            EditorMode::PlacingObstacle(pending) => {
                self.host.destroy(pending.handle);
                self.host.clear_markers(MarkerGroup::Targets);
                tracing::info!(template = %pending.template, "Object placement cancelled");
                self.events.push(EditorEvent::PlacementCancelled {
                    template: pending.template,
                });
                true
            }
            EditorMode::DraggingGoal(drag) => {
                set_goal_position(&mut self.board, drag.origin_world);
                true
            }
            EditorMode::DragAccumulating | EditorMode::DraggingForPlacement => {
                self.selection.clear();
                self.host.clear_markers(MarkerGroup::Targets);
                self.selection_changed();
                true
            }
        }
    }

    /// Select every tile whose source id is `source_id`.
    ///
    /// Replaces the current selection and starts a placement drag when
    /// anything matched. Returns the number of tiles selected.
    pub fn select_by_source_id(&mut self, source_id: i32) -> usize {
        self.cancel_placement();
        self.selection.clear();

        let region = self.board.tiles.used_rect();
        for cell in region.cells() {
            if self.board.tiles.source_id(cell) == source_id {
                self.selection.add(cell);
            }
        }

        let count = self.selection.cells().len();
        if count == 0 {
            tracing::info!(source_id, "No tiles found for bulk select");
            return 0;
        }

        self.mode = EditorMode::DraggingForPlacement;
        self.refresh_target_markers();
        tracing::info!(source_id, count, "Bulk-selected tiles");
        self.selection_changed();
        count
    }

    /// [`Self::select_by_source_id`] with the configured bulk source.
    pub fn select_bulk(&mut self) -> usize {
        self.select_by_source_id(self.config.bulk_select_source_id)
    }

    /// Undo the most recent edit. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        self.cancel_placement();

        let Some(record) = self.history.pop_undo() else {
            tracing::warn!("Nothing to undo");
            self.events.push(EditorEvent::NothingToUndo);
            return false;
        };

        let kind = record.kind();
        match &record {
            EditRecord::TileMoveBatch(moves) => revert_tile_moves(&mut self.board, moves),
            EditRecord::ObjectPlacement(placement) => {
                vacate_footprint(&mut self.board, placement);
                self.destroy_placed(placement);
            }
            EditRecord::GoalMove(goal) => set_goal_position(&mut self.board, goal.from_world),
        }

        self.history.push_redo(record);
        self.chain_open = false;
        self.host.register_undo_redo();
        self.validate_state("undo");
        tracing::info!(?kind, "Undo");
        self.events.push(EditorEvent::Undone { kind });
        true
    }

    /// Re-apply the most recently undone edit. Returns whether anything was
    /// redone.
    ///
    /// The edit is validated again first. If its destinations are blocked
    /// it goes back on the redo stack.
    pub fn redo(&mut self) -> bool {
        self.cancel_placement();

        let Some(record) = self.history.pop_redo() else {
            tracing::warn!("Nothing to redo");
            self.events.push(EditorEvent::NothingToRedo);
            return false;
        };

        let kind = record.kind();
        let check = {
            let occupancy = self.board.occupancy();
            match &record {
                EditRecord::TileMoveBatch(moves) => validate_relocation(&occupancy, moves),
                EditRecord::ObjectPlacement(placement) => {
                    validate_footprint(&occupancy, &placement.footprint, placement.origin)
                }
                EditRecord::GoalMove(goal) => validate_goal(&occupancy, goal.to_cell),
            }
        };
        if let PlacementCheck::Blocked { cells } = check {
            tracing::warn!(?kind, blocked = cells.len(), "Redo blocked");
            self.history.push_redo(record);
            self.events.push(EditorEvent::RedoBlocked { kind, cells });
            return false;
        }

        match &record {
            EditRecord::TileMoveBatch(moves) => apply_tile_moves(&mut self.board, moves),
            EditRecord::ObjectPlacement(placement) => {
                occupy_footprint(&mut self.board, placement);
                let handle = self.host.instantiate(placement.template);
                self.host.set_world_position(handle, placement.world_position);
                self.placed.push(PlacedInstance {
                    template: placement.template,
                    position: placement.world_position,
                    handle,
                });
            }
            EditRecord::GoalMove(goal) => set_goal_position(&mut self.board, goal.to_world),
        }

        self.history.push_undo(record);
        self.chain_open = false;
        self.host.register_undo_redo();
        self.validate_state("redo");
        tracing::info!(?kind, "Redo");
        self.events.push(EditorEvent::Redone { kind });
        true
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Commits
    // ========================================================================

    fn commit_tiles(&mut self) {
        let offset = self.selection.offset();
        let check = validate_tile_move(&self.board.occupancy(), self.selection.cells(), offset);
        if let PlacementCheck::Blocked { cells } = check {
            tracing::warn!(blocked = cells.len(), "Tile placement blocked");
            self.events.push(EditorEvent::PlacementRejected {
                kind: EditKind::TileMove,
                cells,
            });
            return;
        }

        let moves = plan_tile_moves(&self.board, self.selection.cells(), offset);
        let count = moves.len();
        if count > 0 {
            apply_tile_moves(&mut self.board, &moves);
            let summary = record_tile_moves(&mut self.history, moves, self.chain_open);
            self.chain_open = true;
            self.host
                .register_brick_move(u32::try_from(count).unwrap_or(u32::MAX));
            self.validate_state("tile move");
            tracing::info!(count, chained = summary.chained, "Tiles moved");
            self.events.push(EditorEvent::TilesMoved {
                count,
                chained: summary.chained,
            });
        }

        self.mode = EditorMode::Idle;
        self.selection.clear();
        self.host.clear_markers(MarkerGroup::Selection);
        self.host.clear_markers(MarkerGroup::Targets);
    }

    fn commit_obstacle(&mut self, cell: GridCell) {
        let EditorMode::PlacingObstacle(pending) = &self.mode else {
            return;
        };
        let check = validate_footprint(&self.board.occupancy(), &pending.footprint, cell);
        if let PlacementCheck::Blocked { cells } = check {
            tracing::warn!(
                template = %pending.template,
                blocked = cells.len(),
                "Cannot place object: space occupied"
            );
            self.events.push(EditorEvent::PlacementRejected {
                kind: EditKind::ObjectPlacement,
                cells,
            });
            return;
        }

        let EditorMode::PlacingObstacle(pending) = std::mem::take(&mut self.mode) else {
            return;
        };
        let position = placed_world_position(&pending.footprint, cell, self.config.tile_size);
        self.host.set_world_position(pending.handle, position);

        let placement = ObjectPlacement {
            template: pending.template,
            world_position: position,
            footprint: pending.footprint,
            origin: cell,
        };
        occupy_footprint(&mut self.board, &placement);
        self.placed.push(PlacedInstance {
            template: pending.template,
            position,
            handle: pending.handle,
        });
        self.history.record(EditRecord::ObjectPlacement(placement));
        self.chain_open = false;
        self.host.register_object_placement(1);
        self.host.clear_markers(MarkerGroup::Targets);

        self.validate_state("object placement");
        tracing::info!(template = %pending.template, origin = %cell, "Object placed");
        self.events.push(EditorEvent::ObjectPlaced {
            template: pending.template,
            origin: cell,
            position,
        });
    }

    fn commit_goal(&mut self, cell: GridCell) {
        let EditorMode::DraggingGoal(drag) = std::mem::take(&mut self.mode) else {
            return;
        };

        if cell == drag.origin_cell {
            set_goal_position(&mut self.board, drag.origin_world);
            tracing::debug!(%cell, "Goal dropped where it started");
            return;
        }

        let check = validate_goal(&self.board.occupancy(), cell);
        if let PlacementCheck::Blocked { cells } = check {
            tracing::warn!(%cell, "Goal cannot be placed here");
            set_goal_position(&mut self.board, drag.origin_world);
            self.events.push(EditorEvent::PlacementRejected {
                kind: EditKind::GoalMove,
                cells,
            });
            return;
        }

        let to_world = cell_center(cell, self.config.tile_size);
        set_goal_position(&mut self.board, to_world);
        self.history.record(EditRecord::GoalMove(GoalMove {
            from_cell: drag.origin_cell,
            to_cell: cell,
            from_world: drag.origin_world,
            to_world,
        }));
        self.chain_open = false;

        tracing::info!(from = %drag.origin_cell, to = %cell, "Goal placed");
        self.events.push(EditorEvent::GoalMoved {
            from: drag.origin_cell,
            to: cell,
        });
    }

    #[cfg(feature = "debug-validation")]
    fn validate_state(&self, operation: &str) {
        for violation in self.board.invariant_violations() {
            tracing::error!(operation, %violation, "Editor invariant violated");
        }
    }

    #[cfg(not(feature = "debug-validation"))]
    #[allow(clippy::unused_self)]
    fn validate_state(&self, _operation: &str) {}

    fn destroy_placed(&mut self, placement: &ObjectPlacement) {
        let found = self.placed.iter().rposition(|instance| {
            instance.template == placement.template
                && instance.position == placement.world_position
        });
        match found {
            Some(index) => {
                let instance = self.placed.remove(index);
                self.host.destroy(instance.handle);
            }
            None => tracing::warn!(
                template = %placement.template,
                origin = %placement.origin,
                "No rendered instance at the recorded position"
            ),
        }
    }

    // ========================================================================
    // Markers
    // ========================================================================

    fn follow_with_obstacle(&mut self, cell: GridCell) {
        let EditorMode::PlacingObstacle(pending) = &mut self.mode else {
            return;
        };
        if pending.anchor == cell {
            return;
        }
        pending.anchor = cell;

        let position = placed_world_position(&pending.footprint, cell, self.config.tile_size);
        self.host.set_world_position(pending.handle, position);
        draw_targets(
            &mut self.host,
            &Occupancy::new(&self.board.tiles, &self.board.objects),
            pending.footprint.cells_at(cell),
        );
    }

    fn refresh_target_markers(&mut self) {
        draw_targets(
            &mut self.host,
            &Occupancy::new(&self.board.tiles, &self.board.objects),
            self.selection.destinations(),
        );
    }

    fn selection_changed(&mut self) {
        self.host.clear_markers(MarkerGroup::Selection);
        for cell in self.selection.cells() {
            self.host.draw_marker(MarkerKind::Hover, *cell);
        }
        self.events.push(EditorEvent::SelectionChanged {
            cells: self.selection.cells().to_vec(),
        });
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    fn cell_at(&self, world: Vec2Fixed) -> GridCell {
        world_to_cell(world, self.config.tile_size)
    }

    /// Editor configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Grid state.
    #[must_use]
    pub fn board(&self) -> &Board<L> {
        &self.board
    }

    /// The tile layer.
    #[must_use]
    pub fn tiles(&self) -> &L {
        self.board.tiles()
    }

    /// The navigation layer.
    #[must_use]
    pub fn nav(&self) -> &L {
        self.board.nav()
    }

    /// Cells covered by placed obstacles.
    #[must_use]
    pub fn objects(&self) -> &ObjectOccupancy {
        self.board.objects()
    }

    /// Occupancy view over tiles and obstacles.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy<'_, L> {
        self.board.occupancy()
    }

    /// Navigation backups.
    #[must_use]
    pub fn shadow(&self) -> &NavShadow {
        self.board.shadow()
    }

    /// Undo/redo stacks.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// The goal marker.
    #[must_use]
    pub fn goal(&self) -> &Goal {
        self.board.goal()
    }

    /// Obstacle instances currently placed.
    #[must_use]
    pub fn placed(&self) -> &[PlacedInstance] {
        &self.placed
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

fn draw_targets<L: TileLayer, H: EditorHost>(
    host: &mut H,
    occupancy: &Occupancy<'_, L>,
    cells: impl Iterator<Item = GridCell>,
) {
    host.clear_markers(MarkerGroup::Targets);
    for cell in cells {
        let kind = if occupancy.is_blocked(cell) {
            MarkerKind::Blocked
        } else {
            MarkerKind::Target
        };
        host.draw_marker(kind, cell);
    }
}
