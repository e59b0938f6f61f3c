//! Host collaborators.
//!
//! The editor never owns visual objects or scoring state. It talks to its
//! host through three narrow traits and only ever holds opaque
//! [`InstanceHandle`]s. The in-memory implementations here back the headless
//! runner and the tests; the Bevy client mirrors them into sprites each frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grid::GridCell;
use crate::math::Vec2Fixed;
use crate::score::ScoreBoard;

/// Identifies an obstacle template registered with the editor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

/// Opaque handle to a rendered obstacle instance owned by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceHandle(pub u64);

/// Receives scoring notifications.
pub trait ScoreSink {
    /// `count` tiles were relocated by one commit.
    fn register_brick_move(&mut self, count: u32);
    /// `count` obstacles were placed.
    fn register_object_placement(&mut self, count: u32);
    /// An undo or redo was applied.
    fn register_undo_redo(&mut self);
}

/// Creates, moves and destroys rendered obstacle instances.
pub trait InstanceRenderer {
    /// Create a visible instance of `template`.
    fn instantiate(&mut self, template: TemplateId) -> InstanceHandle;
    /// Remove an instance.
    fn destroy(&mut self, handle: InstanceHandle);
    /// Move an instance.
    fn set_world_position(&mut self, handle: InstanceHandle, position: Vec2Fixed);
}

/// Visual feedback marker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// A selected source cell.
    Hover,
    /// A free destination cell.
    Target,
    /// An occupied destination cell.
    Blocked,
}

impl MarkerKind {
    /// Group the marker is cleared with.
    #[must_use]
    pub const fn group(self) -> MarkerGroup {
        match self {
            Self::Hover => MarkerGroup::Selection,
            Self::Target | Self::Blocked => MarkerGroup::Targets,
        }
    }
}

/// Markers are cleared a group at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerGroup {
    /// Selected-cell markers.
    Selection,
    /// Destination / footprint preview markers.
    Targets,
}

/// Draws and clears cell markers.
pub trait MarkerSink {
    /// Draw a marker of `kind` at `cell`.
    fn draw_marker(&mut self, kind: MarkerKind, cell: GridCell);
    /// Remove every marker in `group`.
    fn clear_markers(&mut self, group: MarkerGroup);
}

/// Everything the editor needs from its host.
pub trait EditorHost: ScoreSink + InstanceRenderer + MarkerSink {}

impl<T: ScoreSink + InstanceRenderer + MarkerSink> EditorHost for T {}

/// State of one instance in an [`InstanceArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Template the instance was created from.
    pub template: TemplateId,
    /// Current world position.
    pub position: Vec2Fixed,
}

/// In-memory instance renderer: an arena of handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceArena {
    next_id: u64,
    instances: BTreeMap<InstanceHandle, InstanceState>,
}

impl InstanceArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an instance.
    #[must_use]
    pub fn get(&self, handle: InstanceHandle) -> Option<&InstanceState> {
        self.instances.get(&handle)
    }

    /// Number of live instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Live instances in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceHandle, &InstanceState)> {
        self.instances.iter().map(|(handle, state)| (*handle, state))
    }
}

impl InstanceRenderer for InstanceArena {
    fn instantiate(&mut self, template: TemplateId) -> InstanceHandle {
        let handle = InstanceHandle(self.next_id);
        self.next_id += 1;
        self.instances.insert(
            handle,
            InstanceState {
                template,
                position: Vec2Fixed::ZERO,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: InstanceHandle) {
        if self.instances.remove(&handle).is_none() {
            tracing::warn!(?handle, "Destroying unknown instance");
        }
    }

    fn set_world_position(&mut self, handle: InstanceHandle, position: Vec2Fixed) {
        if let Some(state) = self.instances.get_mut(&handle) {
            state.position = position;
        }
    }
}

/// In-memory marker sink that keeps the currently drawn markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerLog {
    markers: Vec<(MarkerKind, GridCell)>,
}

impl MarkerLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every drawn marker, in draw order.
    #[must_use]
    pub fn markers(&self) -> &[(MarkerKind, GridCell)] {
        &self.markers
    }

    /// Cells carrying a marker of `kind`.
    #[must_use]
    pub fn cells_of(&self, kind: MarkerKind) -> Vec<GridCell> {
        self.markers
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, cell)| *cell)
            .collect()
    }
}

impl MarkerSink for MarkerLog {
    fn draw_marker(&mut self, kind: MarkerKind, cell: GridCell) {
        self.markers.push((kind, cell));
    }

    fn clear_markers(&mut self, group: MarkerGroup) {
        self.markers.retain(|(kind, _)| kind.group() != group);
    }
}

/// Host used outside the Bevy client.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Score counters.
    pub score: ScoreBoard,
    /// Rendered obstacle instances.
    pub instances: InstanceArena,
    /// Drawn markers.
    pub markers: MarkerLog,
}

impl HeadlessHost {
    /// Create a host with a fresh score board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreSink for HeadlessHost {
    fn register_brick_move(&mut self, count: u32) {
        self.score.register_brick_move(count);
    }

    fn register_object_placement(&mut self, count: u32) {
        self.score.register_object_placement(count);
    }

    fn register_undo_redo(&mut self) {
        self.score.register_undo_redo();
    }
}

impl InstanceRenderer for HeadlessHost {
    fn instantiate(&mut self, template: TemplateId) -> InstanceHandle {
        self.instances.instantiate(template)
    }

    fn destroy(&mut self, handle: InstanceHandle) {
        self.instances.destroy(handle);
    }

    fn set_world_position(&mut self, handle: InstanceHandle, position: Vec2Fixed) {
        self.instances.set_world_position(handle, position);
    }
}

impl MarkerSink for HeadlessHost {
    fn draw_marker(&mut self, kind: MarkerKind, cell: GridCell) {
        self.markers.draw_marker(kind, cell);
    }

    fn clear_markers(&mut self, group: MarkerGroup) {
        self.markers.clear_markers(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_handles_are_unique() {
        let mut arena = InstanceArena::new();
        let a = arena.instantiate(TemplateId(1));
        let b = arena.instantiate(TemplateId(1));
        assert_ne!(a, b);
        arena.destroy(a);
        let c = arena.instantiate(TemplateId(2));
        assert_ne!(a, c);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_arena_moves_instance() {
        let mut arena = InstanceArena::new();
        let handle = arena.instantiate(TemplateId(0));
        arena.set_world_position(handle, Vec2Fixed::from_ints(8, 16));
        assert_eq!(
            arena.get(handle).map(|s| s.position),
            Some(Vec2Fixed::from_ints(8, 16))
        );
    }

    #[test]
    fn test_marker_log_clears_by_group() {
        let mut log = MarkerLog::new();
        log.draw_marker(MarkerKind::Hover, GridCell::new(0, 0));
        log.draw_marker(MarkerKind::Target, GridCell::new(1, 0));
        log.draw_marker(MarkerKind::Blocked, GridCell::new(2, 0));

        log.clear_markers(MarkerGroup::Targets);
        assert_eq!(log.markers(), &[(MarkerKind::Hover, GridCell::new(0, 0))]);

        log.clear_markers(MarkerGroup::Selection);
        assert!(log.markers().is_empty());
    }
}
