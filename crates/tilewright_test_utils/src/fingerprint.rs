//! State fingerprints.
//!
//! A fingerprint captures everything an edit can change: both layers, the
//! obstacle cells, the navigation backups, the rendered obstacle instances
//! and the goal. Instance handles are left out because redo creates fresh
//! ones; instances are compared by template and position instead.
//!
//! # Uses
//!
//! 1. **Inverse law**: undoing every commit returns to the starting
//!    fingerprint, redoing them returns to the final one.
//! 2. **Determinism**: replaying the same script from the same setup always
//!    ends on the same fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tilewright_core::editor::TileEditor;
use tilewright_core::grid::GridCell;
use tilewright_core::host::{HeadlessHost, TemplateId};
use tilewright_core::layer::{SparseLayer, TileRecord};
use tilewright_core::math::Vec2Fixed;

/// Snapshot of an editor's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateFingerprint {
    /// Every tile.
    pub tiles: Vec<(GridCell, TileRecord)>,
    /// Every live navigation cell.
    pub nav: Vec<(GridCell, TileRecord)>,
    /// Cells covered by obstacles.
    pub objects: Vec<GridCell>,
    /// Navigation backups.
    pub backups: Vec<(GridCell, TileRecord)>,
    /// Rendered obstacle instances, sorted.
    pub instances: Vec<(TemplateId, Vec2Fixed)>,
    /// Goal position.
    pub goal: Vec2Fixed,
}

impl StateFingerprint {
    /// Capture the state of `editor`.
    #[must_use]
    pub fn capture(editor: &TileEditor<SparseLayer, HeadlessHost>) -> Self {
        let mut instances: Vec<(TemplateId, Vec2Fixed)> = editor
            .host()
            .instances
            .iter()
            .map(|(_, state)| (state.template, state.position))
            .collect();
        instances.sort_by_key(|(template, position)| (*template, position.x, position.y));

        Self {
            tiles: editor.tiles().iter().collect(),
            nav: editor.nav().iter().collect(),
            objects: editor.objects().iter().collect(),
            backups: editor.shadow().iter().collect(),
            instances,
            goal: editor.goal().position,
        }
    }

    /// Hash of the fingerprint.
    #[must_use]
    pub fn hash_value(&self) -> u64 {
        compute_hash(self)
    }
}

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Assert that every run ended on the same state.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let mut unique = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Editor replay is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run `script` against a fresh `setup()` editor `runs` times and compare the
/// final fingerprints.
pub fn verify_determinism<Setup, Script>(
    runs: usize,
    setup: Setup,
    script: Script,
) -> DeterminismResult
where
    Setup: Fn() -> TileEditor<SparseLayer, HeadlessHost>,
    Script: Fn(&mut TileEditor<SparseLayer, HeadlessHost>),
{
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut editor = setup();
            script(&mut editor);
            StateFingerprint::capture(&editor).hash_value()
        })
        .collect();

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Compute a hash of any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::editor_with_bricks;

    #[test]
    fn test_fresh_editors_match() {
        let a = StateFingerprint::capture(&editor_with_bricks(6, &[(1, 1)]));
        let b = StateFingerprint::capture(&editor_with_bricks(6, &[(1, 1)]));
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
    }

    #[test]
    fn test_different_layouts_differ() {
        let a = StateFingerprint::capture(&editor_with_bricks(6, &[(1, 1)]));
        let b = StateFingerprint::capture(&editor_with_bricks(6, &[(1, 2)]));
        assert_ne!(a, b);
    }
}
