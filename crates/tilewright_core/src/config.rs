//! Editor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::footprint::{EmptyFootprintPolicy, DEFAULT_ALPHA_THRESHOLD};
use crate::grid::default_tile_size;
use crate::level::LevelError;
use crate::math::{Fixed, Vec2Fixed};

/// Source id selected by the bulk-select shortcut.
pub const DEFAULT_BULK_SELECT_SOURCE: i32 = 3;

/// Tunables for a [`crate::editor::TileEditor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Size of one grid cell in world units.
    pub tile_size: Vec2Fixed,
    /// Pixels with alpha above this count towards a footprint.
    pub alpha_threshold: f32,
    /// What to do with templates whose sprite is fully transparent.
    pub empty_footprint: EmptyFootprintPolicy,
    /// Source id picked by `select_by_source_id` shortcuts.
    pub bulk_select_source_id: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            empty_footprint: EmptyFootprintPolicy::default(),
            bulk_select_source_id: DEFAULT_BULK_SELECT_SOURCE,
        }
    }
}

impl EditorConfig {
    /// Load a configuration from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LevelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LevelError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a configuration from a RON string.
    pub fn from_ron_str(ron: &str) -> std::result::Result<Self, LevelError> {
        let config: Self = ron::from_str(ron)?;
        Ok(config)
    }

    /// Reject configurations the editor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size.x <= Fixed::ZERO || self.tile_size.y <= Fixed::ZERO {
            return Err(EditorError::InvalidConfig(format!(
                "tile size must be positive, got {:?}",
                self.tile_size.to_f32()
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha_threshold) {
            return Err(EditorError::InvalidConfig(format!(
                "alpha threshold must be within [0, 1], got {}",
                self.alpha_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_size, Vec2Fixed::from_ints(8, 8));
        assert_eq!(config.bulk_select_source_id, 3);
    }

    #[test]
    fn test_zero_tile_size_is_rejected() {
        let config = EditorConfig {
            tile_size: Vec2Fixed::from_ints(0, 8),
            ..EditorConfig::default()
        };
        assert!(matches!(config.validate(), Err(EditorError::InvalidConfig(_))));
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let config = EditorConfig {
            alpha_threshold: 1.5,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
        let config = EditorConfig {
            alpha_threshold: f32::NAN,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let text = "(tile_size: (x: 16.0, y: 16.0), empty_footprint: Reject)";
        let config = EditorConfig::from_ron_str(text).unwrap();
        assert_eq!(config.tile_size, Vec2Fixed::from_ints(16, 16));
        assert_eq!(config.empty_footprint, EmptyFootprintPolicy::Reject);
        assert!((config.alpha_threshold - 0.1).abs() < f32::EPSILON);
    }
}
