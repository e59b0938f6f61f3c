//! Error types for the tile editing engine.
//!
//! Placement rejections and empty undo/redo stacks are not errors; they are
//! reported through [`crate::editor::EditorEvent`]. The variants here are
//! precondition violations the host must fix before the editor can run.

use thiserror::Error;

use crate::grid::GridCell;

/// Result type alias using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;

/// Top-level error type for the editing engine.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Editor configuration is unusable.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    /// An obstacle template was requested that was never registered.
    #[error("Unknown obstacle template: {0}")]
    UnknownTemplate(u32),

    /// The template produced no footprint and the policy rejects that.
    #[error("Obstacle template {0} has an empty footprint")]
    EmptyFootprint(u32),

    /// The footprint reaches further from its anchor than the grid allows.
    #[error("Obstacle template {template} footprint reaches {extent} cells (limit {limit})")]
    FootprintOutOfRange {
        /// Template being placed.
        template: u32,
        /// Largest offset component found.
        extent: u32,
        /// Allowed maximum.
        limit: u32,
    },

    /// History bookkeeping no longer matches the tile layer.
    #[error("Chained move at {cell:?} does not match the tile layer: {message}")]
    ChainInconsistency {
        /// Cell where the mismatch was found.
        cell: GridCell,
        /// What did not match.
        message: String,
    },

    /// Failed to decode a sprite image.
    #[error("Failed to load sprite image '{path}': {source}")]
    Image {
        /// Path to the image.
        path: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
}
