//! # Tilewright Core
//!
//! Grid tile and obstacle editing engine with full undo/redo.
//!
//! This crate contains **only** the editing logic:
//! - No rendering (the host draws markers and obstacle instances)
//! - No input devices (the host forwards pointer events)
//! - No floating-point world math (uses fixed-point)
//!
//! The same engine drives the Bevy client, the headless runner and the
//! tests, and two runs fed the same input always end in the same state.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Cell coordinates and world/cell conversion
//! - [`layer`] - Tile layer trait and the sparse in-memory layer
//! - [`occupancy`] - Tile and obstacle occupancy queries
//! - [`footprint`] - Obstacle footprints and sprite scanning
//! - [`shadow`] - Navigation backups under obstructions
//! - [`selection`] - Selection and drag state
//! - [`validator`] - All-or-nothing placement checks
//! - [`executor`] - Applying edits and their inverses
//! - [`history`] - Undo/redo records and stacks
//! - [`editor`] - The [`editor::TileEditor`] facade
//! - [`host`] - Collaborator traits and in-memory hosts
//! - [`score`] - Score keeping

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod board;
pub mod config;
pub mod editor;
pub mod error;
pub mod executor;
pub mod footprint;
pub mod grid;
pub mod history;
pub mod host;
pub mod layer;
pub mod level;
pub mod math;
pub mod occupancy;
pub mod score;
pub mod selection;
pub mod shadow;
pub mod validator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::board::Goal;
    pub use crate::config::EditorConfig;
    pub use crate::editor::{EditorEvent, PlacedInstance, PointerButton, TileEditor};
    pub use crate::error::{EditorError, Result};
    pub use crate::footprint::{extract_footprint, EmptyFootprintPolicy, Footprint};
    pub use crate::grid::{cell_center, cell_to_world, world_to_cell, GridCell, GridRect};
    pub use crate::history::{EditKind, EditRecord, History};
    pub use crate::host::{
        EditorHost, HeadlessHost, InstanceArena, InstanceHandle, InstanceRenderer, MarkerGroup,
        MarkerKind, MarkerLog, MarkerSink, ScoreSink, TemplateId,
    };
    pub use crate::layer::{SparseLayer, TileLayer, TileRecord, EMPTY_SOURCE};
    pub use crate::level::{Level, LevelError};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::score::{ScoreBoard, ScoreSnapshot};
    pub use crate::selection::{EditorMode, ModeKind};
}
