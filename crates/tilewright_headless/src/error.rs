//! Error types for the headless runner.

use thiserror::Error;
use tilewright_core::error::EditorError;
use tilewright_core::level::LevelError;

/// Errors that end a headless session or reject a command.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Level or config file could not be loaded.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// The editor refused the level or a command.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// A command line was not valid JSON.
    #[error("Invalid command: {0}")]
    Parse(#[from] serde_json::Error),
    /// A coordinate cannot be represented in fixed point.
    #[error("Coordinate out of range: ({x}, {y})")]
    Coordinate { x: f64, y: f64 },
    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
