//! Headless editor runner for scripted sessions and CI.
//!
//! This crate drives a [`tilewright_core::editor::TileEditor`] from JSON
//! commands on stdin, with one JSON response per line on stdout. This enables:
//!
//! - **Scripted testing**: replay a sequence of pointer gestures against a level
//! - **CI verification**: check that edits and undo/redo land on the expected state
//! - **Level review**: print a level as ASCII without opening a window
//!
//! # Protocol
//!
//! Communication uses JSON lines (one JSON object per line):
//!
//! - **stdin**: Commands from the controller (pointer_down, undo, query, ...)
//! - **stdout**: Responses (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! See [`protocol`] module for the full command and response reference.
//!
//! # Example
//!
//! ```bash
//! # Run a scripted session
//! echo '{"cmd":"query"}' \
//!     | cargo run -p tilewright_headless -- run --level assets/levels/tutorial.ron
//!
//! # Print a level
//! cargo run -p tilewright_headless -- render --level assets/levels/tutorial.ron
//! ```

pub mod ascii;
pub mod error;
pub mod protocol;
pub mod runner;

pub use ascii::render_board;
pub use error::ProtocolError;
pub use protocol::{Command, Response};
pub use runner::{HeadlessConfig, HeadlessRunner};
