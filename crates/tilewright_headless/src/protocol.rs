//! JSON protocol for headless editor sessions.
//!
//! The headless runner communicates via JSON lines (one JSON object per line):
//!
//! **Input (stdin):** Commands from the controller
//! **Output (stdout):** One response per command
//!
//! # Protocol Flow
//!
//! 1. Runner starts, outputs `{"type":"ready","version":"1.0","level":"..."}`
//! 2. Controller sends commands as JSON lines
//! 3. Editing commands answer with the events they produced
//! 4. `quit` answers `{"type":"bye"}` and ends the session
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","level":"Tutorial"}
//! -> {"cmd":"pointer_down","x":20.0,"y":20.0}
//! <- {"type":"events","cmd":"pointer_down",
//!     "events":[{"event":"selection_changed","cells":[{"x":2,"y":2}]}]}
//! -> {"cmd":"pointer_down","x":20.0,"y":28.0}
//! <- {"type":"events","cmd":"pointer_down",
//!     "events":[{"event":"tiles_moved","count":1,"chained":0}, ...]}
//! -> {"cmd":"undo"}
//! <- {"type":"events","cmd":"undo","events":[{"event":"undone","kind":"tile_move"}]}
//! -> {"cmd":"render"}
//! <- {"type":"ascii","text":"..."}
//! ```

use serde::{Deserialize, Serialize};
use tilewright_core::editor::{EditorEvent, PointerButton};
use tilewright_core::footprint::Footprint;
use tilewright_core::grid::GridCell;
use tilewright_core::score::ScoreSnapshot;
use tilewright_core::selection::ModeKind;

/// Protocol version reported in the ready line.
pub const PROTOCOL_VERSION: &str = "1.0";

// ============================================================================
// Input Commands (Controller -> Runner)
// ============================================================================

/// Commands that can be sent to the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Press a pointer button at a world position.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: PointerButton,
    },

    /// Release a pointer button at a world position.
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: PointerButton,
    },

    /// Move the pointer to a world position.
    PointerMove { x: f64, y: f64 },

    /// Start placing an obstacle, optionally with an explicit footprint.
    BeginPlacing {
        template: u32,
        #[serde(default)]
        footprint: Option<Footprint>,
    },

    /// Abandon the in-flight interaction.
    CancelPlacement,

    /// Undo the most recent edit.
    Undo,

    /// Redo the most recently undone edit.
    Redo,

    /// Select every tile with a source id (default: the configured bulk source).
    SelectSource {
        #[serde(default)]
        source_id: Option<i32>,
    },

    /// Add gold to the score board.
    CollectGold { amount: u32 },

    /// Query current editor state.
    Query,

    /// Render the board as ASCII.
    Render,

    /// End the session.
    Quit,
}

fn default_button() -> PointerButton {
    PointerButton::Left
}

// ============================================================================
// Output Responses (Runner -> Controller)
// ============================================================================

/// Responses sent from the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Runner is ready to accept commands.
    Ready { version: String, level: String },

    /// Events produced by an editing command.
    Events {
        cmd: String,
        events: Vec<EditorEvent>,
    },

    /// Current editor state.
    State(EditorState),

    /// ASCII rendering of the board.
    Ascii { text: String },

    /// Error processing a command.
    Error {
        message: String,
        cmd: Option<String>,
    },

    /// Goodbye message before shutdown.
    Bye,
}

// ============================================================================
// State Types
// ============================================================================

/// Summary of the editor for `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub mode: ModeKind,
    pub tiles: usize,
    pub nav: usize,
    pub obstacles: usize,
    pub shadowed: usize,
    pub instances: usize,
    pub selection: Vec<GridCell>,
    pub goal: GridCell,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub score: ScoreSnapshot,
    pub hash: u64,
}

// ============================================================================
// Helpers
// ============================================================================

impl Response {
    /// Create a ready response.
    pub fn ready(level: &str) -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
            level: level.to_string(),
        }
    }

    /// Wrap the events an editing command produced.
    pub fn events(cmd: &str, events: Vec<EditorEvent>) -> Self {
        Self::Events {
            cmd: cmd.to_string(),
            events,
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>, cmd: Option<&str>) -> Self {
        Self::Error {
            message: message.into(),
            cmd: cmd.map(String::from),
        }
    }

    /// Serialize to JSON line (with newline).
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"type":"error","message":"Serialization failed: {}"}}"#,
                e
            )
        });
        json.push('\n');
        json
    }
}

impl Command {
    /// Parse from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get command name for responses.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerUp { .. } => "pointer_up",
            Self::PointerMove { .. } => "pointer_move",
            Self::BeginPlacing { .. } => "begin_placing",
            Self::CancelPlacement => "cancel_placement",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SelectSource { .. } => "select_source",
            Self::CollectGold { .. } => "collect_gold",
            Self::Query => "query",
            Self::Render => "render",
            Self::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_down_defaults_to_left() {
        let json = r#"{"cmd":"pointer_down","x":20.0,"y":12.5}"#;
        let cmd = Command::from_json(json).unwrap();
        assert_eq!(
            cmd,
            Command::PointerDown {
                x: 20.0,
                y: 12.5,
                button: PointerButton::Left
            }
        );
    }

    #[test]
    fn test_parse_right_button() {
        let json = r#"{"cmd":"pointer_up","x":0,"y":0,"button":"right"}"#;
        let cmd = Command::from_json(json).unwrap();
        assert!(matches!(
            cmd,
            Command::PointerUp {
                button: PointerButton::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_begin_placing_with_footprint() {
        let json = concat!(
            r#"{"cmd":"begin_placing","template":1,"#,
            r#""footprint":[{"x":0,"y":0},{"x":1,"y":0}]}"#,
        );
        let cmd = Command::from_json(json).unwrap();
        match cmd {
            Command::BeginPlacing {
                template,
                footprint: Some(footprint),
            } => {
                assert_eq!(template, 1);
                assert_eq!(footprint.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_select_source_default() {
        let cmd = Command::from_json(r#"{"cmd":"select_source"}"#).unwrap();
        assert_eq!(cmd, Command::SelectSource { source_id: None });
        assert_eq!(cmd.name(), "select_source");
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Command::from_json(r#"{"cmd":"spawn"}"#).is_err());
    }

    #[test]
    fn test_serialize_events_response() {
        let resp = Response::events("undo", vec![EditorEvent::NothingToUndo]);
        let json = resp.to_json_line();
        assert!(json.contains(r#""type":"events""#));
        assert!(json.contains(r#""event":"nothing_to_undo""#));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_ready_line() {
        let json = Response::ready("Tutorial").to_json_line();
        assert_eq!(
            json,
            "{\"type\":\"ready\",\"version\":\"1.0\",\"level\":\"Tutorial\"}\n"
        );
    }
}
