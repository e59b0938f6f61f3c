//! Headless editor runner implementation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tilewright_core::config::EditorConfig;
use tilewright_core::editor::TileEditor;
use tilewright_core::host::{HeadlessHost, TemplateId};
use tilewright_core::layer::SparseLayer;
use tilewright_core::level::{level_dir, Level};
use tilewright_core::math::{Fixed, Vec2Fixed};

use crate::ascii::render_board;
use crate::error::ProtocolError;
use crate::protocol::{Command, EditorState, Response};

/// Editor driven by the headless runner.
pub type HeadlessEditor = TileEditor<SparseLayer, HeadlessHost>;

/// Headless runner configuration.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Level file to load.
    pub level_path: PathBuf,
    /// Editor config file; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Answer every editing command with a `state` line as well.
    pub auto_state_output: bool,
}

/// Headless runner for scripted editing sessions.
pub struct HeadlessRunner {
    editor: HeadlessEditor,
    level_name: String,
    auto_state_output: bool,
}

impl HeadlessRunner {
    /// Load the configured level and build its editor.
    pub fn with_config(config: &HeadlessConfig) -> Result<Self, ProtocolError> {
        let editor_config = match &config.config_path {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        let level = Level::load(&config.level_path)?;
        let mut runner = Self::from_level(level, editor_config, &level_dir(&config.level_path))?;
        runner.auto_state_output = config.auto_state_output;
        Ok(runner)
    }

    /// Build a runner for an already parsed level.
    pub fn from_level(
        level: Level,
        config: EditorConfig,
        base_dir: &Path,
    ) -> Result<Self, ProtocolError> {
        let mut host = HeadlessHost::new();
        host.score = level.score_board();

        let level_name = level.name.clone();
        let editor = level.into_editor(config, host, base_dir)?;
        tracing::info!(
            level = %level_name,
            tiles = editor.tiles().len(),
            templates = editor.templates().len(),
            "Level loaded"
        );

        Ok(Self {
            editor,
            level_name,
            auto_state_output: false,
        })
    }

    /// The editor being driven.
    pub fn editor(&self) -> &HeadlessEditor {
        &self.editor
    }

    /// Name of the loaded level.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Run the session: read commands from `input` until `quit` or end of
    /// input, writing one JSON line per response to `output`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), ProtocolError> {
        write_response(&mut output, &Response::ready(&self.level_name))?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let command = match Command::from_json(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected command line");
                    write_response(&mut output, &Response::error(e.to_string(), None))?;
                    continue;
                }
            };

            let quit = command == Command::Quit;
            for response in self.handle(command) {
                write_response(&mut output, &response)?;
            }
            if quit {
                tracing::info!("Session ended by controller");
                return Ok(());
            }
        }

        tracing::info!("Input closed");
        Ok(())
    }

    /// Apply one command and return the responses to send.
    pub fn handle(&mut self, command: Command) -> Vec<Response> {
        let name = command.name();
        tracing::debug!(cmd = name, "Processing command");

        match self.apply(command) {
            Ok(Some(response)) => return vec![response],
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(cmd = name, error = %e, "Command failed");
                return vec![Response::error(e.to_string(), Some(name))];
            }
        }

        let mut responses = vec![Response::events(name, self.editor.drain_events())];
        if self.auto_state_output {
            responses.push(Response::State(self.state()));
        }
        responses
    }

    /// Run a command. `Some` is a complete response; `None` means the caller
    /// reports the queued editor events.
    fn apply(&mut self, command: Command) -> Result<Option<Response>, ProtocolError> {
        match command {
            Command::PointerDown { x, y, button } => {
                let world = to_world(x, y)?;
                self.editor.on_pointer_down(world, button);
            }
            Command::PointerUp { x, y, button } => {
                let world = to_world(x, y)?;
                self.editor.on_pointer_up(world, button);
            }
            Command::PointerMove { x, y } => {
                let world = to_world(x, y)?;
                self.editor.on_pointer_move(world);
            }
            Command::BeginPlacing {
                template,
                footprint,
            } => {
                self.editor
                    .begin_placing_object(TemplateId(template), footprint)?;
            }
            Command::CancelPlacement => {
                self.editor.cancel_placement();
            }
            Command::Undo => {
                self.editor.undo();
            }
            Command::Redo => {
                self.editor.redo();
            }
            Command::SelectSource { source_id } => {
                match source_id {
                    Some(source_id) => self.editor.select_by_source_id(source_id),
                    None => self.editor.select_bulk(),
                };
            }
            Command::CollectGold { amount } => {
                self.editor.host_mut().score.register_gold_collect(amount);
            }
            Command::Query => return Ok(Some(Response::State(self.state()))),
            Command::Render => {
                let text = render_board(self.editor.board(), self.editor.config().tile_size);
                return Ok(Some(Response::Ascii { text }));
            }
            Command::Quit => return Ok(Some(Response::Bye)),
        }
        Ok(None)
    }

    /// Snapshot of the editor for `query`.
    pub fn state(&self) -> EditorState {
        let editor = &self.editor;
        EditorState {
            mode: editor.mode().kind(),
            tiles: editor.tiles().len(),
            nav: editor.nav().len(),
            obstacles: editor.objects().len(),
            shadowed: editor.shadow().len(),
            instances: editor.host().instances.len(),
            selection: editor.selection().cells().to_vec(),
            goal: editor.goal().cell(editor.config().tile_size),
            undo_depth: editor.history().undo_len(),
            redo_depth: editor.history().redo_len(),
            score: editor.host().score.snapshot(),
            hash: state_hash(editor),
        }
    }
}

/// Hash of everything an edit can change, for determinism checks.
pub fn state_hash(editor: &HeadlessEditor) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (cell, record) in editor.tiles().iter() {
        (cell, record).hash(&mut hasher);
    }
    for (cell, record) in editor.nav().iter() {
        (cell, record).hash(&mut hasher);
    }
    for cell in editor.objects().iter() {
        cell.hash(&mut hasher);
    }
    for (cell, record) in editor.shadow().iter() {
        (cell, record).hash(&mut hasher);
    }
    editor.goal().position.hash(&mut hasher);
    hasher.finish()
}

fn to_world(x: f64, y: f64) -> Result<Vec2Fixed, ProtocolError> {
    match (Fixed::checked_from_num(x), Fixed::checked_from_num(y)) {
        (Some(fx), Some(fy)) => Ok(Vec2Fixed::new(fx, fy)),
        _ => Err(ProtocolError::Coordinate { x, y }),
    }
}

fn write_response<W: Write>(output: &mut W, response: &Response) -> Result<(), ProtocolError> {
    output.write_all(response.to_json_line().as_bytes())?;
    output.flush()?;
    Ok(())
}
