//! Editor plugin: owns the level editor as a Bevy resource and feeds it
//! pointer input and toolbox commands.
//!
//! Input systems only emit [`PointerInput`] and [`EditorCommand`] events. A
//! single system applies them to the [`LevelEditor`] in order and republishes
//! whatever the editor reported as [`EditorNotification`]s, so the editing
//! state machine runs exactly as it does headless.

use bevy::prelude::*;
use tilewright_core::editor::{EditorEvent, PointerButton, TileEditor};
use tilewright_core::host::{HeadlessHost, TemplateId};
use tilewright_core::layer::SparseLayer;

use crate::input::{emit_keyboard_commands, emit_pointer_input};
use crate::render::{sync_board_sprites, to_editor};

/// Editor type driven by the client.
///
/// The host keeps instances and markers in memory; [`crate::render`] turns
/// them into sprites whenever the editor changes.
pub type ClientEditor = TileEditor<SparseLayer, HeadlessHost>;

/// The active level's editor.
#[derive(Resource, Deref, DerefMut)]
pub struct LevelEditor(pub ClientEditor);

/// A pointer event in Bevy world coordinates (y up).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Button pressed.
    Down {
        /// Cursor position.
        world: Vec2,
        /// Button.
        button: PointerButton,
    },
    /// Button released.
    Up {
        /// Cursor position.
        world: Vec2,
        /// Button.
        button: PointerButton,
    },
    /// Cursor moved.
    Move {
        /// Cursor position.
        world: Vec2,
    },
}

/// Commands issued from the keyboard or the HUD.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Abandon the in-flight interaction.
    CancelPlacement,
    /// Select every tile of the configured bulk source.
    SelectBulk,
    /// Start placing an obstacle template.
    BeginPlacing(TemplateId),
    /// Gold was picked up.
    CollectGold(u32),
}

/// An event the editor reported, republished for HUD and audio systems.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct EditorNotification(pub EditorEvent);

/// System ordering for the editor frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSet {
    /// Input systems and HUD buttons emit events.
    Gather,
    /// Events are applied to the editor.
    Apply,
    /// Sprites are rebuilt from editor state.
    Sync,
}

/// Applies editor events and mirrors editor state into sprites.
///
/// Needs no window or input devices, so it runs under `MinimalPlugins`.
pub struct EditorSyncPlugin;

impl Plugin for EditorSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerInput>()
            .add_event::<EditorCommand>()
            .add_event::<EditorNotification>()
            .configure_sets(
                Update,
                (EditorSet::Gather, EditorSet::Apply, EditorSet::Sync).chain(),
            )
            .add_systems(Update, apply_editor_input.in_set(EditorSet::Apply))
            .add_systems(
                Update,
                sync_board_sprites
                    .in_set(EditorSet::Sync)
                    .run_if(resource_exists_and_changed::<LevelEditor>),
            );
    }
}

/// Full editor integration: [`EditorSyncPlugin`] plus mouse and keyboard input.
///
/// Provides:
/// - Left/right mouse press, release and motion as pointer input
/// - `Ctrl+Z` undo, `Ctrl+Y` redo
/// - `Escape` cancels placement, `B` bulk-selects
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EditorSyncPlugin).add_systems(
            Update,
            (emit_pointer_input, emit_keyboard_commands).in_set(EditorSet::Gather),
        );
    }
}

/// Applies queued pointer input and commands to the editor, then publishes
/// the editor's events.
fn apply_editor_input(
    editor: Option<ResMut<LevelEditor>>,
    mut pointer: EventReader<PointerInput>,
    mut commands: EventReader<EditorCommand>,
    mut notifications: EventWriter<EditorNotification>,
) {
    let Some(mut editor) = editor else {
        pointer.clear();
        commands.clear();
        return;
    };
    // Leave change detection alone on idle frames.
    if pointer.is_empty() && commands.is_empty() {
        return;
    }

    for input in pointer.read() {
        match *input {
            PointerInput::Down { world, button } => {
                editor.on_pointer_down(to_editor(world), button);
            }
            PointerInput::Up { world, button } => editor.on_pointer_up(to_editor(world), button),
            PointerInput::Move { world } => editor.on_pointer_move(to_editor(world)),
        }
    }

    for command in commands.read() {
        match *command {
            EditorCommand::Undo => {
                editor.undo();
            }
            EditorCommand::Redo => {
                editor.redo();
            }
            EditorCommand::CancelPlacement => {
                editor.cancel_placement();
            }
            EditorCommand::SelectBulk => {
                editor.select_bulk();
            }
            EditorCommand::BeginPlacing(template) => {
                if let Err(e) = editor.begin_placing_object(template, None) {
                    tracing::warn!(%template, error = %e, "Cannot start placement");
                }
            }
            EditorCommand::CollectGold(amount) => {
                editor.host_mut().score.register_gold_collect(amount);
            }
        }
    }

    notifications.send_batch(editor.drain_events().into_iter().map(EditorNotification));
}
