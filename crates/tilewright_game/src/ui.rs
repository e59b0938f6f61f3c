//! HUD plugin using egui.
//!
//! Provides the score bar, the obstacle toolbox with undo/redo buttons, and
//! a status line describing the editor's last notification.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use tilewright_core::editor::EditorEvent;
use tilewright_core::history::EditKind;

use crate::data_loader::{LevelInfo, TemplateCatalog};
use crate::editor::{EditorCommand, EditorNotification, EditorSet, LevelEditor};

/// Seconds a status message stays visible.
pub const STATUS_SECONDS: f32 = 3.0;

/// Plugin for the editor HUD.
///
/// Provides:
/// - Score bar (top)
/// - Toolbox with one button per obstacle template (right)
/// - Status line (bottom)
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<StatusLine>()
            .init_resource::<PointerOverUi>()
            .add_systems(
                Update,
                (
                    update_status_line.after(EditorSet::Apply),
                    (ui_score_bar, ui_toolbox, ui_status_line, track_pointer_over_ui)
                        .chain()
                        .in_set(EditorSet::Gather),
                ),
            );
    }
}

/// Whether the cursor is over an egui panel this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerOverUi(pub bool);

/// Last status message and how long it stays up.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct StatusLine {
    /// Message text.
    pub text: String,
    /// Seconds until it disappears.
    pub remaining: f32,
}

fn kind_name(kind: EditKind) -> &'static str {
    match kind {
        EditKind::TileMove => "tile move",
        EditKind::ObjectPlacement => "object placement",
        EditKind::GoalMove => "goal move",
    }
}

/// Player-facing text for an editor event, if it deserves one.
pub fn describe(event: &EditorEvent) -> Option<String> {
    let text = match event {
        EditorEvent::PlacementRejected {
            kind: EditKind::ObjectPlacement,
            ..
        } => "Cannot place object: space occupied".to_string(),
        EditorEvent::PlacementRejected {
            kind: EditKind::TileMove,
            cells,
        } => format!("Tile placement blocked ({} cells)", cells.len()),
        EditorEvent::PlacementRejected {
            kind: EditKind::GoalMove,
            ..
        } => "Goal cannot be placed here".to_string(),
        EditorEvent::TilesMoved { count: 1, .. } => "Moved 1 tile".to_string(),
        EditorEvent::TilesMoved { count, .. } => format!("Moved {count} tiles"),
        EditorEvent::ObjectPlaced { .. } => "Object placed".to_string(),
        EditorEvent::GoalMoved { .. } => "Goal moved".to_string(),
        EditorEvent::Undone { kind } => format!("Undid {}", kind_name(*kind)),
        EditorEvent::Redone { kind } => format!("Redid {}", kind_name(*kind)),
        EditorEvent::NothingToUndo => "Nothing to undo".to_string(),
        EditorEvent::NothingToRedo => "Nothing to redo".to_string(),
        EditorEvent::RedoBlocked { kind, .. } => {
            format!("Cannot redo {}: space occupied", kind_name(*kind))
        }
        EditorEvent::SelectionChanged { .. }
        | EditorEvent::PlacementStarted { .. }
        | EditorEvent::PlacementCancelled { .. }
        | EditorEvent::GoalPickedUp { .. } => return None,
    };
    Some(text)
}

fn update_status_line(
    time: Res<Time>,
    mut notifications: EventReader<EditorNotification>,
    mut status: ResMut<StatusLine>,
) {
    if let Some(text) = notifications.read().filter_map(|n| describe(&n.0)).last() {
        status.text = text;
        status.remaining = STATUS_SECONDS;
    } else if status.remaining > 0.0 {
        status.remaining -= time.delta_seconds();
        if status.remaining <= 0.0 {
            status.text.clear();
        }
    }
}

/// Renders the top bar with level name and score counters.
fn ui_score_bar(
    mut contexts: EguiContexts,
    editor: Option<Res<LevelEditor>>,
    info: Option<Res<LevelInfo>>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    egui::TopBottomPanel::top("score_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 20.0;

            if let Some(info) = info.as_ref() {
                ui.label(
                    egui::RichText::new(format!("Level {}: {}", info.number, info.name))
                        .size(16.0)
                        .strong(),
                );
                ui.separator();
            }

            let Some(editor) = editor.as_ref() else {
                ui.label(egui::RichText::new("No level loaded").weak());
                return;
            };
            let (score, gold, objects) = editor.host().score.snapshot().formatted();
            ui.label(egui::RichText::new(format!("Score {score}")).size(16.0).strong());
            ui.label(
                egui::RichText::new(format!("Gold {gold}"))
                    .size(16.0)
                    .color(egui::Color32::from_rgb(255, 215, 0)),
            );
            ui.label(egui::RichText::new(format!("Objects {objects}")).size(16.0));
        });
    });
}

/// Renders the toolbox: one button per template plus undo/redo.
fn ui_toolbox(
    mut contexts: EguiContexts,
    catalog: Option<Res<TemplateCatalog>>,
    editor: Option<Res<LevelEditor>>,
    mut commands: EventWriter<EditorCommand>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let (can_undo, can_redo) = editor.as_ref().map_or((false, false), |editor| {
        (
            editor.history().undo_len() > 0,
            editor.history().redo_len() > 0,
        )
    });

    egui::SidePanel::right("toolbox")
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Obstacles");
            if let Some(catalog) = catalog.as_ref() {
                for entry in &catalog.entries {
                    if ui.button(&entry.name).clicked() {
                        commands.send(EditorCommand::BeginPlacing(entry.id));
                    }
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_undo, egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    commands.send(EditorCommand::Undo);
                }
                if ui
                    .add_enabled(can_redo, egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y")
                    .clicked()
                {
                    commands.send(EditorCommand::Redo);
                }
            });
            if ui.button("Select drums").on_hover_text("B").clicked() {
                commands.send(EditorCommand::SelectBulk);
            }
        });
}

/// Renders the status line when there is something to say.
fn ui_status_line(mut contexts: EguiContexts, status: Res<StatusLine>) {
    if status.text.is_empty() {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
        ui.label(&status.text);
    });
}

fn track_pointer_over_ui(mut contexts: EguiContexts, mut over_ui: ResMut<PointerOverUi>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    over_ui.0 = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
}
