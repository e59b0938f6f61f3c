//! Mouse and keyboard input for the editor.
//!
//! Converts cursor activity into [`PointerInput`] events and shortcuts into
//! [`EditorCommand`]s. Nothing here touches the editor directly.

use bevy::prelude::*;
use tilewright_core::editor::PointerButton;
use tilewright_core::grid::{world_to_cell, GridCell};

use crate::camera::MainCamera;
use crate::editor::{EditorCommand, LevelEditor, PointerInput};
use crate::render::to_editor;
use crate::ui::PointerOverUi;

/// Map a Bevy mouse button to an editor button.
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        _ => None,
    }
}

/// Emits pointer events for the cursor.
///
/// Motion is only reported when the cursor enters a new cell. Presses over
/// the HUD are swallowed.
pub fn emit_pointer_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    editor: Option<Res<LevelEditor>>,
    over_ui: Option<Res<PointerOverUi>>,
    mut last_cell: Local<Option<GridCell>>,
    mut pointer: EventWriter<PointerInput>,
) {
    let Some(editor) = editor else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Some(world) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    let cell = world_to_cell(to_editor(world), editor.config().tile_size);
    if *last_cell != Some(cell) {
        *last_cell = Some(cell);
        pointer.send(PointerInput::Move { world });
    }

    let blocked = over_ui.is_some_and(|over| over.0);
    for button in [MouseButton::Left, MouseButton::Right] {
        let Some(mapped) = pointer_button(button) else {
            continue;
        };
        if mouse_button.just_pressed(button) && !blocked {
            pointer.send(PointerInput::Down {
                world,
                button: mapped,
            });
        }
        // Releases always go through so a drag never gets stuck.
        if mouse_button.just_released(button) {
            pointer.send(PointerInput::Up {
                world,
                button: mapped,
            });
        }
    }
}

/// Emits commands for keyboard shortcuts.
pub fn emit_keyboard_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<EditorCommand>,
) {
    let ctrl_held =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if ctrl_held && keyboard.just_pressed(KeyCode::KeyZ) {
        commands.send(EditorCommand::Undo);
    }
    if ctrl_held && keyboard.just_pressed(KeyCode::KeyY) {
        commands.send(EditorCommand::Redo);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        commands.send(EditorCommand::CancelPlacement);
    }
    if !ctrl_held && keyboard.just_pressed(KeyCode::KeyB) {
        commands.send(EditorCommand::SelectBulk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_button_mapping() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Left));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Right));
        assert_eq!(pointer_button(MouseButton::Middle), None);
    }
}
