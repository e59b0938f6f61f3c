//! Camera plugin for 2D camera control.
//!
//! Provides WASD/Arrow key panning, mouse wheel zoom, and framing of the
//! level when it loads.

use bevy::prelude::*;
use tilewright_core::grid::{cell_center, GridCell, GridRect};
use tilewright_core::layer::TileLayer;

use crate::editor::LevelEditor;
use crate::render::to_bevy;

/// Plugin for 2D camera control with pan and zoom.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (
                    camera_keyboard_pan,
                    camera_mouse_zoom,
                    frame_level.run_if(resource_added::<LevelEditor>),
                ),
            );
    }
}

/// Settings for camera behavior.
#[derive(Resource)]
pub struct CameraSettings {
    /// Pan speed in units per second.
    pub pan_speed: f32,
    /// Zoom speed multiplier.
    pub zoom_speed: f32,
    /// Minimum zoom level (most zoomed in).
    pub min_zoom: f32,
    /// Maximum zoom level (most zoomed out).
    pub max_zoom: f32,
    /// Zoom applied when a level is framed.
    pub start_zoom: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pan_speed: 200.0,
            zoom_speed: 0.02,
            min_zoom: 0.1,
            max_zoom: 1.0,
            start_zoom: 0.25,
        }
    }
}

/// Marker component for the main game camera.
#[derive(Component)]
pub struct MainCamera;

/// Spawns the main 2D camera.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), MainCamera));
}

/// Centers the camera on the navigation area of a freshly loaded level.
fn frame_level(
    editor: Res<LevelEditor>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    let tile_size = editor.config().tile_size;
    let area: GridRect = editor.nav().used_rect();
    let middle = area.position + GridCell::new(area.size.x / 2, area.size.y / 2);
    let focus = to_bevy(cell_center(middle, tile_size));

    transform.translation.x = focus.x;
    transform.translation.y = focus.y;
    transform.scale = Vec3::splat(settings.start_zoom);
    tracing::debug!(?focus, "Camera framed level");
}

/// Handles keyboard-based camera panning (WASD and arrow keys).
fn camera_keyboard_pan(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;

    // Horizontal movement
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }

    // Vertical movement
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }

    if direction != Vec2::ZERO {
        direction = direction.normalize();
    }

    // Apply movement scaled by delta time and zoom level
    let zoom_factor = transform.scale.x;
    let delta = direction * settings.pan_speed * time.delta_seconds() * zoom_factor;
    transform.translation.x += delta.x;
    transform.translation.y += delta.y;
}

/// Handles mouse wheel zoom.
fn camera_mouse_zoom(
    mut scroll_events: EventReader<bevy::input::mouse::MouseWheel>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let zoom_delta = -event.y * settings.zoom_speed;
        let new_scale =
            (transform.scale.x + zoom_delta).clamp(settings.min_zoom, settings.max_zoom);
        transform.scale = Vec3::splat(new_scale);
    }
}
