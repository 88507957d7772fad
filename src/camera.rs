//! Camera state, smoothing, wheel zoom, and the Bevy `Camera2d` it drives.
//!
//! [`CosmosCamera`] is the logical camera the renderer culls against.  The
//! actual `Camera2d` entity just mirrors it every frame through
//! [`sync_camera_transform_system`]: translation = position, scale = 1 / zoom.

use crate::config::CosmosConfig;
use crate::error::CosmosError;
use crate::player::Ship;
use bevy::ecs::error::BevyError;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

/// Logical camera: a smoothed follow point and a zoom factor.
///
/// Zoom > 1 magnifies; zoom < 1 shows more of the world.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CosmosCamera {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for CosmosCamera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CosmosCamera {
    /// Close `smoothing` of the gap to `target`.
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        self.position += (target - self.position) * smoothing;
    }

    /// Apply one wheel event, keeping zoom inside `[min_zoom, max_zoom]`.
    pub fn apply_wheel(&mut self, scroll_y: f32, config: &CosmosConfig) {
        if let Some(factor) = wheel_zoom_factor(scroll_y, config.zoom_step) {
            self.zoom = (self.zoom * factor).clamp(config.min_zoom, config.max_zoom);
        }
    }
}

/// Zoom multiplier for one wheel event.
///
/// Bevy reports scrolling toward the user as negative `y`; that zooms out
/// (`1 - step`).  Scrolling away zooms in (`1 + step`).  A zero delta (pure
/// horizontal scroll) leaves zoom alone.
pub fn wheel_zoom_factor(scroll_y: f32, step: f32) -> Option<f32> {
    if scroll_y < 0.0 {
        Some(1.0 - step)
    } else if scroll_y > 0.0 {
        Some(1.0 + step)
    } else {
        None
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Ease the camera toward the ship.
pub fn camera_follow_system(
    mut camera: ResMut<CosmosCamera>,
    ship: Res<Ship>,
    config: Res<CosmosConfig>,
) {
    camera.follow(ship.position, config.camera_smoothing);
}

/// Apply every pending wheel event.  Runs in every game state.
pub fn camera_zoom_system(
    mut wheel: MessageReader<MouseWheel>,
    mut camera: ResMut<CosmosCamera>,
    config: Res<CosmosConfig>,
) {
    for event in wheel.read() {
        camera.apply_wheel(event.y, &config);
    }
}

/// Spawn the 2D camera.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

/// Fail startup if there is not exactly one 2D camera to draw through.
pub fn verify_camera(cameras: Query<(), With<Camera2d>>) -> Result<(), BevyError> {
    if cameras.iter().count() != 1 {
        return Err(CosmosError::MissingCamera.into());
    }
    Ok(())
}

/// Mirror [`CosmosCamera`] onto the `Camera2d` transform.
pub fn sync_camera_transform_system(
    camera: Res<CosmosCamera>,
    mut q_camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = q_camera.single_mut() else {
        return;
    };
    transform.translation.x = camera.position.x;
    transform.translation.y = camera.position.y;
    transform.scale = Vec3::new(1.0 / camera.zoom, 1.0 / camera.zoom, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ZOOM, MIN_ZOOM};

    #[test]
    fn follow_closes_a_tenth_of_the_gap() {
        let mut camera = CosmosCamera::default();
        camera.follow(Vec2::new(100.0, -50.0), 0.1);
        assert!((camera.position - Vec2::new(10.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn five_zoom_out_steps() {
        let config = CosmosConfig::default();
        let mut camera = CosmosCamera::default();
        for _ in 0..5 {
            camera.apply_wheel(-1.0, &config);
        }
        assert!((camera.zoom - 0.9_f32.powi(5)).abs() < 1e-5);
        assert!((camera.zoom - 0.590).abs() < 1e-3);
    }

    #[test]
    fn zoom_stays_clamped() {
        let config = CosmosConfig::default();
        let mut camera = CosmosCamera::default();
        for _ in 0..100 {
            camera.apply_wheel(3.0, &config);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);
        for _ in 0..200 {
            camera.apply_wheel(-0.5, &config);
        }
        assert_eq!(camera.zoom, MIN_ZOOM);
    }

    #[test]
    fn horizontal_scroll_is_ignored() {
        assert_eq!(wheel_zoom_factor(0.0, 0.1), None);
    }

    #[test]
    fn verify_camera_requires_a_camera() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let world = app.world_mut();
        assert!(world.run_system_cached::<Result<(), BevyError>, _, _>(verify_camera).expect("system runs").is_err());

        world.spawn(Camera2d);
        assert!(world.run_system_cached::<Result<(), BevyError>, _, _>(verify_camera).expect("system runs").is_ok());
    }

    #[test]
    fn sync_applies_position_and_inverse_zoom() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(CosmosCamera {
            position: Vec2::new(30.0, 40.0),
            zoom: 2.0,
        });
        let entity = app.world_mut().spawn((Camera2d, Transform::default())).id();
        app.add_systems(Update, sync_camera_transform_system);
        app.update();

        let transform = app.world().get::<Transform>(entity).expect("camera transform");
        assert_eq!(transform.translation.truncate(), Vec2::new(30.0, 40.0));
        assert_eq!(transform.scale.x, 0.5);
    }
}
