//! Free-look orbit navigation around the camera target.
//!
//! Rotation turns the eye around the target about world +Y and the camera's
//! right axis; panning moves eye and target together; zoom scales the
//! eye-target distance. Pan and zoom scale with distance so navigation feels
//! the same for small and large reconstructions.

use glam::{Quat, Vec2, Vec3};

use super::core::CameraState;
use crate::options::CameraOptions;

/// Keeps rotation from flipping over the poles.
const MIN_POLAR_SIN: f32 = 1e-3;

/// Sensitivities and distance limits for orbit navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of camera distance per pixel of drag.
    pub pan_speed: f32,
    /// Fraction of distance per scroll step.
    pub zoom_speed: f32,
    /// Closest allowed eye-target distance.
    pub min_distance: f32,
    /// Farthest allowed eye-target distance.
    pub max_distance: f32,
}

impl OrbitSettings {
    /// Settings taken from camera options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let min_distance = options.min_distance.max(1e-4);
        Self {
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance,
            max_distance: options.max_distance.max(min_distance),
        }
    }

    /// Copy with rotate/pan/zoom sensitivities multiplied by `scale`.
    #[must_use]
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            rotate_speed: self.rotate_speed * scale,
            pan_speed: self.pan_speed * scale,
            zoom_speed: self.zoom_speed * scale,
            ..*self
        }
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

/// Orbit the eye around the target by `delta` pixels of drag.
///
/// Straight above or below the target the yaw axis and the view axis
/// coincide, so there the camera's up vector carries the heading and a
/// horizontal drag spins the view instead.
pub fn rotate(camera: &mut CameraState, delta: Vec2, settings: &OrbitSettings) {
    let offset = camera.position - camera.target;
    if offset.length_squared() == 0.0 {
        return;
    }
    let at_pole = is_polar(offset);

    // Horizontal rotation around world up
    let yaw =
        Quat::from_axis_angle(Vec3::Y, -delta.x * settings.rotate_speed);
    let mut rotated = yaw * offset;
    let heading = yaw * camera.effective_up();

    // Vertical rotation around the camera's right axis
    let right = heading.cross(rotated).try_normalize().unwrap_or(Vec3::X);
    let pitch =
        Quat::from_axis_angle(right, -delta.y * settings.rotate_speed);
    let pitched = pitch * rotated;

    // Reject pitch that would cross a pole. At a pole the eye counts as
    // sitting on the side opposite the heading.
    let side = if at_pole { -heading } else { rotated };
    if !is_polar(pitched) && pitched.z * side.z + pitched.x * side.x >= 0.0 {
        rotated = pitched;
    }

    camera.position = camera.target + rotated;
    camera.up = if is_polar(rotated) { heading } else { Vec3::Y };
}

/// Whether `offset` points (almost) straight up or down.
fn is_polar(offset: Vec3) -> bool {
    offset.normalize().cross(Vec3::Y).length() <= MIN_POLAR_SIN
}

/// Move eye and target together by `delta` pixels of drag.
pub fn pan(camera: &mut CameraState, delta: Vec2, settings: &OrbitSettings) {
    let forward = camera.forward();
    let up = camera.effective_up();
    let right = forward.cross(up).normalize_or_zero();
    let screen_up = right.cross(forward);

    let scale =
        settings.pan_speed * camera.distance().max(settings.min_distance);
    let translation =
        right * (-delta.x * scale) + screen_up * (delta.y * scale);

    camera.position += translation;
    camera.target += translation;
}

/// Move the eye toward (positive `delta`) or away from the target.
///
/// Distance is clamped to the configured limits, widened to the current
/// distance so a preset framed outside them is never snapped back.
pub fn zoom(camera: &mut CameraState, delta: f32, settings: &OrbitSettings) {
    let offset = camera.position - camera.target;
    let current = offset.length();
    let direction = offset.try_normalize().unwrap_or(Vec3::Z);
    let lower = settings.min_distance.min(current);
    let upper = settings.max_distance.max(current);
    let distance =
        (current * (1.0 - delta * settings.zoom_speed)).clamp(lower, upper);
    camera.position = camera.target + direction * distance;
}
