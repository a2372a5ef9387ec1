//! Ownership of the live camera: presets, projection switching, resize and
//! orbit navigation.
//!
//! The controller is the only writer of its [`CameraState`]. Framing
//! replaces position and target together; projection changes and resizes
//! touch only projection fields, so neither disturbs the current framing.

use glam::{Vec2, Vec3};

use crate::bounds::BoundingVolume;
use crate::camera::orbit::{self, OrbitSettings};
use crate::camera::{CameraFramer, CameraState, ProjectionMode};
use crate::options::CameraOptions;

/// View preset state. Top, Side and Reset are momentary: applying one
/// recomputes the camera and control returns to [`ViewPreset::Free`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewPreset {
    /// User-driven orbit navigation.
    #[default]
    Free,
    /// Straight-down view.
    Top,
    /// View along the -X axis.
    Side,
    /// Three-quarter view of the whole model.
    Reset,
}

/// Owns the camera, projection mode and viewport size.
#[derive(Debug, Clone)]
pub struct ViewportController {
    camera: CameraState,
    framer: CameraFramer,
    width: u32,
    height: u32,
    last_preset: Option<ViewPreset>,
    orbit: OrbitSettings,
    navigation_scale: f32,
}

impl ViewportController {
    /// Controller for a `width` × `height` container with the initial
    /// perspective camera from `options`.
    #[must_use]
    pub fn new(width: u32, height: u32, options: &CameraOptions) -> Self {
        let framer = CameraFramer::new(options);
        let (width, height) = (width.max(1), height.max(1));
        let aspect = width as f32 / height as f32;
        let camera = CameraState::new(
            Vec3::from_array(options.initial_position),
            Vec3::ZERO,
            framer.projection(ProjectionMode::Perspective, aspect),
        );
        Self {
            camera,
            framer,
            width,
            height,
            last_preset: None,
            orbit: OrbitSettings::from_options(options),
            navigation_scale: 1.0,
        }
    }

    // -- Accessors --

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Framer used for presets and projection parameters.
    #[must_use]
    pub fn framer(&self) -> &CameraFramer {
        &self.framer
    }

    /// Current projection mode.
    #[must_use]
    pub fn projection_mode(&self) -> ProjectionMode {
        self.camera.mode()
    }

    /// Viewport size in pixels (never zero).
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width / height of the viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Preset the camera still shows, or `None` once free navigation has
    /// moved it.
    #[must_use]
    pub fn last_preset(&self) -> Option<ViewPreset> {
        self.last_preset
    }

    /// Multiplier on orbit sensitivities.
    #[must_use]
    pub fn navigation_scale(&self) -> f32 {
        self.navigation_scale
    }

    // -- Framing --

    /// Replace position and target with those of `state`. Projection,
    /// aspect and clip planes stay as they are.
    pub fn apply_framing(&mut self, state: &CameraState) {
        let mut next = self.camera;
        next.position = state.position;
        next.target = state.target;
        next.up = state.up;
        self.camera = next;
    }

    /// Recompute the camera for `preset` from `bounds`. [`ViewPreset::Free`]
    /// is a no-op.
    pub fn on_preset_command(
        &mut self,
        preset: ViewPreset,
        bounds: &BoundingVolume,
    ) {
        let mode = self.projection_mode();
        let aspect = self.aspect();
        let framed = match preset {
            ViewPreset::Free => return,
            ViewPreset::Reset => self.framer.frame_all(bounds, mode, aspect),
            ViewPreset::Top => self.framer.frame_top(bounds, mode, aspect),
            ViewPreset::Side => self.framer.frame_side(bounds, mode, aspect),
        };
        self.apply_framing(&framed);
        log::debug!(
            "preset {preset:?}: eye {} target {}",
            self.camera.position,
            self.camera.target
        );
        self.last_preset = Some(preset);
    }

    /// Switch projection at the current aspect, keeping position and target.
    pub fn on_projection_change(&mut self, mode: ProjectionMode) {
        let params = self.framer.projection(mode, self.aspect());
        self.camera.set_projection(params);
        log::debug!("projection set to {mode:?}");
    }

    /// Record the new container size and update the aspect ratio. Zero
    /// dimensions are clamped to one pixel.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.camera.aspect = self.aspect();
    }

    // -- Free navigation --

    /// Set the navigation speed multiplier (1.0 = default sensitivity).
    pub fn set_navigation_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.navigation_scale = scale;
        }
    }

    fn settings(&self) -> OrbitSettings {
        self.orbit.scaled(self.navigation_scale)
    }

    /// Orbit around the target by `delta` pixels of drag.
    pub fn orbit(&mut self, delta: Vec2) {
        let settings = self.settings();
        orbit::rotate(&mut self.camera, delta, &settings);
        self.enter_free();
    }

    /// Pan eye and target by `delta` pixels of drag.
    pub fn pan(&mut self, delta: Vec2) {
        let settings = self.settings();
        orbit::pan(&mut self.camera, delta, &settings);
        self.enter_free();
    }

    /// Zoom toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, delta: f32) {
        let settings = self.settings();
        orbit::zoom(&mut self.camera, delta, &settings);
        self.enter_free();
    }

    fn enter_free(&mut self) {
        self.last_preset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;

    fn controller() -> ViewportController {
        ViewportController::new(800, 400, &CameraOptions::default())
    }

    fn cube(m: f32) -> BoundingVolume {
        let half = Vec3::splat(m / 2.0);
        BoundingVolume::from_corners(-half, half)
    }

    #[test]
    fn initial_camera_matches_container() {
        let vp = controller();
        assert_eq!(vp.camera().aspect, 2.0);
        assert_eq!(vp.camera().position, Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(vp.projection_mode(), ProjectionMode::Perspective);
        assert_eq!(vp.last_preset(), None);
    }

    #[test]
    fn presets_record_last_applied() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Top, &cube(4.0));
        assert_eq!(vp.camera().position, Vec3::new(0.0, 8.0, 0.0));
        assert_eq!(vp.last_preset(), Some(ViewPreset::Top));
    }

    #[test]
    fn free_preset_is_noop() {
        let mut vp = controller();
        let before = *vp.camera();
        vp.on_preset_command(ViewPreset::Free, &cube(4.0));
        assert_eq!(*vp.camera(), before);
        assert_eq!(vp.last_preset(), None);
    }

    #[test]
    fn framing_keeps_projection() {
        let mut vp = controller();
        vp.on_projection_change(ProjectionMode::Orthographic);
        vp.on_preset_command(ViewPreset::Reset, &cube(6.0));
        assert_eq!(vp.camera().position, Vec3::splat(6.0));
        assert_eq!(vp.projection_mode(), ProjectionMode::Orthographic);
        assert_eq!(vp.camera().aspect, 2.0);
    }

    #[test]
    fn projection_switch_preserves_pose() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Reset, &cube(5.0));
        let before = *vp.camera();

        vp.on_projection_change(ProjectionMode::Orthographic);
        let ortho = *vp.camera();
        assert_eq!(ortho.position, before.position);
        assert_eq!(ortho.target, before.target);
        assert_eq!(ortho.aspect, before.aspect);
        assert_eq!(
            ortho.projection,
            Projection::Orthographic {
                frustum_height: 20.0
            }
        );

        vp.on_projection_change(ProjectionMode::Perspective);
        assert_eq!(*vp.camera(), before);
    }

    #[test]
    fn resize_changes_only_aspect() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Side, &cube(3.0));
        let before = *vp.camera();
        vp.on_resize(1024, 768);
        let after = *vp.camera();
        assert_eq!(after.aspect, 1024.0 / 768.0);
        assert_eq!(
            CameraState {
                aspect: before.aspect,
                ..after
            },
            before
        );
        assert_eq!(vp.size(), (1024, 768));
    }

    #[test]
    fn resize_to_zero_is_clamped() {
        let mut vp = controller();
        vp.on_resize(640, 0);
        assert_eq!(vp.size(), (640, 1));
        assert!(vp.camera().aspect.is_finite());
    }

    #[test]
    fn projection_after_resize_uses_new_aspect() {
        let mut vp = controller();
        vp.on_resize(300, 600);
        vp.on_projection_change(ProjectionMode::Orthographic);
        assert_eq!(vp.camera().aspect, 0.5);
    }

    #[test]
    fn orbit_clears_last_preset() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Reset, &cube(5.0));
        vp.orbit(Vec2::new(10.0, 0.0));
        assert_eq!(vp.last_preset(), None);
        assert_eq!(vp.camera().target, Vec3::ZERO);
    }

    #[test]
    fn navigation_scale_rejects_invalid() {
        let mut vp = controller();
        vp.set_navigation_scale(2.5);
        assert_eq!(vp.navigation_scale(), 2.5);
        vp.set_navigation_scale(f32::NAN);
        vp.set_navigation_scale(-1.0);
        assert_eq!(vp.navigation_scale(), 2.5);
    }

    #[test]
    fn zoom_out_after_framing_large_model() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Reset, &cube(600.0));
        let framed = vp.camera().distance();
        assert!(framed > CameraOptions::default().max_distance);

        vp.zoom(-1.0);
        assert!(vp.camera().distance() >= framed);
        vp.zoom(1.0);
        assert!(vp.camera().distance() < framed);
    }

    #[test]
    fn orbit_spins_top_view() {
        let mut vp = controller();
        vp.on_preset_command(ViewPreset::Top, &cube(4.0));
        let before = vp.camera().view_matrix();
        vp.orbit(Vec2::new(50.0, 0.0));
        assert_ne!(vp.camera().view_matrix(), before);
        assert_eq!(vp.last_preset(), None);
    }
}
