//! One viewer per viewport: the installed model, its camera, and the
//! command surface the host drives it through.
//!
//! ```ignore
//! let mut session = ViewerSession::new(Options::default(), 1280, 720);
//! let source = JsonFileSource::new("assets");
//! let loader = ModelLoader::new(source, session.options());
//! let _ = session.load(&loader).await;
//!
//! session.execute(ViewerCommand::TopView);
//! let frame = session.tick();
//! ```
//!
//! A model is only ever replaced whole, by [`ViewerSession::install_model`].
//! Each install bumps [`ViewerSession::generation`], so when two loads race
//! the one installed last is the one displayed.

mod command;
mod config;

pub use command::ViewerCommand;
pub use config::{CameraCatalog, CameraEntry};

use glam::Vec3;

use crate::bounds::{compute_bounds, BoundingVolume};
use crate::camera::frustum::Frustum;
use crate::camera::CameraUniform;
use crate::error::ViewerError;
use crate::loader::{AssetSource, LoadOutcome, LoadState, ModelLoader};
use crate::options::{LightingOptions, Options};
use crate::scene::ModelGraph;
use crate::util::frame_timing::FrameTiming;
use crate::viewport::{ViewPreset, ViewportController};

/// Lights and clear colour applied to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    /// Ambient light intensity after brightness scaling.
    pub ambient_intensity: f32,
    /// Directional light intensity.
    pub directional_intensity: f32,
    /// Directional light position; it shines toward the origin.
    pub directional_position: Vec3,
    /// Background clear colour (linear RGB).
    pub background: [f32; 3],
    /// Brightness fraction the ambient level was derived from.
    pub brightness: f32,
}

impl SceneLighting {
    /// Lighting at 100% brightness.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient_intensity: options.ambient_intensity,
            directional_intensity: options.directional_intensity,
            directional_position: Vec3::from_array(
                options.directional_position,
            ),
            background: options.background,
            brightness: 1.0,
        }
    }
}

/// Per-frame state handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    /// GPU-ready camera data.
    pub uniform: CameraUniform,
    /// Scene lights and clear colour.
    pub lighting: SceneLighting,
    /// Whether a model is installed.
    pub has_model: bool,
    /// Whether the installed model's bounds intersect the view frustum.
    /// Always `false` without a model.
    pub model_in_view: bool,
    /// Smoothed frames per second.
    pub fps: f32,
    /// Install generation of the model being drawn.
    pub generation: u64,
}

/// The viewer state for a single viewport.
pub struct ViewerSession {
    options: Options,
    model: Option<ModelGraph>,
    /// Bounds of `model` at install time, for the per-frame visibility test.
    installed_bounds: Option<BoundingVolume>,
    viewport: ViewportController,
    lighting: SceneLighting,
    textures_visible: bool,
    cameras: CameraCatalog,
    generation: u64,
    uniform: CameraUniform,
    frame_timing: FrameTiming,
}

impl ViewerSession {
    /// Session for a `width` × `height` viewport with no model installed.
    #[must_use]
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let viewport = ViewportController::new(width, height, &options.camera);
        let lighting = SceneLighting::from_options(&options.lighting);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(viewport.camera());
        Self {
            options,
            model: None,
            installed_bounds: None,
            viewport,
            lighting,
            textures_visible: true,
            cameras: CameraCatalog::default(),
            generation: 0,
            uniform,
            frame_timing: FrameTiming::new(0),
        }
    }

    // -- Accessors --

    /// Options the session was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The installed model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&ModelGraph> {
        self.model.as_ref()
    }

    /// Whether a model is installed.
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Camera and viewport state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Current scene lighting.
    #[must_use]
    pub fn lighting(&self) -> SceneLighting {
        self.lighting
    }

    /// Whether mesh materials are shown.
    #[must_use]
    pub fn textures_visible(&self) -> bool {
        self.textures_visible
    }

    /// Cameras from the last accepted configuration.
    #[must_use]
    pub fn cameras(&self) -> &CameraCatalog {
        &self.cameras
    }

    /// Number of models installed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bounds of the installed model, recomputed from its current graph.
    #[must_use]
    pub fn model_bounds(&self) -> Option<BoundingVolume> {
        self.model.as_ref().map(compute_bounds)
    }

    // -- Loading --

    /// Run `loader` against the configured asset paths and install the
    /// result.
    pub async fn load<S: AssetSource>(
        &mut self,
        loader: &ModelLoader<S>,
    ) -> LoadState {
        let assets = &self.options.assets;
        let outcome =
            loader.load(&assets.primary_path, &assets.fallback_path).await;
        self.install_model(outcome)
    }

    /// Replace the displayed model with `outcome` and frame it.
    ///
    /// Replacement is all-or-nothing: the previous graph, its cached bounds
    /// and the camera framing are swapped in one step.
    pub fn install_model(&mut self, outcome: LoadOutcome) -> LoadState {
        let LoadOutcome { mut graph, state } = outcome;
        graph.set_materials_visible(self.textures_visible);
        let bounds = compute_bounds(&graph);

        self.model = Some(graph);
        self.installed_bounds = Some(bounds);
        self.generation += 1;
        self.viewport.on_preset_command(ViewPreset::Reset, &bounds);
        log::info!(
            "installed model generation {} ({state:?}), bounds {} .. {}",
            self.generation,
            bounds.min,
            bounds.max
        );
        state
    }

    // -- Commands --

    /// Apply a single command. Preset commands are ignored while no model
    /// is installed.
    pub fn execute(&mut self, command: ViewerCommand) {
        if command.requires_model() && !self.has_model() {
            log::debug!("ignoring {command:?}: no model loaded");
            return;
        }
        match command {
            ViewerCommand::ResetView => self.apply_preset(ViewPreset::Reset),
            ViewerCommand::TopView => self.apply_preset(ViewPreset::Top),
            ViewerCommand::SideView => self.apply_preset(ViewPreset::Side),
            ViewerCommand::SetProjection(mode) => {
                self.viewport.on_projection_change(mode);
            }
            ViewerCommand::ToggleProjection => {
                let mode = self.viewport.projection_mode().toggled();
                self.viewport.on_projection_change(mode);
            }
            ViewerCommand::Resize { width, height } => {
                self.viewport.on_resize(width, height);
            }
            ViewerCommand::Orbit { delta } => self.viewport.orbit(delta),
            ViewerCommand::Pan { delta } => self.viewport.pan(delta),
            ViewerCommand::Zoom { delta } => self.viewport.zoom(delta),
            ViewerCommand::SetNavigationSpeed(speed) => {
                self.viewport.set_navigation_scale(speed / 100.0);
            }
            ViewerCommand::SetTexturesVisible(visible) => {
                self.textures_visible = visible;
                if let Some(model) = &mut self.model {
                    model.set_materials_visible(visible);
                }
            }
            ViewerCommand::SetBrightness(brightness) => {
                self.set_brightness(brightness);
            }
        }
    }

    fn apply_preset(&mut self, preset: ViewPreset) {
        if let Some(bounds) = self.model_bounds() {
            self.viewport.on_preset_command(preset, &bounds);
        }
    }

    fn set_brightness(&mut self, brightness: f32) {
        if !brightness.is_finite() || brightness < 0.0 {
            log::warn!("ignoring invalid brightness {brightness}");
            return;
        }
        self.lighting.brightness = brightness;
        self.lighting.ambient_intensity =
            brightness * self.options.lighting.ambient_intensity;
    }

    /// Replace the camera catalog from a configuration document. On error
    /// the previous catalog is kept.
    pub fn set_configuration(&mut self, json: &str) -> Result<(), ViewerError> {
        let catalog = CameraCatalog::from_json(json).inspect_err(|e| {
            log::warn!("rejected viewer configuration: {e}");
        })?;
        log::debug!("configuration lists {} cameras", catalog.len());
        self.cameras = catalog;
        Ok(())
    }

    // -- Frame --

    /// Advance one frame and snapshot the camera for rendering.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.frame_timing.end_frame();
        let camera = self.viewport.camera();
        self.uniform.update_view_proj(camera);
        let model_in_view = self.installed_bounds.is_some_and(|bounds| {
            Frustum::from_view_projection(camera.view_projection())
                .intersects_bounds(&bounds)
        });
        FrameSnapshot {
            uniform: self.uniform,
            lighting: self.lighting,
            has_model: self.has_model(),
            model_in_view,
            fps: self.frame_timing.fps(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::bounds::compute_size;
    use crate::camera::ProjectionMode;
    use crate::loader::{MemorySource, Tier};
    use crate::scene::{Material, MeshGeometry, ModelKind, Node, Transform};

    const EPS: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    fn session() -> ViewerSession {
        ViewerSession::new(Options::default(), 1024, 768)
    }

    fn placeholder_session() -> ViewerSession {
        let mut s = session();
        let loader = ModelLoader::new(MemorySource::new(), s.options());
        let state = pollster::block_on(s.load(&loader));
        assert_eq!(state, LoadState::Placeholder);
        s
    }

    fn box_node(size: f32) -> Node {
        Node::mesh(
            "scan",
            MeshGeometry::cuboid(size, size, size),
            Material::textured("scan.jpg"),
            Transform::IDENTITY,
        )
    }

    fn box_outcome(size: f32) -> LoadOutcome {
        LoadOutcome {
            graph: ModelGraph::new(box_node(size), ModelKind::Textured),
            state: LoadState::Loaded(Tier::Primary),
        }
    }

    #[test]
    fn placeholder_walkthrough() {
        let mut s = placeholder_session();
        let m = compute_size(&s.model_bounds().unwrap()).max_dimension;
        assert!(m > 0.0);

        s.execute(ViewerCommand::ResetView);
        assert!(approx(s.viewport().camera().position, Vec3::splat(m)));
        assert_eq!(s.viewport().camera().target, Vec3::ZERO);

        s.execute(ViewerCommand::TopView);
        let top = s.viewport().camera().position;
        assert!(approx(top, Vec3::new(0.0, 2.0 * m, 0.0)));

        s.execute(ViewerCommand::Resize {
            width: 800,
            height: 600,
        });
        assert_eq!(s.viewport().camera().aspect, 800.0 / 600.0);
        assert_eq!(s.viewport().camera().position, top);
    }

    #[test]
    fn install_frames_all() {
        let mut s = session();
        let _ = s.install_model(box_outcome(4.0));
        assert!(approx(s.viewport().camera().position, Vec3::splat(4.0)));
        assert_eq!(s.viewport().last_preset(), Some(ViewPreset::Reset));
    }

    #[test]
    fn presets_before_load_are_noops() {
        let mut s = session();
        let before = *s.viewport().camera();
        s.execute(ViewerCommand::ResetView);
        s.execute(ViewerCommand::TopView);
        s.execute(ViewerCommand::SideView);
        assert_eq!(*s.viewport().camera(), before);
        assert!(!s.has_model());
    }

    #[test]
    fn resize_before_load_updates_aspect() {
        let mut s = session();
        s.execute(ViewerCommand::Resize {
            width: 500,
            height: 250,
        });
        assert_eq!(s.viewport().camera().aspect, 2.0);
    }

    #[test]
    fn last_install_wins() {
        let mut s = session();
        let _ = s.install_model(box_outcome(2.0));
        let _ = s.install_model(box_outcome(6.0));
        assert_eq!(s.generation(), 2);
        let m = compute_size(&s.model_bounds().unwrap()).max_dimension;
        assert!((m - 6.0).abs() < EPS);
        assert!(approx(s.viewport().camera().position, Vec3::splat(6.0)));
    }

    #[test]
    fn racing_loads_show_last_installed() {
        let mut s = session();
        let small = MemorySource::new().with("scan.json", box_node(2.0));
        let large = MemorySource::new().with("scan.json", box_node(6.0));
        let small_loader = ModelLoader::new(small, s.options());
        let large_loader = ModelLoader::new(large, s.options());

        let small_load = small_loader.load("scan.json", "flat.json");
        let large_load = large_loader.load("scan.json", "flat.json");
        let large_done = pollster::block_on(large_load);
        let small_done = pollster::block_on(small_load);

        let _ = s.install_model(small_done);
        let state = s.install_model(large_done);
        assert_eq!(state, LoadState::Loaded(Tier::Primary));
        assert_eq!(s.generation(), 2);
        let m = compute_size(&s.model_bounds().unwrap()).max_dimension;
        assert!((m - 6.0).abs() < EPS);
        assert!(approx(s.viewport().camera().position, Vec3::splat(6.0)));
        assert_eq!(s.tick().generation, 2);
    }

    #[test]
    fn lighting_follows_options() {
        let mut options = Options::default();
        options.lighting.directional_position = [-4.0, 8.0, 2.0];
        options.lighting.background = [0.2, 0.3, 0.4];
        let mut s = ViewerSession::new(options, 640, 480);

        let lighting = s.lighting();
        assert_eq!(lighting.directional_position, Vec3::new(-4.0, 8.0, 2.0));
        assert_eq!(lighting.background, [0.2, 0.3, 0.4]);

        s.execute(ViewerCommand::SetBrightness(0.5));
        let frame = s.tick();
        assert_eq!(frame.lighting, s.lighting());
        assert_eq!(frame.lighting.background, [0.2, 0.3, 0.4]);
    }

    #[test]
    fn tick_without_model() {
        let mut s = session();
        let frame = s.tick();
        assert!(!frame.has_model);
        assert!(!frame.model_in_view);
        assert_eq!(frame.generation, 0);
        let view_proj = frame.uniform.view_proj;
        assert!(view_proj.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn tick_sees_framed_model() {
        let mut s = placeholder_session();
        let frame = s.tick();
        assert!(frame.has_model);
        assert!(frame.model_in_view);
        assert_eq!(frame.generation, 1);
    }

    #[test]
    fn projection_switch_keeps_pose() {
        let mut s = placeholder_session();
        s.execute(ViewerCommand::SideView);
        let before = *s.viewport().camera();

        s.execute(ViewerCommand::SetProjection(ProjectionMode::Orthographic));
        let after = *s.viewport().camera();
        assert_eq!(after.mode(), ProjectionMode::Orthographic);
        assert_eq!(after.position, before.position);
        assert_eq!(after.target, before.target);

        s.execute(ViewerCommand::ToggleProjection);
        assert_eq!(*s.viewport().camera(), before);
    }

    #[test]
    fn texture_toggle_survives_reinstall() {
        let mut s = session();
        s.execute(ViewerCommand::SetTexturesVisible(false));
        let _ = s.install_model(box_outcome(1.0));
        s.model()
            .unwrap()
            .root()
            .for_each_mesh(&mut |m| assert!(!m.material.visible));

        s.execute(ViewerCommand::SetTexturesVisible(true));
        s.model()
            .unwrap()
            .root()
            .for_each_mesh(&mut |m| assert!(m.material.visible));
    }

    #[test]
    fn brightness_scales_ambient() {
        let mut s = session();
        s.execute(ViewerCommand::SetBrightness(1.5));
        assert!((s.lighting().ambient_intensity - 0.9).abs() < EPS);
        assert_eq!(s.lighting().directional_intensity, 0.8);

        s.execute(ViewerCommand::SetBrightness(f32::NAN));
        assert_eq!(s.lighting().brightness, 1.5);
    }

    #[test]
    fn navigation_speed_is_percent() {
        let mut s = session();
        s.execute(ViewerCommand::SetNavigationSpeed(250.0));
        assert!((s.viewport().navigation_scale() - 2.5).abs() < EPS);
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut s = placeholder_session();
        let d = s.viewport().camera().distance();
        s.execute(ViewerCommand::Orbit {
            delta: Vec2::new(40.0, 10.0),
        });
        assert!((s.viewport().camera().distance() - d).abs() < 1e-3);
        assert_eq!(s.viewport().last_preset(), None);
    }

    #[test]
    fn configuration_replaces_catalog_only_when_valid() {
        let mut s = session();
        s.set_configuration(r#"{"cameras": [{}, {}, {}]}"#).unwrap();
        assert_eq!(s.cameras().len(), 3);

        assert!(s.set_configuration("not json").is_err());
        assert_eq!(s.cameras().len(), 3);
    }
}
