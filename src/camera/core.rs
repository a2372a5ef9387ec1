use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Which projection the viewport renders with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Vanishing-point projection with a fixed vertical field of view.
    #[default]
    Perspective,
    /// Parallel projection with a fixed frustum height.
    Orthographic,
}

impl ProjectionMode {
    /// Parse the UI names `"perspective"` / `"orthographic"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "perspective" => Some(Self::Perspective),
            "orthographic" => Some(Self::Orthographic),
            _ => None,
        }
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Orthographic,
            Self::Orthographic => Self::Perspective,
        }
    }
}

/// Projection-specific parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Visible height in world units; width is `height * aspect`.
        frustum_height: f32,
    },
}

impl Projection {
    /// Mode tag of this projection.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Self::Perspective { .. } => ProjectionMode::Perspective,
            Self::Orthographic { .. } => ProjectionMode::Orthographic,
        }
    }
}

/// Everything that defines the projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Perspective or orthographic parameter.
    pub projection: Projection,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl ProjectionParams {
    /// Build the projection matrix ([0,1] depth range, right-handed).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy } => Mat4::perspective_rh(
                fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { frustum_height } => {
                let half_h = frustum_height / 2.0;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
                )
            }
        }
    }
}

/// Camera defined by eye position, target, and projection parameters.
///
/// Projection changes mutate [`projection`](Self::projection), `aspect`,
/// `znear` and `zfar` in place; position and target are untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Preferred up direction.
    pub up: Vec3,
    /// Perspective or orthographic parameter.
    pub projection: Projection,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl CameraState {
    /// Camera at `position` looking at `target` with the given projection.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, params: ProjectionParams) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            projection: params.projection,
            aspect: params.aspect,
            znear: params.znear,
            zfar: params.zfar,
        }
    }

    /// Current projection mode.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        self.projection.mode()
    }

    /// Projection parameters as a standalone value.
    #[must_use]
    pub fn projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            projection: self.projection,
            aspect: self.aspect,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// Swap in new projection parameters, keeping position and target.
    pub fn set_projection(&mut self, params: ProjectionParams) {
        self.projection = params.projection;
        self.aspect = params.aspect;
        self.znear = params.znear;
        self.zfar = params.zfar;
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Unit view direction, or `-Z` when eye and target coincide.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Up vector actually used for the view matrix. Falls back to ±Z when
    /// looking straight along the preferred up axis (top-down views).
    #[must_use]
    pub fn effective_up(&self) -> Vec3 {
        let forward = self.forward();
        if forward.cross(self.up).length_squared() > 1e-8 {
            self.up
        } else if forward.dot(self.up) < 0.0 {
            Vec3::NEG_Z
        } else {
            Vec3::Z
        }
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.effective_up())
    }

    /// View-to-clip matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_params().matrix()
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Projection kind tag stored in [`CameraUniform::projection_kind`].
pub const PROJECTION_PERSPECTIVE: u32 = 0;
/// Projection kind tag stored in [`CameraUniform::projection_kind`].
pub const PROJECTION_ORTHOGRAPHIC: u32 = 1;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU-ready snapshot of the camera, handed to the renderer each frame.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees (0 for orthographic).
    pub fovy: f32,
    /// Orthographic frustum height (0 for perspective).
    pub ortho_height: f32,
    /// [`PROJECTION_PERSPECTIVE`] or [`PROJECTION_ORTHOGRAPHIC`].
    pub projection_kind: u32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
            ortho_height: 0.0,
            projection_kind: PROJECTION_PERSPECTIVE,
            _pad: [0.0; 2],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &CameraState) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        match camera.projection {
            Projection::Perspective { fovy } => {
                self.fovy = fovy;
                self.ortho_height = 0.0;
                self.projection_kind = PROJECTION_PERSPECTIVE;
            }
            Projection::Orthographic { frustum_height } => {
                self.fovy = 0.0;
                self.ortho_height = frustum_height;
                self.projection_kind = PROJECTION_ORTHOGRAPHIC;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4Swizzles;

    use super::*;

    fn perspective(aspect: f32) -> ProjectionParams {
        ProjectionParams {
            projection: Projection::Perspective { fovy: 75.0 },
            aspect,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!(
            ProjectionMode::from_name("Orthographic"),
            Some(ProjectionMode::Orthographic)
        );
        assert_eq!(
            ProjectionMode::from_name("perspective"),
            Some(ProjectionMode::Perspective)
        );
        assert_eq!(ProjectionMode::from_name("fisheye"), None);
        assert_eq!(
            ProjectionMode::Perspective.toggled(),
            ProjectionMode::Orthographic
        );
    }

    #[test]
    fn set_projection_keeps_pose() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let mut cam = CameraState::new(eye, Vec3::ZERO, perspective(1.5));
        cam.set_projection(ProjectionParams {
            projection: Projection::Orthographic {
                frustum_height: 20.0,
            },
            aspect: 1.5,
            znear: 0.1,
            zfar: 1000.0,
        });
        assert_eq!(cam.position, Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let eye = Vec3::splat(10.0);
        let cam = CameraState::new(eye, Vec3::ZERO, perspective(4.0 / 3.0));
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn top_down_view_is_well_defined() {
        let cam = CameraState::new(
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::ZERO,
            perspective(1.0),
        );
        assert_eq!(cam.effective_up(), Vec3::NEG_Z);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn orthographic_width_follows_aspect() {
        let params = ProjectionParams {
            projection: Projection::Orthographic {
                frustum_height: 20.0,
            },
            aspect: 2.0,
            znear: 0.1,
            zfar: 1000.0,
        };
        let m = params.matrix();
        // x = 20 (half width) maps to the right edge
        let edge = m * Vec3::new(20.0, 10.0, -1.0).extend(1.0);
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_tracks_projection_kind() {
        let mut cam =
            CameraState::new(Vec3::splat(5.0), Vec3::ZERO, perspective(1.0));
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.projection_kind, PROJECTION_PERSPECTIVE);
        assert_eq!(uniform.fovy, 75.0);

        cam.projection = Projection::Orthographic {
            frustum_height: 20.0,
        };
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.projection_kind, PROJECTION_ORTHOGRAPHIC);
        assert_eq!(uniform.ortho_height, 20.0);
        assert_eq!(uniform.position, [5.0; 3]);
    }
}
