use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, framing and navigation parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees (perspective mode).
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Visible height in world units (orthographic mode). Width follows the
    /// aspect ratio.
    #[schemars(title = "Ortho Height", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub ortho_frustum_height: f32,
    /// Camera distance used when the model has zero extent.
    #[schemars(skip)]
    pub fallback_distance: f32,
    /// Camera position before any model has been framed.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Rotation sensitivity (radians per pixel).
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan sensitivity (fraction of camera distance per pixel).
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub pan_speed: f32,
    /// Zoom sensitivity (fraction of distance per scroll step).
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest the orbit camera may get to its target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the orbit camera may get from its target.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            ortho_frustum_height: 20.0,
            fallback_distance: 10.0,
            initial_position: [0.0, 10.0, 20.0],
            rotate_speed: 0.01,
            pan_speed: 0.001,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 900.0,
        }
    }
}
