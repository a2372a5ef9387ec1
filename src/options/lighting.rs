use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Scene lighting parameters.
pub struct LightingOptions {
    /// Ambient intensity at 100% brightness.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Key light position; it shines toward the origin.
    #[schemars(skip)]
    pub directional_position: [f32; 3],
    /// Background clear colour (linear RGB).
    #[schemars(skip)]
    pub background: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.6,
            directional_intensity: 0.8,
            directional_position: [10.0, 10.0, 5.0],
            background: [0.1, 0.1, 0.1],
        }
    }
}
