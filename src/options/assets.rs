use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::hex_to_rgb;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
/// Locations of the reconstructed model assets.
pub struct AssetOptions {
    /// Textured mesh, tried first.
    pub primary_path: String,
    /// Untextured mesh, tried when the primary asset is unavailable.
    pub fallback_path: String,
    /// Flat colour given to every mesh of an untextured model.
    #[schemars(skip)]
    pub untextured_color: [f32; 3],
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            primary_path: "odm_texturing/odm_textured_model.glb".into(),
            fallback_path: "odm_texturing/odm_textured_model.obj".into(),
            untextured_color: hex_to_rgb(0x88_88_88),
        }
    }
}
