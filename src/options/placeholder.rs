use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Placeholder", inline)]
#[serde(default)]
/// Parameters of the synthetic scene shown when no asset loads.
pub struct PlaceholderOptions {
    /// Number of scattered trees around the building.
    #[schemars(title = "Props", range(min = 0, max = 50))]
    pub prop_count: u32,
    /// Side length of the square the props are scattered over.
    #[schemars(title = "Scatter Extent", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub scatter_extent: f32,
    /// RNG seed for prop placement.
    #[schemars(skip)]
    pub seed: u64,
}

impl Default for PlaceholderOptions {
    fn default() -> Self {
        Self {
            prop_count: 5,
            scatter_extent: 30.0,
            seed: 0x0D_4D_5EED,
        }
    }
}
