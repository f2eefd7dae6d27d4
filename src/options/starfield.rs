use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Star Field", inline)]
#[serde(default)]
/// Background star field parameters.
pub struct StarFieldOptions {
    /// Number of background stars.
    #[schemars(title = "Stars", range(min = 0, max = 200_000), extend("step" = 500))]
    pub num_stars: u32,
    /// Inner radius of the star shell in scene units.
    #[schemars(skip)]
    pub inner_radius: f32,
    /// Outer radius of the star shell in scene units.
    #[schemars(skip)]
    pub outer_radius: f32,
    /// RNG seed; equal seeds give identical skies.
    #[schemars(skip)]
    pub seed: u64,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self {
            num_stars: 5000,
            inner_radius: 50.0,
            outer_radius: 150.0,
            seed: 42,
        }
    }
}
