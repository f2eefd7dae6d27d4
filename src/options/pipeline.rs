use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pipeline", inline)]
#[serde(default)]
/// Background pipeline tuning.
pub struct PipelineOptions {
    /// Records processed between cancellation checks.
    #[schemars(skip)]
    pub chunk_size: usize,
    /// Scene units per parsec when placing planets.
    #[schemars(title = "Distance Scale", range(min = 0.001, max = 1.0), extend("step" = 0.001))]
    pub distance_scale: f32,
    /// Scene units per Earth radius for instanced planet spheres.
    #[schemars(title = "Planet Scale", range(min = 0.0001, max = 0.1), extend("step" = 0.0001))]
    pub planet_scale: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            distance_scale: 0.01,
            planet_scale: 0.002,
        }
    }
}
