use std::f32::consts::FRAC_PI_4;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// View transition tuning.
pub struct CameraOptions {
    /// Seconds for the camera position to reach its target.
    #[schemars(title = "Fly Duration", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub position_duration: f32,
    /// Seconds for rotation and look-at target to settle.
    #[schemars(title = "Turn Duration", range(min = 0.0, max = 10.0), extend("step" = 0.25))]
    pub orientation_duration: f32,
    /// Easing curve shared by all transition channels.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Camera offset from the galaxy-center anchor.
    #[schemars(skip)]
    pub galaxy_offset: [f32; 3],
    /// Camera offset from the focus-body anchor.
    #[schemars(skip)]
    pub system_offset: [f32; 3],
    /// Target Euler X/Y rotation in galaxy view (radians).
    #[schemars(skip)]
    pub galaxy_rotation: [f32; 2],
    /// Target Euler X/Y rotation in system view (radians).
    #[schemars(skip)]
    pub system_rotation: [f32; 2],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position_duration: 6.0,
            orientation_duration: 2.0,
            easing: EasingFunction::QuadraticInOut,
            galaxy_offset: [2.9, 0.2, 0.5],
            system_offset: [0.000_01, 0.0, 0.0],
            galaxy_rotation: [FRAC_PI_4, FRAC_PI_4],
            system_rotation: [-FRAC_PI_4, -FRAC_PI_4],
        }
    }
}
