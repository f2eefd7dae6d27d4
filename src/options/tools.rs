use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// User-adjustable tool settings snapshot.
///
/// Filter thresholds are optional inclusive upper bounds; `None` disables
/// the filter. Passed by value into every pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tools", inline)]
#[serde(default)]
pub struct ToolSettings {
    /// Maximum orbital semi-major axis in AU.
    #[schemars(title = "Orbital Distance (AU)")]
    pub orbital_distance: Option<f64>,
    /// Maximum distance to the system in parsecs.
    #[schemars(title = "System Distance (pc)")]
    pub system_distance: Option<f64>,
    /// Maximum planet radius in Earth radii.
    #[schemars(title = "Planet Radius (R⊕)")]
    pub planet_radius: Option<f64>,
    /// Maximum stellar radius in solar radii.
    #[schemars(title = "Stellar Radius (R☉)")]
    pub stellar_radius: Option<f64>,
    /// Telescope aperture in metres.
    #[schemars(title = "Telescope Diameter (m)", range(min = 0.5, max = 30.0), extend("step" = 0.5))]
    pub telescope_diameter: f64,
    /// Reference SNR for an Earth twin at 10 pc with a 6 m telescope.
    #[schemars(title = "Baseline SNR", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub snr0: f64,
    /// Tag planets with their habitable-zone status.
    #[schemars(title = "Habitable Zone")]
    pub is_hz_activated: bool,
    /// Draw planets as one instanced mesh instead of per-body meshes.
    /// Presentation only; never re-runs the pipeline.
    #[schemars(title = "Instanced Mesh")]
    pub is_instant_mesh: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            orbital_distance: None,
            system_distance: None,
            planet_radius: None,
            stellar_radius: None,
            telescope_diameter: 6.0,
            snr0: 100.0,
            is_hz_activated: false,
            is_instant_mesh: true,
        }
    }
}

/// Filter-stage subset of [`ToolSettings`].
///
/// Compared bitwise, so a NaN field equals itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterThresholds {
    /// Maximum semi-major axis in AU.
    pub orbital_distance: Option<f64>,
    /// Maximum system distance in parsecs.
    pub system_distance: Option<f64>,
    /// Maximum planet radius in Earth radii.
    pub planet_radius: Option<f64>,
    /// Maximum stellar radius in solar radii.
    pub stellar_radius: Option<f64>,
}

/// Scoring-stage subset of [`ToolSettings`].
///
/// Compared bitwise, so a NaN field equals itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringParams {
    /// Telescope aperture in metres.
    pub telescope_diameter: f64,
    /// Baseline SNR.
    pub snr0: f64,
    /// Whether to assign the habitability flag.
    pub habitability: bool,
}

/// Everything in [`ToolSettings`] that changes pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineInputs {
    /// Filter thresholds.
    pub thresholds: FilterThresholds,
    /// Scoring parameters.
    pub scoring: ScoringParams,
}

fn same_bound(a: Option<f64>, b: Option<f64>) -> bool {
    a.map(f64::to_bits) == b.map(f64::to_bits)
}

impl PartialEq for FilterThresholds {
    fn eq(&self, other: &Self) -> bool {
        same_bound(self.orbital_distance, other.orbital_distance)
            && same_bound(self.system_distance, other.system_distance)
            && same_bound(self.planet_radius, other.planet_radius)
            && same_bound(self.stellar_radius, other.stellar_radius)
    }
}

impl Eq for FilterThresholds {}

impl PartialEq for ScoringParams {
    fn eq(&self, other: &Self) -> bool {
        self.telescope_diameter.to_bits() == other.telescope_diameter.to_bits()
            && self.snr0.to_bits() == other.snr0.to_bits()
            && self.habitability == other.habitability
    }
}

impl Eq for ScoringParams {}

/// Non-finite bounds are inactive; fold them into `None`.
fn active_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|v| v.is_finite())
}

impl ToolSettings {
    /// Thresholds handed to the filter stage.
    #[must_use]
    pub fn filter_thresholds(&self) -> FilterThresholds {
        FilterThresholds {
            orbital_distance: active_bound(self.orbital_distance),
            system_distance: active_bound(self.system_distance),
            planet_radius: active_bound(self.planet_radius),
            stellar_radius: active_bound(self.stellar_radius),
        }
    }

    /// Parameters handed to the scoring stage.
    #[must_use]
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            telescope_diameter: self.telescope_diameter,
            snr0: self.snr0,
            habitability: self.is_hz_activated,
        }
    }

    /// Pipeline-relevant projection. Two snapshots with equal inputs
    /// produce identical pipeline output.
    #[must_use]
    pub fn pipeline_inputs(&self) -> PipelineInputs {
        PipelineInputs {
            thresholds: self.filter_thresholds(),
            scoring: self.scoring_params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_toggle_does_not_change_inputs() {
        let a = ToolSettings::default();
        let b = ToolSettings {
            is_instant_mesh: !a.is_instant_mesh,
            ..a.clone()
        };
        assert_eq!(a.pipeline_inputs(), b.pipeline_inputs());
    }

    #[test]
    fn filter_and_scoring_fields_change_inputs() {
        let base = ToolSettings::default();
        let variants = [
            ToolSettings { orbital_distance: Some(1.0), ..base.clone() },
            ToolSettings { system_distance: Some(20.0), ..base.clone() },
            ToolSettings { planet_radius: Some(2.0), ..base.clone() },
            ToolSettings { stellar_radius: Some(1.5), ..base.clone() },
            ToolSettings { telescope_diameter: 8.0, ..base.clone() },
            ToolSettings { snr0: 50.0, ..base.clone() },
            ToolSettings { is_hz_activated: true, ..base.clone() },
        ];
        for v in variants {
            assert_ne!(v.pipeline_inputs(), base.pipeline_inputs(), "{v:?}");
        }
    }

    #[test]
    fn nan_settings_equal_themselves() {
        let settings = ToolSettings {
            orbital_distance: Some(f64::NAN),
            telescope_diameter: f64::NAN,
            snr0: f64::NAN,
            ..ToolSettings::default()
        };
        assert_eq!(settings.pipeline_inputs(), settings.clone().pipeline_inputs());
    }

    #[test]
    fn non_finite_bounds_fold_to_none() {
        let settings = ToolSettings {
            orbital_distance: Some(f64::NAN),
            system_distance: Some(f64::INFINITY),
            planet_radius: Some(2.0),
            ..ToolSettings::default()
        };
        let thresholds = settings.filter_thresholds();
        assert_eq!(thresholds.orbital_distance, None);
        assert_eq!(thresholds.system_distance, None);
        assert_eq!(thresholds.planet_radius, Some(2.0));
        assert_eq!(
            thresholds,
            ToolSettings { planet_radius: Some(2.0), ..ToolSettings::default() }
                .filter_thresholds()
        );
    }
}
