//! Planet pipeline: filter the catalog, score the candidates, deliver the
//! result to the render thread.
//!
//! The two stages are plain functions ([`filter`], [`score`]) that know
//! nothing about threads. [`PipelineProcessor`] runs them on dedicated worker
//! threads with generation tagging and cancellation, and [`PlanetPipeline`]
//! decides when a new run is needed. [`run_pipeline`] runs both stages
//! inline for tools, tests and benchmarks.

mod driver;
pub mod filter;
mod prepared;
mod processor;
pub mod score;

use std::panic::{catch_unwind, AssertUnwindSafe};

pub use driver::PlanetPipeline;
pub use prepared::{
    build_instances, scene_position, PipelineOutcome, PipelineResult,
    PipelineStats, PlanetInstance, ScoredPlanetSet,
};
pub use processor::PipelineProcessor;
use web_time::Instant;

use crate::catalog::PlanetRecord;
use crate::options::{PipelineOptions, ToolSettings};

/// Run both stages on the calling thread.
///
/// Produces the same result a background generation would, tagged with
/// generation 0. Stage panics are caught and reported as
/// [`PipelineOutcome::Failed`].
#[must_use]
pub fn run_pipeline(
    catalog: &[PlanetRecord],
    settings: &ToolSettings,
    options: &PipelineOptions,
) -> PipelineResult {
    let started = Instant::now();
    let thresholds = settings.filter_thresholds();
    let params = settings.scoring_params();

    let candidates = match catch_unwind(AssertUnwindSafe(|| {
        filter::filter_planets(catalog, &thresholds)
    })) {
        Ok(c) => c,
        Err(_) => {
            log::error!("filter stage failed");
            return PipelineResult::empty(
                0,
                PipelineOutcome::Failed,
                catalog.len(),
                started,
            );
        }
    };
    if candidates.is_empty() {
        return PipelineResult::empty(
            0,
            PipelineOutcome::NoCandidates,
            catalog.len(),
            started,
        );
    }

    let candidate_len = candidates.len();
    match catch_unwind(AssertUnwindSafe(|| {
        score::score_planets(candidates, &params)
    })) {
        Ok(scored) => PipelineResult::assemble(
            0,
            PipelineOutcome::Scored,
            ScoredPlanetSet::from_scored(scored),
            catalog.len(),
            candidate_len,
            started,
            options,
        ),
        Err(_) => {
            log::error!("scoring stage failed");
            PipelineResult::empty(
                0,
                PipelineOutcome::Failed,
                catalog.len(),
                started,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ColorBucket;

    fn mixed_catalog() -> Vec<PlanetRecord> {
        let json = r#"{"planets": [
            {"pl_name": "Earth twin", "pl_orbper": 365.25, "pl_rade": 1.0,
             "pl_orbsmax": 1.0, "st_teff": 5778, "st_rad": 1.0, "sy_dist": 10.0,
             "ra": 10.0, "dec": -5.0},
            {"pl_name": "Hot Jupiter", "pl_orbper": 3.5, "pl_rade": 11.2,
             "pl_orbsmax": 0.045, "st_teff": 6100, "st_rad": 1.2, "sy_dist": 48.0},
            {"pl_name": "Far world", "pl_rade": 2.1, "pl_orbsmax": 5.2,
             "st_teff": 4800, "st_rad": 0.8, "sy_dist": 300.0},
            {"pl_name": "Partial"}
        ]}"#;
        crate::catalog::Catalog::from_json_str(json)
            .unwrap()
            .planets()
            .to_vec()
    }

    #[test]
    fn solar_analog_is_habitable() {
        let catalog = vec![PlanetRecord {
            orbital_period: Some(10.0),
            planet_radius: Some(1.5),
            semi_major_axis: Some(1.0),
            stellar_teff: Some(5778.0),
            stellar_radius: Some(1.0),
            ..PlanetRecord::named("analog")
        }];
        let settings = ToolSettings {
            orbital_distance: Some(1.0),
            is_hz_activated: true,
            ..ToolSettings::default()
        };
        let result =
            run_pipeline(&catalog, &settings, &PipelineOptions::default());
        assert_eq!(result.outcome, PipelineOutcome::Scored);
        assert_eq!(result.set.len(), 1);
        assert_eq!(result.set.planets()[0].is_habitable, Some(true));
        assert_eq!(result.set.colors().len(), 1);
        assert_eq!(result.set.snr_values().len(), 1);
    }

    #[test]
    fn empty_catalog_has_no_candidates() {
        let result = run_pipeline(
            &[],
            &ToolSettings::default(),
            &PipelineOptions::default(),
        );
        assert_eq!(result.outcome, PipelineOutcome::NoCandidates);
        assert!(result.set.is_empty());
        assert_eq!(result.instance_count, 0);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let catalog = mixed_catalog();
        let settings = ToolSettings {
            is_hz_activated: true,
            ..ToolSettings::default()
        };
        let options = PipelineOptions::default();
        let first = run_pipeline(&catalog, &settings, &options);
        let second = run_pipeline(&catalog, &settings, &options);
        assert_eq!(first.set, second.set);
        assert_eq!(first.instances, second.instances);

        // Feeding scored output back in changes nothing either.
        let again = run_pipeline(first.set.planets(), &settings, &options);
        assert_eq!(first.set, again.set);
    }

    #[test]
    fn thresholds_and_scoring_compose() {
        let settings = ToolSettings {
            system_distance: Some(100.0),
            is_hz_activated: true,
            ..ToolSettings::default()
        };
        let result = run_pipeline(
            &mixed_catalog(),
            &settings,
            &PipelineOptions::default(),
        );
        let names: Vec<_> =
            result.set.planets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Earth twin", "Hot Jupiter"]);

        // Earth twin at 10 pc with a 6 m aperture sits exactly at snr0.
        assert!((result.set.snr_values()[0] - 100.0).abs() < 1e-9);
        assert_eq!(result.set.colors()[0], ColorBucket::High);
        assert_eq!(result.set.planets()[0].is_habitable, Some(true));
        assert_eq!(result.set.planets()[1].is_habitable, Some(false));
        assert_eq!(result.set.habitable_count(), 1);
        assert_eq!(result.stats.catalog_len, 4);
        assert_eq!(result.stats.candidate_len, 2);
    }
}
