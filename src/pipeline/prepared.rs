use std::sync::Arc;

use glam::Vec3;
use serde::Serialize;
use web_time::{Duration, Instant};

use crate::catalog::PlanetRecord;
use crate::options::{FilterThresholds, PipelineOptions, ScoringParams};
use crate::scoring::ColorBucket;

// ---------------------------------------------------------------------------
// Scored set
// ---------------------------------------------------------------------------

/// Planets, colors and SNR values as three parallel arrays.
///
/// The arrays are only ever built together, so index `i` always refers to
/// the same planet in all three. Fields are private to keep it that way.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlanetSet {
    planets: Vec<PlanetRecord>,
    colors: Vec<ColorBucket>,
    snr_values: Vec<f64>,
}

impl ScoredPlanetSet {
    /// Empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the parallel arrays from scored records. Records without an
    /// SNR count as zero.
    #[must_use]
    pub fn from_scored(planets: Vec<PlanetRecord>) -> Self {
        let snr_values: Vec<f64> =
            planets.iter().map(|p| p.snr.unwrap_or(0.0)).collect();
        let colors = planets
            .iter()
            .zip(&snr_values)
            .map(|(p, &snr)| {
                p.color
                    .unwrap_or_else(|| crate::scoring::color_for_snr(snr))
            })
            .collect();
        Self {
            planets,
            colors,
            snr_values,
        }
    }

    /// Scored planet records.
    #[must_use]
    pub fn planets(&self) -> &[PlanetRecord] {
        &self.planets
    }

    /// Color bucket per planet.
    #[must_use]
    pub fn colors(&self) -> &[ColorBucket] {
        &self.colors
    }

    /// SNR per planet.
    #[must_use]
    pub fn snr_values(&self) -> &[f64] {
        &self.snr_values
    }

    /// Number of planets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Iterate `(planet, color, snr)` triples.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&PlanetRecord, ColorBucket, f64)> + '_ {
        self.planets
            .iter()
            .zip(self.colors.iter().copied())
            .zip(self.snr_values.iter().copied())
            .map(|((p, c), s)| (p, c, s))
    }

    /// Number of planets flagged habitable.
    #[must_use]
    pub fn habitable_count(&self) -> usize {
        self.planets
            .iter()
            .filter(|p| p.is_habitable == Some(true))
            .count()
    }
}

// ---------------------------------------------------------------------------
// GPU instances
// ---------------------------------------------------------------------------

/// Per-planet instance for the instanced planet mesh.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlanetInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// Sphere radius in scene units (0 hides the instance).
    pub radius: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Signal-to-noise, for shader-side effects.
    pub snr: f32,
}

/// World position of a planet from RA/Dec (degrees) and distance (pc).
///
/// Y is up; RA 0 points along +X.
#[must_use]
pub fn scene_position(planet: &PlanetRecord, distance_scale: f32) -> Option<Vec3> {
    let (ra, dec, dist) = (planet.ra?, planet.dec?, planet.system_distance?);
    let (ra, dec) = (ra.to_radians() as f32, dec.to_radians() as f32);
    let r = dist as f32 * distance_scale;
    let position = Vec3::new(
        r * dec.cos() * ra.cos(),
        r * dec.sin(),
        -r * dec.cos() * ra.sin(),
    );
    position.is_finite().then_some(position)
}

/// Instances parallel to `set`. Planets without a position get radius 0.
#[must_use]
pub fn build_instances(
    set: &ScoredPlanetSet,
    options: &PipelineOptions,
) -> Vec<PlanetInstance> {
    set.iter()
        .map(|(planet, color, snr)| {
            let position = scene_position(planet, options.distance_scale);
            let radius = match (position, planet.planet_radius) {
                (Some(_), Some(r)) => r as f32 * options.planet_scale,
                (Some(_), None) => options.planet_scale,
                (None, _) => 0.0,
            };
            PlanetInstance {
                position: position.unwrap_or(Vec3::ZERO).to_array(),
                radius,
                color: color.rgb(),
                snr: snr as f32,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// How a pipeline generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Candidates were scored.
    Scored,
    /// The filter produced no candidates; scoring was skipped.
    NoCandidates,
    /// A stage panicked; the set is empty.
    Failed,
}

/// Timing and size statistics for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineStats {
    /// Records in the input catalog.
    pub catalog_len: usize,
    /// Records that passed the filter.
    pub candidate_len: usize,
    /// Wall time from submission to publication.
    pub elapsed: Duration,
}

/// One completed pipeline generation, ready for the render thread.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Generation this result belongs to.
    pub generation: u64,
    /// How the run ended.
    pub outcome: PipelineOutcome,
    /// Scored planets.
    pub set: ScoredPlanetSet,
    /// `PlanetInstance` bytes, parallel to `set`.
    pub instances: Vec<u8>,
    /// Number of instances in `instances`.
    pub instance_count: u32,
    /// Run statistics.
    pub stats: PipelineStats,
}

impl PipelineResult {
    /// Assemble a result, preparing instance bytes for upload.
    #[must_use]
    pub fn assemble(
        generation: u64,
        outcome: PipelineOutcome,
        set: ScoredPlanetSet,
        catalog_len: usize,
        candidate_len: usize,
        started: Instant,
        options: &PipelineOptions,
    ) -> Self {
        let instances = build_instances(&set, options);
        let instance_count = instances.len() as u32;
        Self {
            generation,
            outcome,
            set,
            instances: bytemuck::cast_slice(&instances).to_vec(),
            instance_count,
            stats: PipelineStats {
                catalog_len,
                candidate_len,
                elapsed: started.elapsed(),
            },
        }
    }

    /// Empty result for a generation that produced nothing to score or
    /// failed.
    #[must_use]
    pub fn empty(
        generation: u64,
        outcome: PipelineOutcome,
        catalog_len: usize,
        started: Instant,
    ) -> Self {
        Self {
            generation,
            outcome,
            set: ScoredPlanetSet::empty(),
            instances: Vec::new(),
            instance_count: 0,
            stats: PipelineStats {
                catalog_len,
                candidate_len: 0,
                elapsed: started.elapsed(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Worker messages
// ---------------------------------------------------------------------------

/// Work order for the filter worker.
pub(crate) struct FilterJob {
    pub generation: u64,
    pub catalog: Arc<[PlanetRecord]>,
    pub thresholds: FilterThresholds,
    pub scoring: ScoringParams,
    pub started: Instant,
}

/// Request sent from the render thread to the filter worker.
pub(crate) enum FilterRequest {
    /// Filter a catalog for a new generation.
    Run(FilterJob),
    /// Shut down both workers.
    Shutdown,
}

/// Work order for the scoring worker.
pub(crate) struct ScoreJob {
    pub generation: u64,
    pub candidates: Vec<PlanetRecord>,
    pub params: ScoringParams,
    pub catalog_len: usize,
    pub started: Instant,
}

/// Message sent from the filter worker to the scoring worker.
pub(crate) enum ScoreRequest {
    /// Score a candidate set.
    Run(ScoreJob),
    /// Publish an already-final result without scoring.
    Publish(Box<PipelineResult>),
    /// A newer generation started; abandon anything older.
    Supersede(u64),
    /// Shut down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, snr: f64) -> PlanetRecord {
        PlanetRecord {
            snr: Some(snr),
            ..PlanetRecord::named(name)
        }
    }

    #[test]
    fn arrays_stay_parallel() {
        let set = ScoredPlanetSet::from_scored(vec![
            planet("a", 1.0),
            planet("b", 7.0),
            planet("c", 30.0),
        ]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.colors().len(), 3);
        assert_eq!(set.snr_values(), &[1.0, 7.0, 30.0]);
        assert_eq!(
            set.colors(),
            &[ColorBucket::Low, ColorBucket::Medium, ColorBucket::High]
        );
        let names: Vec<_> = set.iter().map(|(p, _, _)| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn serializes_with_parallel_array_keys() {
        let set = ScoredPlanetSet::from_scored(vec![planet("a", 12.0)]);
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["colors"][0], "high");
        assert_eq!(value["snrValues"][0], 12.0);
        assert_eq!(value["planets"][0]["pl_name"], "a");
    }

    #[test]
    fn position_from_ra_dec() {
        let p = PlanetRecord {
            ra: Some(0.0),
            dec: Some(90.0),
            system_distance: Some(100.0),
            ..PlanetRecord::named("pole")
        };
        let pos = scene_position(&p, 0.01).unwrap();
        assert!((pos - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);

        let missing = PlanetRecord::named("nowhere");
        assert!(scene_position(&missing, 0.01).is_none());
    }

    #[test]
    fn instances_are_parallel_and_hide_unplaced_planets() {
        let placed = PlanetRecord {
            ra: Some(0.0),
            dec: Some(0.0),
            system_distance: Some(10.0),
            planet_radius: Some(2.0),
            snr: Some(15.0),
            ..PlanetRecord::named("placed")
        };
        let set =
            ScoredPlanetSet::from_scored(vec![placed, planet("unplaced", 3.0)]);
        let options = PipelineOptions::default();
        let instances = build_instances(&set, &options);
        assert_eq!(instances.len(), 2);
        assert!((instances[0].radius - 2.0 * options.planet_scale).abs() < 1e-9);
        assert!((instances[0].position[0] - 0.1).abs() < 1e-6);
        assert_eq!(instances[0].color, ColorBucket::High.rgb());
        assert_eq!(instances[1].radius, 0.0);

        let result = PipelineResult::assemble(
            3,
            PipelineOutcome::Scored,
            set,
            10,
            2,
            Instant::now(),
            &options,
        );
        assert_eq!(result.instance_count, 2);
        assert_eq!(
            result.instances.len(),
            2 * size_of::<PlanetInstance>()
        );
        assert_eq!(result.stats.candidate_len, 2);
    }
}
