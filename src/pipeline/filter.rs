//! Filter stage: coarse feasibility cut over the whole catalog.

use crate::catalog::PlanetRecord;
use crate::options::FilterThresholds;

/// A threshold is active when it is set to a finite value.
fn active(threshold: Option<f64>) -> Option<f64> {
    threshold.filter(|t| t.is_finite())
}

/// Check one upper-bound threshold. Inactive thresholds always pass; a
/// record missing the compared field fails an active threshold.
fn within(threshold: Option<f64>, value: Option<f64>) -> bool {
    match active(threshold) {
        None => true,
        Some(max) => value.is_some_and(|v| v <= max),
    }
}

/// Whether a single record passes every active threshold.
#[must_use]
pub fn passes(planet: &PlanetRecord, thresholds: &FilterThresholds) -> bool {
    within(thresholds.orbital_distance, planet.semi_major_axis)
        && within(thresholds.system_distance, planet.system_distance)
        && within(thresholds.planet_radius, planet.planet_radius)
        && within(thresholds.stellar_radius, planet.stellar_radius)
}

/// Order-preserving candidate subset. The input is not modified; passing
/// records are cloned with their derived fields cleared.
#[must_use]
pub fn filter_planets(
    planets: &[PlanetRecord],
    thresholds: &FilterThresholds,
) -> Vec<PlanetRecord> {
    planets
        .iter()
        .filter(|p| passes(p, thresholds))
        .map(PlanetRecord::without_derived)
        .collect()
}

/// Chunked [`filter_planets`] that calls `should_abort` between chunks.
///
/// Returns `None` if aborted.
pub fn filter_chunked(
    planets: &[PlanetRecord],
    thresholds: &FilterThresholds,
    chunk_size: usize,
    should_abort: &mut dyn FnMut() -> bool,
) -> Option<Vec<PlanetRecord>> {
    let mut candidates = Vec::new();
    for chunk in planets.chunks(chunk_size.max(1)) {
        if should_abort() {
            return None;
        }
        candidates.extend(
            chunk
                .iter()
                .filter(|p| passes(p, thresholds))
                .map(PlanetRecord::without_derived),
        );
    }
    Some(candidates)
}
