//! Scoring stage: SNR, color bucket and habitability per candidate.

use crate::catalog::PlanetRecord;
use crate::options::ScoringParams;
use crate::scoring::{color_for_snr, compute_snr, is_within_habitable_zone};

/// Augment one record in place.
///
/// The habitability flag is only assigned when enabled and the record has
/// a valid semi-major axis, stellar temperature and stellar radius;
/// otherwise it is left absent.
pub fn augment(planet: &mut PlanetRecord, params: &ScoringParams) {
    let snr = compute_snr(planet, params.telescope_diameter, params.snr0);
    planet.snr = Some(snr);
    planet.color = Some(color_for_snr(snr));
    planet.is_habitable = if params.habitability
        && planet.has_habitability_inputs()
    {
        Some(is_within_habitable_zone(
            &planet.name,
            planet.stellar_radius,
            planet.stellar_teff,
            planet.semi_major_axis,
        ))
    } else {
        None
    };
}

/// Score every candidate, keeping order and length.
#[must_use]
pub fn score_planets(
    mut candidates: Vec<PlanetRecord>,
    params: &ScoringParams,
) -> Vec<PlanetRecord> {
    for planet in &mut candidates {
        augment(planet, params);
    }
    candidates
}

/// Chunked [`score_planets`] that calls `should_abort` between chunks.
///
/// Returns `None` if aborted.
pub fn score_chunked(
    mut candidates: Vec<PlanetRecord>,
    params: &ScoringParams,
    chunk_size: usize,
    should_abort: &mut dyn FnMut() -> bool,
) -> Option<Vec<PlanetRecord>> {
    for chunk in candidates.chunks_mut(chunk_size.max(1)) {
        if should_abort() {
            return None;
        }
        for planet in chunk {
            augment(planet, params);
        }
    }
    Some(candidates)
}
