//! Direct-imaging signal-to-noise estimate.
//!
//! `SNR = SNR0 · ((R★ · Rp · D/6) / ((d/10) · a))²`
//!
//! normalised to a 6 m telescope observing an Earth twin around a Sun twin
//! at 10 pc, which yields `SNR0`.

use crate::catalog::PlanetRecord;

/// Reference telescope aperture in metres.
pub const REFERENCE_DIAMETER_M: f64 = 6.0;
/// Reference system distance in parsecs.
pub const REFERENCE_DISTANCE_PC: f64 = 10.0;

/// Signal-to-noise for one planet.
///
/// Returns a finite, non-negative value. Malformed planet inputs (missing,
/// non-finite or non-positive) and non-finite instrument settings contribute
/// zero. Overflow saturates at `f64::MAX`.
#[must_use]
pub fn compute_snr(
    planet: &PlanetRecord,
    telescope_diameter: f64,
    snr0: f64,
) -> f64 {
    let valid = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
    let (Some(r_star), Some(r_planet), Some(distance), Some(axis)) = (
        valid(planet.stellar_radius),
        valid(planet.planet_radius),
        valid(planet.system_distance),
        valid(planet.semi_major_axis),
    ) else {
        return 0.0;
    };
    if !telescope_diameter.is_finite()
        || !snr0.is_finite()
        || telescope_diameter <= 0.0
        || snr0 <= 0.0
    {
        return 0.0;
    }

    let ratio = (r_star * r_planet * (telescope_diameter / REFERENCE_DIAMETER_M))
        / ((distance / REFERENCE_DISTANCE_PC) * axis);
    let snr = snr0 * ratio * ratio;
    if snr.is_nan() {
        0.0
    } else {
        snr.min(f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_twin(distance_pc: f64) -> PlanetRecord {
        PlanetRecord {
            stellar_radius: Some(1.0),
            planet_radius: Some(1.0),
            system_distance: Some(distance_pc),
            semi_major_axis: Some(1.0),
            ..PlanetRecord::named("twin")
        }
    }

    #[test]
    fn reference_case_returns_snr0() {
        let snr = compute_snr(&earth_twin(10.0), 6.0, 100.0);
        assert!((snr - 100.0).abs() < 1e-9);
    }

    #[test]
    fn increases_with_aperture_and_snr0() {
        let p = earth_twin(10.0);
        let mut prev = 0.0;
        for d in [1.0, 2.0, 4.0, 6.0, 8.0, 12.0] {
            let snr = compute_snr(&p, d, 100.0);
            assert!(snr > prev);
            prev = snr;
        }
        assert!(compute_snr(&p, 6.0, 200.0) > compute_snr(&p, 6.0, 100.0));
    }

    #[test]
    fn decreases_with_distance() {
        assert!(
            compute_snr(&earth_twin(20.0), 6.0, 100.0)
                < compute_snr(&earth_twin(10.0), 6.0, 100.0)
        );
    }

    #[test]
    fn malformed_input_contributes_zero() {
        let mut p = earth_twin(10.0);
        p.planet_radius = None;
        assert_eq!(compute_snr(&p, 6.0, 100.0), 0.0);

        let mut p = earth_twin(10.0);
        p.system_distance = Some(0.0);
        assert_eq!(compute_snr(&p, 6.0, 100.0), 0.0);

        let p = earth_twin(10.0);
        assert_eq!(compute_snr(&p, f64::NAN, 100.0), 0.0);
        assert_eq!(compute_snr(&p, 6.0, -1.0), 0.0);
    }

    #[test]
    fn overflow_saturates() {
        let mut p = earth_twin(10.0);
        p.semi_major_axis = Some(1e-300);
        p.stellar_radius = Some(1e200);
        let snr = compute_snr(&p, 6.0, 100.0);
        assert_eq!(snr, f64::MAX);
        assert!(snr >= compute_snr(&earth_twin(10.0), 6.0, 100.0));
        assert_eq!(
            crate::scoring::color_for_snr(snr),
            crate::scoring::ColorBucket::High
        );
    }

    #[test]
    fn deterministic() {
        let p = earth_twin(13.7);
        let a = compute_snr(&p, 7.3, 91.0);
        let b = compute_snr(&p, 7.3, 91.0);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
