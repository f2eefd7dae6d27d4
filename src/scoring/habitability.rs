//! Conservative habitable-zone test from stellar luminosity.

/// Solar effective temperature in kelvin.
pub const SOLAR_TEFF_K: f64 = 5778.0;

/// Effective stellar flux at the inner (runaway greenhouse) edge.
const INNER_FLUX: f64 = 1.1;
/// Effective stellar flux at the outer (maximum greenhouse) edge.
const OUTER_FLUX: f64 = 0.53;

/// Habitable-zone bounds in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitableZone {
    /// Inner edge in AU.
    pub inner_au: f64,
    /// Outer edge in AU.
    pub outer_au: f64,
}

impl HabitableZone {
    /// Zone for a star of the given luminosity (solar units).
    ///
    /// Distances follow the inverse-square law: `d = sqrt(L / S)`.
    #[must_use]
    pub fn from_luminosity(luminosity: f64) -> Self {
        Self {
            inner_au: (luminosity / INNER_FLUX).sqrt(),
            outer_au: (luminosity / OUTER_FLUX).sqrt(),
        }
    }

    /// Whether `distance_au` lies in `[inner, outer]`.
    #[must_use]
    pub fn contains(&self, distance_au: f64) -> bool {
        (self.inner_au..=self.outer_au).contains(&distance_au)
    }
}

/// Stellar luminosity in solar units, `L = R² (T / T☉)⁴`.
#[must_use]
pub fn stellar_luminosity(stellar_radius: f64, stellar_teff: f64) -> f64 {
    stellar_radius.powi(2) * (stellar_teff / SOLAR_TEFF_K).powi(4)
}

fn positive_finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Whether a planet's orbit falls inside its star's habitable zone.
///
/// Missing, non-finite or non-positive inputs return `false`.
#[must_use]
pub fn is_within_habitable_zone(
    name: &str,
    stellar_radius: Option<f64>,
    stellar_teff: Option<f64>,
    semi_major_axis: Option<f64>,
) -> bool {
    let (Some(radius), Some(teff), Some(distance)) = (
        positive_finite(stellar_radius),
        positive_finite(stellar_teff),
        positive_finite(semi_major_axis),
    ) else {
        log::trace!("{name}: habitability inputs invalid");
        return false;
    };

    let luminosity = stellar_luminosity(radius, teff);
    if !luminosity.is_finite() {
        return false;
    }
    let zone = HabitableZone::from_luminosity(luminosity);
    let inside = zone.contains(distance);
    log::trace!(
        "{name}: L={luminosity:.3} HZ=[{:.3}, {:.3}] AU, a={distance} AU -> {inside}",
        zone.inner_au,
        zone.outer_au,
    );
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_has_unit_luminosity() {
        assert!((stellar_luminosity(1.0, SOLAR_TEFF_K) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn earth_is_habitable() {
        assert!(is_within_habitable_zone(
            "Earth",
            Some(1.0),
            Some(5778.0),
            Some(1.0)
        ));
    }

    #[test]
    fn too_close_and_too_far() {
        assert!(!is_within_habitable_zone(
            "Mercury",
            Some(1.0),
            Some(5778.0),
            Some(0.39)
        ));
        assert!(!is_within_habitable_zone(
            "Jupiter",
            Some(1.0),
            Some(5778.0),
            Some(5.2)
        ));
    }

    #[test]
    fn zone_scales_with_luminosity() {
        // 4x the luminosity pushes the zone out by 2x.
        let sun = HabitableZone::from_luminosity(1.0);
        let bright = HabitableZone::from_luminosity(4.0);
        assert!((bright.inner_au - 2.0 * sun.inner_au).abs() < 1e-12);
        assert!((bright.outer_au - 2.0 * sun.outer_au).abs() < 1e-12);
    }

    #[test]
    fn fails_closed_on_bad_input() {
        let bad = [
            None,
            Some(0.0),
            Some(-1.0),
            Some(f64::NAN),
            Some(f64::INFINITY),
        ];
        for b in bad {
            assert!(!is_within_habitable_zone("x", b, Some(5778.0), Some(1.0)));
            assert!(!is_within_habitable_zone("x", Some(1.0), b, Some(1.0)));
            assert!(!is_within_habitable_zone("x", Some(1.0), Some(5778.0), b));
        }
    }

    #[test]
    fn overflowing_luminosity_is_rejected() {
        assert!(!is_within_habitable_zone(
            "x",
            Some(f64::MAX),
            Some(f64::MAX),
            Some(1.0)
        ));
    }
}
