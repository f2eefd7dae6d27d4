//! Pure scoring functions: habitable zone, signal-to-noise, color buckets.
//!
//! Everything here is side-effect free (apart from trace logging) and
//! safe to call from any thread.

mod color;
mod habitability;
mod snr;

pub use color::{color_for_snr, ColorBucket, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
pub use habitability::{
    is_within_habitable_zone, stellar_luminosity, HabitableZone, SOLAR_TEFF_K,
};
pub use snr::{compute_snr, REFERENCE_DIAMETER_M, REFERENCE_DISTANCE_PC};
