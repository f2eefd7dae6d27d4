//! SNR → display color bucket.
//!
//! Three fixed buckets ordered by detection confidence. Thresholds are
//! lower-inclusive: `snr == 5.0` is already [`ColorBucket::Medium`].

use serde::{Deserialize, Serialize};

/// Lower bound of the medium-confidence bucket.
pub const MEDIUM_THRESHOLD: f64 = 5.0;
/// Lower bound of the high-confidence bucket.
pub const HIGH_THRESHOLD: f64 = 10.0;

/// Detection-confidence bucket, ordered low → high.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorBucket {
    /// Unlikely to be detected.
    Low,
    /// Marginal detection.
    Medium,
    /// Confident detection.
    High,
}

impl ColorBucket {
    /// Every bucket in ascending order.
    pub const ALL: [ColorBucket; 3] =
        [ColorBucket::Low, ColorBucket::Medium, ColorBucket::High];

    /// CSS-style hex color.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Low => "#ff4d4d",
            Self::Medium => "#ffd24d",
            Self::High => "#4dff88",
        }
    }

    /// Linear RGB in [0, 1], for instance buffers.
    #[must_use]
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Self::Low => [1.0, 0.3, 0.3],
            Self::Medium => [1.0, 0.82, 0.3],
            Self::High => [0.3, 1.0, 0.53],
        }
    }
}

/// Bucket for an SNR value. Non-finite values fall into `Low`.
#[must_use]
pub fn color_for_snr(snr: f64) -> ColorBucket {
    if !snr.is_finite() || snr < MEDIUM_THRESHOLD {
        ColorBucket::Low
    } else if snr < HIGH_THRESHOLD {
        ColorBucket::Medium
    } else {
        ColorBucket::High
    }
}
