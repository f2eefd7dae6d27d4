//! Procedural background star field.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::StarFieldOptions;

/// One background star, laid out for instanced point rendering.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// Relative brightness in `[0.2, 1.0]`.
    pub brightness: f32,
}

/// Seeded set of stars uniformly distributed in a spherical shell.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    stars: Vec<StarInstance>,
}

impl StarField {
    /// Scatter `count` stars between `inner_radius` and `outer_radius`.
    /// The same seed always produces the same field.
    #[must_use]
    pub fn generate(
        count: usize,
        inner_radius: f32,
        outer_radius: f32,
        seed: u64,
    ) -> Self {
        let inner = inner_radius.max(0.0);
        let outer = outer_radius.max(inner);
        let (inner3, outer3) = (inner.powi(3), outer.powi(3));
        let mut rng = StdRng::seed_from_u64(seed);

        let stars = (0..count)
            .map(|_| {
                // Uniform in volume: cube root of a uniform in [r0³, r1³].
                let u: f32 = rng.random();
                let r = (inner3 + u * (outer3 - inner3)).cbrt();
                let z: f32 = rng.random_range(-1.0..=1.0);
                let phi: f32 = rng.random::<f32>() * TAU;
                let ring = (1.0 - z * z).max(0.0).sqrt();
                let brightness = 0.2 + 0.8 * rng.random::<f32>().powi(3);
                StarInstance {
                    position: [r * ring * phi.cos(), r * z, r * ring * phi.sin()],
                    brightness,
                }
            })
            .collect();
        Self { stars }
    }

    /// Field described by `options`.
    #[must_use]
    pub fn from_options(options: &StarFieldOptions) -> Self {
        Self::generate(
            options.num_stars as usize,
            options.inner_radius,
            options.outer_radius,
            options.seed,
        )
    }

    /// All stars.
    #[must_use]
    pub fn stars(&self) -> &[StarInstance] {
        &self.stars
    }

    /// Instance bytes ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stars)
    }

    /// Number of stars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Whether the field has no stars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
