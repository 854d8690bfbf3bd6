//! Lumen math - double precision vector algebra for ray tracing.
//!
//! `Vec3` and `Point3` are thin aliases of [`glam::DVec3`]; the extra
//! operations a ray tracer needs (near-zero tests, random sampling,
//! reflection and refraction) live in [`Vec3Ext`] and the free functions
//! of the [`sampling`] module.

// Re-export glam for convenience
pub use glam;
pub use glam::DVec3;

mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{random_in_unit_disk, random_in_unit_sphere, random_unit_vector};

use rand::{Rng, RngCore};

/// 3D vector with `f64` components.
pub type Vec3 = DVec3;

/// A point in 3D space. Same representation as [`Vec3`].
pub type Point3 = DVec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO: f64 = 1e-8;

/// Ray tracing helpers on top of glam's vector type.
pub trait Vec3Ext: Sized {
    /// True if the vector is close to zero in all dimensions.
    fn near_zero(&self) -> bool;

    /// Vector with each component uniform in `[0, 1)`.
    fn random(rng: &mut dyn RngCore) -> Self;

    /// Vector with each component uniform in `[min, max)`.
    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }

    fn random(rng: &mut dyn RngCore) -> Self {
        DVec3::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>())
    }

    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self {
        DVec3::new(
            rng.gen_range(min..max),
            rng.gen_range(min..max),
            rng.gen_range(min..max),
        )
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// using Snell's law. `etai_over_etat` is the ratio of refractive indices.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Convert degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}
