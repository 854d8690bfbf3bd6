//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::{Interval, Point3, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: &'a Material,
    /// Ray parameter of the intersection
    pub t: f64,
    /// Whether the ray hit the outward-facing side of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    ///
    /// `outward_normal` must have unit length.
    pub fn new(ray: &Ray, t: f64, p: Point3, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Anything a ray can be tested against.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with `t` strictly inside `ray_t`,
    /// or `None` if there is none.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}
