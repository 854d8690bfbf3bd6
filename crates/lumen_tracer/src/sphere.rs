//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Point3};

/// A sphere primitive.
///
/// A negative radius leaves the intersection math untouched but flips the
/// outward normal, turning the sphere inside out. Nested inside a regular
/// dielectric sphere it makes a hollow glass shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        if radius == 0.0 {
            log::warn!("Zero-radius sphere at {:?} can never be hit", center);
        }
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // A grazing root on a point sphere has no usable normal
        if self.radius == 0.0 {
            return None;
        }

        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(ray, root, p, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use lumen_math::{random_unit_vector, Vec3, Vec3Ext};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_far_root_used_from_inside() {
        let sphere = Sphere::new(Point3::ZERO, 2.0, grey());
        let ray = Ray::new(Point3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_interval_rejects_both_roots() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, grey());
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        assert!(sphere.hit(&ray, Interval::new(0.001, 3.9)).is_none());
        assert!(sphere.hit(&ray, Interval::new(6.0, 10.0)).is_none());
        // Far root only
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).unwrap();
        assert!((rec.t - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_radius_flips_outward_normal() {
        let solid = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey());
        let hollow = Sphere::new(Point3::new(0.0, 0.0, -1.0), -0.5, grey());
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let interval = Interval::from_min(0.001);

        let a = solid.hit(&ray, interval).unwrap();
        let b = hollow.hit(&ray, interval).unwrap();

        assert_eq!(a.t, b.t);
        assert_eq!(a.p, b.p);
        assert!(a.front_face);
        assert!(!b.front_face);
        // Normal still faces the ray
        assert_eq!(b.normal, Vec3::Z);
    }

    #[test]
    fn test_zero_radius_sphere_is_never_hit() {
        let center = Point3::new(0.0, 0.0, -1.0);
        let sphere = Sphere::new(center, 0.0, grey());

        // Straight through the center, where the discriminant is exactly zero
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_hits_lie_on_surface_and_are_repeatable() {
        let center = Point3::new(0.3, -0.2, -4.0);
        let radius = 1.25;
        let sphere = Sphere::new(center, radius, grey());
        let mut rng = StdRng::seed_from_u64(17);
        let interval = Interval::from_min(0.001);
        let mut hits = 0;

        for _ in 0..500 {
            let origin = Point3::random_range(&mut rng, -1.0, 1.0);
            let direction = (center - origin).normalize() + 0.4 * random_unit_vector(&mut rng);
            let ray = Ray::new(origin, direction);

            if let Some(rec) = sphere.hit(&ray, interval) {
                hits += 1;
                assert!(((rec.p - center).length() - radius).abs() < 1e-9);
                assert!((rec.normal.length() - 1.0).abs() < 1e-9);

                let outward = (rec.p - center) / radius;
                let oriented = if rec.front_face { outward } else { -outward };
                assert!((rec.normal.dot(oriented) - 1.0).abs() < 1e-9);

                let again = sphere.hit(&ray, interval).unwrap();
                assert_eq!(again.t, rec.t);
                assert_eq!(again.p, rec.p);
            }
        }
        assert!(hits > 0);
    }
}
