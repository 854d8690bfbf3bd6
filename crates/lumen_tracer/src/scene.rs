//! Scene: an ordered, linearly searched collection of primitives.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray, Sphere,
};
use lumen_math::Interval;

/// Geometry the tracer knows how to intersect.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

/// A list of primitives tested exhaustively for every ray.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive. Order only matters for exact ties in `t`.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for primitive in &self.primitives {
            // Each test only has to beat the best hit so far
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};
    use lumen_math::{Point3, Vec3};
    use std::sync::Arc;

    fn sphere(z: f64, radius: f64, material: &Arc<Material>) -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, z), radius, Arc::clone(material))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let near_mat = Arc::new(Material::lambertian(Color::X));
        let far_mat = Arc::new(Material::metal(Color::Y, 0.0));
        let near = sphere(-2.0, 1.0, &near_mat);
        let far = sphere(-2.5, 1.0, &far_mat);
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let interval = Interval::from_min(0.001);

        let t_near = near.hit(&ray, interval).unwrap().t;
        let t_far = far.hit(&ray, interval).unwrap().t;
        assert!(t_near < t_far);

        for scene in [
            Scene::from_iter([Primitive::from(far.clone()), Primitive::from(near.clone())]),
            Scene::from_iter([Primitive::from(near.clone()), Primitive::from(far.clone())]),
        ] {
            let rec = scene.hit(&ray, interval).unwrap();
            assert_eq!(rec.t, t_near.min(t_far));
            assert_eq!(*rec.material, *near_mat);
        }
    }

    #[test]
    fn test_shared_material_is_not_copied() {
        let shared = Arc::new(Material::dielectric(1.5));
        let mut scene = Scene::new();
        scene.add(sphere(-1.0, 0.5, &shared));
        scene.add(sphere(-1.0, -0.4, &shared));

        assert_eq!(scene.len(), 2);
        assert_eq!(Arc::strong_count(&shared), 3);

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!(std::ptr::eq(rec.material, Arc::as_ptr(&shared)));

        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn test_hit_outside_interval_is_ignored() {
        let material = Arc::new(Material::lambertian(Color::ONE));
        let mut scene = Scene::new();
        scene.add(sphere(-10.0, 1.0, &material));

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, Interval::new(0.001, 5.0)).is_none());
        assert!(scene.hit(&ray, Interval::new(0.001, 50.0)).is_some());
    }
}
