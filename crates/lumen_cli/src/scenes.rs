//! Scene construction: built-in presets and JSON scene files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lumen_math::Vec3Ext;
use lumen_tracer::{CameraConfig, Color, Material, Point3, Scene, Sphere};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Unknown scene preset '{0}' (expected basic, materials, random, or a .json file)")]
    UnknownPreset(String),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// A scene together with the camera settings it was authored for.
pub struct SceneSetup {
    pub name: String,
    pub camera: CameraConfig,
    pub scene: Scene,
}

/// Serialized material, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { refractive_index: f64 },
}

impl MaterialDesc {
    fn build(&self) -> Material {
        match *self {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refractive_index } => Material::dielectric(refractive_index),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    pub material: String,
}

/// On-disk scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: HashMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneFile {
    /// Instantiate every material once and share it between the spheres
    /// that reference it.
    pub fn build(self) -> SceneResult<(CameraConfig, Scene)> {
        let materials: HashMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(desc.build())))
            .collect();

        let mut scene = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;
            scene.add(Sphere::new(sphere.center, sphere.radius, Arc::clone(material)));
        }

        Ok((self.camera, scene))
    }
}

/// Parse a scene from JSON text.
pub fn load_scene_from_str(json: &str) -> SceneResult<(CameraConfig, Scene)> {
    let file: SceneFile = serde_json::from_str(json)?;
    file.build()
}

/// Load a JSON scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneSetup> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string();

    let json = std::fs::read_to_string(path)?;
    let (camera, scene) = load_scene_from_str(&json)?;
    log::info!("Loaded scene '{}' with {} spheres", name, scene.len());

    Ok(SceneSetup { name, camera, scene })
}

/// Resolve a `--scene` argument: a preset name or a path to a JSON file.
pub fn resolve(spec: &str, seed: u64) -> SceneResult<SceneSetup> {
    let (camera, scene) = match spec {
        "basic" => basic(),
        "materials" => materials(),
        "random" => random(seed),
        path if path.ends_with(".json") => return load_scene(path),
        other => return Err(SceneError::UnknownPreset(other.to_string())),
    };

    log::info!("Built preset '{}' with {} spheres", spec, scene.len());
    Ok(SceneSetup {
        name: spec.to_string(),
        camera,
        scene,
    })
}

/// A grey diffuse sphere resting on a large ground sphere.
pub fn basic() -> (CameraConfig, Scene) {
    let grey = Arc::new(Material::lambertian(Color::splat(0.5)));

    let mut scene = Scene::new();
    scene.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, Arc::clone(&grey)));
    scene.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, grey));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        ..Default::default()
    };

    (camera, scene)
}

/// One sphere of each material, including a hollow glass shell, viewed
/// from above with a shallow depth of field.
pub fn materials() -> (CameraConfig, Scene) {
    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let left = Arc::new(Material::dielectric(1.5));
    let right = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    let mut scene = Scene::new();
    scene.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground));
    scene.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.3, center));
    scene.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, Arc::clone(&left)));
    scene.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), -0.4, left));
    scene.add(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, right));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(-2.0, 2.0, 1.0),
        lookat: Point3::new(0.0, 0.0, -1.0),
        vup: Point3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
    };

    (camera, scene)
}

/// A field of small random spheres around three large ones.
pub fn random(seed: u64) -> (CameraConfig, Scene) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let ground = Arc::new(Material::lambertian(Color::splat(0.5)));
    scene.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    // Small spheres share these materials instead of allocating their own
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material = if choose_mat < 0.8 {
                let albedo = Color::random(&mut rng) * Color::random(&mut rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::random_range(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };

            scene.add(Sphere::new(center, 0.2, material));
        }
    }

    scene.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));
    scene.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    scene.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 1200,
        samples_per_pixel: 500,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(13.0, 2.0, 3.0),
        lookat: Point3::ZERO,
        vup: Point3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
    };

    (camera, scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_tracer::{Hittable, Interval, Primitive, Ray, Vec3};

    const SCENE_JSON: &str = r#"{
        "camera": { "image_width": 16, "vfov": 40.0, "lookfrom": [0.0, 0.0, 3.0], "lookat": [0.0, 0.0, 0.0] },
        "materials": {
            "glass": { "type": "dielectric", "refractive_index": 1.5 },
            "gold": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.1 },
            "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] }
        },
        "spheres": [
            { "center": [0.0, -100.5, 0.0], "radius": 100.0, "material": "ground" },
            { "center": [0.0, 0.0, 0.0], "radius": 0.5, "material": "glass" },
            { "center": [0.0, 0.0, 0.0], "radius": -0.45, "material": "glass" },
            { "center": [1.0, 0.0, 0.0], "radius": 0.5, "material": "gold" }
        ]
    }"#;

    fn sphere(primitive: &Primitive) -> &Sphere {
        match primitive {
            Primitive::Sphere(sphere) => sphere,
        }
    }

    #[test]
    fn test_load_scene_from_json() {
        let (camera, scene) = load_scene_from_str(SCENE_JSON).unwrap();

        assert_eq!(camera.image_width, 16);
        assert_eq!(camera.vfov, 40.0);
        assert_eq!(camera.samples_per_pixel, 10);
        assert_eq!(scene.len(), 4);

        let primitives = scene.primitives();
        assert_eq!(sphere(&primitives[2]).radius(), -0.45);
        assert_eq!(**sphere(&primitives[3]).material(), Material::metal(Color::new(0.8, 0.6, 0.2), 0.1));
    }

    #[test]
    fn test_json_materials_are_shared() {
        let (_, scene) = load_scene_from_str(SCENE_JSON).unwrap();
        let primitives = scene.primitives();

        assert!(Arc::ptr_eq(
            sphere(&primitives[1]).material(),
            sphere(&primitives[2]).material()
        ));
        assert!(!Arc::ptr_eq(
            sphere(&primitives[0]).material(),
            sphere(&primitives[1]).material()
        ));
    }

    #[test]
    fn test_unknown_material_is_an_error() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1.0, "material": "chrome" } ] }"#;
        match load_scene_from_str(json) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "chrome");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.map(|(_, s)| s.len())),
        }
    }

    #[test]
    fn test_unknown_material_type_fails_to_parse() {
        let json = r#"{ "materials": { "x": { "type": "velvet" } } }"#;
        assert!(matches!(load_scene_from_str(json), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_empty_json_gives_default_camera_and_empty_scene() {
        let (camera, scene) = load_scene_from_str("{}").unwrap();
        assert_eq!(camera, CameraConfig::default());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_presets_resolve() {
        let basic = resolve("basic", 0).unwrap();
        assert_eq!(basic.scene.len(), 2);

        let materials = resolve("materials", 0).unwrap();
        assert_eq!(materials.scene.len(), 5);
        assert_eq!(materials.camera.defocus_angle, 10.0);

        assert!(matches!(resolve("teapot", 0), Err(SceneError::UnknownPreset(_))));
        assert!(matches!(resolve("missing-file.json", 0), Err(SceneError::Io(_))));
    }

    #[test]
    fn test_random_preset_is_seeded() {
        let (_, a) = random(3);
        let (_, b) = random(3);
        assert_eq!(a.len(), b.len());
        assert!(a.len() > 4);

        let centers = |scene: &Scene| -> Vec<Point3> {
            scene.primitives().iter().map(|p| sphere(p).center()).collect()
        };
        assert_eq!(centers(&a), centers(&b));
    }

    #[test]
    fn test_basic_preset_centre_ray_hits_small_sphere() {
        let (_, scene) = basic();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
    }
}
