//! Lumen tracer - a recursive, stochastic sphere ray tracer.
//!
//! Camera rays are jittered per sample for anti-aliasing and optionally
//! started on a lens disk for depth of field. Each ray is intersected
//! against every sphere in the [`Scene`], and the nearest hit's
//! [`Material`] decides whether the ray is reflected, diffused or
//! refracted until it escapes into the sky, is absorbed, or runs out of
//! bounces.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lumen_tracer::{Camera, CameraConfig, Color, Material, Point3, Scene, Sphere};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut scene = Scene::new();
//! let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
//! scene.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground));
//!
//! let camera = Camera::new(CameraConfig { image_width: 8, ..Default::default() })?;
//! let mut rng = StdRng::seed_from_u64(0);
//! let pixels: Vec<[u8; 3]> = camera.pixels(&scene, &mut rng).collect();
//! assert_eq!(pixels.len(), 64);
//! # Ok::<(), lumen_tracer::ConfigError>(())
//! ```

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraConfig, MAX_IMAGE_HEIGHT};
pub use error::{ConfigError, ConfigResult, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, sky_gradient, ImageBuffer, Pixels, EPSILON_T,
};
pub use scene::{Primitive, Scene};
pub use sphere::Sphere;

/// Re-export the math types the public API is written in
pub use lumen_math::{Interval, Point3, Ray, Vec3};
