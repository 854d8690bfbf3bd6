//! Camera for ray generation.

use lumen_math::{degrees_to_radians, random_in_unit_disk, Point3, Ray, Vec3};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Largest image height, in pixels, a configuration may derive.
pub const MAX_IMAGE_HEIGHT: u32 = 1 << 16;

/// User-facing camera settings.
///
/// Every field has a default, so a partial JSON object deserializes into
/// a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub lookfrom: Point3,
    /// Point the camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, 0 disables depth of field
    pub defocus_angle: f64,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        let height = (self.image_width as f64 / self.aspect_ratio).floor();
        if height > MAX_IMAGE_HEIGHT as f64 {
            return Err(ConfigError::ImageTooTall(height));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.defocus_angle.is_finite() && self.defocus_angle >= 0.0) {
            return Err(ConfigError::InvalidDefocusAngle(self.defocus_angle));
        }

        let view = self.lookfrom - self.lookat;
        if !view.is_finite() || view.length_squared() == 0.0 {
            return Err(ConfigError::DegenerateView);
        }
        // Written so that a NaN vup fails too
        let parallel_tolerance = 1e-12 * view.length_squared() * self.vup.length_squared();
        if !(self.vup.cross(view).length_squared() > parallel_tolerance) {
            return Err(ConfigError::DegenerateUp);
        }

        Ok(())
    }
}

/// Camera for generating rays into the scene.
///
/// All state is derived once from a [`CameraConfig`] and never changes
/// while rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    image_height: u32,
    samples_scale: f64,

    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Validate `config` and derive the viewport geometry.
    pub fn new(config: CameraConfig) -> ConfigResult<Self> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = ((image_width as f64 / config.aspect_ratio) as u32).max(1);

        let center = config.lookfrom;

        // Viewport dimensions at the focus plane
        let theta = degrees_to_radians(config.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Orthonormal camera basis
        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Across the horizontal edge, and down the vertical edge
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * degrees_to_radians(config.defocus_angle / 2.0).tan();

        log::debug!(
            "Camera {}x{}, vfov {}, defocus radius {:.4}",
            image_width,
            image_height,
            config.vfov,
            defocus_radius
        );

        Ok(Self {
            samples_scale: 1.0 / config.samples_per_pixel as f64,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
            config,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Weight of a single sample in a pixel average (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// A jittered ray through pixel (i, j), starting on the defocus disk
    /// when depth of field is enabled.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + (i as f64 + offset.x) * self.pixel_delta_u
            + (j as f64 + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Random offset in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, 0.0)
}
