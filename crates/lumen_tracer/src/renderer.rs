//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Depth-limited light transport, evaluated as a loop over bounces
//! - Anti-aliasing via jittered multi-sampling
//! - Square-root gamma correction and 8-bit quantization
//!
//! Illumination comes entirely from the sky gradient returned for rays
//! that escape the scene.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{RenderError, RenderResult};
use crate::{Camera, Color, Hittable, Ray};
use lumen_math::Interval;
use rand::RngCore;

/// Lower bound on hit distances, keeps scattered rays off their own surface.
pub const EPSILON_T: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows the ray through at most `depth` surface interactions,
/// multiplying the attenuation of every bounce into a running product.
/// Returns black when the bounce budget runs out or a material absorbs
/// the ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::from_min(EPSILON_T)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Vertical white to sky-blue gradient for rays that leave the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Average `samples_per_pixel` jittered samples through pixel (i, j).
pub fn render_pixel(camera: &Camera, world: &dyn Hittable, i: u32, j: u32, rng: &mut dyn RngCore) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear-color image stored row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Quantized pixels in output order.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels.iter().map(|&color| color_to_rgb(color))
    }

    /// Packed RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for rgb in self.rgb_pixels() {
            bytes.extend_from_slice(&rgb);
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Lazy row-major stream of quantized pixels.
///
/// Each call to `next` traces all samples of one pixel.
pub struct Pixels<'a> {
    camera: &'a Camera,
    world: &'a dyn Hittable,
    rng: &'a mut dyn RngCore,
    i: u32,
    j: u32,
}

impl Iterator for Pixels<'_> {
    type Item = [u8; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.camera.image_height() {
            return None;
        }

        let color = render_pixel(self.camera, self.world, self.i, self.j, self.rng);

        self.i += 1;
        if self.i == self.camera.image_width() {
            self.i = 0;
            self.j += 1;
        }

        Some(color_to_rgb(color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let width = self.camera.image_width() as usize;
        let total = width * self.camera.image_height() as usize;
        let done = (self.j as usize * width + self.i as usize).min(total);
        (total - done, Some(total - done))
    }
}

impl ExactSizeIterator for Pixels<'_> {}

impl FusedIterator for Pixels<'_> {}

impl Camera {
    /// Stream gamma-corrected 8-bit pixels in row-major order, top to bottom.
    pub fn pixels<'a>(&'a self, world: &'a dyn Hittable, rng: &'a mut dyn RngCore) -> Pixels<'a> {
        Pixels {
            camera: self,
            world,
            rng,
            i: 0,
            j: 0,
        }
    }

    /// Render the entire scene to an image buffer on the calling thread.
    pub fn render(&self, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.image_width(), self.image_height());
        self.log_render_start();

        for j in 0..image.height {
            log::debug!("Scanlines remaining: {}", image.height - j);
            self.render_row(world, rng, j, &mut image);
        }

        log::info!("Render done");
        image
    }

    /// Like [`Camera::render`], but checks `cancel` before each row and
    /// gives up with [`RenderError::Cancelled`] once it is set.
    pub fn render_with_cancel(
        &self,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
        cancel: &AtomicBool,
    ) -> RenderResult<ImageBuffer> {
        let mut image = ImageBuffer::new(self.image_width(), self.image_height());
        self.log_render_start();

        for j in 0..image.height {
            if cancel.load(Ordering::Relaxed) {
                log::warn!("Render cancelled at row {}", j);
                return Err(RenderError::Cancelled {
                    rows_completed: j,
                    rows_total: image.height,
                });
            }
            log::debug!("Scanlines remaining: {}", image.height - j);
            self.render_row(world, rng, j, &mut image);
        }

        log::info!("Render done");
        Ok(image)
    }

    fn render_row(&self, world: &dyn Hittable, rng: &mut dyn RngCore, j: u32, image: &mut ImageBuffer) {
        for i in 0..image.width {
            image.set(i, j, render_pixel(self, world, i, j, rng));
        }
    }

    fn log_render_start(&self) {
        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            self.image_width(),
            self.image_height(),
            self.samples_per_pixel(),
            self.max_depth()
        );
    }
}
