//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Every bucket draws from its own generator
//! seeded from the render seed and the bucket index, so the image does not
//! depend on how rayon schedules the work.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer};

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in row-major bucket order, also used to derive its seed
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's generator.
    pub fn seed(&self, render_seed: u64) -> u64 {
        // splitmix64 finalizer so neighbouring buckets get unrelated streams
        let mut z = render_seed ^ (self.index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Split an image into buckets, row-major, edge buckets clipped to fit.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> RenderResult<Vec<Bucket>> {
    if bucket_size == 0 {
        return Err(RenderError::ZeroBucketSize);
    }

    let mut buckets = Vec::new();
    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    Ok(buckets)
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(camera, world, bucket.x + local_x, bucket.y + local_y, rng);
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Copy this bucket's pixels into their place in `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(&color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, color);
                }
            }
        }
    }
}

/// Render the whole image across the rayon thread pool.
///
/// The output is a pure function of the scene, the camera, `seed` and
/// `bucket_size`.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    bucket_size: u32,
) -> RenderResult<ImageBuffer> {
    let (width, height) = (camera.image_width(), camera.image_height());
    let buckets = generate_buckets(width, height, bucket_size)?;

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets on {} threads",
        width,
        height,
        camera.samples_per_pixel(),
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket.seed(seed));
            let pixels = render_bucket(bucket, camera, world, &mut rng);
            log::debug!("Bucket {} done", bucket.index);
            BucketResult {
                bucket: *bucket,
                pixels,
            }
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Render done");
    Ok(image)
}
