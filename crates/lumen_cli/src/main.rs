use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use lumen_tracer::{render_parallel, Camera, CameraConfig, DEFAULT_BUCKET_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

mod output;
mod scenes;

use output::Format;

#[derive(Debug, StructOpt)]
#[structopt(name = "lumen", about = "Render a sphere scene with a stochastic ray tracer", rename_all = "kebab-case")]
struct Opt {
    /// Preset name (basic, materials, random) or path to a .json scene
    #[structopt(long, default_value = "basic")]
    scene: String,

    /// Output image (.ppm or .png); "-" writes PPM to stdout
    #[structopt(short, long, parse(from_os_str), default_value = "-")]
    output: PathBuf,

    /// Seed for sampling and for the random preset
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Render buckets across all cores
    #[structopt(long)]
    parallel: bool,

    /// Bucket edge length in pixels for --parallel [default: 64]
    #[structopt(long)]
    bucket_size: Option<u32>,

    /// Override the scene's image width
    #[structopt(long)]
    width: Option<u32>,

    /// Override the scene's samples per pixel
    #[structopt(long)]
    samples: Option<u32>,

    /// Override the scene's maximum bounce depth
    #[structopt(long)]
    max_depth: Option<u32>,

    /// Override the scene's aspect ratio
    #[structopt(long)]
    aspect_ratio: Option<f64>,
}

impl Opt {
    fn apply_overrides(&self, config: &mut CameraConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            config.aspect_ratio = aspect_ratio;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let opt = Opt::from_args();
    log::debug!("{:?}", opt);

    let start = Instant::now();
    let mut setup = scenes::resolve(&opt.scene, opt.seed)
        .with_context(|| format!("failed to build scene '{}'", opt.scene))?;
    log::info!("Scene '{}' built in {:?}", setup.name, start.elapsed());

    opt.apply_overrides(&mut setup.camera);
    let camera = Camera::new(setup.camera).context("invalid camera configuration")?;
    let format = Format::from_path(&opt.output)?;

    let start = Instant::now();
    if opt.parallel {
        let bucket_size = opt.bucket_size.unwrap_or(DEFAULT_BUCKET_SIZE);
        let image = render_parallel(&camera, &setup.scene, opt.seed, bucket_size)?;
        output::save_image(&image, &opt.output)?;
    } else if format == Format::Png {
        let mut rng = StdRng::seed_from_u64(opt.seed);
        let image = camera.render(&setup.scene, &mut rng);
        output::save_image(&image, &opt.output)?;
    } else {
        // Stream pixels straight to the writer as they are traced
        let mut rng = StdRng::seed_from_u64(opt.seed);
        let mut sink = output::ppm_sink(&opt.output)?;
        output::write_ppm(
            &mut sink,
            camera.image_width(),
            camera.image_height(),
            camera.pixels(&setup.scene, &mut rng),
        )
        .with_context(|| format!("failed to write {}", opt.output.display()))?;
    }

    log::info!("Rendered in {:?}", start.elapsed());
    if opt.output.as_os_str() != "-" {
        log::info!("Saved to {}", opt.output.display());
    }

    Ok(())
}
