//! Image writers.
//!
//! PPM output is plain-text P3 and can be fed pixel by pixel from the
//! tracer's lazy stream. PNG output goes through the `image` crate and
//! needs the whole buffer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use lumen_tracer::ImageBuffer;

/// Output format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ppm,
    Png,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str() == "-" {
            return Ok(Format::Ppm);
        }
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("ppm") => Ok(Format::Ppm),
            Some("png") => Ok(Format::Png),
            _ => Err(anyhow!("unsupported output format for {} (use .ppm or .png)", path.display())),
        }
    }
}

/// Write a P3 header followed by one `r g b` line per pixel.
pub fn write_ppm<W, I>(writer: &mut W, width: u32, height: u32, pixels: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = [u8; 3]>,
{
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Open `path` for PPM output; `-` means stdout.
pub fn ppm_sink(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Save a finished image in the format implied by `path`.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Ppm => {
            let mut sink = ppm_sink(path)?;
            write_ppm(&mut sink, image.width, image.height, image.rgb_pixels())
                .with_context(|| format!("failed to write {}", path.display()))
        }
        Format::Png => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
                .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", image.width, image.height))?;
            rgb.save(path)
                .with_context(|| format!("failed to write {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_tracer::Color;

    #[test]
    fn test_ppm_layout() {
        let mut out = Vec::new();
        write_ppm(&mut out, 2, 1, [[255, 0, 0], [0, 128, 255]]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 0\n0 128 255\n");
    }

    #[test]
    fn test_ppm_from_image_buffer() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 1, Color::ONE);

        let mut out = Vec::new();
        write_ppm(&mut out, image.width, image.height, image.rgb_pixels()).unwrap();

        let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
        assert_eq!(lines, vec!["P3", "1 2", "255", "0 0 0", "255 255 255"]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("out.ppm")).unwrap(), Format::Ppm);
        assert_eq!(Format::from_path(Path::new("out.PNG")).unwrap(), Format::Png);
        assert_eq!(Format::from_path(Path::new("-")).unwrap(), Format::Ppm);
        assert!(Format::from_path(Path::new("out.exr")).is_err());
        assert!(Format::from_path(Path::new("out")).is_err());
    }
}
