//! Error types for camera setup and rendering.
//!
//! Numerical edge cases during tracing (misses, degenerate scatter
//! directions, exhausted bounce depth) are handled in place and never
//! surface here.

use thiserror::Error;

/// Invalid camera configuration, reported by [`crate::Camera::new`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),

    #[error("derived image height {0} exceeds the limit of {} pixels", crate::camera::MAX_IMAGE_HEIGHT)]
    ImageTooTall(f64),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f64),

    #[error("defocus angle must be non-negative and finite, got {0}")]
    InvalidDefocusAngle(f64),

    #[error("lookfrom and lookat must be distinct points")]
    DegenerateView,

    #[error("vup must not be parallel to the viewing direction")]
    DegenerateUp,
}

/// Failures of the render drivers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("render cancelled after {rows_completed} of {rows_total} rows")]
    Cancelled { rows_completed: u32, rows_total: u32 },

    #[error("bucket size must be at least 1 pixel")]
    ZeroBucketSize,
}

/// Result type for camera construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for render drivers.
pub type RenderResult<T> = Result<T, RenderError>;
