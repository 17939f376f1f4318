//! Error types for the edge-detection pipeline.
//!
//! Input and configuration problems are reported through [`SobelError`].
//! Broken internal invariants (a partition plan that does not cover the
//! image, a worker touching rows outside its slice) are programming defects
//! and panic instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading, filtering or saving an image.
#[derive(Debug, Error)]
pub enum SobelError {
    #[error("image is {width}x{height}, the filter needs at least 3x3")]
    ImageTooSmall { width: usize, height: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("JPEG quality must be within 1..=100, got {0}")]
    InvalidQuality(u8),

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unexpected array shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SobelError>;
