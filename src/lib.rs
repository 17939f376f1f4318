//! Partitioned Sobel edge detection.
//!
//! A grayscale image is split into row bands, each band is filtered by an
//! independent worker that sees only its own rows plus one halo row on each
//! side, and the bands are stitched back together in order.
//!
//! ## Image Format
//! - **Grayscale**: `width * height` bytes, row-major, one u8 per pixel
//! - Color files are reduced to grayscale on load with BT.601 luma weights
//!
//! ## Output
//! Gradient magnitude `|gx| + |gy|` saturated to 255. The outermost rows and
//! columns are 0. The result does not depend on the number of workers.
//!
//! ```no_run
//! use sobel_shard::{codec, pipeline};
//! use std::path::Path;
//!
//! # fn main() -> sobel_shard::Result<()> {
//! let image = codec::decode_grayscale(Path::new("input.jpg"))?;
//! let edges = pipeline::filter(&image, 4)?;
//! codec::encode(Path::new("edges.jpg"), &edges, 90)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod raster;

pub use config::PipelineConfig;
pub use error::{Result, SobelError};
pub use raster::GrayImage;
