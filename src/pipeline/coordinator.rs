//! Scatter / compute / gather over row partitions.
//!
//! The coordinator plans the bands, hands every worker an independent copy
//! of the rows it may read, runs the stencil over each worker's owned rows
//! and concatenates the results in worker order.
//!
//! Workers share nothing mutable: each one reads only its [`HaloSlice`] and
//! writes only a buffer sized to its own band, so no worker can touch a row
//! it does not own. Output is identical for every worker count.

use std::fmt;

use log::{debug, info};
use rayon::prelude::*;
use serde::Deserialize;

use crate::error::{Result, SobelError};
use crate::filters::edge::{check_dimensions, gradient_magnitude};
use crate::raster::{pixel_index, GrayImage};
use crate::pipeline::{HaloSlice, PartitionPlan, RowRange};

/// How partitions are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheduling {
    /// One task per partition on a dedicated thread pool of `worker_count`
    /// threads.
    #[default]
    Parallel,
    /// Partitions run one after another on the calling thread.
    Sequential,
}

impl fmt::Display for Scheduling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheduling::Parallel => f.write_str("parallel"),
            Scheduling::Sequential => f.write_str("sequential"),
        }
    }
}

/// Filtered pixels for one worker's owned band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionOutput {
    pub owned: RowRange,
    /// `owned.len() * width` bytes, row-major.
    pub pixels: Vec<u8>,
}

/// Run the Sobel filter over `image` split across `worker_count` parallel
/// workers.
///
/// # Errors
/// * [`SobelError::ImageTooSmall`] if either dimension is below 3
/// * [`SobelError::InvalidWorkerCount`] if `worker_count` is 0
/// * [`SobelError::ThreadPool`] if the worker threads cannot be started
pub fn filter(image: &GrayImage, worker_count: usize) -> Result<GrayImage> {
    filter_with(image, worker_count, Scheduling::Parallel)
}

/// [`filter`] with explicit scheduling.
pub fn filter_with(
    image: &GrayImage,
    worker_count: usize,
    scheduling: Scheduling,
) -> Result<GrayImage> {
    check_dimensions(image.width(), image.height())?;
    if worker_count == 0 {
        return Err(SobelError::InvalidWorkerCount(worker_count));
    }

    let (width, height) = (image.width(), image.height());
    info!("filtering {width}x{height} image with {worker_count} {scheduling} workers");

    let plan = PartitionPlan::new(height, worker_count);
    plan.verify(height);

    // Scatter
    let slices: Vec<HaloSlice> = plan
        .ranges()
        .iter()
        .enumerate()
        .map(|(worker, &owned)| {
            let slice = HaloSlice::extract(image, owned);
            debug!(
                "worker {worker}: owns rows {}..{}, reads rows {}..{}",
                owned.start,
                owned.end,
                slice.read().start,
                slice.read().end
            );
            slice
        })
        .collect();

    // Compute
    let outputs: Vec<PartitionOutput> = match scheduling {
        Scheduling::Sequential => slices.iter().map(filter_partition).collect(),
        Scheduling::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(worker_count)
                .thread_name(|index| format!("sobel-worker-{index}"))
                .build()?;
            pool.install(|| slices.par_iter().map(filter_partition).collect())
        }
    };

    // Gather
    let pixels = gather(outputs, width, height);
    GrayImage::from_raw(width, height, pixels)
}

/// Evaluate the stencil over every interior pixel of the slice's owned rows.
///
/// Image rows are translated into the slice's local buffer before each
/// evaluation. Rows 0 and `height - 1` of the image and the first and last
/// column are left at 0.
pub fn filter_partition(slice: &HaloSlice) -> PartitionOutput {
    let owned = slice.owned();
    let width = slice.width();
    let last_row = slice.image_height().saturating_sub(1);
    let mut pixels = vec![0u8; owned.len() * width];

    for global_y in owned.iter() {
        if global_y == 0 || global_y == last_row {
            continue;
        }
        let local_y = slice.local_row(global_y);
        let out_y = global_y - owned.start;
        for x in 1..width.saturating_sub(1) {
            pixels[pixel_index(width, out_y, x)] =
                gradient_magnitude(slice.data(), width, x, local_y);
        }
    }

    PartitionOutput { owned, pixels }
}

/// Concatenate partition outputs, checking they tile the image in order.
fn gather(outputs: Vec<PartitionOutput>, width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height);
    let mut next_row = 0;

    for output in outputs {
        assert_eq!(
            output.owned.start, next_row,
            "partition output out of order: expected row {next_row}, got {}",
            output.owned.start
        );
        assert_eq!(
            output.pixels.len(),
            output.owned.len() * width,
            "partition {}..{} produced the wrong number of pixels",
            output.owned.start,
            output.owned.end
        );
        pixels.extend_from_slice(&output.pixels);
        next_row = output.owned.end;
    }

    assert_eq!(next_row, height, "gathered {next_row} of {height} rows");
    pixels
}
