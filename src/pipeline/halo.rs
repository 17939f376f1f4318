//! Halo rows: the read-only context a worker needs around its own band.
//!
//! A 3x3 stencil reaches one row above and below the pixel it evaluates, so a
//! worker that owns rows `start..end` must be able to read
//! `start - 1..end + 1`, clamped to the image. Adjacent workers therefore
//! read each other's boundary rows, but each row is written by its owner
//! only.

use crate::pipeline::RowRange;
use crate::raster::GrayImage;

/// Vertical reach of the kernel on each side.
pub const HALO_ROWS: usize = 1;

/// Rows a worker must read to evaluate every pixel of `owned`.
pub fn halo(owned: RowRange, height: usize) -> RowRange {
    let start = owned.start.saturating_sub(HALO_ROWS);
    let end = (owned.end + HALO_ROWS).min(height);
    RowRange::new(start.min(end), end)
}

/// One worker's private copy of the image rows it may read.
///
/// Keeps the owned band (rows the worker writes) separate from the read
/// band (owned plus halo). Local buffer rows are numbered from `read.start`;
/// [`HaloSlice::local_row`] is the only way to go from image rows to buffer
/// rows.
#[derive(Clone, Debug)]
pub struct HaloSlice {
    owned: RowRange,
    read: RowRange,
    width: usize,
    image_height: usize,
    data: Vec<u8>,
}

impl HaloSlice {
    /// Copy the read band for `owned` out of `image`.
    pub fn extract(image: &GrayImage, owned: RowRange) -> Self {
        assert!(
            owned.end <= image.height(),
            "owned rows {}..{} exceed image height {}",
            owned.start,
            owned.end,
            image.height()
        );
        let read = halo(owned, image.height());
        assert!(
            read.covers(owned),
            "read rows {}..{} do not cover owned rows {}..{}",
            read.start,
            read.end,
            owned.start,
            owned.end
        );
        Self {
            owned,
            read,
            width: image.width(),
            image_height: image.height(),
            data: image.rows(read).to_vec(),
        }
    }

    pub fn owned(&self) -> RowRange {
        self.owned
    }

    pub fn read(&self) -> RowRange {
        self.read
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Local pixel buffer, `read.len()` rows of `width` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Translate an image row into a row of the local buffer.
    ///
    /// # Panics
    /// If `global_row` lies outside the read band.
    pub fn local_row(&self, global_row: usize) -> usize {
        assert!(
            self.read.contains(global_row),
            "row {global_row} is outside the readable rows {}..{}",
            self.read.start,
            self.read.end
        );
        global_row - self.read.start
    }
}
