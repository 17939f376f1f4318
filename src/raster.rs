//! Single-channel 8-bit image buffer.
//!
//! Pixels are stored row-major in one flat `Vec<u8>`. All flat indexing goes
//! through [`pixel_index`], so a column that runs past the row width is
//! caught instead of silently reading the next row.

use ndarray::{Array2, ArrayView2};

use crate::error::{Result, SobelError};
use crate::pipeline::RowRange;

/// Map `(row, col)` to an offset in a row-major buffer of the given width.
#[inline]
pub fn pixel_index(width: usize, row: usize, col: usize) -> usize {
    assert!(col < width, "column {col} out of bounds for width {width}");
    row * width + col
}

/// Owned grayscale image, `width * height` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// All-black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    /// [`SobelError::BufferSize`] if `data.len() != width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(SobelError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from a `(height, width)` array.
    pub fn from_array(array: Array2<u8>) -> Self {
        let (height, width) = array.dim();
        let data = array.iter().copied().collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Pixel value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[pixel_index(self.width, row, col)]
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = pixel_index(self.width, y, 0);
        &self.data[start..start + self.width]
    }

    /// Contiguous bytes covering every row in `range`.
    pub fn rows(&self, range: RowRange) -> &[u8] {
        assert!(
            range.end <= self.height,
            "rows {}..{} exceed image height {}",
            range.start,
            range.end,
            self.height
        );
        &self.data[range.start * self.width..range.end * self.width]
    }

    /// Borrow as a `(height, width)` ndarray view.
    pub fn view(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height, self.width), self.data.as_slice())
            .expect("buffer length is checked at construction")
    }
}
