//! Sobel edge detection on single-channel u8 images.
//!
//! Provides the two fixed 3x3 gradient kernels, the per-pixel stencil used by
//! the partitioned pipeline, and a single-pass serial filter over a whole
//! image that serves as the numerical reference.
//!
//! ## Magnitude
//!
//! The combined response is the L1 norm `|gx| + |gy|`, saturated to 255.
//! This is integer-only and matches the output of the original tool exactly;
//! it is *not* the Euclidean `sqrt(gx^2 + gy^2)`.
//!
//! ## Borders
//!
//! The kernels cannot be centered on the outermost rows and columns, so those
//! pixels are always 0 in the output.

use ndarray::{Array2, ArrayView2};

use crate::error::{Result, SobelError};
use crate::raster::{pixel_index, GrayImage};

/// Horizontal gradient kernel (responds to vertical edges).
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical gradient kernel (responds to horizontal edges).
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Smallest width and height the filter is defined for.
pub const MIN_DIMENSION: usize = 3;

// ============================================================================
// Stencil
// ============================================================================

/// Directional gradients `(gx, gy)` at one pixel of a row-major buffer.
///
/// # Arguments
/// * `buffer` - Row-major pixels, `width` bytes per row
/// * `width` - Row width of `buffer`
/// * `x`, `y` - Pixel coordinates *within `buffer`*
#[inline]
pub fn gradients(buffer: &[u8], width: usize, x: usize, y: usize) -> (i32, i32) {
    let rows = buffer.len() / width;
    assert!(
        x >= 1 && x + 1 < width,
        "column {x} has no horizontal neighbours in width {width}"
    );
    assert!(
        y >= 1 && y + 1 < rows,
        "row {y} has no vertical neighbours in a {rows}-row buffer"
    );

    let mut gx = 0i32;
    let mut gy = 0i32;
    for ky in 0..3 {
        for kx in 0..3 {
            let p = buffer[pixel_index(width, y + ky - 1, x + kx - 1)] as i32;
            gx += p * SOBEL_X[ky][kx];
            gy += p * SOBEL_Y[ky][kx];
        }
    }
    (gx, gy)
}

/// Gradient magnitude `|gx| + |gy|` clamped to `0..=255`.
///
/// `(x, y)` must be an interior pixel of `buffer`: `1 <= x <= width - 2` and
/// rows `y - 1` and `y + 1` present. Callers holding a partial buffer are
/// responsible for translating image rows into buffer rows first.
#[inline]
pub fn gradient_magnitude(buffer: &[u8], width: usize, x: usize, y: usize) -> u8 {
    let (gx, gy) = gradients(buffer, width, x, y);
    (gx.abs() + gy.abs()).min(255) as u8
}

// ============================================================================
// Serial reference
// ============================================================================

/// Apply the Sobel filter to a whole image in one pass.
///
/// # Arguments
/// * `input` - Grayscale image (height, width)
///
/// # Returns
/// Gradient magnitude image of the same shape, borders zeroed
pub fn sobel_reference(input: ArrayView2<u8>) -> Array2<u8> {
    let (height, width) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0i32;
            let mut gy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let p = input[[y + ky - 1, x + kx - 1]] as i32;
                    gx += p * SOBEL_X[ky][kx];
                    gy += p * SOBEL_Y[ky][kx];
                }
            }

            output[[y, x]] = (gx.abs() + gy.abs()).min(255) as u8;
        }
    }

    output
}

/// Serial filter over a [`GrayImage`], with the same size check as the
/// partitioned pipeline.
pub fn filter_serial(image: &GrayImage) -> Result<GrayImage> {
    check_dimensions(image.width(), image.height())?;
    Ok(GrayImage::from_array(sobel_reference(image.view())))
}

/// Reject images whose border covers every pixel.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(SobelError::ImageTooSmall { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step_5x5() -> Array2<u8> {
        Array2::from_shape_fn((5, 5), |(_, x)| if x < 2 { 0 } else { 255 })
    }

    #[test]
    fn test_flat_region_is_zero() {
        let buf = vec![128u8; 9];
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 0);
    }

    #[test]
    fn test_gradients_directions() {
        // Right column bright: pure horizontal gradient
        let buf = [0, 0, 10, 0, 0, 10, 0, 0, 10];
        assert_eq!(gradients(&buf, 3, 1, 1), (40, 0));

        // Bottom row bright: pure vertical gradient
        let buf = [0, 0, 0, 0, 0, 0, 10, 10, 10];
        assert_eq!(gradients(&buf, 3, 1, 1), (0, 40));
    }

    #[test]
    fn test_magnitude_is_l1_not_euclidean() {
        // Only the bottom-right corner is lit: gx = gy = 10
        let buf = [0, 0, 0, 0, 0, 0, 0, 0, 10];
        assert_eq!(gradients(&buf, 3, 1, 1), (10, 10));
        // Euclidean would give 14
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 20);
    }

    #[test]
    fn test_magnitude_negative_gradients_use_abs() {
        let buf = [10, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(gradients(&buf, 3, 1, 1), (-10, -10));
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 20);
    }

    #[test]
    fn test_saturates_at_255() {
        // gx = 4 * 100 = 400
        let buf = [0, 0, 100, 0, 0, 100, 0, 0, 100];
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 255);

        // Bright lower-right corner, far beyond u8 range
        let buf = [0, 0, 0, 0, 0, 255, 0, 255, 255];
        let (gx, gy) = gradients(&buf, 3, 1, 1);
        assert_eq!((gx, gy), (765, 765));
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 255);
    }

    #[test]
    fn test_just_below_saturation() {
        // gx = 4 * 63 = 252
        let buf = [0, 0, 63, 0, 0, 63, 0, 0, 63];
        assert_eq!(gradient_magnitude(&buf, 3, 1, 1), 252);
    }

    #[test]
    #[should_panic(expected = "no vertical neighbours")]
    fn test_stencil_rejects_edge_row() {
        let buf = vec![0u8; 9];
        gradient_magnitude(&buf, 3, 1, 0);
    }

    #[test]
    #[should_panic(expected = "no horizontal neighbours")]
    fn test_stencil_rejects_edge_column() {
        let buf = vec![0u8; 9];
        gradient_magnitude(&buf, 3, 2, 1);
    }

    #[test]
    fn test_reference_vertical_step() {
        let result = sobel_reference(vertical_step_5x5().view());

        for y in 1..4 {
            assert_eq!(result.row(y).to_vec(), vec![0, 255, 255, 0, 0]);
        }
        assert!(result.row(0).iter().all(|&v| v == 0));
        assert!(result.row(4).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_reference_matches_stencil() {
        let img = Array2::from_shape_fn((6, 7), |(y, x)| ((x * 37 + y * 91) % 256) as u8);
        let result = sobel_reference(img.view());
        let flat: Vec<u8> = img.iter().copied().collect();

        for y in 1..5 {
            for x in 1..6 {
                assert_eq!(result[[y, x]], gradient_magnitude(&flat, 7, x, y));
            }
        }
    }

    #[test]
    fn test_filter_serial_rejects_small_image() {
        let img = GrayImage::new(2, 10);
        assert!(matches!(
            filter_serial(&img),
            Err(SobelError::ImageTooSmall {
                width: 2,
                height: 10
            })
        ));
    }

    #[test]
    fn test_filter_serial_minimum_size() {
        let img = GrayImage::from_raw(3, 3, vec![0, 0, 10, 0, 0, 10, 0, 0, 10]).unwrap();
        let result = filter_serial(&img).unwrap();
        assert_eq!(result.as_raw(), &[0, 0, 0, 0, 40, 0, 0, 0, 0]);
    }
}
