//! Color to grayscale conversion.
//!
//! Uses the ITU-R BT.601 luma weights (0.299, 0.587, 0.114) and truncates
//! toward zero, which is what the reference JPEG tool produces.

use ndarray::{Array2, ArrayView3};

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Luma of one RGB pixel, computed in double precision and truncated.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8
}

/// Convert an interleaved image to one channel.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, channels). With one
///   channel the values are copied; otherwise the first three channels are
///   taken as RGB and any further channels (alpha) are ignored.
///
/// # Returns
/// Grayscale array of shape (height, width)
pub fn grayscale_u8(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = if channels < 3 {
                input[[y, x, 0]]
            } else {
                luminance_u8(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
            };
        }
    }

    output
}
