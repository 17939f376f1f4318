//! Reading and writing image files.
//!
//! - `decode`: read any format the `image` crate understands into an
//!   interleaved 8-bit buffer (1 or 3 channels).
//! - `decode_grayscale`: `decode` followed by luminance reduction.
//! - `encode`: write a grayscale image; `.jpg`/`.jpeg` honour the requested
//!   quality, every other extension uses the format's defaults.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use ndarray::ArrayView3;

use crate::error::{Result, SobelError};
use crate::filters::grayscale::grayscale_u8;
use crate::raster::GrayImage;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decoded pixels, interleaved row-major.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl DecodedImage {
    /// Reduce to one channel.
    pub fn into_grayscale(self) -> Result<GrayImage> {
        if self.channels == 1 {
            return GrayImage::from_raw(self.width, self.height, self.data);
        }
        let shape = (self.height, self.width, self.channels);
        let view = ArrayView3::from_shape(shape, self.data.as_slice())?;
        Ok(GrayImage::from_array(grayscale_u8(view)))
    }
}

/// Read an image file.
///
/// Gray and gray+alpha images decode to 1 channel; everything else decodes
/// to 3-channel RGB.
pub fn decode(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|source| SobelError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let source_channels = img.color().channel_count();
    let (data, channels) = if source_channels <= 2 {
        (img.into_luma8().into_raw(), 1)
    } else {
        (img.into_rgb8().into_raw(), 3)
    };
    debug!(
        "decoded {}: {width}x{height}, {source_channels} source channels",
        path.display()
    );

    Ok(DecodedImage {
        data,
        width,
        height,
        channels,
    })
}

/// Read an image file and convert it to grayscale.
pub fn decode_grayscale(path: &Path) -> Result<GrayImage> {
    decode(path)?.into_grayscale()
}

/// Write a grayscale image, creating parent directories as needed.
pub fn encode(path: &Path, image: &GrayImage, jpeg_quality: u8) -> Result<()> {
    ensure_parent_dir(path)?;
    let (width, height) = (image.width() as u32, image.height() as u32);

    let encoded = if is_jpeg(path) {
        let file = File::create(path).map_err(|source| SobelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::L8,
        )
    } else {
        image::save_buffer(path, image.as_raw(), width, height, ExtendedColorType::L8)
    };

    encoded.map_err(|source| SobelError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {}: {width}x{height}", path.display());
    Ok(())
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SobelError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
