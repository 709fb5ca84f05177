use std::path::Path;

use image::ImageFormat;
use ndarray::Array3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::{write_gray_jpeg, write_rgb_jpeg, write_rgba_jpeg};

/// One image produced by a renderer.
#[derive(Debug, Clone)]
pub enum RenderedImage {
    /// Height x width x channels; 1, 3 or 4 channels
    RawPixels(Array3<u8>),
    /// Already-encoded image data
    Encoded { bytes: Vec<u8>, format: ImageFormat },
}

impl RenderedImage {
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let pixels = Array3::from_shape_vec((height, width, 3), data).map_err(Error::external)?;
        Ok(RenderedImage::RawPixels(pixels))
    }

    /// `(width, height)` when known without decoding.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match self {
            RenderedImage::RawPixels(pixels) => {
                let (h, w, _) = pixels.dim();
                Some((w, h))
            }
            RenderedImage::Encoded { .. } => None,
        }
    }

    /// Writes the image as a JPEG file at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        match self {
            RenderedImage::RawPixels(pixels) => save_raw_pixels(pixels, path),
            RenderedImage::Encoded { bytes, format } => save_encoded(bytes, *format, path),
        }
    }
}

fn save_raw_pixels(pixels: &Array3<u8>, path: &Path) -> Result<()> {
    let (rows, cols, channels) = pixels.dim();
    let contiguous = pixels.as_standard_layout();
    let data = contiguous
        .as_slice()
        .ok_or_else(|| Error::Processing("pixel array is not contiguous".to_string()))?;

    let written = match channels {
        1 => write_gray_jpeg(path, cols, rows, data),
        3 => write_rgb_jpeg(path, cols, rows, data),
        4 => write_rgba_jpeg(path, cols, rows, data),
        other => {
            return Err(Error::InvalidArgument {
                arg: "channels",
                value: other.to_string(),
            });
        }
    };
    written.map_err(Error::external)?;
    debug!("Saved {}x{}x{} pixels to {:?}", cols, rows, channels, path);
    Ok(())
}

fn save_encoded(bytes: &[u8], format: ImageFormat, path: &Path) -> Result<()> {
    if format == ImageFormat::Jpeg {
        std::fs::write(path, bytes)?;
        debug!("Copied {} encoded JPEG bytes to {:?}", bytes.len(), path);
        return Ok(());
    }

    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let rgb = decoded.to_rgb8();
    let (w, h) = rgb.dimensions();
    write_rgb_jpeg(path, w as usize, h as usize, rgb.as_raw()).map_err(Error::external)?;
    debug!("Re-encoded {:?} image as JPEG at {:?}", format, path);
    Ok(())
}
