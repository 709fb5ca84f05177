use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Quality used for all JPEG output.
pub const JPEG_QUALITY: u8 = 75;

fn write_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u8],
    color_type: ColorType,
) -> Result<(), Box<dyn std::error::Error>> {
    let cols = u16::try_from(cols).map_err(|_| format!("width {} exceeds JPEG limit", cols))?;
    let rows = u16::try_from(rows).map_err(|_| format!("height {} exceeds JPEG limit", rows))?;
    if cols == 0 || rows == 0 {
        return Err(format!("empty image {}x{}", cols, rows).into());
    }
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, JPEG_QUALITY);
    encoder.encode(data, cols, rows, color_type)?;
    Ok(())
}

pub fn write_gray_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    write_jpeg(output, cols, rows, data, ColorType::Luma)
}

pub fn write_rgb_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    rgb_data: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    write_jpeg(output, cols, rows, rgb_data, ColorType::Rgb)
}

/// Alpha is dropped by the encoder.
pub fn write_rgba_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    rgba_data: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    write_jpeg(output, cols, rows, rgba_data, ColorType::Rgba)
}
