//! QR-code bitmaps used as glyph conditioning images.
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::core::conditioning::GlyphBitmap;
use crate::core::resize::resize_u8_image;
use crate::error::{Error, Result};

/// Pixels per QR module before resampling.
pub const MODULE_SIZE: usize = 10;
/// Quiet zone around the symbol, in modules.
pub const BORDER_MODULES: usize = 4;
/// Side length of the conditioning image handed to the renderer.
pub const CONDITIONING_SIZE: usize = 512;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Encodes `data` with error-correction level L into a black-on-white bitmap
/// of `(modules + 2 * BORDER_MODULES) * MODULE_SIZE` pixels per side.
pub fn render_qr_bitmap(data: &str) -> Result<GlyphBitmap> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    let modules = code.width();
    let colors = code.to_colors();

    let side_modules = modules + 2 * BORDER_MODULES;
    let side = side_modules * MODULE_SIZE;
    let mut pixels = vec![LIGHT; side * side];

    for (idx, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = idx % modules + BORDER_MODULES;
        let my = idx / modules + BORDER_MODULES;
        for row in my * MODULE_SIZE..(my + 1) * MODULE_SIZE {
            let start = row * side + mx * MODULE_SIZE;
            pixels[start..start + MODULE_SIZE].fill(DARK);
        }
    }

    debug!(
        "Encoded {} bytes as {}x{} module QR code",
        data.len(),
        modules,
        modules
    );

    Ok(GlyphBitmap::new(side, side, pixels))
}

/// Builds the QR conditioning image at `CONDITIONING_SIZE` x `CONDITIONING_SIZE`.
pub fn create_qrcode(data: &str) -> Result<GlyphBitmap> {
    let raw = render_qr_bitmap(data)?;
    let resized = resize_u8_image(
        raw.pixels(),
        raw.width(),
        raw.height(),
        CONDITIONING_SIZE,
        CONDITIONING_SIZE,
    )
    .map_err(Error::external)?;
    Ok(GlyphBitmap::new(CONDITIONING_SIZE, CONDITIONING_SIZE, resized))
}
