//! Glyph conditioning: the image or text the renderer is steered with, plus
//! optional layout parameters.
//!
//! Preparation never fails. When the instruction source is absent or cannot
//! be encoded, the caller receives [`Conditioning::Degraded`] carrying the
//! empty-text bundle and proceeds as usual.
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::barcode::create_qrcode;

/// 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GlyphBitmap {
    pub(crate) fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }
}

/// What the glyph branch of the model is conditioned on.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphSource {
    /// Rendered-text values; never empty
    Texts(Vec<String>),
    Bitmap(GlyphBitmap),
}

impl GlyphSource {
    /// Text conditioning; an empty list becomes the single empty string.
    pub fn texts(values: Vec<String>) -> Self {
        if values.is_empty() {
            GlyphSource::Texts(vec![String::new()])
        } else {
            GlyphSource::Texts(values)
        }
    }
}

/// Per-glyph placement values. Each field is independently unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub width: Option<Vec<f64>>,
    pub ratio: Option<Vec<f64>>,
    pub top_left_x: Option<Vec<f64>>,
    pub top_left_y: Option<Vec<f64>>,
    pub yaw: Option<Vec<f64>>,
    pub num_rows: Option<Vec<u32>>,
}

impl LayoutParams {
    pub fn unspecified() -> Self {
        Self::default()
    }

    pub fn is_unspecified(&self) -> bool {
        self.width.is_none()
            && self.ratio.is_none()
            && self.top_left_x.is_none()
            && self.top_left_y.is_none()
            && self.yaw.is_none()
            && self.num_rows.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditioningBundle {
    glyphs: GlyphSource,
    layout: LayoutParams,
}

impl Default for ConditioningBundle {
    fn default() -> Self {
        Self::empty_text()
    }
}

impl ConditioningBundle {
    /// Single empty rendered text, no layout.
    pub fn empty_text() -> Self {
        Self {
            glyphs: GlyphSource::texts(Vec::new()),
            layout: LayoutParams::unspecified(),
        }
    }

    pub fn from_bitmap(bitmap: GlyphBitmap) -> Self {
        Self {
            glyphs: GlyphSource::Bitmap(bitmap),
            layout: LayoutParams::unspecified(),
        }
    }

    pub fn glyphs(&self) -> &GlyphSource {
        &self.glyphs
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn bitmap(&self) -> Option<&GlyphBitmap> {
        match &self.glyphs {
            GlyphSource::Bitmap(b) => Some(b),
            GlyphSource::Texts(_) => None,
        }
    }

    pub fn rendered_texts(&self) -> Option<&[String]> {
        match &self.glyphs {
            GlyphSource::Texts(t) => Some(t),
            GlyphSource::Bitmap(_) => None,
        }
    }
}

/// Outcome of conditioning preparation. Both variants carry a usable bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum Conditioning {
    Prepared(ConditioningBundle),
    Degraded {
        bundle: ConditioningBundle,
        reason: String,
    },
}

impl Conditioning {
    pub fn bundle(&self) -> &ConditioningBundle {
        match self {
            Conditioning::Prepared(bundle) | Conditioning::Degraded { bundle, .. } => bundle,
        }
    }

    pub fn into_bundle(self) -> ConditioningBundle {
        match self {
            Conditioning::Prepared(bundle) | Conditioning::Degraded { bundle, .. } => bundle,
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Conditioning::Prepared(_) => None,
            Conditioning::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Conditioning::Degraded { .. })
    }
}

/// Turns the glyph instruction source into a conditioning bundle.
///
/// A present source is encoded as a 512x512 QR image. Layout parameters are
/// left unspecified on every path.
pub fn prepare_conditioning(source: Option<&str>) -> Conditioning {
    let Some(source) = source else {
        let reason = "no glyph instructions supplied".to_string();
        warn!("{}; using empty rendered text", reason);
        return Conditioning::Degraded {
            bundle: ConditioningBundle::empty_text(),
            reason,
        };
    };

    match create_qrcode(source) {
        Ok(bitmap) => {
            info!(
                "Prepared QR conditioning image {}x{}",
                bitmap.width(),
                bitmap.height()
            );
            Conditioning::Prepared(ConditioningBundle::from_bitmap(bitmap))
        }
        Err(e) => {
            warn!("Glyph conditioning failed: {}; using empty rendered text", e);
            Conditioning::Degraded {
                bundle: ConditioningBundle::empty_text(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fallback(c: &Conditioning) {
        assert!(c.is_degraded());
        let bundle = c.bundle();
        assert_eq!(bundle.rendered_texts(), Some(&[String::new()][..]));
        assert!(bundle.bitmap().is_none());
        assert!(bundle.layout().is_unspecified());
    }

    #[test]
    fn absent_source_degrades_to_empty_text() {
        let c = prepare_conditioning(None);
        assert_fallback(&c);
        assert_eq!(c.degraded_reason(), Some("no glyph instructions supplied"));
    }

    #[test]
    fn unencodable_source_degrades_to_empty_text() {
        let data = "glyph".repeat(2000);
        let c = prepare_conditioning(Some(&data));
        assert_fallback(&c);
        assert!(c.degraded_reason().unwrap().contains("QR"));
    }

    #[test]
    fn url_source_yields_512_bitmap() {
        let c = prepare_conditioning(Some("https://arxiv.org/pdf/2305.18259"));
        assert!(!c.is_degraded());
        let bundle = c.into_bundle();
        let bmp = bundle.bitmap().expect("bitmap conditioning");
        assert_eq!((bmp.width(), bmp.height()), (512, 512));
        assert!(bundle.rendered_texts().is_none());
        assert!(bundle.layout().is_unspecified());
    }

    #[test]
    fn empty_text_list_keeps_one_entry() {
        assert_eq!(
            GlyphSource::texts(Vec::new()),
            GlyphSource::Texts(vec![String::new()])
        );
        assert_eq!(ConditioningBundle::default(), ConditioningBundle::empty_text());
    }
}
