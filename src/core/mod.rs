//! Core building blocks: the resolved inference request, glyph conditioning
//! (QR encoding and resampling), consumed by the high-level `api` module.
pub mod barcode;
pub mod conditioning;
pub mod request;
pub mod resize;
