//! I/O layer: JPEG writers for rendered results and the JSON run sidecar.
pub mod writers;
