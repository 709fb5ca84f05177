use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::conditioning::{Conditioning, GlyphSource};
use crate::core::request::InferenceRequest;

/// File name of the run sidecar written next to the images.
pub const RUN_SIDECAR: &str = "run.json";

/// JSON record of one inference run.
#[derive(Debug, Serialize)]
pub struct RunMetadata<'a> {
    pub created: String,
    pub request: &'a InferenceRequest,
    /// "qrcode" or "text"
    pub conditioning: &'static str,
    pub degraded: Option<&'a str>,
    pub images: Vec<String>,
    pub failed: usize,
}

impl<'a> RunMetadata<'a> {
    pub fn new(
        request: &'a InferenceRequest,
        conditioning: &'a Conditioning,
        saved: &[PathBuf],
        failed: usize,
    ) -> Self {
        let mode = match conditioning.bundle().glyphs() {
            GlyphSource::Bitmap(_) => "qrcode",
            GlyphSource::Texts(_) => "text",
        };
        Self {
            created: chrono::Utc::now().to_rfc3339(),
            request,
            conditioning: mode,
            degraded: conditioning.degraded_reason(),
            images: saved
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
            failed,
        }
    }
}

pub fn create_run_sidecar(
    output_dir: &Path,
    metadata: &RunMetadata<'_>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let sidecar_path = output_dir.join(RUN_SIDECAR);
    let json_string = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&sidecar_path, json_string)?;

    info!("Created run metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conditioning::prepare_conditioning;

    #[test]
    fn sidecar_records_request_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let request = InferenceRequest::default();
        let conditioning = prepare_conditioning(None);
        let saved = vec![dir.path().join("0.jpg"), dir.path().join("1.jpg")];

        let meta = RunMetadata::new(&request, &conditioning, &saved, 1);
        let path = create_run_sidecar(dir.path(), &meta).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["conditioning"], "text");
        assert_eq!(value["degraded"], "no glyph instructions supplied");
        assert_eq!(value["images"], serde_json::json!(["0.jpg", "1.jpg"]));
        assert_eq!(value["failed"], 1);
        assert_eq!(value["request"]["num_samples"], 4);
        assert_eq!(value["request"]["memory_mode"], "Offload");
    }
}
