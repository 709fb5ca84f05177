//! High-level library API: prepare conditioning, run a renderer and persist its
//! results. Prefer these entrypoints over the low-level modules when embedding
//! glyphgen.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::conditioning::{Conditioning, ConditioningBundle, prepare_conditioning};
use crate::core::request::InferenceRequest;
use crate::error::{Error, Result};
use crate::io::writers::metadata::{RunMetadata, create_run_sidecar};
use crate::render::{GlyphRenderer, RenderRequest, RenderedImage};

/// Outcome of persisting a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: Vec<PathBuf>,
    pub failed: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_dir: PathBuf,
    /// Why conditioning fell back to empty text, if it did
    pub degraded: Option<String>,
    pub save: SaveReport,
    pub sidecar: Option<PathBuf>,
}

/// Runs the renderer once for `request` with the given conditioning.
pub fn generate<R: GlyphRenderer>(
    request: &InferenceRequest,
    conditioning: &ConditioningBundle,
    renderer: &mut R,
) -> Result<Vec<RenderedImage>> {
    let results = renderer
        .process(&RenderRequest::new(request, conditioning))
        .map_err(Error::external)?;
    info!("Render tool processed {} images", results.len());
    Ok(results)
}

/// Writes `results` to `output_dir/{index}.jpg`, creating the directory if needed.
///
/// A result that fails to save is logged and counted; the remaining results
/// are still written.
pub fn save_results(results: &[RenderedImage], output_dir: &Path) -> Result<SaveReport> {
    std::fs::create_dir_all(output_dir)?;

    let mut report = SaveReport::default();
    for (idx, result) in results.iter().enumerate() {
        let path = output_dir.join(format!("{idx}.jpg"));
        match result.save(&path) {
            Ok(()) => {
                info!("Saved result {} to {:?}", idx, path);
                report.saved.push(path);
            }
            Err(e) => {
                warn!("Failed to save result {} to {:?}: {}", idx, path, e);
                // A partially written file must not pass for output
                let _ = std::fs::remove_file(&path);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// Generates and saves under `request.result_dir()`, optionally writing the
/// JSON run sidecar.
pub fn render_and_save<R: GlyphRenderer>(
    request: &InferenceRequest,
    conditioning: &Conditioning,
    renderer: &mut R,
    write_metadata: bool,
) -> Result<RunReport> {
    let results = generate(request, conditioning.bundle(), renderer)?;

    let output_dir = request.result_dir();
    let save = save_results(&results, &output_dir)?;

    let sidecar = if write_metadata {
        let meta = RunMetadata::new(request, conditioning, &save.saved, save.failed);
        Some(create_run_sidecar(&output_dir, &meta).map_err(Error::external)?)
    } else {
        None
    };

    Ok(RunReport {
        output_dir,
        degraded: conditioning.degraded_reason().map(str::to_string),
        save,
        sidecar,
    })
}

/// Prepares conditioning from `request.glyph_instructions` and runs
/// [`render_and_save`].
pub fn run<R: GlyphRenderer>(
    request: &InferenceRequest,
    renderer: &mut R,
    write_metadata: bool,
) -> Result<RunReport> {
    let conditioning = prepare_conditioning(request.glyph_instructions.as_deref());
    render_and_save(request, &conditioning, renderer, write_metadata)
}
