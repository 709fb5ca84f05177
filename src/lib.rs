#![doc = r#"
glyphgen — a command-line driver for glyph-conditioned text-to-image diffusion.

This crate resolves an inference request, prepares the glyph conditioning image
(a QR code of the instruction source, or an empty-text placeholder), loads a
model config and checkpoint, hands everything to a [`GlyphRenderer`] and saves
the returned images as `<save_path>/<prompt>/{index}.jpg`.

The diffusion model itself is a collaborator behind the [`GlyphRenderer`]
trait. The crate ships [`PreviewRenderer`], which composes the conditioning
into output frames without a diffusion network.

Quick start: run the preview backend
------------------------------------
```rust,no_run
use std::path::Path;
use glyphgen::{
    InferenceRequest, ModelConfig, PreviewRenderer, load_model_from_config, run,
};

fn main() -> glyphgen::Result<()> {
    let request = InferenceRequest {
        glyph_instructions: Some("https://arxiv.org/pdf/2305.18259".to_string()),
        num_samples: 2,
        ..Default::default()
    };

    let config = ModelConfig::load(&request.config_path)?;
    let model = load_model_from_config(&config, &request.checkpoint_path, true)?;
    let mut renderer = PreviewRenderer::new(model, request.memory_mode);

    let report = run(&request, &mut renderer, false)?;
    println!("saved={} failed={}", report.save.saved.len(), report.save.failed);
    Ok(())
}
```

Plugging in a backend
---------------------
```rust
use glyphgen::{GlyphRenderer, RenderRequest, RenderedImage};

struct Blank;

impl GlyphRenderer for Blank {
    type Error = glyphgen::Error;

    fn process(&mut self, req: &RenderRequest<'_>) -> glyphgen::Result<Vec<RenderedImage>> {
        let side = req.request.image_resolution as usize;
        (0..req.request.num_samples)
            .map(|_| RenderedImage::from_rgb(side, side, vec![255; side * side * 3]))
            .collect()
    }
}
```

Conditioning
------------
[`prepare_conditioning`] never fails. A missing or unencodable instruction
source yields [`Conditioning::Degraded`] with a single empty rendered text and
no layout parameters; the run proceeds either way.

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — request, conditioning and QR helpers.
- [`model`] — YAML model config and checkpoint resolution.
- [`render`] — renderer trait, rendered images and the preview backend.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod model;
pub mod render;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::conditioning::{
    Conditioning, ConditioningBundle, GlyphBitmap, GlyphSource, LayoutParams,
    prepare_conditioning,
};
pub use crate::core::request::InferenceRequest;
pub use error::{Error, Result};
pub use types::MemoryMode;

// Model loading
pub use model::{LoadedModel, ModelConfig, load_model_from_config};

// Rendering
pub use render::{GlyphRenderer, PreviewRenderer, RenderRequest, RenderedImage};

// High-level API re-exports
pub use api::{RunReport, SaveReport, generate, render_and_save, run, save_results};
