//! Preview backend: composes the glyph conditioning into output frames
//! without running a diffusion network. Useful for checking conditioning,
//! output layout and persistence against a real config and checkpoint.
use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::core::resize::resize_u8_image;
use crate::error::{Error, Result};
use crate::model::LoadedModel;
use crate::render::{GlyphRenderer, RenderRequest, RenderedImage};
use crate::types::MemoryMode;

pub struct PreviewRenderer {
    model: LoadedModel,
    memory_mode: MemoryMode,
}

impl PreviewRenderer {
    pub fn new(model: LoadedModel, memory_mode: MemoryMode) -> Self {
        if memory_mode.is_offload() {
            info!("Memory saving enabled: idle model parts are kept off the compute device");
        }
        Self { model, memory_mode }
    }

    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    pub fn memory_mode(&self) -> MemoryMode {
        self.memory_mode
    }

    fn base_canvas(request: &RenderRequest<'_>, side: usize) -> Result<Vec<u8>> {
        let mut canvas = match request.conditioning.bitmap() {
            Some(bmp) => resize_u8_image(bmp.pixels(), bmp.width(), bmp.height(), side, side)
                .map_err(Error::external)?,
            None => vec![255u8; side * side],
        };
        if request.request.guess_mode {
            canvas.iter_mut().for_each(|v| *v = 255 - *v);
        }
        Ok(canvas)
    }
}

impl GlyphRenderer for PreviewRenderer {
    type Error = Error;

    fn process(&mut self, request: &RenderRequest<'_>) -> Result<Vec<RenderedImage>> {
        let req = request.request;
        if req.num_samples == 0 {
            return Err(Error::InvalidArgument {
                arg: "num_samples",
                value: req.num_samples.to_string(),
            });
        }
        if req.image_resolution == 0 || req.image_resolution > u16::MAX as u32 {
            return Err(Error::InvalidArgument {
                arg: "image_resolution",
                value: req.image_resolution.to_string(),
            });
        }

        let side = req.image_resolution as usize;
        info!(
            "Rendering {} preview samples at {}x{} with {} ({} steps, scale {})",
            req.num_samples,
            side,
            side,
            self.model.target(),
            req.ddim_steps,
            req.scale
        );
        debug!("Prompt: {:?}; negative: {:?}", req.full_prompt(), req.n_prompt);

        let canvas = Self::base_canvas(request, side)?;
        let amplitude = (req.strength * (4.0 + 28.0 * req.eta)).clamp(0.0, 255.0);
        let mut rng = StdRng::seed_from_u64(req.seed as u64);

        let mut results = Vec::new();
        for _ in 0..req.num_samples {
            let pixels = Array3::from_shape_fn((side, side, 3), |(y, x, _)| {
                let base = canvas[y * side + x] as f64;
                let noise = if amplitude > 0.0 {
                    rng.gen_range(-amplitude..=amplitude)
                } else {
                    0.0
                };
                (base + noise).round().clamp(0.0, 255.0) as u8
            });
            results.push(RenderedImage::RawPixels(pixels));
        }
        Ok(results)
    }
}
