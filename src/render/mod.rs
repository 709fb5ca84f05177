//! Render collaborators: the [`GlyphRenderer`] seam the diffusion backend plugs
//! into, the images it returns, and the bundled preview backend.
pub mod output;
pub mod preview;

pub use output::RenderedImage;
pub use preview::PreviewRenderer;

use crate::core::conditioning::ConditioningBundle;
use crate::core::request::InferenceRequest;

/// Everything a renderer receives for one call: the resolved request plus the
/// conditioning prepared for it.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub request: &'a InferenceRequest,
    pub conditioning: &'a ConditioningBundle,
}

impl<'a> RenderRequest<'a> {
    pub fn new(request: &'a InferenceRequest, conditioning: &'a ConditioningBundle) -> Self {
        Self {
            request,
            conditioning,
        }
    }
}

/// A backend that turns a prompt plus glyph conditioning into images.
///
/// Implementors own the model and its sampler. The returned images are in
/// sample order and are persisted as `0.jpg..N-1.jpg`.
pub trait GlyphRenderer {
    /// The error type that can be returned during rendering.
    type Error: std::error::Error + Send + Sync + 'static;

    fn process(&mut self, request: &RenderRequest<'_>) -> Result<Vec<RenderedImage>, Self::Error>;
}
