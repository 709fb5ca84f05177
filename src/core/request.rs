use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::MemoryMode;

pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";
pub const DEFAULT_CHECKPOINT_PATH: &str = "checkpoints/laion10M_epoch_6_model_ema_only.ckpt";
pub const DEFAULT_SAVE_PATH: &str = "generated_images";
pub const DEFAULT_PROMPT: &str = "A sign that says 'APPLE'";
pub const DEFAULT_A_PROMPT: &str = "4K, dslr, best quality, extremely detailed";
pub const DEFAULT_N_PROMPT: &str = "longbody, lowres, bad anatomy, bad hands, missing fingers, \
extra digit, fewer digits, cropped, worst quality, low quality";

/// Everything one inference run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    /// Appended to `prompt` before it reaches the text encoder
    pub a_prompt: String,
    pub n_prompt: String,
    pub num_samples: usize,
    pub image_resolution: u32,
    /// Conditioning strength
    pub strength: f64,
    /// Classifier-free guidance scale
    pub scale: f64,
    pub ddim_steps: u32,
    pub seed: i64,
    pub guess_mode: bool,
    pub eta: f64,
    pub config_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub save_path: PathBuf,
    /// Source string for the QR conditioning image; None selects the empty-text fallback
    pub glyph_instructions: Option<String>,
    pub memory_mode: MemoryMode,
}

impl Default for InferenceRequest {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            a_prompt: DEFAULT_A_PROMPT.to_string(),
            n_prompt: DEFAULT_N_PROMPT.to_string(),
            num_samples: 4,
            image_resolution: 512,
            strength: 1.0,
            scale: 9.0,
            ddim_steps: 20,
            seed: 0,
            guess_mode: false,
            eta: 0.0,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT_PATH),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            glyph_instructions: None,
            memory_mode: MemoryMode::Offload,
        }
    }
}

impl InferenceRequest {
    /// Positive prompt joined with the additional prompt.
    pub fn full_prompt(&self) -> String {
        if self.a_prompt.is_empty() {
            self.prompt.clone()
        } else {
            format!("{}, {}", self.prompt, self.a_prompt)
        }
    }

    /// Directory the results of this request are written to: `<save_path>/<prompt>`.
    pub fn result_dir(&self) -> PathBuf {
        result_dir(&self.save_path, &self.prompt)
    }
}

/// Joins `save_path` with a directory name derived from `prompt`.
///
/// The prompt is kept verbatim except for path separators, which become `_`
/// so a prompt always maps to exactly one directory level.
pub fn result_dir(save_path: &Path, prompt: &str) -> PathBuf {
    let name: String = prompt
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        save_path.join("untitled")
    } else {
        save_path.join(name)
    }
}
