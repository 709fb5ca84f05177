use clap::Parser;
use std::path::PathBuf;

use glyphgen::InferenceRequest;
use glyphgen::MemoryMode;
use glyphgen::core::request::{
    DEFAULT_A_PROMPT, DEFAULT_CHECKPOINT_PATH, DEFAULT_CONFIG_PATH, DEFAULT_N_PROMPT,
    DEFAULT_PROMPT, DEFAULT_SAVE_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "glyphgen", version, about = "Glyph-conditioned text-to-image inference")]
pub struct CliArgs {
    /// Path to model config
    #[arg(long = "cfg", default_value = DEFAULT_CONFIG_PATH)]
    pub cfg: PathBuf,

    /// Path to checkpoint of model
    #[arg(long = "ckpt", default_value = DEFAULT_CHECKPOINT_PATH)]
    pub ckpt: PathBuf,

    /// Where to save images
    #[arg(long = "save_path", alias = "save-path", default_value = DEFAULT_SAVE_PATH)]
    pub save_path: PathBuf,

    /// Whether to save memory by keeping unused parts of the model off the
    /// compute device during inference (false/0/no/off to disable)
    #[arg(long = "save_memory", alias = "save-memory", default_value = "true")]
    pub save_memory: MemoryMode,

    /// Glyph instructions; encoded as a QR code conditioning image
    #[arg(long = "glyph_instructions", alias = "glyph-instructions")]
    pub glyph_instructions: Option<String>,

    /// The prompt
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// How many samples to produce for the prompt. A.k.a batch size
    #[arg(long = "num_samples", alias = "num-samples", default_value_t = 4)]
    pub num_samples: usize,

    /// Additional prompt
    #[arg(long = "a_prompt", alias = "a-prompt", default_value = DEFAULT_A_PROMPT)]
    pub a_prompt: String,

    /// Negative prompt
    #[arg(long = "n_prompt", alias = "n-prompt", default_value = DEFAULT_N_PROMPT)]
    pub n_prompt: String,

    /// Image resolution
    #[arg(long = "image_resolution", alias = "image-resolution", default_value_t = 512)]
    pub image_resolution: u32,

    /// Control strength
    #[arg(long, default_value_t = 1.0)]
    pub strength: f64,

    /// Classifier-free guidance scale
    #[arg(long, default_value_t = 9.0)]
    pub scale: f64,

    /// DDIM steps
    #[arg(long = "ddim_steps", alias = "ddim-steps", default_value_t = 20)]
    pub ddim_steps: u32,

    /// Seed
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub seed: i64,

    /// Whether to use guess mode
    #[arg(long = "guess_mode", alias = "guess-mode", default_value_t = false)]
    pub guess_mode: bool,

    /// Eta
    #[arg(long, default_value_t = 0.0)]
    pub eta: f64,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Write a run.json sidecar next to the images
    #[arg(long, default_value_t = false)]
    pub metadata: bool,
}

impl CliArgs {
    pub fn to_request(&self) -> InferenceRequest {
        InferenceRequest {
            prompt: self.prompt.clone(),
            a_prompt: self.a_prompt.clone(),
            n_prompt: self.n_prompt.clone(),
            num_samples: self.num_samples,
            image_resolution: self.image_resolution,
            strength: self.strength,
            scale: self.scale,
            ddim_steps: self.ddim_steps,
            seed: self.seed,
            guess_mode: self.guess_mode,
            eta: self.eta,
            config_path: self.cfg.clone(),
            checkpoint_path: self.ckpt.clone(),
            save_path: self.save_path.clone(),
            glyph_instructions: self.glyph_instructions.clone(),
            memory_mode: self.save_memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("glyphgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn zero_arguments_use_defaults() {
        let req = parse(&[]).to_request();
        assert_eq!(req, InferenceRequest::default());
    }

    #[test]
    fn prompt_with_default_flags() {
        let req = parse(&["--prompt", "A sign that says 'APPLE'"]).to_request();
        assert_eq!(req.prompt, "A sign that says 'APPLE'");
        assert_eq!(req.num_samples, 4);
        assert_eq!(req.image_resolution, 512);
        assert_eq!(req.strength, 1.0);
        assert_eq!(req.scale, 9.0);
        assert_eq!(req.ddim_steps, 20);
        assert_eq!(req.seed, 0);
        assert_eq!(req.eta, 0.0);
        assert!(!req.guess_mode);
        assert_eq!(req.glyph_instructions, None);
    }

    #[test]
    fn snake_case_and_kebab_case_flags() {
        let req = parse(&[
            "--save_path",
            "out",
            "--num-samples",
            "2",
            "--ddim_steps",
            "50",
            "--guess_mode",
            "--seed",
            "-1",
            "--save_memory",
            "false",
            "--glyph_instructions",
            "https://example.com",
            "--eta",
            "0.5",
        ])
        .to_request();
        assert_eq!(req.save_path, PathBuf::from("out"));
        assert_eq!(req.num_samples, 2);
        assert_eq!(req.ddim_steps, 50);
        assert!(req.guess_mode);
        assert_eq!(req.seed, -1);
        assert_eq!(req.memory_mode, MemoryMode::Full);
        assert_eq!(req.glyph_instructions.as_deref(), Some("https://example.com"));
        assert_eq!(req.eta, 0.5);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let res = CliArgs::try_parse_from(["glyphgen", "--num_samples", "four"]);
        assert!(res.is_err());
    }
}
