use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Latent-diffusion style model config (`model.target` / `model.params`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: ModelSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSection {
    /// Fully qualified name of the model class
    pub target: String,
    #[serde(default)]
    pub base_learning_rate: Option<f64>,
    /// Constructor parameters, passed through untouched
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl ModelConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded model config {:?} ({})", path, config.model.target);
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Looks up a top-level entry of `model.params`.
    pub fn param(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.model.params.get(key)
    }
}
