//! Model loading: parse the YAML config and resolve the checkpoint it will be
//! initialised from. Weight deserialisation belongs to the renderer backend.
pub mod config;

pub use config::{ModelConfig, ModelSection};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// A config paired with a checkpoint that is known to exist on disk.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub config: ModelConfig,
    pub checkpoint: PathBuf,
    pub checkpoint_bytes: u64,
}

impl LoadedModel {
    pub fn target(&self) -> &str {
        &self.config.model.target
    }
}

pub fn load_model_from_config(
    config: &ModelConfig,
    checkpoint: &Path,
    verbose: bool,
) -> Result<LoadedModel> {
    let meta = match std::fs::metadata(checkpoint) {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            return Err(Error::MissingCheckpoint {
                path: checkpoint.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingCheckpoint {
                path: checkpoint.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    if verbose {
        info!(
            "Loading model {} from {:?} ({:.2} MB)",
            config.model.target,
            checkpoint,
            meta.len() as f64 / 1024.0 / 1024.0
        );
    } else {
        debug!("Loading model from {:?}", checkpoint);
    }

    Ok(LoadedModel {
        config: config.clone(),
        checkpoint: checkpoint.to_path_buf(),
        checkpoint_bytes: meta.len(),
    })
}
