//! Shared types and enums used across glyphgen.
//! Currently holds `MemoryMode`, the execution mode handed to the model collaborator.
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the model collaborator trades memory for speed during inference.
///
/// `Offload` asks the collaborator to move idle components to a cheaper
/// device between sampling stages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum MemoryMode {
    Full,
    #[default]
    Offload,
}

impl MemoryMode {
    pub fn is_offload(self) -> bool {
        matches!(self, MemoryMode::Offload)
    }
}

/// Bool-ish parsing: `false`, `0`, `no`, `off` and the empty string select
/// `Full`; any other value selects `Offload`.
impl FromStr for MemoryMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "" | "false" | "0" | "no" | "off" => MemoryMode::Full,
            _ => MemoryMode::Offload,
        })
    }
}

impl std::fmt::Display for MemoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryMode::Full => write!(f, "Full"),
            MemoryMode::Offload => write!(f, "Offload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_words_disable_offload() {
        for s in ["false", "FALSE", "0", "no", "off", "", "  Off "] {
            assert_eq!(s.parse::<MemoryMode>().unwrap(), MemoryMode::Full, "{s:?}");
        }
    }

    #[test]
    fn other_values_enable_offload() {
        for s in ["true", "1", "yes", "offload idle parts to the cpu"] {
            assert_eq!(s.parse::<MemoryMode>().unwrap(), MemoryMode::Offload, "{s:?}");
        }
    }
}
