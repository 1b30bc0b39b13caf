//! YAML loading for the curated title-noise lists.
//!
//! The noise file holds two lists of substrings that listing sites append to
//! titles (edition markers, bonus tags, platform suffixes):
//! ```yaml
//! delete:
//!   - "初回限定版"
//!   - "通常版"
//! special:
//!   - "DL版"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
}

/// Substrings stripped from catalog titles during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseConfiguration {
    #[serde(default)]
    pub delete: Vec<String>,
    #[serde(default)]
    pub special: Vec<String>,
}

impl NoiseConfiguration {
    /// Both lists merged, empties and duplicates dropped, longest first.
    ///
    /// Length is counted in characters. Equal-length tokens are ordered
    /// lexically so the application order never depends on file order.
    pub fn merged_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .delete
            .iter()
            .chain(self.special.iter())
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();
        tokens.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        tokens.dedup();
        tokens
    }
}

/// Load the noise configuration from a YAML file.
///
/// A missing file yields an empty configuration; titles then pass through
/// normalization unchanged.
pub fn load_noise(path: &Path) -> Result<NoiseConfiguration, NoiseError> {
    if !path.exists() {
        return Ok(NoiseConfiguration::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| NoiseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_noise(&contents).map_err(|e| NoiseError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse noise configuration from YAML text. An empty document is an empty configuration.
pub fn parse_noise(contents: &str) -> Result<NoiseConfiguration, serde_yml::Error> {
    if contents.trim().is_empty() {
        return Ok(NoiseConfiguration::default());
    }
    serde_yml::from_str(contents)
}
