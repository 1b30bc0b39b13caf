//! Application settings (`~/.config/relsync/settings.toml`).
//!
//! Every value has a default, so a missing file or a missing section is
//! fine. Command-line flags override the file; the file overrides defaults.

use std::io;
use std::path::{Path, PathBuf};

use relsync_catalog::Markers;
use relsync_fetch::{FetchConfig, DEFAULT_LISTING_BASE, DEFAULT_SEARCH_BASE};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::CliError;

/// Canonical path to the settings file: `~/.config/relsync/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("relsync").join("settings.toml")
}

/// Default catalog database location: `<cache_dir>/relsync/catalog.db`.
pub(crate) fn default_database_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("relsync")
        .join("catalog.db")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub storage: StorageSettings,
    pub noise: NoiseSettings,
    pub matching: MatchingSettings,
    pub fetch: FetchSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NoiseSettings {
    pub file: PathBuf,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("noise.yaml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MatchingSettings {
    pub primary_marker: String,
    /// Empty disables the secondary tier.
    pub secondary_marker: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            primary_marker: "girlcelly".to_string(),
            secondary_marker: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FetchSettings {
    pub listing_base: String,
    pub search_base: String,
    pub request_interval_ms: u64,
    pub search_with_publisher: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            listing_base: DEFAULT_LISTING_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            request_interval_ms: 2000,
            search_with_publisher: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DisplaySettings {
    pub per_page: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { per_page: 50 }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Database path: CLI override, then `[storage] database`, then the default.
    pub(crate) fn database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.storage.database.clone())
            .unwrap_or_else(default_database_path)
    }

    pub(crate) fn markers(&self) -> Markers {
        let secondary = self.matching.secondary_marker.trim();
        Markers::new(
            self.matching.primary_marker.trim(),
            (!secondary.is_empty()).then(|| secondary.to_string()),
        )
    }

    pub(crate) fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            listing_base: self.fetch.listing_base.clone(),
            search_base: self.fetch.search_base.clone(),
            request_interval: Duration::from_millis(self.fetch.request_interval_ms),
        }
    }

    pub(crate) fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write settings to `path` atomically, creating parent directories.
    pub(crate) fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = self.to_toml().map_err(io::Error::other)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}
