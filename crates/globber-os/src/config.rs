//! Configuration for the `os` function table.
//!
//! Configuration is loaded from `~/.config/globber/os-api.toml` (or the
//! platform equivalent).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use globber::HiddenFiles;
use serde::{Deserialize, Serialize};

use crate::tools::DEFAULT_NAMESPACE;

/// Configuration for the `os` function table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsApiConfig {
    /// Namespace the functions are published under.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Whether `*` and `**` match names starting with a dot.
    #[serde(default)]
    pub hidden_files: HiddenFilesSetting,

    /// Case-sensitive glob matching. Unset follows the host convention.
    #[serde(default)]
    pub case_sensitive: Option<bool>,

    /// Let `**` descend through symlinked directories.
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// Dotfile policy as spelled in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenFilesSetting {
    #[default]
    Include,
    Exclude,
}

impl From<HiddenFilesSetting> for HiddenFiles {
    fn from(setting: HiddenFilesSetting) -> Self {
        match setting {
            HiddenFilesSetting::Include => HiddenFiles::Include,
            HiddenFilesSetting::Exclude => HiddenFiles::Exclude,
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for OsApiConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            hidden_files: HiddenFilesSetting::default(),
            case_sensitive: None,
            follow_symlinks: false,
        }
    }
}

impl OsApiConfig {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "globber")
            .context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("os-api.toml"))
    }
}
