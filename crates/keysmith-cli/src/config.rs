// ABOUTME: Configuration loading for the keysmith CLI
// ABOUTME: Optional TOML file supplying defaults that command-line flags override

use anyhow::{Context, Result};
use keysmith_ssh::{KeyAlgorithm, DEFAULT_FILENAME, DEFAULT_OUTPUT_DIR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults for `keysmith generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key type: rsa, ed25519, or ecdsa
    pub key_type: String,
    /// Key size in bits (per-algorithm default when unset)
    pub bits: Option<u32>,
    /// Directory keys are written to
    pub output_dir: String,
    /// Base filename for the .pem/.pub pair
    pub filename: String,
    /// Comment appended to the public key
    pub comment: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_type: KeyAlgorithm::Ed25519.to_string(),
            bits: None,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            comment: None,
        }
    }
}

impl Config {
    /// Returns the config directory path (~/.config/keysmith).
    ///
    /// Uses `XDG_CONFIG_HOME` if set, otherwise falls back to `~/.config`.
    pub fn config_dir() -> Result<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|p| p.join("keysmith"))
            .context("Could not determine home directory")
    }

    /// Returns the path to the default config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicitly named file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
