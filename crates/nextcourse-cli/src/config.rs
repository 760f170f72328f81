//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextcourse/config.toml` by default:
//!
//! ```toml
//! url = "https://extranet.example.fr"
//!
//! [account]
//! username = "jdupont"
//! password = "pass::school/extranet"
//! ```
//!
//! The password supports secret references (`pass::…`, `env::…`); see
//! [`crate::secret`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the nextcourse CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Portal base URL. Falls back to the built-in default when unset.
    pub url: Option<String>,

    /// Portal account.
    pub account: AccountSettings,
}

/// Portal account settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Portal username.
    pub username: Option<String>,

    /// Portal password, possibly a secret reference.
    pub password: Option<String>,
}

impl CliConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextcourse")
            .join("config.toml")
    }

    /// Serializes the effective configuration back to TOML.
    pub fn dump(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize config: {}", e))
    }
}
