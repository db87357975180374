//! Configuration system for jumpstack.
//!
//! Settings are read from a TOML file and every field falls back to a
//! default, so an empty or partial file is valid.
//!
//! # Example
//!
//! ```
//! use jumpstack::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.capacity, None);
//! assert!(!config.check_position);
//!
//! // Create custom configuration
//! let custom = Config {
//!     capacity: Some(100),
//!     ..Config::default()
//! };
//! assert_eq!(custom.log_level, "warn");
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for the jump stack.
///
/// # Fields
///
/// * `capacity` - Maximum number of remembered positions (default: unbounded)
/// * `check_position` - Default for `checkPosition` in command batches (default: false)
/// * `log_level` - Log filter used when `RUST_LOG` is not set (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of remembered positions, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Check the position after a command batch unless the batch says otherwise
    #[serde(default)]
    pub check_position: bool,

    /// Log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: None,
            check_position: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jumpstack/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jumpstack");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    ///
    /// An unreadable or invalid file is logged with `warn!`.
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|err| {
            tracing::warn!("{err:#}, using defaults");
            Self::default()
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file or home directory yields the defaults; a file that
    /// cannot be read or parsed is an error.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::try_load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`, failing on an unreadable or invalid file.
    pub fn try_load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("capacity = 5").unwrap();
        assert_eq!(config.capacity, Some(5));
        assert_eq!(config.log_level, "warn");
    }
}
