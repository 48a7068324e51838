//! Configuration management for koipond
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (koipond.toml)
//! - Environment variables (KOIPOND__*)
//!
//! ## Example config file (koipond.toml):
//! ```toml
//! [data]
//! path = "data/koidata.xml"
//!
//! [logging]
//! filter = "koipond=debug"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Inventory document settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inventory document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the inventory XML document
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/koidata.xml")
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl InventoryConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["koipond.toml", ".koipond.toml", "config/koipond.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("me", "acicovic", "koipond") {
            let xdg_config = config_dir.config_dir().join("koipond.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // KOIPOND__DATA__PATH, KOIPOND__LOGGING__FILTER
        builder = builder.add_source(
            Environment::with_prefix("KOIPOND")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the document path (resolves relative paths)
    pub fn data_path(&self) -> PathBuf {
        if self.data.path.is_absolute() {
            self.data.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.data.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InventoryConfig::default();
        assert_eq!(config.data.path, PathBuf::from("data/koidata.xml"));
        assert_eq!(config.logging.filter, "info");
        assert!(config.data_path().is_absolute());
    }

    #[test]
    fn test_serialize_config() {
        let config = InventoryConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[logging]"));
    }

    #[test]
    fn test_save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let path_str = path.to_str().unwrap();

        let mut config = InventoryConfig::default();
        config.data.path = PathBuf::from("/srv/koipond/inventory.xml");
        config.logging.filter = "koipond=debug".to_string();
        config.save(path_str).unwrap();

        let loaded = InventoryConfig::load_from(Some(path_str)).unwrap();
        assert_eq!(loaded.data.path, PathBuf::from("/srv/koipond/inventory.xml"));
        assert_eq!(loaded.logging.filter, "koipond=debug");
        assert_eq!(loaded.data_path(), PathBuf::from("/srv/koipond/inventory.xml"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(InventoryConfig::load_from(path.to_str()).is_err());
    }
}
