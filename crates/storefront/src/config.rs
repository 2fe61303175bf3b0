//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `APTEKA_DATA_DIR` - Directory for persisted state (cart, order
//!   history). Default: `$HOME/.local/share/apteka`
//! - `APTEKA_CATALOG_PATH` - Path to the product catalog JSON file.
//!   Default: `<data dir>/products.json`
//!
//! `$HOME` must be set when `APTEKA_DATA_DIR` is not.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted key-value records.
    pub data_dir: PathBuf,
    /// Path to the product catalog file.
    pub catalog_path: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if neither
    /// `APTEKA_DATA_DIR` nor `HOME` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = match std::env::var_os("APTEKA_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = std::env::var_os("HOME")
                    .ok_or(ConfigError::MissingEnvVar("HOME"))?;
                PathBuf::from(home).join(".local").join("share").join("apteka")
            }
        };

        let catalog_path = std::env::var_os("APTEKA_CATALOG_PATH")
            .map_or_else(|| data_dir.join("products.json"), PathBuf::from);

        Ok(Self {
            data_dir,
            catalog_path,
        })
    }
}
