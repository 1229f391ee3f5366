//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RETROVOLT_DATA_DIR` - Directory for persisted state (default: `.retrovolt`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Configuration for the persistent stores.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the persisted cart and session documents.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Default data directory, relative to the working directory.
    pub const DEFAULT_DATA_DIR: &'static str = ".retrovolt";

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `RETROVOLT_DATA_DIR` is set but empty or not
    /// valid Unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = match env::var("RETROVOLT_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "RETROVOLT_DATA_DIR",
                    "must not be empty".to_owned(),
                ));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(env::VarError::NotPresent) => PathBuf::from(Self::DEFAULT_DATA_DIR),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidEnvVar(
                    "RETROVOLT_DATA_DIR",
                    "not valid unicode".to_owned(),
                ));
            }
        };

        Ok(Self { data_dir })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
        }
    }
}
