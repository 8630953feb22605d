//! Stepwise Configuration System
//!
//! Provides run settings for the `stepwise` command:
//! - Project configuration (stepwise.toml)
//! - Global user configuration (~/.stepwise/config.toml)
//! - Environment overrides and precedence
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.stepwise/config.toml)
//! 2. Project config (stepwise.toml, searched upward from the working directory)
//! 3. Environment variables (STEPWISE_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use stepwise_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("trace: {}", config.trace());
//! ```

pub mod global;
pub mod loader;
pub mod project;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParse {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use global::{GlobalConfig, LogConfig};
pub use loader::{Config, ConfigLoader};
pub use project::{ProjectConfig, RunConfig, PROJECT_CONFIG_FILE};

/// Read and deserialize a TOML file
fn read_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io(e)
        }
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        file: path.to_path_buf(),
        error: e,
    })
}
