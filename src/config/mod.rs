//! User configuration.
//!
//! Settings are read from a TOML file in the platform config directory.
//! Reporter tokens are not part of the config file; they live in the OS
//! keyring (see `api`).

mod settings;

pub use settings::Settings;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine the config directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid TOML.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Directory holding bugship's configuration.
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("bugship"))
}

/// Path of the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
