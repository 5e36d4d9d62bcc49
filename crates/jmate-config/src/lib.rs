//! jmate Configuration System
//!
//! Provides configuration for the printf bridge:
//! - Project configuration (jmate.toml)
//! - Environment variable overrides (JMATE_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (./jmate.toml, searched upwards)
//! 3. Environment variables (JMATE_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use jmate_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("native symbol: {}", config.native().symbol());
//! ```

pub mod loader;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "jmate.toml";

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use project::{
    LogConfig, NativeConfig, OutputConfig, OutputStream, ProjectConfig, DEFAULT_LOG_LEVEL,
    DEFAULT_NATIVE_LIBRARY, DEFAULT_NATIVE_SYMBOL,
};
