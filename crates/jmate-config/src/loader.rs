//! Configuration Loader
//!
//! Handles loading configuration and applying environment overrides with proper precedence.

use crate::project::{validate_log_level, NativeConfig, OutputStream, ProjectConfig};
use crate::{ConfigResult, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration and merges it with proper precedence:
/// 1. Built-in defaults - lowest priority
/// 2. Project config (./jmate.toml) - overrides defaults
/// 3. Environment variables (JMATE_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    _private: (),
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration with environment overrides applied
    pub project: ProjectConfig,

    /// Directory where jmate.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find jmate.toml. A missing file is not
    /// an error: defaults are used.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project,
            project_root,
        })
    }

    /// Load configuration from a specific config file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let project = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// - JMATE_NATIVE_LIBRARY: library to resolve the routine from
    /// - JMATE_NATIVE_SYMBOL: routine symbol name
    /// - JMATE_OUTPUT: stdout | stderr
    /// - JMATE_LOG: log level
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(library) = env::var("JMATE_NATIVE_LIBRARY") {
            config.native.get_or_insert_with(Default::default).library = Some(library);
        }

        if let Ok(symbol) = env::var("JMATE_NATIVE_SYMBOL") {
            config.native.get_or_insert_with(Default::default).symbol = Some(symbol);
        }

        if let Ok(stream) = env::var("JMATE_OUTPUT") {
            let stream: OutputStream = stream.parse()?;
            config.output.get_or_insert_with(Default::default).stream = Some(stream);
        }

        if let Ok(level) = env::var("JMATE_LOG") {
            validate_log_level("JMATE_LOG", &level)?;
            config.log.get_or_insert_with(Default::default).level = Some(level);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Native routine settings
    pub fn native(&self) -> NativeConfig {
        self.project.native()
    }

    /// Effective output stream (project > default)
    pub fn output_stream(&self) -> OutputStream {
        self.project.output_stream().unwrap_or_default()
    }

    /// Effective log level (project > default)
    pub fn log_level(&self) -> &str {
        self.project.log_level().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a jmate.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
