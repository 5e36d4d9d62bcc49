//! Project Configuration (jmate.toml)
//!
//! Handles project-level configuration stored in `jmate.toml`.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Symbol looked up for the native formatting routine when none is configured.
#[cfg(not(windows))]
pub const DEFAULT_NATIVE_SYMBOL: &str = "snprintf";
#[cfg(windows)]
pub const DEFAULT_NATIVE_SYMBOL: &str = "_snprintf";

/// Library the routine is resolved from when none is configured, `None`
/// meaning the current process image. The Windows CRT export lives in
/// `msvcrt.dll`, not in the executable.
#[cfg(not(windows))]
pub const DEFAULT_NATIVE_LIBRARY: Option<&str> = None;
#[cfg(windows)]
pub const DEFAULT_NATIVE_LIBRARY: Option<&str> = Some("msvcrt.dll");

/// Log level used when neither the config nor the CLI sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Project configuration from jmate.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Native formatting routine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeConfig>,

    /// Output destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
}

/// Where the native formatting routine is resolved from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct NativeConfig {
    /// Shared library to load the routine from (default: the current process image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Symbol name of the routine (default: `snprintf`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl NativeConfig {
    /// Effective symbol name
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(DEFAULT_NATIVE_SYMBOL)
    }

    /// Effective library, `None` meaning the current process image
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref().or(DEFAULT_NATIVE_LIBRARY)
    }
}

/// Output destination configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<OutputStream>,
}

/// Standard stream the rendered text is written to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
}

impl FromStr for OutputStream {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(OutputStream::Stdout),
            "stderr" => Ok(OutputStream::Stderr),
            other => Err(ConfigError::InvalidValue {
                field: "output.stream".to_string(),
                reason: format!("expected 'stdout' or 'stderr', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => write!(f, "stdout"),
            OutputStream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// One of off, error, warn, info, debug, trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(native) = &self.native {
            if let Some(symbol) = &native.symbol {
                if symbol.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "native.symbol".to_string(),
                        reason: "symbol name cannot be empty".to_string(),
                    });
                }
                if symbol.contains('\0') {
                    return Err(ConfigError::InvalidValue {
                        field: "native.symbol".to_string(),
                        reason: "symbol name cannot contain a NUL byte".to_string(),
                    });
                }
            }
            if let Some(library) = &native.library {
                if library.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "native.library".to_string(),
                        reason: "library path cannot be empty".to_string(),
                    });
                }
            }
        }

        if let Some(level) = self.log.as_ref().and_then(|l| l.level.as_ref()) {
            validate_log_level("log.level", level)?;
        }

        Ok(())
    }

    /// Native routine settings, defaulted when absent
    pub fn native(&self) -> NativeConfig {
        self.native.clone().unwrap_or_default()
    }

    /// Configured output stream, if any
    pub fn output_stream(&self) -> Option<OutputStream> {
        self.output.as_ref().and_then(|o| o.stream)
    }

    /// Configured log level, if any
    pub fn log_level(&self) -> Option<&str> {
        self.log.as_ref().and_then(|l| l.level.as_deref())
    }
}

/// Validate a log level value
pub(crate) fn validate_log_level(field: &str, value: &str) -> ConfigResult<()> {
    if LOG_LEVELS.contains(&value.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected one of {}, got '{}'", LOG_LEVELS.join(", "), value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[native]
library = "/usr/lib/libc.so.6"
symbol = "snprintf"

[output]
stream = "stderr"

[log]
level = "debug"
"#;
        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.native().library(), Some("/usr/lib/libc.so.6"));
        assert_eq!(config.native().symbol(), "snprintf");
        assert_eq!(config.output_stream(), Some(OutputStream::Stderr));
        assert_eq!(config.log_level(), Some("debug"));
    }

    #[test]
    fn test_defaults_when_empty() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config.native().symbol(), DEFAULT_NATIVE_SYMBOL);
        assert_eq!(config.native().library(), DEFAULT_NATIVE_LIBRARY);
        assert_eq!(config.output_stream(), None);
        assert_eq!(config.log_level(), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_default_library_is_crt() {
        let native = NativeConfig::default();
        assert_eq!(native.library(), Some("msvcrt.dll"));
        assert_eq!(native.symbol(), "_snprintf");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_default_library_is_process_image() {
        assert_eq!(NativeConfig::default().library(), None);
    }

    #[test]
    fn test_configured_library_overrides_default() {
        let native = NativeConfig {
            library: Some("libfmt.so".to_string()),
            symbol: None,
        };
        assert_eq!(native.library(), Some("libfmt.so"));
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let config: ProjectConfig = toml::from_str("[native]\nsymbol = \"  \"").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "native.symbol"
        ));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config: ProjectConfig = toml::from_str("[log]\nlevel = \"loud\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_stream_is_parse_error() {
        let result: Result<ProjectConfig, _> = toml::from_str("[output]\nstream = \"printer\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_output_stream_from_str() {
        assert_eq!("STDERR".parse::<OutputStream>().unwrap(), OutputStream::Stderr);
        assert_eq!("stdout".parse::<OutputStream>().unwrap(), OutputStream::Stdout);
        assert!("tty".parse::<OutputStream>().is_err());
    }
}
