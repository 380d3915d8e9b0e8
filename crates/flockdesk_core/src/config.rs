//! Console configuration file.
//!
//! # Responsibility
//! - Load logging settings for hosts embedding the core.
//!
//! # Invariants
//! - Missing fields fall back to build-mode defaults.
//! - An unsupported level is rejected at load time, not at logger start.

use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read config: {err}"),
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::InvalidLevel(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidLevel(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Host-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_level_string")]
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_level_string(),
            log_dir: None,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config: ConsoleConfig = serde_json::from_str(text)?;
        config.log_level = normalize_level(&config.log_level)
            .map_err(ConfigError::InvalidLevel)?
            .to_string();
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Starts file logging when a directory is configured.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConsoleConfig};
    use crate::logging::default_log_level;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ConsoleConfig::from_json("{}").expect("empty config");
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.log_level, default_log_level());
        assert!(!config.init_logging().expect("no-op init"));
    }

    #[test]
    fn level_is_normalized_and_validated() {
        let config = ConsoleConfig::from_json(r#"{"log_level": " Warning "}"#).expect("warning");
        assert_eq!(config.log_level, "warn");

        let err = ConsoleConfig::from_json(r#"{"log_level": "loud"}"#).expect_err("bad level");
        assert!(matches!(err, ConfigError::InvalidLevel(_)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        write!(file, r#"{{"log_level": "error", "log_dir": "/var/log/flockdesk"}}"#)
            .expect("write config");

        let config = ConsoleConfig::from_path(file.path()).expect("config from file");
        assert_eq!(config.log_level, "error");
        assert_eq!(
            config.log_dir.as_deref(),
            Some(std::path::Path::new("/var/log/flockdesk"))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ConsoleConfig::from_path(dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
