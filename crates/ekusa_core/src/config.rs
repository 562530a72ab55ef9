//! Runtime configuration from environment variables.
//!
//! Recognized variables:
//! - `EKUSA_DB_PATH`: SQLite namespace file; unset means in-memory.
//! - `EKUSA_LOG_LEVEL`: `trace|debug|info|warn|error`; defaults per build mode.
//! - `EKUSA_LOG_DIR`: absolute directory for rolling logs; unset disables
//!   file logging.

use crate::logging::{default_log_level, init_logging, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_VAR: &str = "EKUSA_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "EKUSA_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "EKUSA_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    EnvFile(dotenvy::Error),
    Invalid { var: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvFile(err) => write!(f, "failed to read env file: {err}"),
            Self::Invalid { var, message } => write!(f, "invalid `{var}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EnvFile(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads the process environment, after loading `./.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::EnvFile(err)),
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads `path` into the process environment, then reads it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref()).map_err(ConfigError::EnvFile)?;
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let log_level = match present(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError::Invalid {
                var: LOG_LEVEL_VAR,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = present(LOG_DIR_VAR)
            .map(|value| normalize_log_dir(&value))
            .transpose()
            .map_err(|message| ConfigError::Invalid {
                var: LOG_DIR_VAR,
                message,
            })?;

        Ok(Self {
            db_path: present(DB_PATH_VAR).map(|value| PathBuf::from(value.trim())),
            log_level,
            log_dir,
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is disabled by configuration.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(self.log_level, log_dir)?;
        Ok(true)
    }
}
