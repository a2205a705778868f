//! Mount-time configuration. A single environment variable names the
//! version store root; see `RCS_VERSION_PATH` in the original's `main.c`.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub version_store_root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RCS_VERSION_PATH is not set")]
    MissingVersionPath,
    #[error("RCS_VERSION_PATH does not name a directory")]
    NotADirectory,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("RCS_VERSION_PATH").map_err(|_| ConfigError::MissingVersionPath)?;
        Self::from_path(PathBuf::from(raw))
    }

    pub fn from_path(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory);
        }
        Ok(Self {
            version_store_root: path,
        })
    }
}
