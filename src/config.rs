use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::catalog::SentenceCatalog;

pub const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Custom sentence catalog; empty means the built-in one
    pub sentences: Vec<String>,
    /// Fixed rng seed for a reproducible sentence order
    pub seed: Option<u64>,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentences: Vec::new(),
            seed: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Config {
    pub fn catalog(&self) -> SentenceCatalog {
        SentenceCatalog::or_builtin(&self.sentences)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Result<Self, ConfigError> {
        AppDirs::config_path()
            .map(|path| Self { path })
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files yield the default config
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                log::warn!("ignoring config at {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
