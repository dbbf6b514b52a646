use serde::Deserialize;
use std::io::Read;
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use thiserror::*;
use url::Url;

use crate::view::DEFAULT_PAGE_SIZE;

pub const CHANNEL_SIZE: usize = 32;
pub const CONFIG_ENV: &str = "TASKBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "taskboard.yaml";
pub const DEFAULT_STORE_URL: &str = "http://localhost:3000/tasks";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error {0} when reading config")]
    IoError(#[from] std::io::Error),
    #[error("cannot open config file '{0}' : {1}")]
    OpeningError(PathBuf, std::io::Error),
    #[error("UTF8 format error when reading config")]
    Utf8Error,
    #[error("format error {0} when reading config")]
    FormatError(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub url: Url,
    pub timeout_millis: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            timeout_millis: None,
        }
    }
}

fn default_store_url() -> Url {
    Url::parse(DEFAULT_STORE_URL).expect("default store url is valid")
}

#[derive(Clone, Debug, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub view: ViewConfig,
    pub log: Option<crate::log::Log>,
}

impl Config {
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let p = path.as_ref();
        let mut file = File::open(p).map_err(|e| ConfigError::OpeningError(p.to_owned(), e))?;
        let mut contents = vec![];
        file.read_to_end(&mut contents)?;
        let contents = String::from_utf8(contents).map_err(|_| ConfigError::Utf8Error)?;
        Config::from_str(&contents)
    }

    /// Reads the file named by `TASKBOARD_CONFIG`, else `taskboard.yaml` when present,
    /// else built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Config::from_file(path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Config::from_file(DEFAULT_CONFIG_PATH)
            }
            Err(_) => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::Invalid("view.page_size must be positive".into()));
        }
        Ok(())
    }
}
