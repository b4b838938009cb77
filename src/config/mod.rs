// ABOUTME: Configuration types and parsing for imgstash.yml.
// ABOUTME: Locates the image cache root, the runtime socket, and lookup limits.

use crate::error::{Error, Result};
use crate::registry::Keychain;
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "imgstash.yml";
pub const CONFIG_FILENAME_ALT: &str = "imgstash.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".imgstash/config.yml";

/// Environment variable that relocates the state directory.
pub const HOME_ENV: &str = "IMGSTASH_HOME";

const STATE_DIR: &str = ".imgstash";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Explicit image cache root.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Budget for a local runtime lookup.
    #[serde(default = "default_lookup_timeout", with = "humantime_serde")]
    pub lookup_timeout: Duration,

    /// Docker `config.json` used for registry credentials.
    #[serde(default)]
    pub docker_config: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: None,
            runtime: RuntimeConfig::default(),
            lookup_timeout: default_lookup_timeout(),
            docker_config: None,
        }
    }
}

fn default_lookup_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`Config::discover`], but a missing file means defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Image cache root: the configured directory, else the default one.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(default_cache_dir)
            .ok_or(Error::NoHomeDir)
    }

    /// Registry keychain: the configured Docker config file, else the default one.
    pub fn keychain(&self) -> Keychain {
        match &self.docker_config {
            Some(path) => Keychain::from_path(path),
            None => Keychain::default(),
        }
    }
}

/// State directory: `$IMGSTASH_HOME`, else `~/.imgstash`.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(STATE_DIR)))
}

/// Default image cache root: `<state dir>/cache/images`.
pub fn default_cache_dir() -> Option<PathBuf> {
    state_dir().map(|dir| dir.join("cache").join("images"))
}
