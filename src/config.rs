use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub feed: FeedConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
  /// Base URL of the content API (e.g. "https://api.example.com/api/")
  pub url: String,
  /// Request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
  10
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
  /// Override for the cache database path (defaults to the XDG data dir)
  pub path: Option<PathBuf>,
}

impl Config {
  /// Load configuration, preferring an explicit path over discovery.
  ///
  /// Discovery checks ./mezmur.yaml first, then
  /// $XDG_CONFIG_HOME/mezmur/config.yaml.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = match explicit_path {
      Some(p) if p.exists() => p.to_path_buf(),
      Some(p) => return Err(eyre!("config file does not exist: {}", p.display())),
      None => Self::discover().ok_or_else(|| {
        eyre!("no config found; expected ./mezmur.yaml or ~/.config/mezmur/config.yaml")
      })?,
    };

    let contents = std::fs::read_to_string(&path)
      .map_err(|e| eyre!("could not read {}: {}", path.display(), e))?;

    serde_yaml::from_str(&contents).map_err(|e| eyre!("invalid config {}: {}", path.display(), e))
  }

  fn discover() -> Option<PathBuf> {
    let local = PathBuf::from("mezmur.yaml");
    if local.exists() {
      return Some(local);
    }

    dirs::config_dir()
      .map(|dir| dir.join("mezmur").join("config.yaml"))
      .filter(|p| p.exists())
  }
}
