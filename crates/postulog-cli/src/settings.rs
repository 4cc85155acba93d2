//! Layered configuration: optional TOML file, then `POSTULOG_*` variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use postulog_core::store::DEFAULT_SLOT_KEY;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/postulog/config.toml";
pub const DEFAULT_STORE_PATH: &str = "~/.local/share/postulog/postulog.db";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default = "default_slot_key")]
  pub slot_key:   String,
}

fn default_store_path() -> PathBuf { PathBuf::from(DEFAULT_STORE_PATH) }

fn default_slot_key() -> String { DEFAULT_SLOT_KEY.to_owned() }

impl Settings {
  /// Read `file` (if it exists) and overlay the environment.
  pub fn load(file: &Path) -> Result<Self> {
    let settings: Self = config::Config::builder()
      .add_source(config::File::from(expand_tilde(file)).required(false))
      .add_source(config::Environment::with_prefix("POSTULOG"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")?;
    Ok(Self {
      store_path: expand_tilde(&settings.store_path),
      ..settings
    })
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
