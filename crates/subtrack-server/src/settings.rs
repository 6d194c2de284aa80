//! Runtime server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file, then `SUBTRACK_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SUBTRACK";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file; `:memory:` keeps everything in RAM.
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load from `path` (if it exists) layered over defaults, then the
  /// environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    defaults(Config::builder())?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn defaults(
  builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  builder
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8080)?
    .set_default("store_path", "subtrack.db")
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
