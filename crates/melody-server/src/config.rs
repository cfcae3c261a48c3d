//! Runtime configuration shared by the `server` and `backup` binaries.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `MELODY_*` environment variables (e.g. `MELODY_PORT=8080`).

use std::path::{Path, PathBuf};

use ::config::ConfigError;
use serde::Deserialize;

pub const DEFAULT_STORE_PATH: &str = "offline_music.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE: &str = "offline_music";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Path of the SQLite file backing the store.
  pub store_path: PathBuf,
  /// Logical name recorded in backups.
  pub database:   String,
}

impl ServerConfig {
  /// Layer the config file at `path` (if it exists) and the environment over
  /// the defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    ::config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .set_default("database", DEFAULT_DATABASE)?
      .add_source(::config::File::from(path.to_path_buf()).required(false))
      .add_source(::config::Environment::with_prefix("MELODY"))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for [`tokio::net::TcpListener::bind`].
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
