//! Process entry-point support for melody: configuration, logging setup and
//! the backup writer. The binaries live in `src/bin/`.

pub mod backup;
pub mod config;

pub use config::ServerConfig;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
}
