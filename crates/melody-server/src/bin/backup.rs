//! melody backup utility.
//!
//! Dumps every contact, subscriber and download event to a single JSON file,
//! overwriting the previous one. Runs once and exits; a failed read leaves
//! any earlier backup untouched.
//!
//! ```
//! cargo run -p melody-server --bin backup -- --output backup.json
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use melody_server::{ServerConfig, backup, init_tracing};
use melody_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Export the melody store to JSON")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "melody.toml")]
  config: PathBuf,

  /// Where to write the backup.
  #[arg(short, long, default_value = backup::DEFAULT_OUTPUT)]
  output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  init_tracing();

  let cli = Cli::parse();
  tracing::info!("starting backup");

  let result = run(&cli).await;
  if let Err(e) = &result {
    tracing::error!("backup failed: {e:#}");
  }
  result
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "connected to store");

  let snap = backup::run(&store, &cfg.database, &cli.output).await?;

  tracing::info!(
    contacts = snap.contacts.len(),
    subscribers = snap.subscribers.len(),
    analytics = snap.analytics.len(),
    total = snap.total_records,
    "backup completed"
  );
  Ok(())
}
