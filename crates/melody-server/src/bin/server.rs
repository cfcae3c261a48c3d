//! melody HTTP server.
//!
//! Reads `melody.toml` (or the path given with `--config`) plus `MELODY_*`
//! environment variables, opens the SQLite store and serves the JSON API.
//!
//! ```
//! cargo run -p melody-server --bin server -- --config melody.toml
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use melody_server::{ServerConfig, init_tracing};
use melody_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(author, version, about = "melody backend server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "melody.toml")]
  config: PathBuf,
}

const ROUTES: &[&str] = &[
  "GET  /                     home",
  "POST /contact              save contact",
  "GET  /contacts             list contacts",
  "GET  /contacts/search      search contacts (?email=...)",
  "POST /subscribe            newsletter subscribe",
  "GET  /subscribers          list subscribers",
  "POST /track-download       track app download",
  "GET  /analytics            list download analytics",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  init_tracing();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  // Refuse to start without a working store.
  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "store opened");

  let app = melody_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Listening on http://{address}");
  for route in ROUTES {
    tracing::info!("  {route}");
  }

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
