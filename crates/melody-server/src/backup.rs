//! Writing store snapshots to disk.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use melody_core::{
  backup::{Snapshot, snapshot},
  store::Collections,
};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "backup.json";

/// Snapshot every collection in `store` and write it to `output`,
/// replacing any previous file.
///
/// Nothing is written unless every collection was read. The JSON goes to a
/// sibling temp file first and is renamed into place, so `output` is either
/// the old file or the complete new one.
pub async fn run<S>(store: &S, database: &str, output: &Path) -> anyhow::Result<Snapshot>
where
  S: Collections,
{
  let snap = snapshot(store, database)
    .await
    .context("failed to read collections")?;
  write_snapshot(&snap, output).await?;
  Ok(snap)
}

pub async fn write_snapshot(snap: &Snapshot, output: &Path) -> anyhow::Result<()> {
  let json = snap.to_json_pretty().context("failed to serialise snapshot")?;

  let tmp = temp_sibling(output);
  if let Err(e) = tokio::fs::write(&tmp, json).await {
    let _ = tokio::fs::remove_file(&tmp).await;
    return Err(e).with_context(|| format!("failed to write {}", tmp.display()));
  }
  if let Err(e) = tokio::fs::rename(&tmp, output).await {
    let _ = tokio::fs::remove_file(&tmp).await;
    return Err(e).with_context(|| format!("failed to replace {}", output.display()));
  }

  tracing::info!(path = %output.display(), "backup saved");
  Ok(())
}

fn temp_sibling(output: &Path) -> PathBuf {
  let mut name = output.file_name().unwrap_or_default().to_os_string();
  name.push(".tmp");
  output.with_file_name(name)
}
