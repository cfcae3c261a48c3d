//! Full-store snapshots for the `backup` utility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  analytics::DownloadEvent,
  contact::Contact,
  store::Collections,
  subscriber::Subscriber,
};

/// Every record in the store at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub timestamp:     DateTime<Utc>,
  /// Logical database name, recorded for the operator's benefit.
  pub database:      String,
  pub total_records: usize,
  pub contacts:      Vec<Contact>,
  pub subscribers:   Vec<Subscriber>,
  pub analytics:     Vec<DownloadEvent>,
}

impl Snapshot {
  pub fn new(
    database: impl Into<String>,
    contacts: Vec<Contact>,
    subscribers: Vec<Subscriber>,
    analytics: Vec<DownloadEvent>,
  ) -> Self {
    Self {
      timestamp: Utc::now(),
      database: database.into(),
      total_records: contacts.len() + subscribers.len() + analytics.len(),
      contacts,
      subscribers,
      analytics,
    }
  }

  /// Pretty-printed JSON, two-space indented.
  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// Read all three collections in turn. The first failing read aborts the
/// whole snapshot.
pub async fn snapshot<S>(store: &S, database: &str) -> Result<Snapshot, S::Error>
where
  S: Collections,
{
  tracing::info!("fetching contacts");
  let contacts = store.list_contacts().await?;

  tracing::info!("fetching subscribers");
  let subscribers = store.list_subscribers().await?;

  tracing::info!("fetching analytics");
  let analytics = store.list_downloads().await?;

  Ok(Snapshot::new(database, contacts, subscribers, analytics))
}
