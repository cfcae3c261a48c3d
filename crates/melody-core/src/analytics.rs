//! Download analytics events. Append-only; never mutated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::present;

pub const DEFAULT_SOURCE: &str = "website";
pub const DEFAULT_DEVICE: &str = "unknown";
pub const DEFAULT_COUNTRY: &str = "unknown";

/// One tracked app download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadEvent {
  pub id:            Uuid,
  /// Where the download came from, e.g. `website` or `play_store`.
  pub source:        String,
  /// e.g. `mobile`, `desktop`.
  pub device:        String,
  pub country:       String,
  pub download_date: DateTime<Utc>,
}

/// Input to [`crate::store::AnalyticsStore::insert_download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDownload {
  pub source:  String,
  pub device:  String,
  pub country: String,
}

/// Raw track-download body. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadForm {
  pub source:  Option<String>,
  pub device:  Option<String>,
  pub country: Option<String>,
}

impl DownloadForm {
  /// Fill absent or empty fields with their defaults. Cannot fail.
  pub fn into_new(self) -> NewDownload {
    NewDownload {
      source:  present(self.source).unwrap_or_else(|| DEFAULT_SOURCE.to_owned()),
      device:  present(self.device).unwrap_or_else(|| DEFAULT_DEVICE.to_owned()),
      country: present(self.country)
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_form_gets_defaults() {
    let new = DownloadForm::default().into_new();
    assert_eq!(new.source, "website");
    assert_eq!(new.device, "unknown");
    assert_eq!(new.country, "unknown");
  }

  #[test]
  fn given_fields_are_kept() {
    let new = DownloadForm {
      source:  Some("play_store".into()),
      device:  Some("mobile".into()),
      country: Some(String::new()),
    }
    .into_new();
    assert_eq!(new.source, "play_store");
    assert_eq!(new.device, "mobile");
    assert_eq!(new.country, "unknown");
  }
}
