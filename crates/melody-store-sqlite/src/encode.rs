//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings and contact status as its lowercase name.

use chrono::{DateTime, Utc};
use melody_core::{
  analytics::DownloadEvent,
  contact::{Contact, ContactStatus},
  subscriber::Subscriber,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str =
  "id, name, email, message, phone, subject, status, created_at";

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub phone:      Option<String>,
  pub subject:    Option<String>,
  pub status:     String,
  pub created_at: String,
}

impl RawContact {
  /// Read a row selected with [`CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      message:    row.get(3)?,
      phone:      row.get(4)?,
      subject:    row.get(5)?,
      status:     row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      email:      self.email,
      message:    self.message,
      phone:      self.phone,
      subject:    self.subject,
      status:     self.status.parse::<ContactStatus>()?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const SUBSCRIBER_COLUMNS: &str = "id, email, name, subscribed_at, is_active";

/// Raw values read directly from a `subscribers` row.
pub struct RawSubscriber {
  pub id:            String,
  pub email:         String,
  pub name:          Option<String>,
  pub subscribed_at: String,
  pub is_active:     bool,
}

impl RawSubscriber {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      email:         row.get(1)?,
      name:          row.get(2)?,
      subscribed_at: row.get(3)?,
      is_active:     row.get(4)?,
    })
  }

  pub fn into_subscriber(self) -> Result<Subscriber> {
    Ok(Subscriber {
      id:            decode_uuid(&self.id)?,
      email:         self.email,
      name:          self.name,
      subscribed_at: decode_dt(&self.subscribed_at)?,
      is_active:     self.is_active,
    })
  }
}

pub const DOWNLOAD_COLUMNS: &str = "id, source, device, country, download_date";

/// Raw strings read directly from an `analytics` row.
pub struct RawDownload {
  pub id:            String,
  pub source:        String,
  pub device:        String,
  pub country:       String,
  pub download_date: String,
}

impl RawDownload {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      source:        row.get(1)?,
      device:        row.get(2)?,
      country:       row.get(3)?,
      download_date: row.get(4)?,
    })
  }

  pub fn into_download(self) -> Result<DownloadEvent> {
    Ok(DownloadEvent {
      id:            decode_uuid(&self.id)?,
      source:        self.source,
      device:        self.device,
      country:       self.country,
      download_date: decode_dt(&self.download_date)?,
    })
  }
}
