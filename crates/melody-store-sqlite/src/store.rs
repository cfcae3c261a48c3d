//! [`SqliteStore`] — the SQLite implementation of the melody store traits.

use std::path::Path;

use chrono::Utc;
use melody_core::{
  analytics::{DownloadEvent, NewDownload},
  contact::{Contact, ContactStatus, NewContact},
  store::{AnalyticsStore, ContactStore, Store, SubscriberStore},
  subscriber::{NewSubscriber, Subscriber},
};
use rusqlite::ErrorCode;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, DOWNLOAD_COLUMNS, RawContact, RawDownload, RawSubscriber,
    SUBSCRIBER_COLUMNS, encode_dt, encode_uuid,
  },
  error::sqlite_code,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A melody store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_contacts(
    &self,
    filter: Option<String>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(needle) = filter {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE instr(lower(email), ?1) > 0
             ORDER BY rowid"
          ))?;
          stmt
            .query_map(rusqlite::params![needle], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY rowid"
          ))?;
          stmt
            .query_map([], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

// ─── Trait impls ─────────────────────────────────────────────────────────────

impl Store for SqliteStore {
  type Error = Error;
}

impl ContactStore for SqliteStore {
  async fn insert_contact(&self, input: NewContact) -> Result<Contact> {
    let contact = Contact {
      id:         Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      message:    input.message,
      phone:      input.phone,
      subject:    input.subject,
      status:     ContactStatus::Pending,
      created_at: Utc::now(),
    };

    let id_str     = encode_uuid(contact.id);
    let name       = contact.name.clone();
    let email      = contact.email.clone();
    let message    = contact.message.clone();
    let phone      = contact.phone.clone();
    let subject    = contact.subject.clone();
    let status_str = contact.status.as_str();
    let at_str     = encode_dt(contact.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             id, name, email, message, phone, subject, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str, name, email, message, phone, subject, status_str, at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    self.select_contacts(None).await
  }

  async fn search_contacts_by_email(&self, needle: &str) -> Result<Vec<Contact>> {
    // `instr` is a literal substring test, so the needle needs no escaping.
    self.select_contacts(Some(needle.to_lowercase())).await
  }
}

impl SubscriberStore for SqliteStore {
  async fn insert_subscriber(&self, input: NewSubscriber) -> Result<Subscriber> {
    let subscriber = Subscriber {
      id:            Uuid::new_v4(),
      email:         input.email,
      name:          input.name,
      subscribed_at: Utc::now(),
      is_active:     true,
    };

    let id_str = encode_uuid(subscriber.id);
    let email  = subscriber.email.clone();
    let name   = subscriber.name.clone();
    let at_str = encode_dt(subscriber.subscribed_at);
    let active = subscriber.is_active;

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subscribers (id, email, name, subscribed_at, is_active)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, email, name, at_str, active],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(subscriber),
      Err(e) if sqlite_code(&e) == Some(ErrorCode::ConstraintViolation) => {
        Err(Error::DuplicateSubscriber(subscriber.email))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
    let raws: Vec<RawSubscriber> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBSCRIBER_COLUMNS} FROM subscribers ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawSubscriber::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubscriber::into_subscriber).collect()
  }
}

impl AnalyticsStore for SqliteStore {
  async fn insert_download(&self, input: NewDownload) -> Result<DownloadEvent> {
    let event = DownloadEvent {
      id:            Uuid::new_v4(),
      source:        input.source,
      device:        input.device,
      country:       input.country,
      download_date: Utc::now(),
    };

    let id_str  = encode_uuid(event.id);
    let source  = event.source.clone();
    let device  = event.device.clone();
    let country = event.country.clone();
    let at_str  = encode_dt(event.download_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO analytics (id, source, device, country, download_date)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, source, device, country, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn list_downloads(&self) -> Result<Vec<DownloadEvent>> {
    let raws: Vec<RawDownload> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DOWNLOAD_COLUMNS} FROM analytics ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawDownload::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDownload::into_download).collect()
  }
}
