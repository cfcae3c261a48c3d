//! Contact messages submitted through the website form.
//!
//! A contact is written once on submission. Its status is moved along by a
//! moderation workflow that lives outside this system; nothing here deletes
//! or edits a contact.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  error::Field,
  validate::{normalize_email, present},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Moderation state of a contact message.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
  #[default]
  Pending,
  Read,
  Replied,
}

impl ContactStatus {
  /// The string stored in the `status` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Read => "read",
      Self::Replied => "replied",
    }
  }
}

impl FromStr for ContactStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "pending" => Ok(Self::Pending),
      "read" => Ok(Self::Read),
      "replied" => Ok(Self::Replied),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:         Uuid,
  pub name:       String,
  /// Always lowercase.
  pub email:      String,
  pub message:    String,
  pub phone:      Option<String>,
  pub subject:    Option<String>,
  pub status:     ContactStatus,
  /// Server-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ContactStore::insert_contact`], already
/// validated. `id`, `status` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub name:    String,
  pub email:   String,
  pub message: String,
  pub phone:   Option<String>,
  pub subject: Option<String>,
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Raw contact submission as it arrives over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub message: Option<String>,
  pub phone:   Option<String>,
  pub subject: Option<String>,
}

impl ContactForm {
  /// Check that name, email and message are all present and non-empty.
  ///
  /// Every missing field is reported, not just the first one.
  pub fn validate(self) -> Result<NewContact> {
    let name = present(self.name);
    let email = present(self.email);
    let message = present(self.message);

    let mut missing = Vec::new();
    if name.is_none() {
      missing.push(Field::Name);
    }
    if email.is_none() {
      missing.push(Field::Email);
    }
    if message.is_none() {
      missing.push(Field::Message);
    }

    match (name, email, message) {
      (Some(name), Some(email), Some(message)) => Ok(NewContact {
        name,
        email: normalize_email(&email),
        message,
        phone: self.phone,
        subject: self.subject,
      }),
      _ => Err(Error::MissingFields(missing)),
    }
  }
}
