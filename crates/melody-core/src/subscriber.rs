//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  error::Field,
  validate::{normalize_email, present},
};

/// A persisted newsletter subscriber. At most one exists per email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
  pub id:            Uuid,
  /// Always lowercase; unique across all subscribers.
  pub email:         String,
  pub name:          Option<String>,
  pub subscribed_at: DateTime<Utc>,
  pub is_active:     bool,
}

/// Input to [`crate::store::SubscriberStore::insert_subscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
  pub email: String,
  pub name:  Option<String>,
}

/// Raw subscribe request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeForm {
  pub email: Option<String>,
  pub name:  Option<String>,
}

impl SubscribeForm {
  /// Require an email and lowercase it so the uniqueness check is
  /// case-insensitive.
  pub fn validate(self) -> Result<NewSubscriber> {
    let email = present(self.email)
      .ok_or_else(|| Error::MissingFields(vec![Field::Email]))?;
    Ok(NewSubscriber {
      email: normalize_email(&email),
      name:  self.name,
    })
  }
}
