//! Error types for `melody-core`.

use std::fmt;

use thiserror::Error;

/// A required input field, named the way it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Email,
  Message,
}

impl Field {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Message => "message",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Renders `[name, email]` as `name, email`.
fn join_fields(fields: &[Field]) -> String {
  fields
    .iter()
    .map(|f| f.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required fields were absent or empty.
  #[error("missing required field(s): {}", join_fields(.0))]
  MissingFields(Vec<Field>),

  #[error("{0} query parameter is required")]
  MissingQuery(&'static str),

  #[error("invalid request body: {0}")]
  InvalidBody(String),

  #[error("invalid query string: {0}")]
  InvalidQuery(String),

  #[error("unknown contact status: {0:?}")]
  UnknownStatus(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// True for errors caused by caller input rather than the store.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::MissingFields(_)
        | Self::MissingQuery(_)
        | Self::InvalidBody(_)
        | Self::InvalidQuery(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
