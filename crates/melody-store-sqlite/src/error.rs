//! Error type for `melody-store-sqlite`.

use melody_core::store::{ErrorKind, StoreError};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] melody_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The `subscribers.email` UNIQUE constraint rejected an insert.
  #[error("email {0} is already subscribed")]
  DuplicateSubscriber(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The SQLite result code behind a failed call, if there is one.
pub(crate) fn sqlite_code(err: &tokio_rusqlite::Error) -> Option<ErrorCode> {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) => {
      Some(e.code)
    }
    _ => None,
  }
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::DuplicateSubscriber(_) => ErrorKind::Conflict,
      Error::Database(tokio_rusqlite::Error::ConnectionClosed) => {
        ErrorKind::Unavailable
      }
      Error::Database(e) => match sqlite_code(e) {
        Some(
          ErrorCode::DatabaseBusy
          | ErrorCode::DatabaseLocked
          | ErrorCode::CannotOpen,
        ) => ErrorKind::Unavailable,
        Some(ErrorCode::ConstraintViolation) => ErrorKind::Conflict,
        _ => ErrorKind::Other,
      },
      _ => ErrorKind::Other,
    }
  }
}
