//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"success": false, "error": "<message>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use melody_core::store::{ErrorKind, StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Caller input was missing or malformed.
  #[error(transparent)]
  Validation(melody_core::Error),

  /// A uniqueness constraint rejected the write.
  #[error("{0}")]
  Conflict(String),

  #[error("store unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend failure by its [`ErrorKind`].
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.kind() {
      ErrorKind::Conflict => ApiError::Conflict(e.to_string()),
      ErrorKind::Unavailable => ApiError::Unavailable(Box::new(e)),
      ErrorKind::Other => ApiError::Store(Box::new(e)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<melody_core::Error> for ApiError {
  fn from(e: melody_core::Error) -> Self {
    if e.is_validation() {
      ApiError::Validation(e)
    } else {
      ApiError::Store(Box::new(e))
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    match &self {
      ApiError::Validation(_) => tracing::debug!(error = %self, "rejected request"),
      ApiError::Conflict(_) => tracing::warn!(error = %self, "write conflict"),
      ApiError::Unavailable(_) | ApiError::Store(_) => {
        tracing::error!(error = %self, "store failure")
      }
    }
    let body = json!({ "success": false, "error": self.to_string() });
    (status, Json(body)).into_response()
  }
}
