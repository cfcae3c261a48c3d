//! Success envelopes shared by all handlers, plus body parsing.

use axum::body::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::ApiError;

/// `{"success": true, "count": n, "data": [...]}`
#[derive(Debug, Serialize)]
pub struct Listing<T> {
  pub success: bool,
  pub count:   usize,
  pub data:    Vec<T>,
}

impl<T> Listing<T> {
  pub fn new(data: Vec<T>) -> Self {
    Self { success: true, count: data.len(), data }
  }
}

/// `{"success": true, "message": "...", "id": "..."}`; `id` is omitted when
/// the operation does not report one.
#[derive(Debug, Serialize)]
pub struct Ack {
  pub success: bool,
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id:      Option<Uuid>,
}

impl Ack {
  pub fn new(message: &'static str) -> Self {
    Self { success: true, message, id: None }
  }

  pub fn with_id(message: &'static str, id: Uuid) -> Self {
    Self { success: true, message, id: Some(id) }
  }
}

/// Decode a JSON request body. An empty body decodes as `T::default()` so
/// endpoints with all-optional fields accept a bare POST.
pub fn parse_body<T>(body: &Bytes) -> Result<T, ApiError>
where
  T: DeserializeOwned + Default,
{
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(T::default());
  }
  serde_json::from_slice(body).map_err(|e| {
    ApiError::Validation(melody_core::Error::InvalidBody(e.to_string()))
  })
}
