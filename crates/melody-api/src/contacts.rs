//! Handlers for contact endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/contact` | Body: [`ContactForm`]; name, email and message required |
//! | `GET`  | `/contacts` | Every contact |
//! | `GET`  | `/contacts/search` | `?email=` required; case-insensitive substring |

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Query, State, rejection::QueryRejection},
};
use melody_core::{
  contact::{Contact, ContactForm},
  store::ContactStore,
  validate::present,
};
use serde::Deserialize;

use crate::{
  envelope::{Ack, Listing, parse_body},
  error::ApiError,
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contact`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Ack>, ApiError>
where
  S: ContactStore,
{
  let input = parse_body::<ContactForm>(&body)?.validate()?;
  let contact = store
    .insert_contact(input)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(id = %contact.id, "contact saved");
  Ok(Json(Ack::with_id("Contact saved successfully!", contact.id)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Listing<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store.list_contacts().await.map_err(ApiError::from_store)?;
  Ok(Json(Listing::new(contacts)))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub email: Option<String>,
}

/// `GET /contacts/search?email=<substring>`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Listing<Contact>>, ApiError>
where
  S: ContactStore,
{
  let Query(params) = query.map_err(|e| {
    ApiError::Validation(melody_core::Error::InvalidQuery(e.body_text()))
  })?;
  let needle = present(params.email)
    .ok_or(ApiError::Validation(melody_core::Error::MissingQuery("email")))?;

  let contacts = store
    .search_contacts_by_email(&needle)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(Listing::new(contacts)))
}
