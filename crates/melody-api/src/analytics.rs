//! Handlers for download analytics.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use melody_core::{
  analytics::{DownloadEvent, DownloadForm},
  store::AnalyticsStore,
};

use crate::{
  envelope::{Ack, Listing, parse_body},
  error::ApiError,
};

/// `POST /track-download` — every field is optional; a bare POST records a
/// download with the default source, device and country.
pub async fn track<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Ack>, ApiError>
where
  S: AnalyticsStore,
{
  let input = parse_body::<DownloadForm>(&body)?.into_new();
  let event = store
    .insert_download(input)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(id = %event.id, source = %event.source, "download tracked");
  Ok(Json(Ack::with_id("Download tracked!", event.id)))
}

/// `GET /analytics`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Listing<DownloadEvent>>, ApiError>
where
  S: AnalyticsStore,
{
  let events = store.list_downloads().await.map_err(ApiError::from_store)?;
  Ok(Json(Listing::new(events)))
}
