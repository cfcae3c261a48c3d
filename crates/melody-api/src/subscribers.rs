//! Handlers for newsletter endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/subscribe` | Body: [`SubscribeForm`]; 409 if already subscribed |
//! | `GET`  | `/subscribers` | Every subscriber |

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use melody_core::{
  store::SubscriberStore,
  subscriber::{SubscribeForm, Subscriber},
};

use crate::{
  envelope::{Ack, Listing, parse_body},
  error::ApiError,
};

/// `POST /subscribe`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Ack>, ApiError>
where
  S: SubscriberStore,
{
  let input = parse_body::<SubscribeForm>(&body)?.validate()?;
  let subscriber = store
    .insert_subscriber(input)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(id = %subscriber.id, "subscriber added");
  Ok(Json(Ack::new("Subscribed successfully!")))
}

/// `GET /subscribers`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Listing<Subscriber>>, ApiError>
where
  S: SubscriberStore,
{
  let subscribers = store
    .list_subscribers()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(Listing::new(subscribers)))
}
