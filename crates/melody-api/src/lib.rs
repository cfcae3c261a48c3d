//! JSON HTTP API for melody.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`melody_core::store::Collections`]. Tracing layers, binding and
//! configuration are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = melody_api::api_router(Arc::new(store));
//! ```

pub mod analytics;
pub mod contacts;
pub mod envelope;
pub mod error;
pub mod subscribers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use melody_core::store::Collections;

pub use error::ApiError;

/// Plain-text body served at `/`.
pub const GREETING: &str = "Melody API is running";

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: Collections + 'static,
{
  Router::new()
    .route("/", get(root))
    // Contacts
    .route("/contact", post(contacts::create::<S>))
    .route("/contacts", get(contacts::list::<S>))
    .route("/contacts/search", get(contacts::search::<S>))
    // Newsletter
    .route("/subscribe", post(subscribers::create::<S>))
    .route("/subscribers", get(subscribers::list::<S>))
    // Analytics
    .route("/track-download", post(analytics::track::<S>))
    .route("/analytics", get(analytics::list::<S>))
    .with_state(store)
}

async fn root() -> &'static str { GREETING }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
  };
  use melody_core::store::ErrorKind;
  use melody_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
  }

  // ── Root ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_returns_plain_text_greeting() {
    let app = app().await;
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], GREETING.as_bytes());
  }

  // ── Contacts ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_contact_then_list() {
    let app = app().await;

    let (status, body) = send(
      &app,
      "POST",
      "/contact",
      Some(json!({ "name": "A", "email": "A@B.com", "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact saved successfully!");
    let id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    let stored = &body["data"][0];
    assert_eq!(stored["id"], id);
    assert_eq!(stored["email"], "a@b.com");
    assert_eq!(stored["status"], "pending");
  }

  #[tokio::test]
  async fn contact_missing_fields_is_400_and_not_stored() {
    let app = app().await;

    for payload in [
      json!({ "email": "a@b.com", "message": "hi" }),
      json!({ "name": "A", "message": "hi" }),
      json!({ "name": "A", "email": "a@b.com" }),
      json!({ "name": "", "email": "a@b.com", "message": "hi" }),
    ] {
      let (status, body) = send(&app, "POST", "/contact", Some(payload)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body["success"], false);
      assert!(body["error"].as_str().unwrap().contains("missing required field"));
    }

    let (_, body) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(body["count"], 0);
  }

  #[tokio::test]
  async fn malformed_json_is_400_envelope() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/contact")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
  }

  #[tokio::test]
  async fn search_without_email_is_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/contacts/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "email query parameter is required");
  }

  #[tokio::test]
  async fn unparseable_search_query_is_400_envelope() {
    let app = app().await;
    let (status, body) =
      send(&app, "GET", "/contacts/search?email=a&email=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("invalid query string"));
  }

  #[tokio::test]
  async fn search_matches_case_insensitively() {
    let app = app().await;
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
      send(
        &app,
        "POST",
        "/contact",
        Some(json!({ "name": name, "email": email, "message": "hi" })),
      )
      .await;
    }

    let (status, body) = send(&app, "GET", "/contacts/search?email=ALICE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["email"], "alice@example.com");
  }

  // ── Subscribers ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn subscribe_then_list() {
    let app = app().await;

    let (status, body) = send(
      &app,
      "POST",
      "/subscribe",
      Some(json!({ "email": "Fan@Example.com", "name": "Fan" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Subscribed successfully!" }));

    let (_, body) = send(&app, "GET", "/subscribers", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["email"], "fan@example.com");
    assert_eq!(body["data"][0]["isActive"], true);
  }

  #[tokio::test]
  async fn subscribe_without_email_is_400() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/subscribe", Some(json!({ "name": "Fan" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
  }

  #[tokio::test]
  async fn duplicate_subscribe_is_409_and_single_record() {
    let app = app().await;

    let (first, _) =
      send(&app, "POST", "/subscribe", Some(json!({ "email": "fan@example.com" }))).await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) =
      send(&app, "POST", "/subscribe", Some(json!({ "email": "FAN@example.com" }))).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/subscribers", None).await;
    assert_eq!(body["count"], 1);
  }

  // ── Analytics ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn track_download_without_body_uses_defaults() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/track-download", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Download tracked!");
    assert!(body["id"].is_string());

    let (_, body) = send(&app, "GET", "/analytics", None).await;
    assert_eq!(body["count"], 1);
    let event = &body["data"][0];
    assert_eq!(event["source"], "website");
    assert_eq!(event["device"], "unknown");
    assert_eq!(event["country"], "unknown");
    assert!(event["downloadDate"].is_string());
  }

  #[tokio::test]
  async fn track_download_keeps_given_fields() {
    let app = app().await;
    send(
      &app,
      "POST",
      "/track-download",
      Some(json!({ "source": "play_store", "device": "mobile", "country": "IN" })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/analytics", None).await;
    let event = &body["data"][0];
    assert_eq!(event["source"], "play_store");
    assert_eq!(event["device"], "mobile");
    assert_eq!(event["country"], "IN");
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  mod failing {
    use melody_core::{
      analytics::{DownloadEvent, NewDownload},
      contact::{Contact, NewContact},
      store::{
        AnalyticsStore, ContactStore, ErrorKind, Store, StoreError,
        SubscriberStore,
      },
      subscriber::{NewSubscriber, Subscriber},
    };

    #[derive(Debug, thiserror::Error)]
    #[error("store failed ({0:?})")]
    pub struct FakeError(pub ErrorKind);

    impl StoreError for FakeError {
      fn kind(&self) -> ErrorKind { self.0 }
    }

    /// Every call fails with an error of `kind`.
    pub struct FailingStore {
      pub kind: ErrorKind,
    }

    impl Store for FailingStore {
      type Error = FakeError;
    }

    impl ContactStore for FailingStore {
      async fn insert_contact(&self, _: NewContact) -> Result<Contact, FakeError> {
        Err(FakeError(self.kind))
      }

      async fn list_contacts(&self) -> Result<Vec<Contact>, FakeError> {
        Err(FakeError(self.kind))
      }

      async fn search_contacts_by_email(
        &self,
        _: &str,
      ) -> Result<Vec<Contact>, FakeError> {
        Err(FakeError(self.kind))
      }
    }

    impl SubscriberStore for FailingStore {
      async fn insert_subscriber(
        &self,
        _: NewSubscriber,
      ) -> Result<Subscriber, FakeError> {
        Err(FakeError(self.kind))
      }

      async fn list_subscribers(&self) -> Result<Vec<Subscriber>, FakeError> {
        Err(FakeError(self.kind))
      }
    }

    impl AnalyticsStore for FailingStore {
      async fn insert_download(
        &self,
        _: NewDownload,
      ) -> Result<DownloadEvent, FakeError> {
        Err(FakeError(self.kind))
      }

      async fn list_downloads(&self) -> Result<Vec<DownloadEvent>, FakeError> {
        Err(FakeError(self.kind))
      }
    }
  }

  fn failing_app(kind: ErrorKind) -> Router {
    api_router(Arc::new(failing::FailingStore { kind }))
  }

  #[tokio::test]
  async fn unavailable_store_is_503_envelope() {
    let app = failing_app(ErrorKind::Unavailable);
    let (status, body) = send(&app, "GET", "/subscribers", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("store unavailable"));
  }

  #[tokio::test]
  async fn other_store_failure_is_500_envelope() {
    let app = failing_app(ErrorKind::Other);
    for (method, uri, payload) in [
      ("GET", "/subscribers", None),
      ("GET", "/contacts", None),
      ("POST", "/track-download", None),
      (
        "POST",
        "/contact",
        Some(json!({ "name": "A", "email": "a@b.com", "message": "hi" })),
      ),
    ] {
      let (status, body) = send(&app, method, uri, payload).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(body["success"], false);
      assert!(body["error"].is_string());
    }
  }

  #[tokio::test]
  async fn conflict_from_any_backend_is_409() {
    let app = failing_app(ErrorKind::Conflict);
    let (status, body) =
      send(&app, "POST", "/subscribe", Some(json!({ "email": "fan@example.com" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
  }
}
