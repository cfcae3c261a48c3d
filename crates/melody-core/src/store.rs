//! Store traits for the three collections.
//!
//! Each collection has its own access trait; all of them share the error type
//! declared on [`Store`]. Backends (e.g. `melody-store-sqlite`) implement all
//! three. Handlers depend only on the trait for the collection they touch.

use std::future::Future;

use crate::{
  analytics::{DownloadEvent, NewDownload},
  contact::{Contact, NewContact},
  subscriber::{NewSubscriber, Subscriber},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Coarse classification of a store failure, used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A uniqueness constraint rejected the write.
  Conflict,
  /// The store could not be reached or is temporarily busy.
  Unavailable,
  Other,
}

/// Implemented by backend error types so callers can tell a duplicate write
/// apart from an outage without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Base trait carrying the backend's error type.
///
/// All methods on the collection traits return `Send` futures so a store can
/// be shared across a multi-threaded runtime behind an `Arc`.
pub trait Store: Send + Sync {
  type Error: StoreError;
}

/// Contact messages.
pub trait ContactStore: Store {
  /// Persist a new contact with status `pending` and a server timestamp.
  fn insert_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Every contact, oldest first. Unbounded.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Contacts whose email contains `needle`, ignoring case.
  ///
  /// `needle` is matched literally; wildcard and regex characters have no
  /// special meaning. Case folding uses Unicode `to_lowercase` on both sides,
  /// which is context-sensitive: a needle ending in `Σ` folds to `σ` while the
  /// same letter at the end of a stored word folds to `ς`, so such a needle
  /// will not match.
  fn search_contacts_by_email<'a>(
    &'a self,
    needle: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}

/// Newsletter subscribers.
pub trait SubscriberStore: Store {
  /// Persist a subscriber. Fails with an error of kind
  /// [`ErrorKind::Conflict`] if the email is already subscribed.
  fn insert_subscriber(
    &self,
    input: NewSubscriber,
  ) -> impl Future<Output = Result<Subscriber, Self::Error>> + Send + '_;

  /// Every subscriber, oldest first. Unbounded.
  fn list_subscribers(
    &self,
  ) -> impl Future<Output = Result<Vec<Subscriber>, Self::Error>> + Send + '_;
}

/// Download analytics.
pub trait AnalyticsStore: Store {
  fn insert_download(
    &self,
    input: NewDownload,
  ) -> impl Future<Output = Result<DownloadEvent, Self::Error>> + Send + '_;

  /// Every download event, oldest first. Unbounded.
  fn list_downloads(
    &self,
  ) -> impl Future<Output = Result<Vec<DownloadEvent>, Self::Error>> + Send + '_;
}

/// Anything that can serve all three collections.
pub trait Collections: ContactStore + SubscriberStore + AnalyticsStore {}

impl<T> Collections for T where T: ContactStore + SubscriberStore + AnalyticsStore {}
