//! Core types and trait definitions for the melody backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the three record types, the validators that build them from raw input, and
//! the store traits the backends implement.

pub mod analytics;
pub mod backup;
pub mod contact;
pub mod error;
pub mod store;
pub mod subscriber;
pub mod validate;

pub use error::{Error, Result};
