//! Shared helpers for turning raw request fields into stored values.

/// Lowercase an email address for storage and comparison.
///
/// No format check is performed; presence is the only requirement.
pub fn normalize_email(email: &str) -> String { email.to_lowercase() }

/// Treat an empty string the same as an absent field.
pub fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
