//! Structural checks for creation payloads.
//!
//! Validation is pure: it reports every violated rule as a field → message
//! entry and never touches a store. An empty [`FieldErrors`] means the payload
//! is acceptable.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Minimum first name length in bytes.
pub const MIN_FIRST_NAME_LEN: usize = 2;
/// Minimum last name length in bytes.
pub const MIN_LAST_NAME_LEN: usize = 2;
/// Minimum plaintext password length in bytes.
pub const MIN_PASSWORD_LEN: usize = 7;
/// Minimum post content length in bytes.
pub const MIN_CONTENT_LEN: usize = 10;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Lowercase only; uppercase addresses are rejected.
        let pattern = r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` matches the accepted address shape.
///
/// # Examples
/// ```
/// use backend::domain::validation::is_email_valid;
///
/// assert!(is_email_valid("a@b.com"));
/// assert!(!is_email_valid("A@B.COM"));
/// ```
#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Accumulated field violations keyed by the payload's JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Empty set of violations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Record a minimum-length violation when `value` is shorter than `min`.
    pub fn require_min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if value.len() < min {
            self.insert(
                field,
                format!("{field} length should be at least {min} characters"),
            );
        }
    }

    /// True when no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate violations in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// JSON object suitable for error details.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(field, message)| ((*field).to_owned(), Value::String(message.clone())))
                .collect(),
        )
    }
}
