//! Form field validation and sanitization helpers
//!
//! Form POST bodies are validated field by field, collecting error messages
//! in declaration order, then sanitized (trimmed, HTML-escaped, dates
//! coerced) whether or not validation passed, so rejected input can be
//! echoed back to the form safely.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// A single field-level validation error, in the order the rules ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending form field
    pub field: String,
    /// Human-readable message for the form
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Trim and HTML-escape a raw form value
pub fn escape_trimmed(raw: &str) -> String {
    html_escape::encode_safe(raw.trim()).into_owned()
}

/// True when the value is empty after trimming
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Coerce an optional form value to a calendar date.
///
/// Empty or missing values coerce to `None`; anything else must be an
/// ISO-8601 date (`YYYY-MM-DD`).
pub fn coerce_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ()> {
    match raw {
        None => Ok(None),
        Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ()),
    }
}
