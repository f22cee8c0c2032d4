//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::forms::{self, FieldError};

/// Known copy statuses. The stored column is text; unknown strings pass
/// through sanitization untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CopyStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Canonical detail path for this copy
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

/// Book instance joined with its book's display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstanceDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDetails {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Due date as an ISO date string, or empty when unset
    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Raw book instance form body, as submitted
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookInstanceForm {
    /// Book id as submitted by the selection control
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    pub due_back: Option<String>,
}

/// Form data after trimming, escaping, and date coercion; echoed back to
/// the form when validation rejects the submission
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SanitizedBookInstance {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl SanitizedBookInstance {
    /// The referenced book id, when the sanitized value parses as one
    pub fn book_id(&self) -> Option<i32> {
        self.book.parse().ok()
    }
}

impl BookInstanceForm {
    /// Run the field rules in order, collecting every failure.
    ///
    /// The book reference must survive trimming and parse as an integer
    /// id; both failures report the same message since either way no
    /// book was specified.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if forms::is_blank(&self.book) || self.book.trim().parse::<i32>().is_err() {
            errors.push(FieldError::new("book", "Book must be specified."));
        }
        if forms::is_blank(&self.imprint) {
            errors.push(FieldError::new("imprint", "Imprint must be specified."));
        }
        if forms::coerce_date(self.due_back.as_deref()).is_err() {
            errors.push(FieldError::new("due_back", "Invalid date"));
        }

        errors
    }

    /// Sanitize regardless of validation outcome. An empty status falls
    /// back to Maintenance, matching the stored column default.
    pub fn sanitize(&self) -> SanitizedBookInstance {
        let status = forms::escape_trimmed(&self.status);
        SanitizedBookInstance {
            book: forms::escape_trimmed(&self.book),
            imprint: forms::escape_trimmed(&self.imprint),
            status: if status.is_empty() {
                CopyStatus::Maintenance.as_str().to_string()
            } else {
                status
            },
            due_back: forms::coerce_date(self.due_back.as_deref()).unwrap_or(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookInstanceForm {
        BookInstanceForm {
            book: "3".to_string(),
            imprint: "Folio Society, 1952".to_string(),
            status: "Available".to_string(),
            due_back: Some("2030-01-15".to_string()),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_missing_book_and_imprint_messages_in_order() {
        let form = BookInstanceForm {
            book: "  ".to_string(),
            imprint: String::new(),
            status: "Available".to_string(),
            due_back: None,
        };
        let messages: Vec<String> = form
            .validate()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec!["Book must be specified.", "Imprint must be specified."]
        );
    }

    #[test]
    fn test_non_numeric_book_reference_rejected() {
        let mut form = valid_form();
        form.book = "<script>".to_string();
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "book");
        assert_eq!(errors[0].message, "Book must be specified.");
    }

    #[test]
    fn test_invalid_due_back() {
        let mut form = valid_form();
        form.due_back = Some("not-a-date".to_string());
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Invalid date");
    }

    #[test]
    fn test_empty_due_back_is_accepted() {
        let mut form = valid_form();
        form.due_back = Some(String::new());
        assert!(form.validate().is_empty());
        assert_eq!(form.sanitize().due_back, None);
    }

    #[test]
    fn test_sanitize_escapes_and_coerces() {
        let form = BookInstanceForm {
            book: " 3 ".to_string(),
            imprint: " Unwin & Sons <1st> ".to_string(),
            status: "  Available ".to_string(),
            due_back: Some("2030-01-15".to_string()),
        };
        let clean = form.sanitize();
        assert_eq!(clean.book, "3");
        assert_eq!(clean.book_id(), Some(3));
        assert_eq!(clean.imprint, "Unwin &amp; Sons &lt;1st&gt;");
        assert_eq!(clean.status, "Available");
        assert_eq!(
            clean.due_back,
            Some(NaiveDate::from_ymd_opt(2030, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_sanitize_defaults_empty_status() {
        let form = BookInstanceForm {
            status: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.sanitize().status, "Maintenance");
    }

    #[test]
    fn test_url() {
        let copy = BookInstance {
            id: 9,
            book_id: 3,
            imprint: "x".to_string(),
            status: "Available".to_string(),
            due_back: None,
        };
        assert_eq!(copy.url(), "/catalog/bookinstance/9");
    }
}
