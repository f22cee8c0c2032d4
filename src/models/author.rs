//! Author model and related types

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::forms::{self, FieldError};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Birth date as an ISO date string, or empty when unset
    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    /// Death date as an ISO date string, or empty when unset
    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    /// "<birth> - <death>" with each side formatted or empty
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }

    /// Age in whole years between birth and death (or today), by calendar
    /// year/month subtraction. 0 when the birth date is unset.
    pub fn age(&self) -> i32 {
        self.age_at(Utc::now().date_naive())
    }

    pub fn age_at(&self, today: NaiveDate) -> i32 {
        let birth = match self.date_of_birth {
            Some(d) => d,
            None => return 0,
        };
        let end = self.date_of_death.unwrap_or(today);

        let mut years = end.year() - birth.year();
        if end.month() < birth.month() {
            years -= 1;
        }
        years
    }

    /// Canonical detail path for this author
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Raw author form body, as submitted
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// Author form data after trimming, escaping, and date coercion
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SanitizedAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorForm {
    /// Run the field rules in order, collecting every failure
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if forms::is_blank(&self.first_name) {
            errors.push(FieldError::new("first_name", "First name must be specified."));
        } else if self.first_name.trim().chars().count() > 100 {
            errors.push(FieldError::new(
                "first_name",
                "First name must not exceed 100 characters.",
            ));
        }

        if forms::is_blank(&self.family_name) {
            errors.push(FieldError::new("family_name", "Family name must be specified."));
        } else if self.family_name.trim().chars().count() > 100 {
            errors.push(FieldError::new(
                "family_name",
                "Family name must not exceed 100 characters.",
            ));
        }

        if forms::coerce_date(self.date_of_birth.as_deref()).is_err() {
            errors.push(FieldError::new("date_of_birth", "Invalid date of birth"));
        }
        if forms::coerce_date(self.date_of_death.as_deref()).is_err() {
            errors.push(FieldError::new("date_of_death", "Invalid date of death"));
        }

        errors
    }

    /// Sanitize regardless of validation outcome; unparseable dates
    /// coerce to `None` so rejected input can still be echoed back
    pub fn sanitize(&self) -> SanitizedAuthor {
        SanitizedAuthor {
            first_name: forms::escape_trimmed(&self.first_name),
            family_name: forms::escape_trimmed(&self.family_name),
            date_of_birth: forms::coerce_date(self.date_of_birth.as_deref()).unwrap_or(None),
            date_of_death: forms::coerce_date(self.date_of_death.as_deref()).unwrap_or(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(birth: Option<(i32, u32, u32)>, death: Option<(i32, u32, u32)>) -> Author {
        Author {
            id: 1,
            first_name: "Jorge Luis".to_string(),
            family_name: "Borges".to_string(),
            date_of_birth: birth.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            date_of_death: death.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(author(None, None).name(), "Borges, Jorge Luis");
    }

    #[test]
    fn test_formatted_dates_and_lifespan() {
        let a = author(Some((1899, 8, 24)), Some((1986, 6, 14)));
        assert_eq!(a.date_of_birth_formatted(), "1899-08-24");
        assert_eq!(a.date_of_death_formatted(), "1986-06-14");
        assert_eq!(a.lifespan(), "1899-08-24 - 1986-06-14");

        let unknown = author(None, None);
        assert_eq!(unknown.date_of_birth_formatted(), "");
        assert_eq!(unknown.lifespan(), " - ");
    }

    #[test]
    fn test_age_birth_to_death() {
        let a = author(Some((2000, 1, 1)), Some((2010, 6, 1)));
        assert_eq!(a.age(), 10);
    }

    #[test]
    fn test_age_month_before_birthday() {
        let a = author(Some((2000, 6, 1)), Some((2010, 1, 1)));
        assert_eq!(a.age(), 9);
    }

    #[test]
    fn test_age_without_birth_date() {
        assert_eq!(author(None, Some((2010, 6, 1))).age(), 0);
    }

    #[test]
    fn test_age_against_today_when_alive() {
        let a = author(Some((2000, 1, 1)), None);
        let today = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(a.age_at(today), 20);
    }

    #[test]
    fn test_url() {
        assert_eq!(author(None, None).url(), "/catalog/author/1");
    }

    #[test]
    fn test_form_validation_order_and_messages() {
        let form = AuthorForm {
            first_name: "   ".to_string(),
            family_name: String::new(),
            date_of_birth: Some("not-a-date".to_string()),
            date_of_death: None,
        };
        let errors = form.validate();
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "First name must be specified.",
                "Family name must be specified.",
                "Invalid date of birth",
            ]
        );
    }

    #[test]
    fn test_form_length_rule() {
        let form = AuthorForm {
            first_name: "x".repeat(101),
            family_name: "Ok".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "First name must not exceed 100 characters.");
    }

    #[test]
    fn test_form_sanitize_escapes_names() {
        let form = AuthorForm {
            first_name: " <b>Jane</b> ".to_string(),
            family_name: "O'Hara".to_string(),
            date_of_birth: Some("1950-01-02".to_string()),
            date_of_death: Some("garbage".to_string()),
        };
        let clean = form.sanitize();
        assert_eq!(clean.first_name, "&lt;b&gt;Jane&lt;&#x2F;b&gt;");
        assert_eq!(clean.family_name, "O&#x27;Hara");
        assert_eq!(
            clean.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1950, 1, 2).unwrap())
        );
        assert_eq!(clean.date_of_death, None);
    }
}
