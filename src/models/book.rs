//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
}

impl Book {
    /// Canonical detail path for this book
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Minimal `{id, title}` row for populating selection controls
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRef {
    pub id: i32,
    pub title: String,
}

/// Book joined with its author's display name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
}

impl BookDetails {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let book = Book {
            id: 7,
            title: "Ficciones".to_string(),
            author_id: Some(1),
            summary: None,
            isbn: None,
        };
        assert_eq!(book.url(), "/catalog/book/7");
    }
}
