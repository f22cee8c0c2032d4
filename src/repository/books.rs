//! Books repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetails, BookRef},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List `{id, title}` rows for selection controls, ordered by title
    pub async fn list_refs(&self) -> AppResult<Vec<BookRef>> {
        let rows = sqlx::query_as::<_, BookRef>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID, joined with its author's display name
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetails> {
        sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   a.family_name || ', ' || a.first_name AS author_name,
                   b.summary, b.isbn
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// List a single author's books
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<BookRef>> {
        let rows = sqlx::query_as::<_, BookRef>(
            "SELECT id, title FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
