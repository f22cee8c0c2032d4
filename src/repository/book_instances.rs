//! Book instances repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceDetails, SanitizedBookInstance},
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all copies joined with their book's title
    pub async fn list_with_book(&self) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = sqlx::query_as::<_, BookInstanceDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title AS book_title,
                   bi.imprint, bi.status, bi.due_back
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            ORDER BY b.title, bi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get one copy by ID joined with its book's title
    pub async fn get_with_book(&self, id: i32) -> AppResult<BookInstanceDetails> {
        sqlx::query_as::<_, BookInstanceDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title AS book_title,
                   bi.imprint, bi.status, bi.due_back
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            WHERE bi.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// List copies of a single book
    pub async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new copy
    pub async fn create(
        &self,
        book_id: i32,
        data: &SanitizedBookInstance,
    ) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(&data.imprint)
        .bind(&data.status)
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace the mutable fields of an existing copy; the id never changes
    pub async fn update(
        &self,
        id: i32,
        book_id: i32,
        data: &SanitizedBookInstance,
    ) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(&data.imprint)
        .bind(&data.status)
        .bind(data.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Delete a copy by ID, reporting how many rows went away
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
