//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{BookDetails, BookRef},
        book_instance::BookInstance,
    },
};

#[derive(Serialize, ToSchema)]
pub struct BookListView {
    pub title: String,
    pub book_list: Vec<BookRef>,
}

/// A copy row on the book detail page
#[derive(Serialize, ToSchema)]
pub struct BookCopyView {
    pub id: i32,
    pub imprint: String,
    pub status: String,
    pub due_back_formatted: String,
    pub url: String,
}

impl From<BookInstance> for BookCopyView {
    fn from(copy: BookInstance) -> Self {
        Self {
            url: copy.url(),
            due_back_formatted: copy
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            id: copy.id,
            imprint: copy.imprint,
            status: copy.status,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailView {
    pub title: String,
    pub book: BookDetails,
    pub url: String,
    pub book_instances: Vec<BookCopyView>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "List of all books", body = BookListView)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<BookListView>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BookListView {
        title: "Book List".to_string(),
        book_list: books,
    }))
}

/// Book detail with author display name and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book detail", body = BookDetailView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetailView>> {
    let (book, copies) = state.services.catalog.get_book(id).await?;
    Ok(Json(BookDetailView {
        title: book.title.clone(),
        url: book.url(),
        book,
        book_instances: copies.into_iter().map(Into::into).collect(),
    }))
}
