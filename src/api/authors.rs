//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    forms::FieldError,
    models::{
        author::{Author, AuthorForm, SanitizedAuthor},
        book::BookRef,
    },
    services::authors::{AuthorDelete, AuthorSubmit},
};

/// An author as rendered in list/detail views, derived fields included
#[derive(Serialize, ToSchema)]
pub struct AuthorView {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub lifespan: String,
    pub age: i32,
    pub url: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            name: author.name(),
            date_of_birth_formatted: author.date_of_birth_formatted(),
            date_of_death_formatted: author.date_of_death_formatted(),
            lifespan: author.lifespan(),
            age: author.age(),
            url: author.url(),
            id: author.id,
            first_name: author.first_name,
            family_name: author.family_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthorListView {
    pub title: String,
    pub author_list: Vec<AuthorView>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDetailView {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookRef>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorFormView {
    pub title: String,
    pub author: Option<SanitizedAuthor>,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDeleteView {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookRef>,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of all authors", body = AuthorListView)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AuthorListView>> {
    let authors = state.services.authors.list_authors().await?;
    Ok(Json(AuthorListView {
        title: "Author List".to_string(),
        author_list: authors.into_iter().map(Into::into).collect(),
    }))
}

/// Author detail with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author detail", body = AuthorDetailView),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetailView>> {
    let (author, books) = state.services.authors.get_author(id).await?;
    Ok(Json(AuthorDetailView {
        title: "Author Detail".to_string(),
        author: author.into(),
        author_books: books,
    }))
}

/// Empty author create form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Create form", body = AuthorFormView)
    )
)]
pub async fn create_author_form() -> Json<AuthorFormView> {
    Json(AuthorFormView {
        title: "Create Author".to_string(),
        author: None,
        errors: Vec::new(),
    })
}

/// Create an author; redirects to the new author on success
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Validation failed, form re-rendered", body = AuthorFormView),
        (status = 303, description = "Created, redirect to the author detail")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create_author(form).await? {
        AuthorSubmit::Saved(author) => Ok(Redirect::to(&author.url()).into_response()),
        AuthorSubmit::Invalid { author, errors } => Ok(Json(AuthorFormView {
            title: "Create Author".to_string(),
            author: Some(author),
            errors,
        })
        .into_response()),
    }
}

/// Delete confirmation page; an author that is already gone redirects
/// to the list instead
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = AuthorDeleteView),
        (status = 303, description = "Author already gone, redirect to the list")
    )
)]
pub async fn delete_author_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.authors.author_delete_view(id).await? {
        Some((author, books)) => Ok(Json(AuthorDeleteView {
            title: "Delete Author".to_string(),
            author: author.into(),
            author_books: books,
        })
        .into_response()),
        None => Ok(Redirect::to("/catalog/authors").into_response()),
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteAuthorForm {
    pub authorid: i32,
}

/// Delete an author by the id in the form body. An author with books is
/// not deleted; the confirmation page is re-rendered instead.
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body(content = DeleteAuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Author still has books, confirmation re-rendered", body = AuthorDeleteView),
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.delete_author(form.authorid).await? {
        AuthorDelete::Deleted => Ok(Redirect::to("/catalog/authors").into_response()),
        AuthorDelete::HasBooks { author, books } => Ok(Json(AuthorDeleteView {
            title: "Delete Author".to_string(),
            author: author.into(),
            author_books: books,
        })
        .into_response()),
    }
}
