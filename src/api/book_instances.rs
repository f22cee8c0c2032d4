//! Book instance (copy) endpoints

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
        book::BookRef,
        book_instance::{
            BookInstanceDetails, BookInstanceForm, CopyStatus, SanitizedBookInstance,
        },
    },
    services::catalog::BookInstanceSubmit,
};

/// A copy as rendered in list/detail/delete views, derived fields included
#[derive(Serialize, ToSchema)]
pub struct BookInstanceView {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub due_back_formatted: String,
    pub url: String,
}

impl From<BookInstanceDetails> for BookInstanceView {
    fn from(copy: BookInstanceDetails) -> Self {
        Self {
            url: copy.url(),
            due_back_formatted: copy.due_back_formatted(),
            id: copy.id,
            book_id: copy.book_id,
            book_title: copy.book_title,
            imprint: copy.imprint,
            status: copy.status,
            due_back: copy.due_back,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceListView {
    pub title: String,
    pub bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceDetailView {
    pub title: String,
    pub bookinstance: BookInstanceView,
}

/// The create/update form view-model; on rejected submissions the
/// sanitized input is echoed back alongside the ordered error list
#[derive(Serialize, ToSchema)]
pub struct BookInstanceFormView {
    pub title: String,
    pub book_list: Vec<BookRef>,
    pub status_list: Vec<&'static str>,
    pub bookinstance: Option<SanitizedBookInstance>,
    pub selected_book: Option<i32>,
    pub errors: Vec<FieldError>,
}

impl BookInstanceFormView {
    fn new(title: &str, book_list: Vec<BookRef>) -> Self {
        Self {
            title: title.to_string(),
            book_list,
            status_list: CopyStatus::ALL.iter().map(|s| s.as_str()).collect(),
            bookinstance: None,
            selected_book: None,
            errors: Vec::new(),
        }
    }

    fn with_input(
        mut self,
        bookinstance: SanitizedBookInstance,
        errors: Vec<FieldError>,
    ) -> Self {
        self.selected_book = bookinstance.book_id();
        self.bookinstance = Some(bookinstance);
        self.errors = errors;
        self
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceDeleteView {
    pub title: String,
    pub bookinstance: BookInstanceView,
}

/// List all copies
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "List of all copies", body = BookInstanceListView)
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookInstanceListView>> {
    let copies = state.services.catalog.list_book_instances().await?;
    Ok(Json(BookInstanceListView {
        title: "Book Instance List".to_string(),
        bookinstance_list: copies.into_iter().map(Into::into).collect(),
    }))
}

/// Copy detail by ID
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy detail", body = BookInstanceDetailView),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookInstanceDetailView>> {
    let copy = state.services.catalog.get_book_instance(id).await?;
    Ok(Json(BookInstanceDetailView {
        title: format!("Copy: {}", copy.book_title),
        bookinstance: copy.into(),
    }))
}

/// Empty create form with the candidate book list
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Create form", body = BookInstanceFormView)
    )
)]
pub async fn create_book_instance_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookInstanceFormView>> {
    let book_list = state.services.catalog.book_instance_create_form().await?;
    Ok(Json(BookInstanceFormView::new(
        "Create BookInstance",
        book_list,
    )))
}

/// Create a copy; redirects to the new copy on success, re-renders the
/// form with errors otherwise
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Validation failed, form re-rendered", body = BookInstanceFormView),
        (status = 303, description = "Created, redirect to the copy detail")
    )
)]
pub async fn create_book_instance(
    State(state): State<crate::AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book_instance(form).await? {
        BookInstanceSubmit::Saved(copy) => Ok(Redirect::to(&copy.url()).into_response()),
        BookInstanceSubmit::Invalid {
            bookinstance,
            errors,
            book_list,
        } => Ok(Json(
            BookInstanceFormView::new("Create BookInstance", book_list)
                .with_input(bookinstance, errors),
        )
        .into_response()),
    }
}

/// Update form pre-populated with the copy's current values
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Update form", body = BookInstanceFormView),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_book_instance_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookInstanceFormView>> {
    let (copy, book_list) = state.services.catalog.book_instance_update_form(id).await?;
    let current = SanitizedBookInstance {
        book: copy.book_id.to_string(),
        imprint: copy.imprint,
        status: copy.status,
        due_back: copy.due_back,
    };
    Ok(Json(
        BookInstanceFormView::new("Update BookInstance", book_list)
            .with_input(current, Vec::new()),
    ))
}

/// Update a copy in place; the id never changes
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Validation failed, form re-rendered", body = BookInstanceFormView),
        (status = 303, description = "Updated, redirect to the copy detail"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.catalog.update_book_instance(id, form).await? {
        BookInstanceSubmit::Saved(copy) => Ok(Redirect::to(&copy.url()).into_response()),
        BookInstanceSubmit::Invalid {
            bookinstance,
            errors,
            book_list,
        } => Ok(Json(
            BookInstanceFormView::new("Update BookInstance", book_list)
                .with_input(bookinstance, errors),
        )
        .into_response()),
    }
}

/// Delete confirmation page; a copy that is already gone redirects to
/// the list instead
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = BookInstanceDeleteView),
        (status = 303, description = "Copy already gone, redirect to the list")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.catalog.book_instance_delete_view(id).await? {
        Some(copy) => Ok(Json(BookInstanceDeleteView {
            title: "Delete BookInstance".to_string(),
            bookinstance: copy.into(),
        })
        .into_response()),
        None => Ok(Redirect::to("/catalog/bookinstances").into_response()),
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: i32,
}

/// Delete a copy by the id in the form body, then redirect to the list.
/// Deleting twice redirects both times.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = i32, Path, description = "Copy ID")
    ),
    request_body(content = DeleteBookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete_book_instance(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Redirect> {
    state
        .services
        .catalog
        .delete_book_instance(form.bookinstanceid)
        .await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}
