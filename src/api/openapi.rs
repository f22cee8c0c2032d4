//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLib API",
        version = "0.1.0",
        description = "Library catalog server",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance_form,
        book_instances::create_book_instance,
        book_instances::update_book_instance_form,
        book_instances::update_book_instance,
        book_instances::delete_book_instance_form,
        book_instances::delete_book_instance,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::delete_author_form,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
    ),
    components(
        schemas(
            // Book instances
            book_instances::BookInstanceView,
            book_instances::BookInstanceListView,
            book_instances::BookInstanceDetailView,
            book_instances::BookInstanceFormView,
            book_instances::BookInstanceDeleteView,
            book_instances::DeleteBookInstanceForm,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceDetails,
            crate::models::book_instance::BookInstanceForm,
            crate::models::book_instance::SanitizedBookInstance,
            crate::models::book_instance::CopyStatus,
            // Authors
            authors::AuthorView,
            authors::AuthorListView,
            authors::AuthorDetailView,
            authors::AuthorFormView,
            authors::AuthorDeleteView,
            authors::DeleteAuthorForm,
            crate::models::author::Author,
            crate::models::author::AuthorForm,
            crate::models::author::SanitizedAuthor,
            // Books
            books::BookListView,
            books::BookDetailView,
            books::BookCopyView,
            crate::models::book::Book,
            crate::models::book::BookRef,
            crate::models::book::BookDetails,
            // Shared
            crate::forms::FieldError,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookinstances", description = "Book copy management"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
