//! Authors service

use crate::{
    error::{AppError, AppResult},
    forms::FieldError,
    models::{
        author::{Author, AuthorForm, SanitizedAuthor},
        book::BookRef,
    },
    repository::Repository,
};

/// Outcome of an author create submission
pub enum AuthorSubmit {
    Saved(Author),
    Invalid {
        author: SanitizedAuthor,
        errors: Vec<FieldError>,
    },
}

/// Outcome of an author delete request
pub enum AuthorDelete {
    /// Gone (or already gone); redirect to the author list
    Deleted,
    /// The author still has books; deletion is blocked and the
    /// confirmation page is re-rendered
    HasBooks { author: Author, books: Vec<BookRef> },
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors ordered by family name
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// One author and their books, fetched concurrently; NotFound when
    /// the id does not resolve
    pub async fn get_author(&self, id: i32) -> AppResult<(Author, Vec<BookRef>)> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.list_by_author(id),
        )?;
        Ok((author, books))
    }

    /// Validate and sanitize a create submission; persist on success
    pub async fn create_author(&self, form: AuthorForm) -> AppResult<AuthorSubmit> {
        let errors = form.validate();
        let clean = form.sanitize();

        if !errors.is_empty() {
            return Ok(AuthorSubmit::Invalid {
                author: clean,
                errors,
            });
        }

        let created = self.repository.authors.create(&clean).await?;
        tracing::debug!(id = created.id, "author created");
        Ok(AuthorSubmit::Saved(created))
    }

    /// The author and books for the delete confirmation page, or None
    /// when the author is already gone
    pub async fn author_delete_view(
        &self,
        id: i32,
    ) -> AppResult<Option<(Author, Vec<BookRef>)>> {
        match self.get_author(id).await {
            Ok(pair) => Ok(Some(pair)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete an author unless books still reference them. Deleting an
    /// id that no longer resolves is not an error
    pub async fn delete_author(&self, id: i32) -> AppResult<AuthorDelete> {
        let (author, books) = match self.get_author(id).await {
            Ok(pair) => pair,
            Err(AppError::NotFound(_)) => {
                tracing::debug!(id, "delete of author affected no rows");
                return Ok(AuthorDelete::Deleted);
            }
            Err(e) => return Err(e),
        };

        if !books.is_empty() {
            return Ok(AuthorDelete::HasBooks { author, books });
        }

        self.repository.authors.delete(id).await?;
        Ok(AuthorDelete::Deleted)
    }
}
