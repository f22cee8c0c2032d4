//! Catalog service: book copies and books

use crate::{
    error::{AppError, AppResult},
    forms::FieldError,
    models::{
        book::{BookDetails, BookRef},
        book_instance::{
            BookInstance, BookInstanceDetails, BookInstanceForm, SanitizedBookInstance,
        },
    },
    repository::Repository,
};

/// Outcome of a create/update form submission
pub enum BookInstanceSubmit {
    /// Persisted; redirect to the copy's canonical URL
    Saved(BookInstance),
    /// Rejected; re-render the form with the sanitized input echoed back
    Invalid {
        bookinstance: SanitizedBookInstance,
        errors: Vec<FieldError>,
        book_list: Vec<BookRef>,
    },
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies joined with their book titles
    pub async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetails>> {
        self.repository.book_instances.list_with_book().await
    }

    /// One copy by id, joined; NotFound when the id does not resolve
    pub async fn get_book_instance(&self, id: i32) -> AppResult<BookInstanceDetails> {
        self.repository.book_instances.get_with_book(id).await
    }

    /// Candidate books for the create form's selection control
    pub async fn book_instance_create_form(&self) -> AppResult<Vec<BookRef>> {
        self.repository.books.list_refs().await
    }

    /// The target copy and the candidate book list, fetched concurrently
    /// for the update form; the first failure short-circuits
    pub async fn book_instance_update_form(
        &self,
        id: i32,
    ) -> AppResult<(BookInstanceDetails, Vec<BookRef>)> {
        let (copy, book_list) = tokio::try_join!(
            self.repository.book_instances.get_with_book(id),
            self.repository.books.list_refs(),
        )?;
        Ok((copy, book_list))
    }

    /// Validate and sanitize a create submission; persist on success,
    /// otherwise hand back the echo data for re-rendering
    pub async fn create_book_instance(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<BookInstanceSubmit> {
        let errors = form.validate();
        let clean = form.sanitize();

        if let (true, Some(book_id)) = (errors.is_empty(), clean.book_id()) {
            let created = self.repository.book_instances.create(book_id, &clean).await?;
            tracing::debug!(id = created.id, "book copy created");
            return Ok(BookInstanceSubmit::Saved(created));
        }

        let book_list = self.repository.books.list_refs().await?;
        Ok(BookInstanceSubmit::Invalid {
            bookinstance: clean,
            errors,
            book_list,
        })
    }

    /// Same pipeline as create; on success the mutable fields are
    /// replaced in place under the existing id
    pub async fn update_book_instance(
        &self,
        id: i32,
        form: BookInstanceForm,
    ) -> AppResult<BookInstanceSubmit> {
        let errors = form.validate();
        let clean = form.sanitize();

        if let (true, Some(book_id)) = (errors.is_empty(), clean.book_id()) {
            let updated = self
                .repository
                .book_instances
                .update(id, book_id, &clean)
                .await?;
            tracing::debug!(id = updated.id, "book copy updated");
            return Ok(BookInstanceSubmit::Saved(updated));
        }

        let book_list = self.repository.books.list_refs().await?;
        Ok(BookInstanceSubmit::Invalid {
            bookinstance: clean,
            errors,
            book_list,
        })
    }

    /// The copy for the delete confirmation page, or None when it is
    /// already gone (the caller redirects to the list instead)
    pub async fn book_instance_delete_view(
        &self,
        id: i32,
    ) -> AppResult<Option<BookInstanceDetails>> {
        match self.repository.book_instances.get_with_book(id).await {
            Ok(copy) => Ok(Some(copy)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a copy. Idempotent: deleting an id that no longer resolves
    /// is not an error
    pub async fn delete_book_instance(&self, id: i32) -> AppResult<()> {
        let affected = self.repository.book_instances.delete(id).await?;
        if affected == 0 {
            tracing::debug!(id, "delete of book copy affected no rows");
        }
        Ok(())
    }

    /// All books as `{id, title}` rows
    pub async fn list_books(&self) -> AppResult<Vec<BookRef>> {
        self.repository.books.list_refs().await
    }

    /// One book with author display name and its copies, fetched
    /// concurrently
    pub async fn get_book(&self, id: i32) -> AppResult<(BookDetails, Vec<BookInstance>)> {
        let (book, copies) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.book_instances.list_by_book(id),
        )?;
        Ok((book, copies))
    }
}
