//! Author service

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppResult},
    models::{Author, AuthorForm, AuthorInput, Book},
    repository::Repository,
    validation::FieldError,
};

/// An author with the books that reference it (detail and delete pages)
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Author>> {
        self.repository.authors.find_by_id(id).await
    }

    /// Author and its books, fetched concurrently
    pub async fn detail(&self, id: &str) -> AppResult<Option<AuthorDetail>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.by_author(id),
        )?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    /// Create an author, or point at the identical one that already exists
    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<AuthorInput>> {
        let input = AuthorInput::from(form);
        let errors = input.errors();
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        if let Some(existing) = self.repository.authors.find_existing(&input).await? {
            tracing::info!("Author create: already exists as id={}", existing.id);
            return Ok(FormOutcome::Saved(existing.url()));
        }

        match self.repository.authors.create(&input).await {
            Ok(author) => {
                tracing::info!("Author created: id={}", author.id);
                Ok(FormOutcome::Saved(author.url()))
            }
            // A concurrent submission inserted the same author first
            Err(e) if is_unique_violation(&e) => {
                match self.repository.authors.find_existing(&input).await? {
                    Some(existing) => Ok(FormOutcome::Saved(existing.url())),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the author at `id` with the submitted fields
    pub async fn update(&self, id: &str, form: AuthorForm) -> AppResult<FormOutcome<AuthorInput>> {
        let input = AuthorInput::from(form);
        let errors = input.errors();
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        match self.repository.authors.update(id, &input).await {
            Ok(Some(author)) => {
                tracing::info!("Author updated: id={}", author.id);
                Ok(FormOutcome::Saved(author.url()))
            }
            Ok(None) => Ok(FormOutcome::Missing),
            Err(e) if is_unique_violation(&e) => {
                let errors = vec![FieldError::new(
                    "family_name",
                    "An author with this name and date of birth already exists.",
                )];
                Ok(FormOutcome::rejected(input, errors))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete unless books still reference the author
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let Some(detail) = self.detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::debug!(
                "Author delete refused: id={} has {} book(s)",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }

        match self.repository.authors.delete(id).await {
            Ok(true) => {
                tracing::info!("Author deleted: id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Ok(false) => Ok(DeleteOutcome::Missing),
            // A book was attached between the check and the delete
            Err(e) if is_foreign_key_violation(&e) => match self.detail(id).await? {
                Some(detail) => Ok(DeleteOutcome::Blocked(detail)),
                None => Ok(DeleteOutcome::Missing),
            },
            Err(e) => Err(e),
        }
    }
}
