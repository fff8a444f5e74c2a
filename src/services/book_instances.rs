//! Book instance service

use super::FormOutcome;
use crate::{
    error::AppResult,
    models::{Book, BookInstance, BookInstanceForm, BookInstanceInput},
    repository::Repository,
    validation::FieldError,
};

#[derive(Debug, Clone)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.book_instances.list().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<BookInstance>> {
        self.repository.book_instances.find_by_id(id).await
    }

    /// A copy with its book resolved
    pub async fn detail(&self, id: &str) -> AppResult<Option<BookInstanceDetail>> {
        let Some(instance) = self.repository.book_instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books.find_by_id(&instance.book_id).await?;
        Ok(Some(BookInstanceDetail { instance, book }))
    }

    /// All books, for the create and update forms
    pub async fn choices(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceInput>> {
        let input = BookInstanceInput::from(form);
        let errors = self.check(&input).await?;
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        let instance = self.repository.book_instances.create(&input).await?;
        tracing::info!("Book instance created: id={}", instance.id);
        Ok(FormOutcome::Saved(instance.url()))
    }

    pub async fn update(
        &self,
        id: &str,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceInput>> {
        let input = BookInstanceInput::from(form);
        let errors = self.check(&input).await?;
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        match self.repository.book_instances.update(id, &input).await? {
            Some(instance) => {
                tracing::info!("Book instance updated: id={}", instance.id);
                Ok(FormOutcome::Saved(instance.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    /// Nothing references a copy, so a delete never blocks; false when the
    /// copy no longer exists
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted = self.repository.book_instances.delete(id).await?;
        if deleted {
            tracing::info!("Book instance deleted: id={}", id);
        }
        Ok(deleted)
    }

    async fn check(&self, input: &BookInstanceInput) -> AppResult<Vec<FieldError>> {
        let mut errors = input.errors();
        if errors.iter().any(|e| e.field == "book") {
            return Ok(errors);
        }
        if self.repository.books.find_by_id(&input.book).await?.is_none() {
            errors.insert(0, FieldError::new("book", "Book not found"));
        }
        Ok(errors)
    }
}
