//! Genre service

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppResult},
    models::{Book, Genre, GenreForm, GenreInput},
    repository::Repository,
    validation::FieldError,
};

#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Genre>> {
        self.repository.genres.find_by_id(id).await
    }

    pub async fn detail(&self, id: &str) -> AppResult<Option<GenreDetail>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDetail { genre, books }))
    }

    /// Create a genre; an exact name match redirects to the existing one
    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<GenreInput>> {
        let input = GenreInput::from(form);
        let errors = input.errors();
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        if let Some(existing) = self.repository.genres.find_by_name(&input.name).await? {
            tracing::info!("Genre create: '{}' already exists as id={}", input.name, existing.id);
            return Ok(FormOutcome::Saved(existing.url()));
        }

        match self.repository.genres.create(&input).await {
            Ok(genre) => {
                tracing::info!("Genre created: id={}", genre.id);
                Ok(FormOutcome::Saved(genre.url()))
            }
            Err(e) if is_unique_violation(&e) => {
                match self.repository.genres.find_by_name(&input.name).await? {
                    Some(existing) => Ok(FormOutcome::Saved(existing.url())),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update(&self, id: &str, form: GenreForm) -> AppResult<FormOutcome<GenreInput>> {
        let input = GenreInput::from(form);
        let errors = input.errors();
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        match self.repository.genres.update(id, &input).await {
            Ok(Some(genre)) => {
                tracing::info!("Genre updated: id={}", genre.id);
                Ok(FormOutcome::Saved(genre.url()))
            }
            Ok(None) => Ok(FormOutcome::Missing),
            Err(e) if is_unique_violation(&e) => {
                let errors = vec![FieldError::new("name", "Genre name already exists")];
                Ok(FormOutcome::rejected(input, errors))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete unless books are still filed under the genre
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<GenreDetail>> {
        let Some(detail) = self.detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::debug!(
                "Genre delete refused: id={} has {} book(s)",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }

        match self.repository.genres.delete(id).await {
            Ok(true) => {
                tracing::info!("Genre deleted: id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Ok(false) => Ok(DeleteOutcome::Missing),
            Err(e) if is_foreign_key_violation(&e) => match self.detail(id).await? {
                Some(detail) => Ok(DeleteOutcome::Blocked(detail)),
                None => Ok(DeleteOutcome::Missing),
            },
            Err(e) => Err(e),
        }
    }
}
