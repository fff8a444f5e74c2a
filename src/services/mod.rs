//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod stats;

use crate::{repository::Repository, validation::FieldError};

/// Result of a create or update form submission
#[derive(Debug)]
pub enum FormOutcome<I> {
    /// Validation failed; re-render the form with the sanitized input
    Rejected { input: I, errors: Vec<FieldError> },
    /// Saved, or an identical record already existed; redirect to this url
    Saved(String),
    /// The record being updated no longer exists
    Missing,
}

impl<I> FormOutcome<I> {
    pub fn rejected(input: I, errors: Vec<FieldError>) -> Self {
        tracing::debug!("Form rejected: {} error(s)", errors.len());
        FormOutcome::Rejected { input, errors }
    }
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<V> {
    Missing,
    /// Still referenced; `V` carries what the confirmation page shows
    Blocked(V),
    Deleted,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub genres: genres::GenresService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
