//! Statistics service (home page counts)

use serde::Serialize;

use crate::{error::AppResult, models::BookInstanceStatus, repository::Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All five counts, fetched concurrently; any failure fails the whole read
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let (
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        ) = tokio::try_join!(
            repo.books.count(),
            repo.book_instances.count(),
            repo.book_instances
                .count_by_status(BookInstanceStatus::Available),
            repo.authors.count(),
            repo.genres.count(),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// Store reachability, for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
