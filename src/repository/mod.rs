//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub genres: genres::GenresRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open a connection pool for the configured database
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<Sqlite>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(pool)
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &Pool<Sqlite>) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Fresh opaque identifier for a new record
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
