//! Genres repository

use sqlx::{Pool, Sqlite};

use super::new_id;
use crate::{
    error::AppResult,
    models::genre::{Genre, GenreInput},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Sqlite>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Genres attached to a book, by name
    pub async fn for_book(&self, book_id: &str) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = ?
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &GenreInput) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES (?, ?) RETURNING *",
        )
        .bind(new_id())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: &str, data: &GenreInput) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = ? WHERE id = ? RETURNING *",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
