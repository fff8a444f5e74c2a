//! Authors repository

use sqlx::{Pool, Sqlite};

use super::new_id;
use crate::{
    error::AppResult,
    models::author::{Author, AuthorInput},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all authors by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY family_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Exact match on first name, family name and date of birth
    pub async fn find_existing(&self, data: &AuthorInput) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            SELECT * FROM authors
            WHERE first_name = ?
              AND family_name = ?
              AND COALESCE(date_of_birth, '') = COALESCE(?, '')
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth())
        .bind(data.date_of_death())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every stored field of the author at `id`
    pub async fn update(&self, id: &str, data: &AuthorInput) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = ?, family_name = ?, date_of_birth = ?, date_of_death = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth())
        .bind(data.date_of_death())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns false when nothing was deleted
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
