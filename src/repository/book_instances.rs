//! Book instances repository

use sqlx::{Pool, Sqlite};

use super::new_id;
use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceInput, BookInstanceStatus},
};

const SELECT_WITH_BOOK: &str = r#"
    SELECT bi.*, b.title AS book_title
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Sqlite>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all copies with their book title
    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let query = format!("{} ORDER BY b.title, bi.imprint", SELECT_WITH_BOOK);
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<BookInstance>> {
        let query = format!("{} WHERE bi.id = ?", SELECT_WITH_BOOK);
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn by_book(&self, book_id: &str) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = ? ORDER BY imprint",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status())
        .bind(data.due_back())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: &str,
        data: &BookInstanceInput,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = ?, imprint = ?, status = ?, due_back = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status())
        .bind(data.due_back())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = ?")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
