//! Books repository
//!
//! A book's genres live in the `book_genres` link table; writes replace the
//! book row and its links in one transaction.

use sqlx::{Pool, Sqlite, Transaction};

use super::new_id;
use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
};

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT b.*, a.family_name || ', ' || a.first_name AS author_name
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all books (with author name) by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("{} ORDER BY b.title", SELECT_WITH_AUTHOR);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.id = ?", SELECT_WITH_AUTHOR);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = ? ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_genre(&self, genre_id: &str) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.* FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = ?
            ORDER BY b.title
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Ids of the genres linked to a book
    pub async fn genre_ids(&self, book_id: &str) -> AppResult<Vec<String>> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT genre_id FROM book_genres WHERE book_id = ?")
                .bind(book_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_one(&mut *tx)
        .await?;

        link_genres(&mut tx, &book.id, &data.genre).await?;
        tx.commit().await?;
        Ok(book)
    }

    /// Replace the book at `id`, genres included
    pub async fn update(&self, id: &str, data: &BookInput) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?, author_id = ?, summary = ?, isbn = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_genres(&mut tx, id, &data.genre).await?;
        tx.commit().await?;
        Ok(Some(book))
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

async fn link_genres(
    tx: &mut Transaction<'_, Sqlite>,
    book_id: &str,
    genre_ids: &[String],
) -> AppResult<()> {
    for genre_id in genre_ids {
        sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(genre_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
