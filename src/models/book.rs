//! Book model and form types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{collect_errors, sanitize, split_ids, FieldError};

use super::genre::Genre;

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub summary: String,
    pub isbn: String,
    /// "family_name, first_name" of the author, when queried with a JOIN
    #[sqlx(default)]
    #[serde(default)]
    pub author_name: Option<String>,
}

impl Book {
    pub fn url_for(id: &str) -> String {
        format!("/catalog/book/{}", id)
    }

    pub fn url(&self) -> String {
        Self::url_for(&self.id)
    }
}

/// Raw book form submission. `genre` may repeat and may hold comma separated ids.
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookInput {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn"];

    pub fn errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), Self::FIELDS)
    }

    /// Pre-fill from a stored book and its current genre ids
    pub fn from_book(book: &Book, genre: Vec<String>) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre,
        }
    }
}

impl From<BookForm> for BookInput {
    fn from(form: BookForm) -> Self {
        Self {
            title: sanitize(form.title),
            author: sanitize(form.author),
            summary: sanitize(form.summary),
            isbn: sanitize(form.isbn),
            genre: split_ids(form.genre),
        }
    }
}

/// A genre offered on the book form, checked when the book carries it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreChoice {
    pub genre: Genre,
    pub checked: bool,
}

pub fn genre_choices(genres: Vec<Genre>, selected: &[String]) -> Vec<GenreChoice> {
    genres
        .into_iter()
        .map(|genre| {
            let checked = selected.iter().any(|id| *id == genre.id);
            GenreChoice { genre, checked }
        })
        .collect()
}
