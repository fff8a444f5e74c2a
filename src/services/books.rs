//! Book service

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{is_foreign_key_violation, AppResult},
    models::{Author, Book, BookForm, BookInput, BookInstance, Genre},
    repository::Repository,
    validation::FieldError,
};

/// A book with its author and genres resolved, plus its copies
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// A book with the copies that reference it (delete page)
#[derive(Debug, Clone)]
pub struct BookCopies {
    pub book: Book,
    pub instances: Vec<BookInstance>,
}

/// Reference data for the book form
#[derive(Debug, Clone, Default)]
pub struct BookChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn detail(&self, id: &str) -> AppResult<Option<BookDetail>> {
        let (book, genres, instances) = tokio::try_join!(
            self.find_with_author(id),
            self.repository.genres.for_book(id),
            self.repository.book_instances.by_book(id),
        )?;
        Ok(book.map(|(book, author)| BookDetail {
            book,
            author,
            genres,
            instances,
        }))
    }

    async fn find_with_author(&self, id: &str) -> AppResult<Option<(Book, Option<Author>)>> {
        let Some(book) = self.repository.books.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = self.repository.authors.find_by_id(&book.author_id).await?;
        Ok(Some((book, author)))
    }

    /// All authors and genres, for the create and update forms
    pub async fn choices(&self) -> AppResult<BookChoices> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok(BookChoices { authors, genres })
    }

    /// Current values of a book as form input
    pub async fn edit_input(&self, id: &str) -> AppResult<Option<(Book, BookInput)>> {
        let (book, genre_ids) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.books.genre_ids(id),
        )?;
        Ok(book.map(|book| {
            let input = BookInput::from_book(&book, genre_ids);
            (book, input)
        }))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<BookInput>> {
        let input = BookInput::from(form);
        let errors = self.check(&input).await?;
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        let book = self.repository.books.create(&input).await?;
        tracing::info!("Book created: id={}", book.id);
        Ok(FormOutcome::Saved(book.url()))
    }

    pub async fn update(&self, id: &str, form: BookForm) -> AppResult<FormOutcome<BookInput>> {
        let input = BookInput::from(form);
        let errors = self.check(&input).await?;
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(input, errors));
        }

        match self.repository.books.update(id, &input).await? {
            Some(book) => {
                tracing::info!("Book updated: id={}", book.id);
                Ok(FormOutcome::Saved(book.url()))
            }
            None => Ok(FormOutcome::Missing),
        }
    }

    pub async fn copies(&self, id: &str) -> AppResult<Option<BookCopies>> {
        let (book, instances) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.book_instances.by_book(id),
        )?;
        Ok(book.map(|book| BookCopies { book, instances }))
    }

    /// Delete unless copies of the book still exist
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<BookCopies>> {
        let Some(copies) = self.copies(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !copies.instances.is_empty() {
            tracing::debug!(
                "Book delete refused: id={} has {} copies",
                id,
                copies.instances.len()
            );
            return Ok(DeleteOutcome::Blocked(copies));
        }

        match self.repository.books.delete(id).await {
            Ok(true) => {
                tracing::info!("Book deleted: id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Ok(false) => Ok(DeleteOutcome::Missing),
            Err(e) if is_foreign_key_violation(&e) => match self.copies(id).await? {
                Some(copies) => Ok(DeleteOutcome::Blocked(copies)),
                None => Ok(DeleteOutcome::Missing),
            },
            Err(e) => Err(e),
        }
    }

    /// Field rules, then existence of the referenced author and genres
    async fn check(&self, input: &BookInput) -> AppResult<Vec<FieldError>> {
        let mut errors = input.errors();
        if !errors.is_empty() {
            return Ok(errors);
        }

        if self.repository.authors.find_by_id(&input.author).await?.is_none() {
            errors.push(FieldError::new("author", "Author not found"));
        }
        for genre_id in &input.genre {
            if self.repository.genres.find_by_id(genre_id).await?.is_none() {
                errors.push(FieldError::new("genre", "Genre not found"));
                break;
            }
        }
        Ok(errors)
    }
}
