//! Catalog data models

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorInput};
pub use book::{Book, BookForm, BookInput, GenreChoice};
pub use book_instance::{BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceStatus};
pub use genre::{Genre, GenreForm, GenreInput};
