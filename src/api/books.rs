//! Book endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::Form as MultiForm;
use serde::Deserialize;

use super::{back_to_list, see_other, submitted_id, BOOKS_URL};
use crate::{
    error::AppResult,
    models::{BookForm, BookInput},
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteBookForm {
    pub bookid: Option<String>,
}

/// GET /catalog/books
pub async fn book_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

/// GET /catalog/book/:id
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.detail(&id).await? {
        Some(detail) => Ok(views::books::detail(&detail).into_response()),
        None => Ok(back_to_list(BOOKS_URL, "book", &id)),
    }
}

/// GET /catalog/book/create
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let choices = state.services.books.choices().await?;
    Ok(views::books::form("Create Book", &BookInput::default(), &choices, &[]))
}

/// POST /catalog/book/create
///
/// `genre` arrives once per checked box, so this uses the form extractor
/// that collects repeated keys.
pub async fn book_create_post(
    State(state): State<AppState>,
    MultiForm(form): MultiForm<BookForm>,
) -> AppResult<Response> {
    let outcome = state.services.books.create(form).await?;
    form_response(&state, "Create Book", outcome).await
}

/// GET /catalog/book/:id/update
pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (edit, choices) = tokio::try_join!(
        state.services.books.edit_input(&id),
        state.services.books.choices(),
    )?;
    match edit {
        Some((_, input)) => {
            Ok(views::books::form("Update Book", &input, &choices, &[]).into_response())
        }
        None => Ok(back_to_list(BOOKS_URL, "book", &id)),
    }
}

/// POST /catalog/book/:id/update
pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MultiForm(form): MultiForm<BookForm>,
) -> AppResult<Response> {
    let outcome = state.services.books.update(&id, form).await?;
    form_response(&state, "Update Book", outcome).await
}

/// GET /catalog/book/:id/delete
pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.copies(&id).await? {
        Some(copies) => Ok(views::books::delete(&copies).into_response()),
        None => Ok(back_to_list(BOOKS_URL, "book", &id)),
    }
}

/// POST /catalog/book/:id/delete
pub async fn book_delete_post(
    State(state): State<AppState>,
    Form(form): Form<DeleteBookForm>,
) -> AppResult<Response> {
    let Some(id) = submitted_id(form.bookid) else {
        return Ok(back_to_list(BOOKS_URL, "book", ""));
    };
    match state.services.books.delete(&id).await? {
        DeleteOutcome::Blocked(copies) => Ok(views::books::delete(&copies).into_response()),
        DeleteOutcome::Deleted => Ok(see_other(BOOKS_URL)),
        DeleteOutcome::Missing => Ok(back_to_list(BOOKS_URL, "book", &id)),
    }
}

/// A rejected book form needs the author and genre lists again
async fn form_response(
    state: &AppState,
    title: &str,
    outcome: FormOutcome<BookInput>,
) -> AppResult<Response> {
    match outcome {
        FormOutcome::Rejected { input, errors } => {
            let choices = state.services.books.choices().await?;
            Ok(views::books::form(title, &input, &choices, &errors).into_response())
        }
        FormOutcome::Saved(url) => Ok(see_other(&url)),
        FormOutcome::Missing => Ok(see_other(BOOKS_URL)),
    }
}
