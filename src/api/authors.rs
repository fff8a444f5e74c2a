//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::{back_to_list, see_other, submitted_id, AUTHORS_URL};
use crate::{
    error::AppResult,
    models::{AuthorForm, AuthorInput},
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: Option<String>,
}

/// GET /catalog/authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

/// GET /catalog/author/:id
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.detail(&id).await? {
        Some(detail) => Ok(views::authors::detail(&detail).into_response()),
        None => Ok(back_to_list(AUTHORS_URL, "author", &id)),
    }
}

/// GET /catalog/author/create
pub async fn author_create_get() -> Html<String> {
    views::authors::form("Create Author", &AuthorInput::default(), &[])
}

/// POST /catalog/author/create
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let outcome = state.services.authors.create(form).await?;
    Ok(form_response("Create Author", outcome))
}

/// GET /catalog/author/:id/update
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.get(&id).await? {
        Some(author) => {
            let input = AuthorInput::from(&author);
            Ok(views::authors::form("Update Author", &input, &[]).into_response())
        }
        None => Ok(back_to_list(AUTHORS_URL, "author", &id)),
    }
}

/// POST /catalog/author/:id/update
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let outcome = state.services.authors.update(&id, form).await?;
    Ok(form_response("Update Author", outcome))
}

/// GET /catalog/author/:id/delete
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.detail(&id).await? {
        Some(detail) => Ok(views::authors::delete(&detail).into_response()),
        None => Ok(back_to_list(AUTHORS_URL, "author", &id)),
    }
}

/// POST /catalog/author/:id/delete (the id is taken from the form body)
pub async fn author_delete_post(
    State(state): State<AppState>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    let Some(id) = submitted_id(form.authorid) else {
        return Ok(back_to_list(AUTHORS_URL, "author", ""));
    };
    match state.services.authors.delete(&id).await? {
        DeleteOutcome::Blocked(detail) => Ok(views::authors::delete(&detail).into_response()),
        DeleteOutcome::Deleted => Ok(see_other(AUTHORS_URL)),
        DeleteOutcome::Missing => Ok(back_to_list(AUTHORS_URL, "author", &id)),
    }
}

fn form_response(title: &str, outcome: FormOutcome<AuthorInput>) -> Response {
    match outcome {
        FormOutcome::Rejected { input, errors } => {
            views::authors::form(title, &input, &errors).into_response()
        }
        FormOutcome::Saved(url) => see_other(&url),
        FormOutcome::Missing => see_other(AUTHORS_URL),
    }
}
