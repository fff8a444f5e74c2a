//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::{back_to_list, see_other, submitted_id, GENRES_URL};
use crate::{
    error::AppResult,
    models::{GenreForm, GenreInput},
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: Option<String>,
}

/// GET /catalog/genres
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

/// GET /catalog/genre/:id
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.detail(&id).await? {
        Some(detail) => Ok(views::genres::detail(&detail).into_response()),
        None => Ok(back_to_list(GENRES_URL, "genre", &id)),
    }
}

/// GET /catalog/genre/create
pub async fn genre_create_get() -> Html<String> {
    views::genres::form("Create Genre", &GenreInput::default(), &[])
}

/// POST /catalog/genre/create
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.create(form).await?;
    Ok(form_response("Create Genre", outcome))
}

/// GET /catalog/genre/:id/update
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.get(&id).await? {
        Some(genre) => {
            let input = GenreInput::from(&genre);
            Ok(views::genres::form("Update Genre", &input, &[]).into_response())
        }
        None => Ok(back_to_list(GENRES_URL, "genre", &id)),
    }
}

/// POST /catalog/genre/:id/update
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.update(&id, form).await?;
    Ok(form_response("Update Genre", outcome))
}

/// GET /catalog/genre/:id/delete
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.detail(&id).await? {
        Some(detail) => Ok(views::genres::delete(&detail).into_response()),
        None => Ok(back_to_list(GENRES_URL, "genre", &id)),
    }
}

/// POST /catalog/genre/:id/delete
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    let Some(id) = submitted_id(form.genreid) else {
        return Ok(back_to_list(GENRES_URL, "genre", ""));
    };
    match state.services.genres.delete(&id).await? {
        DeleteOutcome::Blocked(detail) => Ok(views::genres::delete(&detail).into_response()),
        DeleteOutcome::Deleted => Ok(see_other(GENRES_URL)),
        DeleteOutcome::Missing => Ok(back_to_list(GENRES_URL, "genre", &id)),
    }
}

fn form_response(title: &str, outcome: FormOutcome<GenreInput>) -> Response {
    match outcome {
        FormOutcome::Rejected { input, errors } => {
            views::genres::form(title, &input, &errors).into_response()
        }
        FormOutcome::Saved(url) => see_other(&url),
        FormOutcome::Missing => see_other(GENRES_URL),
    }
}
