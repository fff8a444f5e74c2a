//! Book instance endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::{back_to_list, see_other, submitted_id, BOOK_INSTANCES_URL};
use crate::{
    error::AppResult,
    models::{BookInstanceForm, BookInstanceInput},
    services::FormOutcome,
    views, AppState,
};

#[derive(Debug, Deserialize)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: Option<String>,
}

/// GET /catalog/bookinstances
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&instances))
}

/// GET /catalog/bookinstance/:id
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.detail(&id).await? {
        Some(detail) => Ok(views::book_instances::detail(&detail).into_response()),
        None => Ok(back_to_list(BOOK_INSTANCES_URL, "book instance", &id)),
    }
}

/// GET /catalog/bookinstance/create
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.choices().await?;
    Ok(views::book_instances::form(
        "Create BookInstance",
        &BookInstanceInput::default(),
        &books,
        &[],
    ))
}

/// POST /catalog/bookinstance/create
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(form).await?;
    form_response(&state, "Create BookInstance", outcome).await
}

/// GET /catalog/bookinstance/:id/update
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (instance, books) = tokio::try_join!(
        state.services.book_instances.get(&id),
        state.services.book_instances.choices(),
    )?;
    match instance {
        Some(instance) => {
            let input = BookInstanceInput::from(&instance);
            Ok(
                views::book_instances::form("Update BookInstance", &input, &books, &[])
                    .into_response(),
            )
        }
        None => Ok(back_to_list(BOOK_INSTANCES_URL, "book instance", &id)),
    }
}

/// POST /catalog/bookinstance/:id/update
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.update(&id, form).await?;
    form_response(&state, "Update BookInstance", outcome).await
}

/// GET /catalog/bookinstance/:id/delete
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.get(&id).await? {
        Some(instance) => Ok(views::book_instances::delete(&instance).into_response()),
        None => Ok(back_to_list(BOOK_INSTANCES_URL, "book instance", &id)),
    }
}

/// POST /catalog/bookinstance/:id/delete
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Response> {
    let Some(id) = submitted_id(form.bookinstanceid) else {
        return Ok(back_to_list(BOOK_INSTANCES_URL, "book instance", ""));
    };
    if state.services.book_instances.delete(&id).await? {
        Ok(see_other(BOOK_INSTANCES_URL))
    } else {
        Ok(back_to_list(BOOK_INSTANCES_URL, "book instance", &id))
    }
}

async fn form_response(
    state: &AppState,
    title: &str,
    outcome: FormOutcome<BookInstanceInput>,
) -> AppResult<Response> {
    match outcome {
        FormOutcome::Rejected { input, errors } => {
            let books = state.services.book_instances.choices().await?;
            Ok(views::book_instances::form(title, &input, &books, &errors).into_response())
        }
        FormOutcome::Saved(url) => Ok(see_other(&url)),
        FormOutcome::Missing => Ok(see_other(BOOK_INSTANCES_URL)),
    }
}
