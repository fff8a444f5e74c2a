//! Home page

use axum::{extract::State, response::Html};

use crate::{error::AppResult, views, AppState};

/// GET / and GET /catalog
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.stats.counts().await?;
    Ok(views::home::index(&counts))
}
