//! HTTP handlers and routing for the catalog

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

pub const AUTHORS_URL: &str = "/catalog/authors";
pub const BOOKS_URL: &str = "/catalog/books";
pub const BOOK_INSTANCES_URL: &str = "/catalog/bookinstances";
pub const GENRES_URL: &str = "/catalog/genres";

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(home::index))
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Books
        .route("/books", get(books::book_list))
        .route(
            "/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/book/:id", get(books::book_detail))
        .route(
            "/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        )
        .route(
            "/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get)
                .post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get)
                .post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get)
                .post(book_instances::bookinstance_update_post),
        )
        // Genres
        .route("/genres", get(genres::genre_list))
        .route(
            "/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/genre/:id", get(genres::genre_detail))
        .route(
            "/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        );

    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}

/// Navigate back to a list page (unknown id, or nothing left to act on)
pub(crate) fn back_to_list(list_url: &str, what: &str, id: &str) -> Response {
    tracing::debug!("No {} with id={}, redirecting to {}", what, id, list_url);
    Redirect::to(list_url).into_response()
}

/// Redirect (303) after a successful write
pub(crate) fn see_other(url: &str) -> Response {
    Redirect::to(url).into_response()
}

/// Id carried in a delete form body; blank counts as absent
pub(crate) fn submitted_id(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
