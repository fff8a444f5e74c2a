//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Main application error type
///
/// Validation failures, missing records and blocked deletes are handled as
/// outcomes (form re-render or redirect), so only storage failures are errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(sqlx::Error::PoolTimedOut) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Migration(e) => tracing::error!("Migration error: {:?}", e),
        }

        (status, views::error_page(status, "Database error")).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// True when a store error is a unique-index violation.
pub fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
        _ => false,
    }
}

/// True when a store error is a foreign-key violation (a row is still referenced).
pub fn is_foreign_key_violation(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db)) => db.is_foreign_key_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!is_unique_violation(&AppError::Database(
            sqlx::Error::RowNotFound
        )));
    }

    #[test]
    fn test_error_renders_html_page() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
