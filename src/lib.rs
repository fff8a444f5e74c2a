//! Local Library
//!
//! A server-rendered catalog of authors, books, genres and the physical
//! copies a small library holds, with list, detail, create, update and
//! delete pages for each.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
