//! Book instance (physical copy) model and related types

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::{
    utils::{format_date, format_date_input, parse_date},
    validation::{calendar_date, collect_errors, sanitize, sanitize_optional, FieldError},
};

/// Circulation status of a copy, stored as its variant name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    /// Allowed values, in the order forms offer them
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// Lenient parse for already-validated input; anything else reads as the default.
impl From<&str> for BookInstanceStatus {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: String,
    pub book_id: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
    // Computed field (populated when queried with a JOIN on books)
    #[sqlx(default)]
    #[serde(default)]
    pub book_title: Option<String>,
}

impl BookInstance {
    pub fn url_for(id: &str) -> String {
        format!("/catalog/bookinstance/{}", id)
    }

    pub fn url(&self) -> String {
        Self::url_for(&self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date(Some(self.due_back))
    }

    pub fn due_back_input(&self) -> String {
        format_date_input(Some(self.due_back))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookInstanceForm {
    pub book: Option<String>,
    pub imprint: Option<String>,
    pub status: Option<String>,
    pub due_back: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookInstanceInput {
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = "known_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "calendar_date"))]
    pub due_back: Option<String>,
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    match value.parse::<BookInstanceStatus>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("status");
            error.message = Some("Invalid status".into());
            Err(error)
        }
    }
}

impl BookInstanceInput {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    pub fn errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), Self::FIELDS)
    }

    /// Submitted status, Maintenance when none was given
    pub fn status(&self) -> BookInstanceStatus {
        self.status
            .as_deref()
            .map(BookInstanceStatus::from)
            .unwrap_or_default()
    }

    /// Submitted due date, today when none was given
    pub fn due_back(&self) -> NaiveDate {
        self.due_back
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl From<BookInstanceForm> for BookInstanceInput {
    fn from(form: BookInstanceForm) -> Self {
        Self {
            book: sanitize(form.book),
            imprint: sanitize(form.imprint),
            status: sanitize_optional(form.status),
            due_back: sanitize_optional(form.due_back),
        }
    }
}

impl From<&BookInstance> for BookInstanceInput {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.clone(),
            imprint: instance.imprint.clone(),
            status: Some(instance.status.to_string()),
            due_back: Some(instance.due_back_input()),
        }
    }
}
